//! Pixel compositing modes

use serde::{Deserialize, Serialize};

/// Canvas compositing operation, in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompositeMode {
    #[default]
    SourceOver,
    DestinationOver,
    Lighter,
    Xor,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl CompositeMode {
    /// Every mode, in cycling order
    pub const ALL: [CompositeMode; 19] = [
        CompositeMode::SourceOver,
        CompositeMode::DestinationOver,
        CompositeMode::Lighter,
        CompositeMode::Xor,
        CompositeMode::Multiply,
        CompositeMode::Screen,
        CompositeMode::Overlay,
        CompositeMode::Darken,
        CompositeMode::Lighten,
        CompositeMode::ColorDodge,
        CompositeMode::ColorBurn,
        CompositeMode::HardLight,
        CompositeMode::SoftLight,
        CompositeMode::Difference,
        CompositeMode::Exclusion,
        CompositeMode::Hue,
        CompositeMode::Saturation,
        CompositeMode::Color,
        CompositeMode::Luminosity,
    ];

    /// Name as used by `globalCompositeOperation`
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::DestinationOver => "destination-over",
            CompositeMode::Lighter => "lighter",
            CompositeMode::Xor => "xor",
            CompositeMode::Multiply => "multiply",
            CompositeMode::Screen => "screen",
            CompositeMode::Overlay => "overlay",
            CompositeMode::Darken => "darken",
            CompositeMode::Lighten => "lighten",
            CompositeMode::ColorDodge => "color-dodge",
            CompositeMode::ColorBurn => "color-burn",
            CompositeMode::HardLight => "hard-light",
            CompositeMode::SoftLight => "soft-light",
            CompositeMode::Difference => "difference",
            CompositeMode::Exclusion => "exclusion",
            CompositeMode::Hue => "hue",
            CompositeMode::Saturation => "saturation",
            CompositeMode::Color => "color",
            CompositeMode::Luminosity => "luminosity",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|mode| mode.as_str() == s)
    }

    /// Position in [`CompositeMode::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|mode| mode == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Next mode, wrapping to the first
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous mode, wrapping to the last
    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }
}
