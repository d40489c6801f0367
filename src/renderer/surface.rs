//! Drawing surface abstraction
//!
//! A small immediate-mode subset of the 2D canvas API. The browser build
//! implements it over `CanvasRenderingContext2d`; tests and the native runner
//! use the command [`Recorder`](super::Recorder).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::composite::CompositeMode;
use crate::Bounds;

/// A color in either HSL or RGB space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// Hue in degrees, saturation/lightness in percent, alpha 0-1
    Hsla { h: f32, s: f32, l: f32, a: f32 },
    Rgb([u8; 3]),
}

impl Color {
    pub const WHITE: Color = Color::Rgb([0xff, 0xff, 0xff]);
    pub const BLACK: Color = Color::Rgb([0x00, 0x00, 0x00]);

    pub const fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Color::Hsla { h, s, l, a }
    }

    /// Fully opaque HSL color
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Color::Hsla { h, s, l, a: 1.0 }
    }

    /// From a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> Self {
        Color::Rgb([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        match self {
            Color::Hsla { h, s, l, a } => format!("hsla({h}, {s}%, {l}%, {a})"),
            Color::Rgb([r, g, b]) => format!("#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// A gradient stop at `offset` in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradient between two circles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

/// Gradient along a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

/// Fill or stroke style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Immediate-mode 2D drawing target
///
/// Fill/stroke styles, alpha, line width and compositing mode are sticky state
/// until changed or until the matching `restore`.
pub trait Surface {
    /// Current pixel dimensions
    fn bounds(&self) -> Bounds;

    /// Erase the whole surface to transparent
    fn clear(&mut self);

    /// Push the drawing state
    fn save(&mut self);

    /// Pop the drawing state
    fn restore(&mut self);

    fn set_composite(&mut self, mode: CompositeMode);

    fn set_global_alpha(&mut self, alpha: f32);

    fn set_line_width(&mut self, width: f32);

    fn set_fill(&mut self, paint: &Paint);

    fn set_stroke(&mut self, paint: &Paint);

    fn fill_circle(&mut self, center: Vec2, radius: f32);

    fn stroke_circle(&mut self, center: Vec2, radius: f32);

    fn stroke_line(&mut self, from: Vec2, to: Vec2);
}
