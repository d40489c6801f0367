//! Canvas FX - four small 2D canvas effects on one particle core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, particle system, flow field)
//! - `renderer`: Drawing surface abstraction and entity drawing
//! - `effects`: Bouncing balls, particles, flow field and tendrils
//! - `session`: Process-wide context driven by the frame callback
//! - `platform`: Browser input and canvas bindings
//! - `settings`: Data-driven effect tuning

pub mod effects;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use effects::{Effect, EffectKind};
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Effect configuration constants
pub mod consts {
    /// Host frame interval the effects assume (ms, ~60 Hz)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

    /// Bouncing balls
    pub const BALL_COUNT: usize = 10;
    pub const BALL_RADIUS: f32 = 20.0;
    /// Highlight offset of the ball gradient, as a fraction of the radius
    pub const BALL_HIGHLIGHT_OFFSET: f32 = 0.3;
    /// Inner radius of the ball gradient highlight
    pub const BALL_HIGHLIGHT_RADIUS: f32 = 3.0;

    /// Per-axis speed range for balls and particles (px per tick)
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 6.0;

    /// Fading particles
    pub const PARTICLE_HUE: f32 = 220.0;
    pub const PARTICLE_FADE_RATE: f32 = 0.01;
    pub const PARTICLE_MIN_RADIUS: f32 = 5.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 25.0;

    /// Tendrils
    pub const TENDRIL_HEAD_RADIUS: f32 = 50.0;
    pub const TENDRIL_RADIUS_STEP: f32 = 0.5;
    pub const TENDRIL_OPACITY: f32 = 0.6;
    pub const TENDRIL_MAX_STEP: f32 = 3.0;
    /// Tendril anchor sits this far below the surface center
    pub const TENDRIL_DROP: f32 = 100.0;
    pub const TENDRIL_MIN_COUNT: usize = 5;
    pub const TENDRIL_MAX_COUNT: usize = 20;

    /// Hue change per key press (degrees)
    pub const HUE_STEP: f32 = 20.0;

    /// Opacity at or below this counts as fully faded
    pub const OPACITY_EPSILON: f32 = 1e-4;
}

/// Drawing surface dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions as a float vector
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Center of the surface (origin on an empty surface)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Wrap a hue in degrees to [0, 360)
#[inline]
pub fn wrap_hue(hue: f32) -> f32 {
    hue.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_hue() {
        assert_eq!(wrap_hue(380.0), 20.0);
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(-20.0), 340.0);
        assert_eq!(wrap_hue(220.0), 220.0);
    }

    #[test]
    fn test_bounds_center() {
        assert_eq!(Bounds::new(800, 600).center(), Vec2::new(400.0, 300.0));
        assert_eq!(Bounds::new(0, 0).center(), Vec2::ZERO);
        assert!(Bounds::new(0, 10).is_empty());
    }
}
