//! Entity types shared by the particle-based effects

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tendril::Tendril;
use crate::consts::{MAX_SPEED, MIN_SPEED, OPACITY_EPSILON};

/// Per-axis speed magnitude range `[min, max)` in px per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min: MIN_SPEED,
            max: MAX_SPEED,
        }
    }
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Whether `speed` is a magnitude this range can produce
    pub fn contains(&self, speed: f32) -> bool {
        let speed = speed.abs();
        speed >= self.min && speed <= self.max
    }

    /// Random velocity with each axis drawn independently
    pub fn random_velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(random_axis_speed(rng, *self), random_axis_speed(rng, *self))
    }
}

/// Magnitude from the range, sign chosen by a coin flip
fn random_axis_speed<R: Rng + ?Sized>(rng: &mut R, range: SpeedRange) -> f32 {
    let magnitude = range.min + rng.random::<f32>() * (range.max - range.min);
    if rng.random_bool(0.5) { magnitude } else { -magnitude }
}

/// How the particle system moves an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    /// Integrate velocity and reflect off the surface edges
    Bounce,
    /// Stay put; only the shape animates
    Anchored,
}

/// Visual form of an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    /// Shaded ball (white highlight into the hue)
    Sphere,
    /// Flat disc tinted by hue and opacity
    Disc,
    /// Chain of shrinking segments relative to the entity position
    Tendril(Tendril),
}

/// A ball, particle or tendril
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Hue in degrees
    pub hue: f32,
    /// 0-1, decreases by `fade_rate` each tick
    pub opacity: f32,
    /// Opacity lost per tick (0 = never fades)
    pub fade_rate: f32,
    pub motion: Motion,
    pub shape: Shape,
    pub alive: bool,
    /// Already resolved a collision this frame
    #[serde(skip)]
    pub handled: bool,
}

impl Entity {
    /// A bouncing, non-fading entity
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, shape: Shape) -> Self {
        Self {
            pos,
            vel,
            radius,
            hue: 0.0,
            opacity: 1.0,
            fade_rate: 0.0,
            motion: Motion::Bounce,
            shape,
            alive: true,
            handled: false,
        }
    }

    pub fn with_hue(mut self, hue: f32) -> Self {
        self.hue = hue;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_fade(mut self, fade_rate: f32) -> Self {
        self.fade_rate = fade_rate;
        self
    }

    pub fn anchored(mut self) -> Self {
        self.motion = Motion::Anchored;
        self
    }

    /// Position one step ahead
    #[inline]
    pub fn predicted_pos(&self) -> Vec2 {
        self.pos + self.vel
    }

    /// Pick a new random heading
    pub fn randomize_direction<R: Rng + ?Sized>(&mut self, rng: &mut R, speed: SpeedRange) {
        self.vel = speed.random_velocity(rng);
    }

    /// Flip velocity on each axis whose next step would leave `[radius, extent - radius]`.
    ///
    /// Only flips when heading outward, so an entity caught outside the band
    /// (spawned there, or left behind by a resize) walks back in instead of
    /// jittering against the edge.
    pub fn reflect(&mut self, extent: Vec2) {
        let next = self.predicted_pos();
        let min = self.radius;
        let max = extent - Vec2::splat(self.radius);

        if (next.x < min && self.vel.x < 0.0) || (next.x > max.x && self.vel.x > 0.0) {
            self.vel.x = -self.vel.x;
        }
        if (next.y < min && self.vel.y < 0.0) || (next.y > max.y && self.vel.y > 0.0) {
            self.vel.y = -self.vel.y;
        }
    }

    /// Apply opacity decay and refresh `alive`
    pub fn fade(&mut self) {
        if self.fade_rate > 0.0 {
            self.opacity = (self.opacity - self.fade_rate).max(0.0);
        }
        self.alive = self.opacity > OPACITY_EPSILON;
    }
}
