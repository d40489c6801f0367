//! Tendril segment chains
//!
//! A tendril is a run of circles shrinking from the head radius down to zero.
//! Each segment carries its own phase angle; every tick the phases advance and
//! the segments drift along a sine/cosine curve, more strongly toward the tail.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::SpeedRange;
use crate::consts::{TENDRIL_MAX_STEP, TENDRIL_RADIUS_STEP};

/// Which axes the curve displaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveAxis {
    X,
    Y,
    Both,
}

impl CurveAxis {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => CurveAxis::X,
            1 => CurveAxis::Y,
            _ => CurveAxis::Both,
        }
    }

    /// Curve displacement at `angle`
    #[inline]
    pub fn offset(self, angle: f32, intensity: f32) -> Vec2 {
        let x = match self {
            CurveAxis::X | CurveAxis::Both => angle.sin() * intensity,
            CurveAxis::Y => 0.0,
        };
        let y = match self {
            CurveAxis::Y | CurveAxis::Both => angle.cos() * intensity,
            CurveAxis::X => 0.0,
        };
        Vec2::new(x, y)
    }
}

/// One circle in the chain, positioned relative to the tendril anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub offset: Vec2,
    pub radius: f32,
    pub angle: f32,
}

/// Segment chain for an anchored entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tendril {
    pub segments: Vec<Segment>,
    pub curve: CurveAxis,
    pub curve_intensity: f32,
    pub angle_increment: f32,
}

impl Tendril {
    /// Random chain spacing
    pub fn random_step<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
        SpeedRange::new(0.0, TENDRIL_MAX_STEP).random_velocity(rng)
    }

    /// Build a chain from `head_radius` down to zero.
    ///
    /// Successive segments are laid out `step` apart and bent by the curve.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, head_radius: f32, step: Vec2) -> Self {
        let curve_intensity = rng.random::<f32>() * 2.0 + 1.0;
        let angle_increment = (rng.random::<f32>() * 0.2).max(0.1);
        let curve = CurveAxis::random(rng);

        let count = (head_radius.max(0.0) / TENDRIL_RADIUS_STEP) as usize + 1;
        let mut segments = Vec::with_capacity(count);
        let mut angle = 0.0;
        let mut cursor = Vec2::ZERO;
        for i in 0..count {
            let radius = head_radius - i as f32 * TENDRIL_RADIUS_STEP;
            angle += angle_increment;
            segments.push(Segment {
                offset: cursor + curve.offset(angle, curve_intensity),
                radius,
                angle,
            });
            cursor += step;
        }

        Self {
            segments,
            curve,
            curve_intensity,
            angle_increment,
        }
    }

    /// Advance every segment phase and let the chain sway.
    ///
    /// The head stays still; sway grows linearly toward the tail.
    pub fn wiggle(&mut self) {
        if self.segments.is_empty() {
            return;
        }
        let scale_step = 1.0 / self.segments.len() as f32;
        let mut scale = 0.0;
        for segment in &mut self.segments {
            segment.angle += self.angle_increment;
            segment.offset += self.curve.offset(segment.angle, self.curve_intensity) * scale;
            scale += scale_step;
        }
    }
}
