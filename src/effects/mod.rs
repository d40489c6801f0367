//! The four canvas effects
//!
//! Each effect owns its simulation state and its RNG. The session drives it
//! with one [`Effect::frame`] per host callback: update first, then draw.

mod balls;
mod flow;
mod particles;
mod tendrils;

pub use balls::BouncingBalls;
pub use flow::FlowFieldEffect;
pub use particles::ParticleTrail;
pub use tendrils::Tendrils;

use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::platform::InputEvent;
use crate::renderer::Surface;
use crate::settings::Settings;

/// Timing of one host frame callback
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    /// Host timestamp (ms)
    pub timestamp_ms: f64,
    /// Time since the previous callback (ms), 0 for the first one
    pub elapsed_ms: f64,
}

/// A running effect
pub trait Effect {
    fn kind(&self) -> EffectKind;

    /// Surface size changed; regenerate or clear
    fn resize(&mut self, bounds: Bounds);

    fn handle_input(&mut self, event: &InputEvent);

    /// Update then draw one frame. Returns false when the frame was skipped.
    fn frame(&mut self, clock: FrameClock, surface: &mut dyn Surface) -> bool;
}

/// Selectable effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EffectKind {
    #[default]
    Balls,
    Particles,
    FlowField,
    Tendrils,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Balls,
        EffectKind::Particles,
        EffectKind::FlowField,
        EffectKind::Tendrils,
    ];

    /// Short name used in the URL hash and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Balls => "balls",
            EffectKind::Particles => "particles",
            EffectKind::FlowField => "flow-field",
            EffectKind::Tendrils => "tendrils",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#').to_ascii_lowercase();
        match s.as_str() {
            "flow" | "flowfield" | "flow_field" => Some(EffectKind::FlowField),
            "ball" | "bouncing-balls" => Some(EffectKind::Balls),
            _ => Self::ALL.iter().copied().find(|kind| kind.as_str() == s),
        }
    }

    /// Build the effect for `bounds`
    pub fn create(self, settings: &Settings, bounds: Bounds, seed: u64) -> Box<dyn Effect> {
        log::info!("Starting {} ({}x{}, seed {})", self.as_str(), bounds.width, bounds.height, seed);
        match self {
            EffectKind::Balls => Box::new(BouncingBalls::new(bounds, settings.balls.clone(), seed)),
            EffectKind::Particles => {
                Box::new(ParticleTrail::new(bounds, settings.particles.clone(), seed))
            }
            EffectKind::FlowField => {
                Box::new(FlowFieldEffect::new(bounds, settings.flow_field.clone(), seed))
            }
            EffectKind::Tendrils => Box::new(Tendrils::new(bounds, settings.tendrils.clone(), seed)),
        }
    }
}
