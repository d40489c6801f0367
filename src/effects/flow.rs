//! Flow field effect
//!
//! Redraws on its own interval rather than every callback. A press rolls a
//! new random config; a resize falls back to the default one.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{Effect, EffectKind, FrameClock};
use crate::Bounds;
use crate::platform::InputEvent;
use crate::renderer::Surface;
use crate::sim::{FlowField, FlowFieldConfig};

pub struct FlowFieldEffect {
    field: FlowField,
    rng: Pcg32,
}

impl FlowFieldEffect {
    pub fn new(bounds: Bounds, config: FlowFieldConfig, seed: u64) -> Self {
        Self {
            field: FlowField::new(bounds, config),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn field(&self) -> &FlowField {
        &self.field
    }

    fn randomize(&mut self) {
        let config = FlowFieldConfig::random(&mut self.rng);
        match serde_json::to_string(&config) {
            Ok(json) => log::info!("Random config: {}", json),
            Err(e) => log::warn!("Random config not printable: {}", e),
        }
        self.field = FlowField::new(self.field.bounds(), config);
    }
}

impl Effect for FlowFieldEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::FlowField
    }

    fn resize(&mut self, bounds: Bounds) {
        self.field = FlowField::new(bounds, FlowFieldConfig::default());
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::PointerDown(_) = event {
            self.randomize();
        }
    }

    fn frame(&mut self, clock: FrameClock, surface: &mut dyn Surface) -> bool {
        if !self.field.advance(clock.timestamp_ms) {
            return false;
        }
        surface.clear();
        self.field.render(surface);
        true
    }
}
