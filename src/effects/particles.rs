//! Fading particle trail emitted at the pointer

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Effect, EffectKind, FrameClock};
use crate::Bounds;
use crate::platform::InputEvent;
use crate::renderer::{CompositeMode, Surface};
use crate::settings::ParticlesConfig;
use crate::sim::{Entity, ParticleSystem, Shape};

pub struct ParticleTrail {
    system: ParticleSystem,
    config: ParticlesConfig,
    rng: Pcg32,
    /// Where new particles appear
    emitter: Vec2,
}

impl ParticleTrail {
    pub fn new(bounds: Bounds, config: ParticlesConfig, seed: u64) -> Self {
        Self {
            system: ParticleSystem::new(bounds),
            config,
            rng: Pcg32::seed_from_u64(seed),
            emitter: bounds.center(),
        }
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn emitter(&self) -> Vec2 {
        self.emitter
    }

    fn emit(&mut self) {
        let config = &self.config;
        let rng = &mut self.rng;
        let pos = self.emitter;
        self.system.spawn_one(|_| {
            let radius = config.min_radius + rng.random::<f32>() * (config.max_radius - config.min_radius);
            Entity::new(pos, config.speed.random_velocity(rng), radius, Shape::Disc)
                .with_hue(config.hue)
                .with_fade(config.fade_rate)
        });
    }
}

impl Effect for ParticleTrail {
    fn kind(&self) -> EffectKind {
        EffectKind::Particles
    }

    fn resize(&mut self, bounds: Bounds) {
        self.system.set_bounds(bounds);
        self.system.clear();
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::PointerDown(p) = event {
            self.emitter = *p;
        }
    }

    fn frame(&mut self, clock: FrameClock, surface: &mut dyn Surface) -> bool {
        self.emit();
        self.system.tick(clock.elapsed_ms);

        surface.clear();
        self.system.render(surface, CompositeMode::SourceOver);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Key;
    use crate::renderer::Recorder;

    fn frames(trail: &mut ParticleTrail, n: usize) -> Recorder {
        let mut surface = Recorder::new(trail.system().bounds());
        for _ in 0..n {
            trail.frame(FrameClock::default(), &mut surface);
        }
        surface
    }

    #[test]
    fn test_emits_at_center_first() {
        let mut trail = ParticleTrail::new(Bounds::new(200, 100), ParticlesConfig::default(), 1);
        assert_eq!(trail.emitter(), Vec2::new(100.0, 50.0));
        frames(&mut trail, 1);

        let particle = &trail.system().entities()[0];
        // One tick of motion away from the emitter
        assert_eq!(particle.pos, Vec2::new(100.0, 50.0) + particle.vel);
        assert!(particle.radius >= 5.0 && particle.radius < 25.0);
        assert_eq!(particle.hue, 220.0);
        assert!((particle.opacity - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_press_moves_emitter() {
        let mut trail = ParticleTrail::new(Bounds::new(200, 100), ParticlesConfig::default(), 2);
        trail.handle_input(&InputEvent::PointerMove(Vec2::new(5.0, 5.0)));
        assert_eq!(trail.emitter(), Vec2::new(100.0, 50.0));
        trail.handle_input(&InputEvent::KeyDown(Key::ArrowUp));
        trail.handle_input(&InputEvent::PointerDown(Vec2::new(30.0, 40.0)));
        assert_eq!(trail.emitter(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_population_levels_off() {
        let mut trail = ParticleTrail::new(Bounds::new(800, 600), ParticlesConfig::default(), 3);
        frames(&mut trail, 300);
        // One in per tick, each lives for 100 ticks
        assert_eq!(trail.system().len(), 99);
        assert!(trail.system().entities().iter().all(|p| p.opacity > 0.0));
    }

    #[test]
    fn test_resize_clears() {
        let mut trail = ParticleTrail::new(Bounds::new(800, 600), ParticlesConfig::default(), 4);
        frames(&mut trail, 10);
        assert_eq!(trail.system().len(), 10);
        trail.resize(Bounds::new(400, 300));
        assert!(trail.system().is_empty());
        assert_eq!(trail.system().bounds(), Bounds::new(400, 300));
    }
}
