//! Bouncing balls with naive proximity collisions

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Effect, EffectKind, FrameClock};
use crate::Bounds;
use crate::platform::InputEvent;
use crate::renderer::{CompositeMode, Surface};
use crate::settings::BallsConfig;
use crate::sim::{Entity, ParticleSystem, Shape};

pub struct BouncingBalls {
    system: ParticleSystem,
    config: BallsConfig,
    rng: Pcg32,
}

impl BouncingBalls {
    pub fn new(bounds: Bounds, config: BallsConfig, seed: u64) -> Self {
        let mut balls = Self {
            system: ParticleSystem::new(bounds),
            config,
            rng: Pcg32::seed_from_u64(seed),
        };
        balls.respawn();
        balls
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    fn respawn(&mut self) {
        let config = &self.config;
        let rng = &mut self.rng;
        self.system
            .spawn_batch(config.count, |bounds| random_ball(rng, bounds, config));
    }
}

/// Uniform position in `[r, extent - r]`, random hue and heading
fn random_ball<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds, config: &BallsConfig) -> Entity {
    let r = config.radius;
    let size = bounds.size();
    let pos = Vec2::new(
        r + rng.random::<f32>() * (size.x - 2.0 * r).max(0.0),
        r + rng.random::<f32>() * (size.y - 2.0 * r).max(0.0),
    );
    let vel = config.speed.random_velocity(rng);
    let hue = (rng.random::<f32>() * 360.0).floor();
    Entity::new(pos, vel, r, Shape::Sphere).with_hue(hue)
}

impl Effect for BouncingBalls {
    fn kind(&self) -> EffectKind {
        EffectKind::Balls
    }

    fn resize(&mut self, bounds: Bounds) {
        self.system.set_bounds(bounds);
        self.respawn();
    }

    fn handle_input(&mut self, _event: &InputEvent) {}

    fn frame(&mut self, clock: FrameClock, surface: &mut dyn Surface) -> bool {
        self.system.tick(clock.elapsed_ms);
        let hits = self.system.detect_proximity(
            self.config.collision_distance,
            self.config.speed,
            &mut self.rng,
        );
        if hits > 0 {
            log::trace!("{} ball collision(s)", hits);
        }

        surface.clear();
        self.system.render(surface, CompositeMode::SourceOver);
        true
    }
}
