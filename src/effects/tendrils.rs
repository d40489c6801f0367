//! Swaying tendrils under a selectable compositing mode
//!
//! Keys: Right/Left cycle the mode, `r` resets it, Up/Down shift the hue.
//! A press grows a fresh set.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Effect, EffectKind, FrameClock};
use crate::consts::{HUE_STEP, TENDRIL_DROP};
use crate::platform::{InputEvent, Key};
use crate::renderer::{CompositeMode, Surface};
use crate::settings::TendrilsConfig;
use crate::sim::{Entity, ParticleSystem, Shape, Tendril};
use crate::{Bounds, wrap_hue};

pub struct Tendrils {
    system: ParticleSystem,
    config: TendrilsConfig,
    rng: Pcg32,
    mode: CompositeMode,
    hue: f32,
}

impl Tendrils {
    pub fn new(bounds: Bounds, config: TendrilsConfig, seed: u64) -> Self {
        let hue = wrap_hue(config.hue);
        let mut tendrils = Self {
            system: ParticleSystem::new(bounds),
            config,
            rng: Pcg32::seed_from_u64(seed),
            mode: CompositeMode::default(),
            hue,
        };
        tendrils.respawn();
        tendrils
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn mode(&self) -> CompositeMode {
        self.mode
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    fn respawn(&mut self) {
        let count = if self.config.max_count > self.config.min_count {
            self.rng.random_range(self.config.min_count..self.config.max_count)
        } else {
            self.config.min_count
        };
        let config = &self.config;
        let rng = &mut self.rng;
        let hue = self.hue;
        self.system
            .spawn_batch(count, |bounds| grow_tendril(rng, bounds, config, hue));
    }

    fn set_hue(&mut self, hue: f32) {
        self.hue = wrap_hue(hue);
        for entity in self.system.entities_mut() {
            entity.hue = self.hue;
        }
    }

    fn on_key(&mut self, key: Key) {
        match key {
            Key::ArrowRight => self.mode = self.mode.next(),
            Key::ArrowLeft => self.mode = self.mode.prev(),
            Key::Reset => self.mode = CompositeMode::SourceOver,
            Key::ArrowUp => self.set_hue(self.hue + HUE_STEP),
            Key::ArrowDown => self.set_hue(self.hue - HUE_STEP),
        }
        log::info!("{:?}: mode {}, hue {}", key, self.mode.as_str(), self.hue);
    }
}

/// Anchored just below center, offset by half the head size
fn grow_tendril<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    config: &TendrilsConfig,
    hue: f32,
) -> Entity {
    let half_head = config.head_radius / 2.0;
    let anchor = bounds.center() - Vec2::splat(half_head) + Vec2::new(0.0, TENDRIL_DROP);
    let step = Tendril::random_step(rng);
    let tendril = Tendril::generate(rng, config.head_radius, step);
    Entity::new(anchor, step, config.head_radius, Shape::Tendril(tendril))
        .with_hue(hue)
        .with_opacity(config.opacity)
        .anchored()
}

impl Effect for Tendrils {
    fn kind(&self) -> EffectKind {
        EffectKind::Tendrils
    }

    fn resize(&mut self, bounds: Bounds) {
        self.system.set_bounds(bounds);
        self.respawn();
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown(_) => self.respawn(),
            InputEvent::KeyDown(key) => self.on_key(*key),
            InputEvent::PointerMove(_) => {}
        }
    }

    fn frame(&mut self, clock: FrameClock, surface: &mut dyn Surface) -> bool {
        self.system.tick(clock.elapsed_ms);

        surface.clear();
        self.system.render(surface, self.mode);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, Recorder};

    fn tendrils(seed: u64) -> Tendrils {
        Tendrils::new(Bounds::new(800, 600), TendrilsConfig::default(), seed)
    }

    fn press(t: &mut Tendrils, key: Key, times: usize) {
        for _ in 0..times {
            t.handle_input(&InputEvent::KeyDown(key));
        }
    }

    #[test]
    fn test_population_and_anchor() {
        for seed in 0..20 {
            let t = tendrils(seed);
            let n = t.system().len();
            assert!((5..20).contains(&n), "{n} tendrils");
            for e in t.system().entities() {
                assert_eq!(e.pos, Vec2::new(375.0, 375.0));
                assert_eq!(e.opacity, 0.6);
                assert_eq!(e.hue, 220.0);
                match &e.shape {
                    Shape::Tendril(tendril) => assert_eq!(tendril.segments.len(), 101),
                    other => panic!("unexpected shape {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_mode_cycling_keys() {
        let mut t = tendrils(1);
        press(&mut t, Key::ArrowRight, 7);
        press(&mut t, Key::ArrowLeft, 1);
        assert_eq!(t.mode(), CompositeMode::Overlay);

        press(&mut t, Key::Reset, 1);
        assert_eq!(t.mode(), CompositeMode::SourceOver);
        press(&mut t, Key::ArrowLeft, 1);
        assert_eq!(t.mode(), CompositeMode::Luminosity);
        press(&mut t, Key::ArrowRight, 1);
        assert_eq!(t.mode(), CompositeMode::SourceOver);
    }

    #[test]
    fn test_hue_keys_wrap() {
        let mut t = tendrils(2);
        press(&mut t, Key::ArrowUp, 7);
        assert_eq!(t.hue(), 0.0);
        press(&mut t, Key::ArrowDown, 1);
        assert_eq!(t.hue(), 340.0);
        assert!(t.system().entities().iter().all(|e| e.hue == 340.0));
    }

    #[test]
    fn test_render_uses_selected_mode() {
        let mut t = tendrils(3);
        press(&mut t, Key::ArrowRight, 3);
        let mut surface = Recorder::new(Bounds::new(800, 600));
        t.frame(FrameClock::default(), &mut surface);
        assert!(surface.commands().contains(&DrawCommand::Composite(CompositeMode::Xor)));
        assert!(!surface
            .commands()
            .contains(&DrawCommand::Composite(CompositeMode::SourceOver)));
        assert_eq!(surface.draw_count(), t.system().len() * 2 * 101);
    }

    #[test]
    fn test_press_regrows_and_keeps_mode() {
        let mut t = tendrils(4);
        press(&mut t, Key::ArrowRight, 2);
        let before: Vec<Vec2> = t.system().entities().iter().map(|e| e.vel).collect();
        t.handle_input(&InputEvent::PointerDown(Vec2::ZERO));
        let after: Vec<Vec2> = t.system().entities().iter().map(|e| e.vel).collect();
        assert_ne!(before, after);
        assert_eq!(t.mode(), CompositeMode::Lighter);
    }

    #[test]
    fn test_resize_recenters() {
        let mut t = tendrils(5);
        t.resize(Bounds::new(200, 100));
        assert!(t.system().entities().iter().all(|e| e.pos == Vec2::new(75.0, 125.0)));
    }
}
