//! Particle system tick
//!
//! Owns the entity collection of one effect and advances it once per frame.

use super::entity::{Entity, Motion, Shape};
use crate::Bounds;

/// A collection of entities advanced together
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    entities: Vec<Entity>,
    bounds: Bounds,
    /// Simulation tick counter
    ticks: u64,
    /// Host time fed through `tick`
    elapsed_ms: f64,
}

impl ParticleSystem {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Adopt new surface dimensions (entities are left where they are)
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Replace the whole population with `n` fresh entities
    pub fn spawn_batch<F>(&mut self, n: usize, mut factory: F)
    where
        F: FnMut(Bounds) -> Entity,
    {
        let bounds = self.bounds;
        self.entities.clear();
        self.entities.extend((0..n).map(|_| factory(bounds)));
        log::debug!("Spawned batch of {} entities in {}x{}", n, bounds.width, bounds.height);
    }

    /// Append a single entity
    pub fn spawn_one<F>(&mut self, factory: F)
    where
        F: FnOnce(Bounds) -> Entity,
    {
        self.entities.push(factory(self.bounds));
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Advance every entity by one frame, then drop the dead ones.
    ///
    /// Motion is a constant step per call; `elapsed_ms` only feeds the clock.
    pub fn tick(&mut self, elapsed_ms: f64) {
        let extent = self.bounds.size();

        for entity in self.entities.iter_mut().filter(|e| e.alive) {
            match entity.motion {
                Motion::Bounce => {
                    entity.reflect(extent);
                    entity.pos += entity.vel;
                }
                Motion::Anchored => {
                    if let Shape::Tendril(tendril) = &mut entity.shape {
                        tendril.wiggle();
                    }
                }
            }
            entity.fade();
        }

        self.entities.retain(|e| e.alive);
        self.ticks += 1;
        self.elapsed_ms += elapsed_ms.max(0.0);
    }
}
