//! Pairwise proximity checks for the bouncing balls
//!
//! Not a physical collision model: two entities about to overlap simply pick
//! new random headings. There is no mass, momentum or restitution, and the
//! scan is a plain O(n²) pass with no spatial index.

use rand::Rng;

use super::entity::SpeedRange;
use super::system::ParticleSystem;

impl ParticleSystem {
    /// Re-roll the heading of entity pairs whose next positions are within `threshold`.
    ///
    /// Pairs are visited in index order. An entity that resolved a collision is
    /// marked handled and skipped for the rest of the frame, so each entity
    /// takes part in at most one resolution and the pairing depends on
    /// iteration order. Returns the number of pairs resolved.
    pub fn detect_proximity<R: Rng + ?Sized>(
        &mut self,
        threshold: f32,
        speed: SpeedRange,
        rng: &mut R,
    ) -> usize {
        let entities = self.entities_mut();
        for entity in entities.iter_mut() {
            entity.handled = false;
        }

        let mut resolved = 0;
        for a in 0..entities.len() {
            if entities[a].handled || !entities[a].alive {
                continue;
            }
            for b in (a + 1)..entities.len() {
                if entities[b].handled || !entities[b].alive {
                    continue;
                }
                let distance = entities[a]
                    .predicted_pos()
                    .distance(entities[b].predicted_pos());
                if distance <= threshold {
                    entities[a].handled = true;
                    entities[a].randomize_direction(rng, speed);
                    entities[b].handled = true;
                    entities[b].randomize_direction(rng, speed);
                    resolved += 1;
                    break;
                }
            }
        }
        resolved
    }
}
