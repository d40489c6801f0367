//! Flow field state
//!
//! A grid of short strokes whose angles come from a cheap trig "noise":
//! `(cos(x * zoom) + sin(y * zoom)) * radius`. The radius swings back and
//! forth between its bounds, which makes the whole field breathe.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::timer::IntervalTimer;
use crate::Bounds;

/// Stroke length as a multiple of the cell size
pub const LINE_LENGTH_CELLS: f32 = 3.0;

/// Flow field tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowFieldConfig {
    /// Grid spacing in pixels
    pub cell_size: f32,
    /// Stroke width in pixels
    pub line_width: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    /// Radius change per rendered frame
    pub radius_velocity: f32,
    /// Noise frequency
    pub zoom: f32,
}

impl Default for FlowFieldConfig {
    fn default() -> Self {
        Self {
            cell_size: 8.0,
            line_width: 0.5,
            radius_min: 0.0,
            radius_max: 9.0,
            radius_velocity: 0.03,
            zoom: 0.02,
        }
    }
}

impl FlowFieldConfig {
    /// Config used for the first field after page load
    pub fn startup() -> Self {
        Self {
            cell_size: 6.0,
            line_width: 0.6,
            radius_min: 4.0,
            radius_max: 10.0,
            radius_velocity: 0.05,
            zoom: 0.01,
        }
    }

    /// Roll a fresh random config
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            radius_max: rng.random::<f32>() * 10.0 + 7.0,
            radius_min: rng.random::<f32>() * 5.0,
            radius_velocity: rng.random::<f32>() * 0.05 + 0.005,
            cell_size: rng.random::<f32>() * 10.0 + 5.0,
            line_width: rng.random::<f32>() + 0.1,
            zoom: rng.random::<f32>() * 0.1,
        }
    }

    /// Stroke length for this cell size
    #[inline]
    pub fn line_length(&self) -> f32 {
        self.cell_size * LINE_LENGTH_CELLS
    }
}

/// Animated flow field bound to a surface size
#[derive(Debug, Clone)]
pub struct FlowField {
    config: FlowFieldConfig,
    bounds: Bounds,
    radius: f32,
    radius_velocity: f32,
    timer: IntervalTimer,
    steps: u64,
}

impl FlowField {
    pub fn new(bounds: Bounds, config: FlowFieldConfig) -> Self {
        Self {
            radius: config.radius_min,
            radius_velocity: config.radius_velocity,
            config,
            bounds,
            timer: IntervalTimer::default(),
            steps: 0,
        }
    }

    pub fn config(&self) -> &FlowFieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Current angle multiplier
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn radius_velocity(&self) -> f32 {
        self.radius_velocity
    }

    /// Number of rendered steps so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Feed a frame timestamp; steps the field when the render interval elapsed.
    ///
    /// Returns true when the caller should redraw.
    pub fn advance(&mut self, timestamp_ms: f64) -> bool {
        if !self.timer.advance(timestamp_ms) {
            return false;
        }
        self.step();
        true
    }

    /// Move the radius one step, bouncing between its bounds
    pub fn step(&mut self) {
        if self.radius > self.config.radius_max || self.radius < self.config.radius_min {
            self.radius_velocity = -self.radius_velocity;
        }
        self.radius += self.radius_velocity;
        self.steps += 1;
    }

    /// Stroke angle at a grid point
    #[inline]
    pub fn angle_at(&self, point: Vec2) -> f32 {
        ((point.x * self.config.zoom).cos() + (point.y * self.config.zoom).sin()) * self.radius
    }

    /// Grid sample points, row by row
    pub fn cells(&self) -> impl Iterator<Item = Vec2> + '_ {
        let cell = self.config.cell_size;
        let size = self.bounds.size();
        // A non-positive (or NaN) cell size would never advance
        let rows = if cell > 0.0 { (size.y / cell).ceil() as usize } else { 0 };
        let cols = if cell > 0.0 { (size.x / cell).ceil() as usize } else { 0 };
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| Vec2::new(col as f32 * cell, row as f32 * cell))
        })
    }

    /// Line segments `(start, end)` for every grid cell
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let length = self.config.line_length();
        self.cells().map(move |start| {
            let angle = self.angle_at(start);
            (start, start + Vec2::new(angle.cos(), angle.sin()) * length)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_radius_ping_pongs_within_bounds() {
        let config = FlowFieldConfig {
            radius_min: 1.0,
            radius_max: 2.0,
            radius_velocity: 0.25,
            ..FlowFieldConfig::default()
        };
        let mut field = FlowField::new(Bounds::new(10, 10), config);
        let mut flips = 0;
        let mut last_velocity = field.radius_velocity();
        for _ in 0..100 {
            field.step();
            if field.radius_velocity() != last_velocity {
                flips += 1;
                last_velocity = field.radius_velocity();
            }
            // One step of overshoot past either bound at most
            assert!(field.radius() >= 1.0 - 0.25 - 1e-5);
            assert!(field.radius() <= 2.0 + 0.25 + 1e-5);
        }
        assert!(flips >= 10, "radius should keep bouncing, flipped {flips} times");
    }

    #[test]
    fn test_advance_gates_on_interval() {
        let mut field = FlowField::new(Bounds::new(10, 10), FlowFieldConfig::default());
        assert!(field.advance(1000.0));
        assert!(!field.advance(1005.0));
        assert!(!field.advance(1010.0));
        assert!(field.advance(1020.0));
        assert_eq!(field.steps(), 2);
    }

    #[test]
    fn test_grid_covers_surface() {
        let config = FlowFieldConfig {
            cell_size: 10.0,
            ..FlowFieldConfig::default()
        };
        let field = FlowField::new(Bounds::new(35, 20), config);
        let cells: Vec<Vec2> = field.cells().collect();
        // x in {0, 10, 20, 30}, y in {0, 10}
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0], Vec2::ZERO);
        assert_eq!(cells[7], Vec2::new(30.0, 10.0));
    }

    #[test]
    fn test_line_length_and_angle() {
        let config = FlowFieldConfig {
            cell_size: 4.0,
            radius_min: 2.0,
            zoom: 0.5,
            ..FlowFieldConfig::default()
        };
        let field = FlowField::new(Bounds::new(8, 8), config);
        for (start, end) in field.lines() {
            assert!(((end - start).length() - 12.0).abs() < 1e-4);
            let expected = ((start.x * 0.5).cos() + (start.y * 0.5).sin()) * 2.0;
            assert!((field.angle_at(start) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_and_degenerate_grids() {
        let field = FlowField::new(Bounds::new(0, 0), FlowFieldConfig::default());
        assert_eq!(field.cells().count(), 0);

        let config = FlowFieldConfig {
            cell_size: 0.0,
            ..FlowFieldConfig::default()
        };
        let field = FlowField::new(Bounds::new(100, 100), config);
        assert_eq!(field.cells().count(), 0);
    }

    #[test]
    fn test_random_config_ranges() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..50 {
            let c = FlowFieldConfig::random(&mut rng);
            assert!((5.0..15.0).contains(&c.cell_size));
            assert!((7.0..17.0).contains(&c.radius_max));
            assert!((0.0..5.0).contains(&c.radius_min));
            assert!((0.005..0.055).contains(&c.radius_velocity));
            assert!((0.1..1.1).contains(&c.line_width));
            assert!((0.0..0.1).contains(&c.zoom));
        }
    }
}
