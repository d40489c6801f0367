//! Drawing of simulation state onto a [`Surface`]

use super::composite::CompositeMode;
use super::surface::{Color, ColorStop, LinearGradient, Paint, RadialGradient, Surface};
use crate::consts::{BALL_HIGHLIGHT_OFFSET, BALL_HIGHLIGHT_RADIUS};
use crate::sim::{Entity, FlowField, ParticleSystem, Shape, Tendril};

/// Stops of the flow field stroke gradient (top-left to bottom-right)
pub const FLOW_FIELD_STOPS: [ColorStop; 6] = [
    ColorStop::new(0.0, Color::hex(0xff5c33)),
    ColorStop::new(0.2, Color::hex(0xff6663)),
    ColorStop::new(0.4, Color::hex(0xccccff)),
    ColorStop::new(0.6, Color::hex(0xb3ffff)),
    ColorStop::new(0.8, Color::hex(0x80ff80)),
    ColorStop::new(1.0, Color::hex(0xffff33)),
];

impl ParticleSystem {
    /// Draw every live entity in insertion order under `mode`
    pub fn render(&self, surface: &mut dyn Surface, mode: CompositeMode) {
        for entity in self.entities().iter().filter(|e| e.alive) {
            draw_entity(surface, entity, mode);
        }
    }
}

impl FlowField {
    /// Stroke the whole grid with the diagonal gradient
    pub fn render(&self, surface: &mut dyn Surface) {
        let stroke = Paint::Linear(LinearGradient {
            start: glam::Vec2::ZERO,
            end: self.bounds().size(),
            stops: FLOW_FIELD_STOPS.to_vec(),
        });

        surface.save();
        surface.set_line_width(self.config().line_width);
        surface.set_stroke(&stroke);
        for (from, to) in self.lines() {
            surface.stroke_line(from, to);
        }
        surface.restore();
    }
}

/// Draw one entity with its own saved state
pub fn draw_entity(surface: &mut dyn Surface, entity: &Entity, mode: CompositeMode) {
    surface.save();
    surface.set_composite(mode);
    match &entity.shape {
        Shape::Sphere => {
            surface.set_fill(&sphere_paint(entity));
            surface.fill_circle(entity.pos, entity.radius);
        }
        Shape::Disc => {
            surface.set_fill(&Color::hsla(entity.hue, 100.0, 50.0, entity.opacity).into());
            surface.fill_circle(entity.pos, entity.radius);
        }
        Shape::Tendril(tendril) => {
            surface.set_global_alpha(entity.opacity);
            draw_tendril(surface, entity, tendril);
        }
    }
    surface.restore();
}

/// Radial highlight from an off-center white core into the hue
fn sphere_paint(entity: &Entity) -> Paint {
    let offset = entity.radius * BALL_HIGHLIGHT_OFFSET;
    Paint::Radial(RadialGradient {
        inner_center: entity.pos - glam::Vec2::splat(offset),
        inner_radius: BALL_HIGHLIGHT_RADIUS,
        outer_center: entity.pos,
        outer_radius: entity.radius,
        stops: vec![
            ColorStop::new(0.0, Color::WHITE),
            ColorStop::new(1.0, Color::hsl(entity.hue, 100.0, 50.0)),
        ],
    })
}

/// Segments head first, saturation falling off with segment size
fn draw_tendril(surface: &mut dyn Surface, entity: &Entity, tendril: &Tendril) {
    let outline = Paint::Solid(Color::BLACK);
    for segment in &tendril.segments {
        let saturation = if entity.radius > 0.0 {
            segment.radius / entity.radius * 100.0
        } else {
            0.0
        };
        let center = entity.pos + segment.offset;
        surface.set_fill(&Color::hsl(entity.hue, saturation, 50.0).into());
        surface.set_stroke(&outline);
        surface.fill_circle(center, segment.radius);
        surface.stroke_circle(center, segment.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bounds;
    use crate::renderer::{DrawCommand, Recorder};
    use crate::sim::FlowFieldConfig;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_sphere_gradient() {
        let ball = Entity::new(Vec2::new(100.0, 50.0), Vec2::ZERO, 20.0, Shape::Sphere).with_hue(120.0);
        let mut surface = Recorder::new(Bounds::new(200, 200));
        draw_entity(&mut surface, &ball, CompositeMode::SourceOver);

        let paint = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Fill(Paint::Radial(g)) => Some(g.clone()),
            _ => None,
        });
        let gradient = paint.expect("sphere should use a radial gradient");
        assert_eq!(gradient.inner_center, Vec2::new(94.0, 44.0));
        assert_eq!(gradient.inner_radius, 3.0);
        assert_eq!(gradient.outer_radius, 20.0);
        assert_eq!(gradient.stops[0].color, Color::WHITE);
        assert_eq!(gradient.stops[1].color, Color::hsl(120.0, 100.0, 50.0));
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_disc_uses_opacity() {
        let disc = Entity::new(Vec2::ZERO, Vec2::ZERO, 5.0, Shape::Disc)
            .with_hue(220.0)
            .with_opacity(0.4);
        let mut surface = Recorder::new(Bounds::new(10, 10));
        draw_entity(&mut surface, &disc, CompositeMode::SourceOver);
        assert!(surface.commands().contains(&DrawCommand::Fill(Paint::Solid(Color::hsla(
            220.0, 100.0, 50.0, 0.4
        )))));
    }

    #[test]
    fn test_render_in_insertion_order() {
        let mut system = ParticleSystem::new(Bounds::new(100, 100));
        for i in 0..3 {
            system.spawn_one(|_| {
                Entity::new(Vec2::splat(10.0 * (i + 1) as f32), Vec2::ZERO, 2.0, Shape::Disc)
            });
        }
        let mut surface = Recorder::new(Bounds::new(100, 100));
        system.render(&mut surface, CompositeMode::Lighter);

        let centers: Vec<Vec2> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { center, .. } => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(centers, vec![Vec2::splat(10.0), Vec2::splat(20.0), Vec2::splat(30.0)]);
        let modes = surface
            .commands()
            .iter()
            .filter(|c| **c == DrawCommand::Composite(CompositeMode::Lighter))
            .count();
        assert_eq!(modes, 3);
    }

    #[test]
    fn test_tendril_draws_every_segment() {
        let mut rng = Pcg32::seed_from_u64(8);
        let tendril = Tendril::generate(&mut rng, 50.0, Vec2::new(1.5, -0.5));
        let entity = Entity::new(Vec2::new(300.0, 300.0), Vec2::ZERO, 50.0, Shape::Tendril(tendril))
            .with_hue(40.0)
            .with_opacity(0.6)
            .anchored();
        let mut surface = Recorder::new(Bounds::new(600, 600));
        draw_entity(&mut surface, &entity, CompositeMode::Xor);

        let commands = surface.commands();
        assert!(commands.contains(&DrawCommand::GlobalAlpha(0.6)));
        assert!(commands.contains(&DrawCommand::Composite(CompositeMode::Xor)));
        // Fill + outline per segment
        assert_eq!(surface.draw_count(), 2 * 101);
        // Head is fully saturated, tail is gray
        assert!(commands.contains(&DrawCommand::Fill(Paint::Solid(Color::hsl(40.0, 100.0, 50.0)))));
        assert!(commands.contains(&DrawCommand::Fill(Paint::Solid(Color::hsl(40.0, 0.0, 50.0)))));
    }

    #[test]
    fn test_flow_field_strokes_grid() {
        let config = FlowFieldConfig {
            cell_size: 10.0,
            line_width: 0.75,
            ..FlowFieldConfig::default()
        };
        let field = FlowField::new(Bounds::new(50, 30), config);
        let mut surface = Recorder::new(Bounds::new(50, 30));
        field.render(&mut surface);

        assert_eq!(surface.draw_count(), 5 * 3);
        assert!(surface.commands().contains(&DrawCommand::LineWidth(0.75)));
        let gradient = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Stroke(Paint::Linear(g)) => Some(g.clone()),
            _ => None,
        });
        let gradient = gradient.expect("flow field should stroke with a gradient");
        assert_eq!(gradient.end, Vec2::new(50.0, 30.0));
        assert_eq!(gradient.stops.len(), 6);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_zero_size_renders_nothing() {
        let field = FlowField::new(Bounds::new(0, 0), FlowFieldConfig::default());
        let mut surface = Recorder::new(Bounds::new(0, 0));
        field.render(&mut surface);
        assert_eq!(surface.draw_count(), 0);
    }
}
