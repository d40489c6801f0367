//! Headless surface that records draw calls

use glam::Vec2;
use serde::Serialize;

use super::composite::CompositeMode;
use super::surface::{Paint, Surface};
use crate::Bounds;

/// One recorded surface call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear,
    Save,
    Restore,
    Composite(CompositeMode),
    GlobalAlpha(f32),
    LineWidth(f32),
    Fill(Paint),
    Stroke(Paint),
    FillCircle { center: Vec2, radius: f32 },
    StrokeCircle { center: Vec2, radius: f32 },
    Line { from: Vec2, to: Vec2 },
}

impl DrawCommand {
    /// True for calls that put pixels on the surface
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillCircle { .. } | DrawCommand::StrokeCircle { .. } | DrawCommand::Line { .. }
        )
    }
}

/// Surface that keeps every call for later inspection
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    bounds: Bounds,
    commands: Vec<DrawCommand>,
    /// Deepest save nesting seen
    max_depth: usize,
    depth: usize,
}

impl Recorder {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hand over the recorded calls and start a fresh list
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of pixel-producing calls
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    /// Current save nesting (0 when balanced)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Surface for Recorder {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.commands.push(DrawCommand::Composite(mode));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_fill(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::Fill(paint.clone()));
    }

    fn set_stroke(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::Stroke(paint.clone()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { center, radius });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }
}
