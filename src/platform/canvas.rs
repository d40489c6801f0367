//! Browser canvas surface
//!
//! Thin [`Surface`] over `CanvasRenderingContext2d`. Canvas calls that return
//! `Result<_, JsValue>` only fail on invalid arguments, so their errors are
//! dropped.

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::Bounds;
use crate::renderer::{ColorStop, CompositeMode, Paint, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grab the 2D context of `canvas`
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the given size
    pub fn resize(&mut self, bounds: Bounds) {
        self.canvas.set_width(bounds.width);
        self.canvas.set_height(bounds.height);
    }

    fn gradient_with_stops(&self, gradient: CanvasGradient, stops: &[ColorStop]) -> CanvasGradient {
        for stop in stops {
            let _ = gradient.add_color_stop(stop.offset, &stop.color.to_css());
        }
        gradient
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        match paint {
            Paint::Solid(_) => None,
            Paint::Linear(g) => {
                let gradient = self.ctx.create_linear_gradient(
                    g.start.x as f64,
                    g.start.y as f64,
                    g.end.x as f64,
                    g.end.y as f64,
                );
                Some(self.gradient_with_stops(gradient, &g.stops))
            }
            Paint::Radial(g) => self
                .ctx
                .create_radial_gradient(
                    g.inner_center.x as f64,
                    g.inner_center.y as f64,
                    g.inner_radius as f64,
                    g.outer_center.x as f64,
                    g.outer_center.y as f64,
                    g.outer_radius as f64,
                )
                .ok()
                .map(|gradient| self.gradient_with_stops(gradient, &g.stops)),
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl Surface for CanvasSurface {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) {
        let Bounds { width, height } = self.bounds();
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        let _ = self.ctx.set_global_composite_operation(mode.as_str());
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn set_fill(&mut self, paint: &Paint) {
        match (paint, self.gradient(paint)) {
            (_, Some(gradient)) => self.ctx.set_fill_style_canvas_gradient(&gradient),
            (Paint::Solid(color), None) => self.ctx.set_fill_style_str(&color.to_css()),
            _ => {}
        }
    }

    fn set_stroke(&mut self, paint: &Paint) {
        match (paint, self.gradient(paint)) {
            (_, Some(gradient)) => self.ctx.set_stroke_style_canvas_gradient(&gradient),
            (Paint::Solid(color), None) => self.ctx.set_stroke_style_str(&color.to_css()),
            _ => {}
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}
