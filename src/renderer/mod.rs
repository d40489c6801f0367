//! 2D rendering module
//!
//! Effects draw through the [`Surface`] trait: a canvas context in the
//! browser, a command [`Recorder`] everywhere else.

pub mod composite;
pub mod draw;
pub mod recorder;
pub mod surface;

pub use composite::CompositeMode;
pub use draw::draw_entity;
pub use recorder::{DrawCommand, Recorder};
pub use surface::{Color, ColorStop, LinearGradient, Paint, RadialGradient, Surface};
