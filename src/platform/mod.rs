//! Platform abstraction layer
//!
//! Input events are shared by every target; the canvas surface only exists
//! in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod input;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use input::{InputEvent, Key};
