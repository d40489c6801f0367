//! Deterministic simulation module
//!
//! All effect motion lives here. This module must stay pure and deterministic:
//! - Constant step per tick (no delta-time scaling of motion)
//! - Seeded RNG only, passed in by the caller
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod entity;
pub mod flow_field;
pub mod proximity;
pub mod system;
pub mod tendril;
pub mod timer;

pub use entity::{Entity, Motion, Shape, SpeedRange};
pub use flow_field::{FlowField, FlowFieldConfig};
pub use system::ParticleSystem;
pub use tendril::{CurveAxis, Segment, Tendril};
pub use timer::IntervalTimer;
