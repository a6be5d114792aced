//! Display-list rendering boundary
//!
//! The simulation never draws. [`scene::build_scene`] flattens sim
//! state into an ordered list of primitives that a painter (Canvas2D,
//! a test harness) consumes.

pub mod scene;

pub use scene::{Scene, Shape, TextAlign, build_scene};
