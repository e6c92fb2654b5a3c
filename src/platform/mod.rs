//! Platform abstraction layer
//!
//! Turns raw key/mouse/touch signals into per-frame input edges.

pub mod input;

pub use input::{ActionLatch, EdgeTrigger, InputState};
