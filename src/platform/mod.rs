//! Platform abstraction layer
//!
//! Turns browser events (keyboard, touch buttons) into per-tick input.

pub mod input;

pub use input::InputLatch;
