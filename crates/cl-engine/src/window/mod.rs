//! Window and event loop.
//!
//! Owns the winit `EventLoop` and windows and wires them to the GPU layer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
