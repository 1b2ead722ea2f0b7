//! cl engine crate.
//!
//! The core is [`camera::Camera2D`]; the rest is the winit + wgpu runtime the
//! demos use to put it on screen.

pub mod camera;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;

pub use glam;
