//! 2D camera.
//!
//! World space conventions:
//! - Origin at the centre of the screen
//! - +X right, +Y up
//! - Visible height is `2 / zoom` world units; width follows the viewport aspect
//!
//! Matrices are column-major, matching the WGSL `mat4x4<f32>` uniform layout.

mod camera2d;
mod uniform;
mod viewport;

pub use camera2d::Camera2D;
pub use uniform::CameraUniform;
pub use viewport::Viewport;
