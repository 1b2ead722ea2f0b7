//! GPU rendering.
//!
//! Renderers own their pipelines and buffers and build them lazily against the
//! surface format carried by `RenderCtx`.

mod ctx;
mod quad;
mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::QuadRenderer;
pub use shader::ShaderSource;
