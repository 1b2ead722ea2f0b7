//! wgpu device and surface management.
//!
//! Creates the Instance/Adapter/Device/Queue, configures the window surface
//! and hands out one encoder + view per frame.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
