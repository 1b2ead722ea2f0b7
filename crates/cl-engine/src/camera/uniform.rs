use bytemuck::{Pod, Zeroable};

/// GPU-side camera data.
///
/// Layout matches the `Camera` struct in `camera.wgsl`: projection first,
/// then view, both column-major. 128 bytes, no padding required.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
}

impl CameraUniform {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}
