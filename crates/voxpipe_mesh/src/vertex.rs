//! Vertex format handed to the render backend.

use bytemuck::{Pod, Zeroable};

/// One corner of a voxel face.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VoxelVertex {
    /// Position in frame space [x, y, z]
    pub position: [f32; 3],
    /// Linear voxel color [r, g, b, a]
    pub color: [f32; 4],
    /// Face normal [nx, ny, nz]
    pub normal: [f32; 3],
    /// Texture coordinates, always zero
    pub uv: [f32; 2],
}

impl VoxelVertex {
    /// Vertex buffer layout for WGPU
    pub const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,  // position
        1 => Float32x4,  // color
        2 => Float32x3,  // normal
        3 => Float32x2,  // uv
    ];

    /// Vertex buffer layout descriptor
    #[must_use]
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}
