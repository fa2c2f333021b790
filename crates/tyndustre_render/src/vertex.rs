use bytemuck::{Pod, Zeroable};
use wgpu::{BufferAddress, VertexAttribute, VertexBufferLayout, VertexStepMode, vertex_attr_array};

/// A single vertex of a textured, tinted quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    position: [f32; 2],
    color: [f32; 4],
    tex_coords: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [VertexAttribute; 3] =
        vertex_attr_array![0 => Float32x2, 1 => Float32x4, 2 => Float32x2];

    /// Creates a new vertex with position, color, & texture coordinates
    ///
    /// - `position`: `[x, y]` in world space
    /// - `color`: linear RGBA tint
    /// - `tex_coords`: `[u, v]`, values outside 0–1 repeat the texture
    pub fn new(position: [f32; 2], color: [f32; 4], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            color,
            tex_coords,
        }
    }

    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    pub fn tex_coords(&self) -> [f32; 2] {
        self.tex_coords
    }

    /// Returns the vertex buffer layout
    ///
    /// Matches `VertexInput` in `shader.wgsl`
    pub fn desc() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: size_of::<Vertex>() as BufferAddress,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
