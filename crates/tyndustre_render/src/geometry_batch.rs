use glam::Mat4;
use wgpu::{
    Buffer, BufferUsages, Device, IndexFormat, RenderPass,
    util::{BufferInitDescriptor, DeviceExt},
};

use crate::vertex::Vertex;

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// A batch of geometry (vertices + indices) that can be drawn in a single GPU call
///
/// Tracks CPU vertex/index data, uploads it once per frame and prevents overflowing `u16` indices
#[derive(Default)]
pub struct GeometryBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    vertex_buffer: Option<Buffer>,
    index_buffer: Option<Buffer>,
}

impl GeometryBatch {
    const MAX_VERTICES: usize = u16::MAX as usize;
    const MAX_INDICES: usize = Self::MAX_VERTICES * 6;

    // Returns true if adding verts/indices would exceed max allowed
    fn would_overflow(&self, vert_count: usize, idx_count: usize) -> bool {
        self.vertices.len() + vert_count > Self::MAX_VERTICES
            || self.indices.len() + idx_count > Self::MAX_INDICES
    }

    /// Adds vertices/indices, returns false if it would overflow
    pub fn push(&mut self, verts: &[Vertex], indices: &[u16]) -> bool {
        if self.would_overflow(verts.len(), indices.len()) {
            return false;
        }

        let idx_offset = self.vertices.len() as u16;
        self.vertices.extend_from_slice(verts);
        self.indices.extend(indices.iter().map(|i| *i + idx_offset));

        true
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Copies the batch into fresh GPU buffers
    ///
    /// A [`DrawList`] lives for one frame, so buffers are never reused
    pub(crate) fn upload(&mut self, device: &Device) {
        if self.is_empty() {
            return;
        }

        self.vertex_buffer = Some(device.create_buffer_init(&BufferInitDescriptor {
            label: Some("GeometryBatch Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&BufferInitDescriptor {
            label: Some("GeometryBatch Index Buffer"),
            contents: bytemuck::cast_slice(&self.indices),
            usage: BufferUsages::INDEX,
        }));
    }

    pub(crate) fn draw(&self, r_pass: &mut RenderPass<'_>) {
        let (Some(vertices), Some(indices)) = (&self.vertex_buffer, &self.index_buffer) else {
            return;
        };
        if self.is_empty() {
            return;
        }

        r_pass.set_vertex_buffer(0, vertices.slice(..));
        r_pass.set_index_buffer(indices.slice(..), IndexFormat::Uint16);
        r_pass.draw_indexed(0..self.indices.len() as u32, 0, 0..1);
    }
}

/// Consecutive quads sharing one texture
pub struct DrawRun {
    /// `None` draws with the white fallback texture
    pub texture_id: Option<usize>,
    pub geometry: GeometryBatch,
}

/// Runs drawn with one view-projection matrix
pub struct Layer {
    pub view_proj: Mat4,
    pub runs: Vec<DrawRun>,
}

/// Ordered list of quads for one render pass
///
/// Draw order equals submission order: a texture change starts a new run &
/// a camera change starts a new layer
pub struct DrawList {
    layers: Vec<Layer>,
}

impl DrawList {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            layers: vec![Layer {
                view_proj,
                runs: Vec::new(),
            }],
        }
    }

    /// Switch the view-projection for every quad pushed after this call
    pub fn set_view_proj(&mut self, view_proj: Mat4) {
        match self.layers.last_mut() {
            Some(layer) if layer.view_proj == view_proj => {}
            Some(layer) if layer.runs.is_empty() => layer.view_proj = view_proj,
            _ => self.layers.push(Layer {
                view_proj,
                runs: Vec::new(),
            }),
        }
    }

    /// Queue one quad; corners go top-left, top-right, bottom-right, bottom-left
    pub fn push_quad(&mut self, texture_id: Option<usize>, corners: [Vertex; 4]) {
        let Some(layer) = self.layers.last_mut() else {
            return;
        };

        if let Some(run) = layer.runs.last_mut() {
            if run.texture_id == texture_id && run.geometry.push(&corners, &QUAD_INDICES) {
                return;
            }
        }

        let mut geometry = GeometryBatch::default();
        geometry.push(&corners, &QUAD_INDICES);
        layer.runs.push(DrawRun {
            texture_id,
            geometry,
        });
    }

    /// Drops all queued geometry, keeping the current view-projection
    pub fn clear(&mut self) {
        let view_proj = self
            .layers
            .last()
            .map_or(Mat4::IDENTITY, |layer| layer.view_proj);
        *self = Self::new(view_proj);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.runs.is_empty())
    }
}
