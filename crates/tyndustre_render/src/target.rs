use wgpu::{
    Device, Extent3d, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages,
    TextureView,
};

/// An offscreen color target that can be sampled once rendered
///
/// A single texture serves as both attachment & shader input, so no copy is needed
pub struct OffscreenTarget {
    _texture: wgpu::Texture,
    view: TextureView,
    width: u32,
    height: u32,
    texture_id: usize,
}

impl OffscreenTarget {
    pub(crate) fn new(
        device: &Device,
        width: u32,
        height: u32,
        format: TextureFormat,
        texture_id: usize,
    ) -> Self {
        let texture = device.create_texture(&TextureDescriptor {
            label: Some("Offscreen Target"),
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format,
            usage: TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&Default::default());

        Self {
            _texture: texture,
            view,
            width,
            height,
            texture_id,
        }
    }

    pub fn view(&self) -> &TextureView {
        &self.view
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Id under which the target's color attachment is registered as a texture
    pub fn texture_id(&self) -> usize {
        self.texture_id
    }
}
