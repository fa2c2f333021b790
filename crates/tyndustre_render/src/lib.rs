pub mod color;
pub mod geometry_batch;
pub mod math;
pub mod pipeline;
pub mod target;
pub mod text;
pub mod texture;
pub mod vertex;

pub use wgpu::{Device, Queue, RenderPass, TextureFormat};

use thiserror::Error;
use wgpu::{
    BindGroupDescriptor, BindGroupEntry, BufferUsages, CommandEncoder, DeviceDescriptor, LoadOp,
    Operations, PresentMode, RenderPassColorAttachment, RenderPassDescriptor,
    RequestAdapterOptions, StoreOp, Surface, SurfaceConfiguration, SurfaceError, SurfaceTarget,
    SurfaceTexture, TextureView, WindowHandle,
    util::{BufferInitDescriptor, DeviceExt, new_instance_with_webgpu_detection},
};

use crate::{
    color::Color, geometry_batch::DrawList, pipeline::Pipelines, target::OffscreenTarget,
    text::TextRenderer, texture::Texture,
};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open graphics device")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
    #[error("failed to decode image")]
    Image(#[from] image::ImageError),
    #[error("no texture with id {0}")]
    UnknownTexture(usize),
    #[error("no offscreen target with id {0}")]
    UnknownTarget(usize),
    #[error("failed to lay out text")]
    Text(#[from] glyphon::PrepareError),
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

struct Backbuffer {
    surface: Surface<'static>,
    config: SurfaceConfiguration,
}

struct Gpu {
    device: Device,
    queue: Queue,
}

pub struct Frame {
    pub view: TextureView,
    pub encoder: CommandEncoder,
    surface_texture: SurfaceTexture,
}

/// Low-level GPU renderer built on `wgpu`
///
/// Owns the surface, the quad pipeline, every loaded texture & offscreen target,
/// and the text renderer. Slots of released resources are never reused, so a stale
/// id fails loudly instead of drawing the wrong image
pub struct Renderer {
    gpu: Gpu,
    backbuffer: Backbuffer,
    pipelines: Pipelines,
    textures: Vec<Option<Texture>>,
    offscreens: Vec<Option<OffscreenTarget>>,
    default_texture: Texture,
    text: TextRenderer,
}

impl Renderer {
    /// Creates a new `Renderer` presenting to `window`
    ///
    /// Prefers an sRGB surface format so texture colors pass through unchanged
    pub async fn new(
        inner_width: u32,
        inner_height: u32,
        window: impl Into<SurfaceTarget<'static>> + WindowHandle,
    ) -> Result<Renderer, RenderError> {
        let instance = new_instance_with_webgpu_detection(&Default::default()).await;
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                #[cfg(target_arch = "wasm32")]
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let mut config = surface
            .get_default_config(&adapter, inner_width.max(1), inner_height.max(1))
            .ok_or(RenderError::UnsupportedSurface)?;
        let caps = surface.get_capabilities(&adapter);
        if let Some(srgb) = caps.formats.iter().copied().find(|f| f.is_srgb()) {
            config.format = srgb;
        }
        config.present_mode = PresentMode::AutoVsync;
        surface.configure(&device, &config);

        let pipelines = Pipelines::new(&device, config.format);
        let default_texture = Texture::create_default(
            &device,
            &queue,
            &pipelines.texture_layout,
            &pipelines.sampler,
        );
        let text = TextRenderer::new(&device, &queue, config.format);

        Ok(Renderer {
            gpu: Gpu { device, queue },
            backbuffer: Backbuffer { surface, config },
            pipelines,
            textures: Vec::new(),
            offscreens: Vec::new(),
            default_texture,
            text,
        })
    }

    pub fn device(&self) -> &Device {
        &self.gpu.device
    }

    pub fn queue(&self) -> &Queue {
        &self.gpu.queue
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.backbuffer.config.format
    }

    pub fn text(&mut self) -> &mut TextRenderer {
        &mut self.text
    }

    /// Begins a new frame, returning the surface view and a command encoder
    ///
    /// Returns `None` when no frame can be acquired this time; a lost or outdated
    /// surface is reconfigured for the next attempt
    pub fn begin_frame(&mut self) -> Option<Frame> {
        let surface_texture = match self.backbuffer.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.configure_surface();
                return None;
            }
            Err(err) => {
                log::warn!("skipping frame: {err}");
                return None;
            }
        };

        let view = surface_texture.texture.create_view(&Default::default());
        let encoder = self.gpu.device.create_command_encoder(&Default::default());

        Some(Frame {
            view,
            encoder,
            surface_texture,
        })
    }

    /// Ends the frame by submitting commands and presenting
    pub fn end_frame(&mut self, frame: Frame) {
        self.gpu.queue.submit(Some(frame.encoder.finish()));
        frame.surface_texture.present();
        self.text.trim();
    }

    pub fn begin_render_pass<'a>(
        &self,
        encoder: &'a mut CommandEncoder,
        view: &TextureView,
        clear: Option<Color>,
    ) -> RenderPass<'a> {
        let load = match clear {
            Some(color) => LoadOp::Clear(color.into()),
            None => LoadOp::Load,
        };

        encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Quad Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: Operations {
                    load,
                    store: StoreOp::Store,
                },
            })],
            ..Default::default()
        })
    }

    /// Draws every layer of `list` in order within an existing render pass
    pub fn draw_list(&self, r_pass: &mut RenderPass<'_>, list: &mut DrawList) {
        if list.is_empty() {
            return;
        }
        r_pass.set_pipeline(&self.pipelines.quad);

        for layer in list.layers_mut() {
            if layer.runs.is_empty() {
                continue;
            }

            let camera_buffer = self.gpu.device.create_buffer_init(&BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(&CameraUniform {
                    view_proj: layer.view_proj.to_cols_array_2d(),
                }),
                usage: BufferUsages::UNIFORM,
            });
            let camera_bind_group = self.gpu.device.create_bind_group(&BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &self.pipelines.camera_layout,
                entries: &[BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });
            r_pass.set_bind_group(1, &camera_bind_group, &[]);

            for run in &mut layer.runs {
                run.geometry.upload(&self.gpu.device);
                self.texture_or_default(run.texture_id).bind(r_pass, 0);
                run.geometry.draw(r_pass);
            }
        }
    }

    fn texture_or_default(&self, id: Option<usize>) -> &Texture {
        match id.map(|id| self.textures.get(id).and_then(Option::as_ref)) {
            Some(Some(texture)) => texture,
            Some(None) => {
                log::warn!("drawing with released texture {id:?}");
                &self.default_texture
            }
            None => &self.default_texture,
        }
    }

    /// Lays out queued text for the window; call before opening the pass that renders it
    pub fn prepare_text(&mut self) -> Result<(), RenderError> {
        let (w, h) = self.surface_size();
        self.text
            .prepare(&self.gpu.device, &self.gpu.queue, w, h)
            .map_err(RenderError::from)
    }

    pub fn render_text(&self, r_pass: &mut RenderPass<'_>) {
        self.text.render(r_pass);
    }

    /// Resizes the surface
    pub fn resize(&mut self, w: u32, h: u32) {
        if w == 0 || h == 0 {
            return;
        }
        (self.backbuffer.config.width, self.backbuffer.config.height) = (w, h);
        self.configure_surface();
    }

    fn configure_surface(&self) {
        self.backbuffer
            .surface
            .configure(&self.gpu.device, &self.backbuffer.config);
    }

    /// Returns the current surface dimensions (in pixels)
    pub fn surface_size(&self) -> (u32, u32) {
        (self.backbuffer.config.width, self.backbuffer.config.height)
    }

    /// Enables/disables V‑Sync by changing the surface present mode
    pub fn set_vsync(&mut self, on: bool) {
        self.backbuffer.config.present_mode = if on {
            PresentMode::Fifo
        } else {
            PresentMode::AutoNoVsync
        };
        self.configure_surface();
    }

    /// Decodes image bytes (PNG) into a new texture, returning its id & size
    pub fn add_texture(&mut self, data: &[u8]) -> Result<(usize, u32, u32), RenderError> {
        let img = image::load_from_memory(data)?.to_rgba8();
        let (w, h) = img.dimensions();
        Ok((self.add_texture_raw(w, h, &img), w, h))
    }

    /// Adds a texture from raw RGBA bytes & returns its id
    pub fn add_texture_raw(&mut self, w: u32, h: u32, data: &[u8]) -> usize {
        let texture = Texture::from_bytes(
            &self.gpu.device,
            &self.gpu.queue,
            &self.pipelines.texture_layout,
            &self.pipelines.sampler,
            data,
            w,
            h,
        );
        self.textures.push(Some(texture));
        self.textures.len() - 1
    }

    /// Size of a live texture
    pub fn texture_size(&self, id: usize) -> Result<(u32, u32), RenderError> {
        self.textures
            .get(id)
            .and_then(Option::as_ref)
            .map(Texture::size)
            .ok_or(RenderError::UnknownTexture(id))
    }

    /// Releases a texture; releasing twice is an error
    pub fn remove_texture(&mut self, id: usize) -> Result<(), RenderError> {
        self.textures
            .get_mut(id)
            .and_then(Option::take)
            .map(|_released| ())
            .ok_or(RenderError::UnknownTexture(id))
    }

    /// Creates an offscreen color target, returning its id & the id of its texture
    pub fn create_offscreen(&mut self, w: u32, h: u32) -> (usize, usize) {
        let (w, h) = (w.max(1), h.max(1));
        let texture_id = self.textures.len();
        let target =
            OffscreenTarget::new(&self.gpu.device, w, h, self.surface_format(), texture_id);
        self.textures.push(Some(Texture::from_view(
            &self.gpu.device,
            &self.pipelines.texture_layout,
            &self.pipelines.sampler,
            target.view(),
            w,
            h,
        )));
        self.offscreens.push(Some(target));
        (self.offscreens.len() - 1, texture_id)
    }

    /// Releases an offscreen target together with its texture
    pub fn remove_offscreen(&mut self, id: usize) -> Result<(), RenderError> {
        let target = self
            .offscreens
            .get_mut(id)
            .and_then(Option::take)
            .ok_or(RenderError::UnknownTarget(id))?;
        self.remove_texture(target.texture_id())
    }

    /// Draws `list` into an offscreen target & submits right away,
    /// so the result can be sampled later in the frame
    pub fn render_offscreen(
        &self,
        id: usize,
        clear: Option<Color>,
        list: &mut DrawList,
    ) -> Result<(), RenderError> {
        let target = self
            .offscreens
            .get(id)
            .and_then(Option::as_ref)
            .ok_or(RenderError::UnknownTarget(id))?;

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&Default::default());
        {
            let mut r_pass = self.begin_render_pass(&mut encoder, target.view(), clear);
            self.draw_list(&mut r_pass, list);
        }
        self.gpu.queue.submit(Some(encoder.finish()));
        Ok(())
    }

    pub fn offscreen_size(&self, id: usize) -> Result<(u32, u32), RenderError> {
        self.offscreens
            .get(id)
            .and_then(Option::as_ref)
            .map(OffscreenTarget::size)
            .ok_or(RenderError::UnknownTarget(id))
    }
}
