use glam::{Vec2, vec2};
use tyndustre_render::{Renderer, color::Color, geometry_batch::DrawList, math::Rect};

use crate::{
    camera::Camera,
    error::Result,
    platform::{Canvas, RenderTexture, Texture},
    primitives::RectangleBuilder,
};

/// High-level 2D drawing interface over the [`Renderer`]
///
/// Geometry is recorded into a [`DrawList`] and handed back by [`finish`](Self::finish);
/// offscreen drawing is rendered as soon as its closure returns
pub struct Graphics<'a> {
    renderer: &'a mut Renderer,
    list: DrawList,
    clear: Option<Color>,
    target_size: (u32, u32),
    offscreen: bool,
}

impl<'a> Graphics<'a> {
    /// Graphics drawing to the window, `w`×`h` pixels
    pub fn new(renderer: &'a mut Renderer, w: u32, h: u32) -> Self {
        Self::with_target(renderer, w, h, false)
    }

    fn with_target(renderer: &'a mut Renderer, w: u32, h: u32, offscreen: bool) -> Self {
        let size = vec2(w as f32, h as f32);
        Self {
            renderer,
            list: DrawList::new(Camera::default().view_proj(size, offscreen)),
            clear: None,
            target_size: (w, h),
            offscreen,
        }
    }

    /// Recorded geometry & the requested clear color, if any
    pub fn finish(self) -> (DrawList, Option<Color>) {
        (self.list, self.clear)
    }

    /// Start building a rectangle primitive
    pub fn rect(&mut self) -> RectangleBuilder<'_> {
        RectangleBuilder::new(&mut self.list)
    }
}

impl Canvas for Graphics<'_> {
    fn screen_size(&self) -> Vec2 {
        let (w, h) = self.target_size;
        vec2(w as f32, h as f32)
    }

    fn clear(&mut self, color: Color) {
        self.list.clear();
        self.clear = Some(color);
    }

    fn set_camera(&mut self, camera: &Camera) {
        let view_proj = camera.view_proj(self.screen_size(), self.offscreen);
        self.list.set_view_proj(view_proj);
    }

    fn reset_camera(&mut self) {
        self.set_camera(&Camera::default());
    }

    fn load_texture_from_memory(&mut self, bytes: &[u8]) -> Result<Texture> {
        let (id, width, height) = self.renderer.add_texture(bytes)?;
        Ok(Texture { id, width, height })
    }

    fn unload_texture(&mut self, texture: Texture) -> Result<()> {
        self.renderer.remove_texture(texture.id)?;
        log::debug!("released texture {}", texture.id);
        Ok(())
    }

    fn load_render_texture(&mut self, width: u32, height: u32) -> Result<RenderTexture> {
        let (id, texture_id) = self.renderer.create_offscreen(width, height);
        let (width, height) = self.renderer.offscreen_size(id)?;
        Ok(RenderTexture {
            id,
            texture: Texture {
                id: texture_id,
                width,
                height,
            },
        })
    }

    fn unload_render_texture(&mut self, target: RenderTexture) -> Result<()> {
        self.renderer.remove_offscreen(target.id)?;
        log::debug!("released render texture {}", target.id);
        Ok(())
    }

    fn render_to_texture(
        &mut self,
        target: &RenderTexture,
        draw: &mut dyn FnMut(&mut dyn Canvas),
    ) -> Result<()> {
        let (w, h) = self.renderer.offscreen_size(target.id)?;
        let mut offscreen = Graphics::with_target(self.renderer, w, h, true);
        draw(&mut offscreen);

        let (mut list, clear) = offscreen.finish();
        self.renderer.render_offscreen(target.id, clear, &mut list)?;
        Ok(())
    }

    fn draw_texture_pro(
        &mut self,
        texture: &Texture,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    ) {
        self.rect()
            .with(&dest)
            .origin(origin)
            .rotate(rotation)
            .color(tint)
            .texture(texture.id)
            .source(source, texture.size());
    }

    fn draw_rectangle_pro(&mut self, rect: Rect, origin: Vec2, rotation: f32, color: Color) {
        self.rect()
            .with(&rect)
            .origin(origin)
            .rotate(rotation)
            .color(color);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        if self.offscreen {
            log::debug!("text is only drawn to the window, skipping {text:?}");
            return;
        }
        self.renderer.text().queue(text, position, size, color);
    }
}
