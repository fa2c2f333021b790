use glam::Vec2;
use glyphon::{
    Attrs, Buffer, Cache, FontSystem, Metrics, Resolution, Shaping, SwashCache, TextArea,
    TextAtlas, TextBounds, Viewport,
};
use wgpu::{Device, MultisampleState, Queue, RenderPass, TextureFormat};

use crate::color::Color;

struct TextEntry {
    buffer: Buffer,
    position: Vec2,
    color: Color,
}

/// Immediate-mode text on top of [`glyphon`]
///
/// Lines queued during a frame are laid out in [`prepare`](Self::prepare),
/// drawn by [`render`](Self::render) & then forgotten
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    inner: glyphon::TextRenderer,
    entries: Vec<TextEntry>,
}

impl TextRenderer {
    /// Creates a text renderer backed by the system font database
    pub fn new(device: &Device, queue: &Queue, format: TextureFormat) -> Self {
        let font_system = FontSystem::new();
        if font_system.db().is_empty() {
            log::warn!("no system fonts found, text will not be visible");
        }
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let inner =
            glyphon::TextRenderer::new(&mut atlas, device, MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            inner,
            entries: Vec::new(),
        }
    }

    /// Queue a single line with its top-left corner at `position`, `size` pixels tall
    pub fn queue(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        if text.is_empty() || size <= 0.0 {
            return;
        }

        let mut buffer = Buffer::new(&mut self.font_system, Metrics::new(size, size));
        buffer.set_text(
            &mut self.font_system,
            text,
            &Attrs::new().color(color.into()),
            Shaping::Advanced,
        );
        self.entries.push(TextEntry {
            buffer,
            position,
            color,
        });
    }

    /// Lays out every queued line for a `w`×`h` target
    /// Must be called before [`render()`](Self::render)
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        w: u32,
        h: u32,
    ) -> Result<(), glyphon::PrepareError> {
        self.viewport.update(
            queue,
            Resolution {
                width: w,
                height: h,
            },
        );

        let areas = self.entries.iter().map(|entry| TextArea {
            buffer: &entry.buffer,
            left: entry.position.x,
            top: entry.position.y,
            scale: 1.0,
            bounds: TextBounds {
                left: 0,
                top: 0,
                right: w as i32,
                bottom: h as i32,
            },
            default_color: entry.color.into(),
            custom_glyphs: &[],
        });

        let result = self.inner.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        );
        self.entries.clear();
        result
    }

    /// Draws all prepared text
    pub fn render(&self, pass: &mut RenderPass<'_>) {
        if let Err(err) = self.inner.render(&self.atlas, &self.viewport, pass) {
            log::warn!("text render failed: {err}");
        }
    }

    /// Evicts glyphs unused since the last frame from the atlas
    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}
