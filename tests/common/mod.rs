#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tyndustre::{
    Canvas, Clock, RenderTexture, Result, Texture,
    camera::Camera,
    math::{Rect, Vec2, vec2},
    platform::read_texture,
    render::Color,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear(Color),
    SetCamera(Camera),
    ResetCamera,
    Texture {
        id: usize,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
    },
    Rectangle {
        rect: Rect,
        rotation: f32,
        color: Color,
    },
    Text {
        text: String,
        position: Vec2,
        color: Color,
    },
    Offscreen {
        id: usize,
        calls: Vec<Call>,
    },
}

/// Canvas that remembers every call instead of drawing
#[derive(Default)]
pub struct RecordingCanvas {
    pub calls: Vec<Call>,
    pub loaded: Vec<PathBuf>,
    pub released: Vec<usize>,
    pub released_targets: Vec<usize>,
    /// Read texture files for real instead of handing out placeholders
    pub from_disk: bool,
    next_id: usize,
}

impl RecordingCanvas {
    pub fn from_disk() -> Self {
        Self {
            from_disk: true,
            ..Self::default()
        }
    }

    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }
}

impl Canvas for RecordingCanvas {
    fn screen_size(&self) -> Vec2 {
        vec2(800.0, 450.0)
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.calls.push(Call::SetCamera(*camera));
    }

    fn reset_camera(&mut self) {
        self.calls.push(Call::ResetCamera);
    }

    fn load_texture(&mut self, path: &Path) -> Result<Texture> {
        self.loaded.push(path.to_path_buf());
        if self.from_disk {
            return read_texture(self, path);
        }
        self.load_texture_from_memory(&[])
    }

    fn load_texture_from_memory(&mut self, _bytes: &[u8]) -> Result<Texture> {
        Ok(Texture {
            id: self.next_id(),
            width: 32,
            height: 32,
        })
    }

    fn unload_texture(&mut self, texture: Texture) -> Result<()> {
        self.released.push(texture.id);
        Ok(())
    }

    fn load_render_texture(&mut self, width: u32, height: u32) -> Result<RenderTexture> {
        let id = self.next_id();
        let texture_id = self.next_id();
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
        self.released_targets.push(target.id);
        Ok(())
    }

    fn render_to_texture(
        &mut self,
        target: &RenderTexture,
        draw: &mut dyn FnMut(&mut dyn Canvas),
    ) -> Result<()> {
        let mut inner = RecordingCanvas::default();
        draw(&mut inner);
        self.calls.push(Call::Offscreen {
            id: target.id,
            calls: inner.calls,
        });
        Ok(())
    }

    fn draw_texture_pro(
        &mut self,
        texture: &Texture,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        _tint: Color,
    ) {
        self.calls.push(Call::Texture {
            id: texture.id,
            source,
            dest,
            origin,
            rotation,
        });
    }

    fn draw_rectangle_pro(&mut self, rect: Rect, _origin: Vec2, rotation: f32, color: Color) {
        self.calls.push(Call::Rectangle {
            rect,
            rotation,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, _size: f32, color: Color) {
        self.calls.push(Call::Text {
            text: text.to_string(),
            position,
            color,
        });
    }
}

pub struct FixedClock {
    pub frame_time: f32,
    pub time: f64,
    pub fps: u32,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self {
            frame_time: 1.0 / 60.0,
            time: 0.0,
            fps: 60,
        }
    }
}

impl Clock for FixedClock {
    fn frame_time(&self) -> f32 {
        self.frame_time
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn fps(&self) -> u32 {
        self.fps
    }
}
