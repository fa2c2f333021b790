//! The drawing, input & timing surface scenes are written against
//!
//! [`Graphics`](crate::graphics::Graphics), [`Input`] & [`FrameTimer`] implement it
//! for a real window; tests can substitute their own recorders

use std::path::Path;

use glam::{Vec2, vec2};
use tyndustre_app::{
    input::{Input, KeyCode, MouseButton},
    time::FrameTimer,
};
use tyndustre_render::{color::Color, math::Rect};

use crate::{
    camera::Camera,
    error::{Error, Result},
};

/// A loaded image; the pixels belong to whoever created the handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: usize,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn size(&self) -> Vec2 {
        vec2(self.width as f32, self.height as f32)
    }

    /// Rectangle covering the whole texture
    pub fn full_rect(&self) -> Rect {
        Rect::new(Vec2::ZERO, self.size())
    }
}

/// An offscreen color target & the texture it renders into
///
/// The texture is stored bottom-up; sample it with a negative source height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTexture {
    pub id: usize,
    pub texture: Texture,
}

/// Immediate-mode 2D drawing
///
/// Rotations are in degrees, clockwise on screen. Draw order equals call order,
/// except text which always lands on top of the frame's geometry
pub trait Canvas {
    /// Size of the current target in pixels
    fn screen_size(&self) -> Vec2;

    /// Drops everything drawn so far & fills the target with `color`
    fn clear(&mut self, color: Color);

    /// Draw through `camera` until the next camera change
    fn set_camera(&mut self, camera: &Camera);

    /// Go back to plain pixel coordinates
    fn reset_camera(&mut self);

    /// Decode an encoded image (PNG) into a texture
    fn load_texture_from_memory(&mut self, bytes: &[u8]) -> Result<Texture>;

    fn unload_texture(&mut self, texture: Texture) -> Result<()>;

    fn load_render_texture(&mut self, width: u32, height: u32) -> Result<RenderTexture>;

    fn unload_render_texture(&mut self, target: RenderTexture) -> Result<()>;

    /// Run `draw` against `target` instead of the screen
    fn render_to_texture(
        &mut self,
        target: &RenderTexture,
        draw: &mut dyn FnMut(&mut dyn Canvas),
    ) -> Result<()>;

    /// Draw the `source` region of `texture` stretched over `dest`,
    /// rotated around `origin` (relative to `dest`'s top-left corner)
    ///
    /// A negative source width/height flips the image on that axis;
    /// a source larger than the texture repeats it
    fn draw_texture_pro(
        &mut self,
        texture: &Texture,
        source: Rect,
        dest: Rect,
        origin: Vec2,
        rotation: f32,
        tint: Color,
    );

    /// Solid rectangle rotated around `origin` (relative to its top-left corner)
    fn draw_rectangle_pro(&mut self, rect: Rect, origin: Vec2, rotation: f32, color: Color);

    /// Single line of text, `size` pixels tall, top-left at `position` in screen space
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color);

    /// Read & decode an image file
    fn load_texture(&mut self, path: &Path) -> Result<Texture> {
        read_texture(self, path)
    }

    /// Whole texture with its top-left at `position`, rotated around that corner & scaled
    fn draw_texture_ex(
        &mut self,
        texture: &Texture,
        position: Vec2,
        rotation: f32,
        scale: f32,
        tint: Color,
    ) {
        let dest = Rect::new(position, texture.size() * scale);
        self.draw_texture_pro(texture, texture.full_rect(), dest, Vec2::ZERO, rotation, tint);
    }

    /// Fill `dest` with copies of `texture`, each `scale` times its size
    fn draw_texture_tiled(&mut self, texture: &Texture, dest: Rect, scale: f32, tint: Color) {
        if scale <= 0.0 {
            return;
        }
        let source = Rect::new(Vec2::ZERO, dest.size / scale);
        self.draw_texture_pro(texture, source, dest, Vec2::ZERO, 0.0, tint);
    }
}

/// Reads `path` & hands the bytes to [`Canvas::load_texture_from_memory`]
///
/// A missing or unreadable file is an [`Error::Asset`] naming the path
pub fn read_texture<C: Canvas + ?Sized>(canvas: &mut C, path: &Path) -> Result<Texture> {
    let bytes = std::fs::read(path).map_err(|source| Error::Asset {
        path: path.to_path_buf(),
        source,
    })?;
    let texture = canvas.load_texture_from_memory(&bytes)?;
    log::info!(
        "loaded `{}` ({}x{})",
        path.display(),
        texture.width,
        texture.height
    );
    Ok(texture)
}

/// Pointer & keyboard state for the current frame
pub trait Controls {
    fn pointer_position(&self) -> Vec2;
    /// Primary button held this frame
    fn pointer_down(&self) -> bool;
    fn key_down(&self, key: KeyCode) -> bool;
    /// Key went down this frame
    fn key_pressed(&self, key: KeyCode) -> bool;
}

pub trait Clock {
    /// Seconds the last frame took
    fn frame_time(&self) -> f32;
    /// Seconds since start
    fn time(&self) -> f64;
    fn fps(&self) -> u32;
}

/// One demo: loaded once, then updated & drawn every frame until unloaded
pub trait Scene: Sized {
    fn load(canvas: &mut dyn Canvas) -> Result<Self>;
    fn update(&mut self, controls: &dyn Controls, clock: &dyn Clock);
    fn draw(&mut self, canvas: &mut dyn Canvas) -> Result<()>;
    /// Releases everything `load` acquired
    fn unload(self, canvas: &mut dyn Canvas) -> Result<()>;
}

impl Controls for Input {
    fn pointer_position(&self) -> Vec2 {
        self.mouse_position().into()
    }

    fn pointer_down(&self) -> bool {
        self.mouse_held(MouseButton::Left)
    }

    fn key_down(&self, key: KeyCode) -> bool {
        self.key_held(key)
    }

    fn key_pressed(&self, key: KeyCode) -> bool {
        Input::key_pressed(self, key)
    }
}

impl Clock for FrameTimer {
    fn frame_time(&self) -> f32 {
        self.delta
    }

    fn time(&self) -> f64 {
        self.elapsed
    }

    fn fps(&self) -> u32 {
        self.fps
    }
}
