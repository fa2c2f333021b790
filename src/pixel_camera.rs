//! Smooth pixel-perfect camera
//!
//! The world is drawn at a low virtual resolution with a camera snapped to whole
//! pixels, then the result is upscaled to the window by a second camera carrying
//! the leftover sub-pixel offset

use glam::{Vec2, vec2};
use tyndustre_render::{color::Color, math::Rect};

use crate::{
    camera::Camera,
    error::Result,
    platform::{Canvas, Clock, Controls, RenderTexture, Scene},
};

/// Real window size & the low-resolution world size drawn into it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualScreen {
    pub width: u32,
    pub height: u32,
    pub virtual_width: u32,
    pub virtual_height: u32,
}

impl Default for VirtualScreen {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            virtual_width: 160,
            virtual_height: 90,
        }
    }
}

impl VirtualScreen {
    /// Window pixels per virtual pixel
    pub fn ratio(&self) -> f32 {
        self.width as f32 / self.virtual_width as f32
    }

    /// Whole offscreen texture, flipped vertically to undo its bottom-up storage
    pub fn source_rect(&self) -> Rect {
        Rect::xywh(
            0.0,
            0.0,
            self.virtual_width as f32,
            -(self.virtual_height as f32),
        )
    }

    /// Window rectangle grown by one virtual pixel on every side, so sub-pixel
    /// shifts never uncover the edge
    pub fn dest_rect(&self) -> Rect {
        let r = self.ratio();
        Rect::xywh(
            -r,
            -r,
            self.width as f32 + r * 2.0,
            self.height as f32 + r * 2.0,
        )
    }
}

/// Splits a camera target into the whole-pixel part for the world camera & the
/// remainder, in window pixels, for the screen camera
///
/// Both axes truncate toward zero
pub fn split_target(target: Vec2, ratio: f32) -> (Vec2, Vec2) {
    let world = target.trunc();
    (world, (target - world) * ratio)
}

/// Where the camera looks `time` seconds in
pub fn camera_path(time: f64) -> Vec2 {
    vec2(
        (time.sin() * 50.0 - 10.0) as f32,
        (time.cos() * 30.0) as f32,
    )
}

/// Overlay color for an FPS readout
pub fn fps_color(fps: u32) -> Color {
    match fps {
        0..15 => Color::RED,
        15..30 => Color::rgba8(255, 161, 0, 255),
        _ => Color::LIME,
    }
}

const RECTANGLES: [(Rect, f32, Color); 3] = [
    (Rect::xywh(70.0, 35.0, 20.0, 20.0), 1.0, Color::BLACK),
    (Rect::xywh(90.0, 55.0, 30.0, 10.0), -1.0, Color::RED),
    (Rect::xywh(80.0, 65.0, 15.0, 25.0), 1.0, Color::BLUE),
];

/// Three spinning rectangles seen through a drifting pixel-perfect camera
pub struct PixelCameraScene {
    screen: VirtualScreen,
    target: RenderTexture,
    world_camera: Camera,
    screen_camera: Camera,
    rotation: f32,
    fps: u32,
}

impl PixelCameraScene {
    pub fn world_camera(&self) -> &Camera {
        &self.world_camera
    }

    pub fn screen_camera(&self) -> &Camera {
        &self.screen_camera
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    fn draw_world(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::RAYWHITE);
        canvas.set_camera(&self.world_camera);
        for (i, (rect, spin, color)) in RECTANGLES.into_iter().enumerate() {
            // the last one trails the others by 45 degrees
            let offset = if i == 2 { 45.0 } else { 0.0 };
            canvas.draw_rectangle_pro(rect, Vec2::ZERO, self.rotation * spin + offset, color);
        }
        canvas.reset_camera();
    }
}

impl Scene for PixelCameraScene {
    fn load(canvas: &mut dyn Canvas) -> Result<Self> {
        let screen = VirtualScreen::default();
        let target = canvas.load_render_texture(screen.virtual_width, screen.virtual_height)?;
        log::info!(
            "virtual screen {}x{} at {}x upscale",
            screen.virtual_width,
            screen.virtual_height,
            screen.ratio()
        );

        Ok(Self {
            screen,
            target,
            world_camera: Camera::default(),
            screen_camera: Camera::default(),
            rotation: 0.0,
            fps: 0,
        })
    }

    fn update(&mut self, _controls: &dyn Controls, clock: &dyn Clock) {
        self.rotation += 60.0 * clock.frame_time();
        self.fps = clock.fps();

        let (world, remainder) = split_target(camera_path(clock.time()), self.screen.ratio());
        self.world_camera.set_target(world);
        self.screen_camera.set_target(remainder);
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) -> Result<()> {
        let target = self.target;
        canvas.render_to_texture(&target, &mut |canvas: &mut dyn Canvas| {
            self.draw_world(canvas)
        })?;

        canvas.clear(Color::RED);
        canvas.set_camera(&self.screen_camera);
        canvas.draw_texture_pro(
            &target.texture,
            self.screen.source_rect(),
            self.screen.dest_rect(),
            Vec2::ZERO,
            0.0,
            Color::WHITE,
        );
        canvas.reset_camera();

        let VirtualScreen {
            width,
            height,
            virtual_width,
            virtual_height,
        } = self.screen;
        canvas.draw_text(
            &format!("Screen resolution: {width}x{height}"),
            vec2(10.0, 10.0),
            20.0,
            Color::DARKBLUE,
        );
        canvas.draw_text(
            &format!("World resolution: {virtual_width}x{virtual_height}"),
            vec2(10.0, 40.0),
            20.0,
            Color::DARKGREEN,
        );
        let fps_x = canvas.screen_size().x - 95.0;
        canvas.draw_text(
            &format!("{:2} FPS", self.fps),
            vec2(fps_x, 10.0),
            20.0,
            fps_color(self.fps),
        );
        Ok(())
    }

    fn unload(self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.unload_render_texture(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_window_over_virtual_width() {
        assert_eq!(VirtualScreen::default().ratio(), 5.0);
    }

    #[test]
    fn split_keeps_whole_pixels_for_the_world_camera() {
        let ratio = VirtualScreen::default().ratio();
        let (world, remainder) = split_target(vec2(12.7, -3.2), ratio);

        assert_eq!(world, vec2(12.0, -3.0));
        assert!((remainder - vec2(0.7, -0.2) * ratio).length() < 1e-4);
    }

    #[test]
    fn split_parts_recombine() {
        let ratio = 5.0;
        for t in [0.0, 1.3, 2.9, 10.0] {
            let target = camera_path(t);
            let (world, remainder) = split_target(target, ratio);
            assert!((world + remainder / ratio - target).length() < 1e-4);
            assert!(remainder.abs().max_element() < ratio);
        }
    }

    #[test]
    fn blit_rects() {
        let screen = VirtualScreen::default();
        assert_eq!(screen.source_rect(), Rect::xywh(0.0, 0.0, 160.0, -90.0));
        assert_eq!(screen.dest_rect(), Rect::xywh(-5.0, -5.0, 810.0, 460.0));
    }

    #[test]
    fn camera_path_starts_left_of_origin() {
        assert_eq!(camera_path(0.0), vec2(-10.0, 30.0));
    }

    #[test]
    fn fps_color_thresholds() {
        assert_eq!(fps_color(60), Color::LIME);
        assert_eq!(fps_color(20), Color::rgba8(255, 161, 0, 255));
        assert_eq!(fps_color(3), Color::RED);
    }
}
