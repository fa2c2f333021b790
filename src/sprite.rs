use glam::{Vec2, vec2};
use tyndustre_render::color::Color;

use crate::platform::{Canvas, Texture};

/// A texture placed by an anchor point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: Texture,
    pub position: Vec2,
    /// Pivot as a fraction of the texture size; `(0.5, 0.5)` is the center
    pub anchor: Vec2,
    /// Degrees, clockwise on screen
    pub rotation: f32,
    pub scale: f32,
}

impl Sprite {
    /// Centered, unrotated & unscaled at the origin
    pub fn new(texture: Texture) -> Self {
        Self {
            texture,
            position: Vec2::ZERO,
            anchor: vec2(0.5, 0.5),
            rotation: 0.0,
            scale: 1.0,
        }
    }

    /// Top-left corner to hand to [`Canvas::draw_texture_ex`] so the anchor lands on `position`
    pub fn draw_origin(&self) -> Vec2 {
        draw_origin(
            self.texture.size(),
            self.position,
            self.anchor,
            self.rotation,
            self.scale,
        )
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_texture_ex(
            &self.texture,
            self.draw_origin(),
            self.rotation,
            self.scale,
            Color::WHITE,
        );
    }
}

/// The anchor offset is scaled, then rotated, then subtracted from `position`;
/// any other order makes rotating sprites orbit their position
pub fn draw_origin(size: Vec2, position: Vec2, anchor: Vec2, rotation: f32, scale: f32) -> Vec2 {
    let offset = size * scale * anchor;
    position - Vec2::from_angle(rotation.to_radians()).rotate(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::quad_corners;
    use tyndustre_render::math::Rect;

    fn sprite(w: u32, h: u32) -> Sprite {
        Sprite::new(Texture {
            id: 0,
            width: w,
            height: h,
        })
    }

    /// Visual center of the quad `draw_texture_ex` would emit
    fn drawn_center(s: &Sprite) -> Vec2 {
        let dest = Rect::new(s.draw_origin(), s.texture.size() * s.scale);
        quad_corners(dest, Vec2::ZERO, s.rotation)
            .into_iter()
            .sum::<Vec2>()
            / 4.0
    }

    #[test]
    fn centered_anchor_without_rotation() {
        let mut s = sprite(32, 16);
        s.position = vec2(100.0, 50.0);
        s.scale = 2.0;
        assert_eq!(s.draw_origin(), vec2(100.0 - 32.0, 50.0 - 16.0));
    }

    #[test]
    fn draw_origin_is_pure() {
        let mut s = sprite(48, 48);
        s.position = vec2(12.5, -3.0);
        s.rotation = 33.0;
        s.scale = 1.3;
        let before = s;
        assert_eq!(s.draw_origin(), s.draw_origin());
        assert_eq!(s, before);
    }

    #[test]
    fn rotation_keeps_center_in_place() {
        let mut s = sprite(40, 24);
        s.position = vec2(256.0, 256.0);
        s.scale = 1.5;

        for rotation in [0.0, 15.0, 90.0, 181.0, -270.0] {
            s.rotation = rotation;
            assert!((drawn_center(&s) - s.position).length() < 1e-3);
        }
    }

    #[test]
    fn corner_anchor_pins_that_corner() {
        let mut s = sprite(10, 10);
        s.anchor = Vec2::ZERO;
        s.position = vec2(5.0, 5.0);
        s.rotation = 45.0;
        assert_eq!(s.draw_origin(), vec2(5.0, 5.0));
    }
}
