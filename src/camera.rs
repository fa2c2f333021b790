use glam::{Mat4, Vec2, Vec3};

/// A 2D camera: `target` in world space lands on `offset` in screen space,
/// rotated by `rotation` degrees & scaled by `zoom`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    offset: Vec2,
    target: Vec2,
    rotation: f32,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            target: Vec2::ZERO,
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Returns the orthographic view-projection matrix for a `size` pixel target
    ///
    /// `flip_y` renders bottom-up, the layout offscreen targets are stored in
    pub fn view_proj(&self, size: Vec2, flip_y: bool) -> Mat4 {
        let proj = if flip_y {
            Mat4::orthographic_lh(0.0, size.x, 0.0, size.y, -1.0, 1.0)
        } else {
            Mat4::orthographic_lh(0.0, size.x, size.y, 0.0, -1.0, 1.0)
        };
        proj * self.view()
    }

    /// World to screen transform without projection
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(self.offset.extend(0.0))
            * Mat4::from_rotation_z(self.rotation.to_radians())
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
            * Mat4::from_translation((-self.target).extend(0.0))
    }

    /// Set the world point the camera looks at
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Set where on screen the target appears
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Rotation in degrees, clockwise on screen
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Set zoom level, clamped between 0.1 & 10.0 to avoid insanity
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(0.1, 10.0);
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Converts a point from world space to screen space (pixels)
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::from_angle(self.rotation.to_radians()).rotate(world - self.target) * self.zoom
            + self.offset
    }

    /// Converts a point from screen space back to world space
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::from_angle(-self.rotation.to_radians()).rotate((screen - self.offset) / self.zoom)
            + self.target
    }
}
