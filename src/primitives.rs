use glam::{Vec2, vec2};
use tyndustre_render::{color::Color, geometry_batch::DrawList, math::Rect, vertex::Vertex};

const FULL_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Corners of `dest` rotated `rotation` degrees around `origin`
///
/// `origin` is relative to `dest`'s top-left corner and ends up at `dest.position`.
/// Order: top-left, top-right, bottom-right, bottom-left
pub fn quad_corners(dest: Rect, origin: Vec2, rotation: f32) -> [Vec2; 4] {
    let local = Rect::new(-origin, dest.size).corners();
    if rotation == 0.0 {
        return local.map(|corner| dest.position + corner);
    }

    let rot = Vec2::from_angle(rotation.to_radians());
    local.map(|corner| dest.position + rot.rotate(corner))
}

/// Texture coordinates for the `source` pixel region of a `texture_size` texture
///
/// A negative width mirrors horizontally; a negative height samples the
/// region from the bottom up
pub fn source_uvs(source: Rect, texture_size: Vec2) -> [[f32; 2]; 4] {
    let Rect {
        position: mut pos,
        size: mut size,
    } = source;

    let flip_x = size.x < 0.0;
    if flip_x {
        size.x = -size.x;
    }
    if size.y < 0.0 {
        pos.y -= size.y;
    }

    let (mut u0, mut u1) = (pos.x / texture_size.x, (pos.x + size.x) / texture_size.x);
    if flip_x {
        (u0, u1) = (u1, u0);
    }
    let (v0, v1) = (pos.y / texture_size.y, (pos.y + size.y) / texture_size.y);

    [[u0, v0], [u1, v0], [u1, v1], [u0, v1]]
}

/// Builder for (textured) rectangles, drawn on `Drop`
pub struct RectangleBuilder<'a> {
    list: &'a mut DrawList,
    dest: Rect,
    origin: Vec2,
    rotation: f32,
    color: Color,
    uvs: [[f32; 2]; 4],
    tex_id: Option<usize>,
}

/// Builds a rectangle with configurable position, size, color, origin, rotation, & texture
impl<'a> RectangleBuilder<'a> {
    pub(crate) fn new(list: &'a mut DrawList) -> Self {
        Self {
            list,
            dest: Rect::new(Vec2::ZERO, vec2(64.0, 64.0)),
            origin: Vec2::ZERO,
            rotation: 0.0,
            color: Color::WHITE,
            uvs: FULL_UVS,
            tex_id: None,
        }
    }
    /// Sets the position & size from a [`Rect`]
    pub fn with(mut self, rect: &Rect) -> Self {
        self.dest = *rect;
        self
    }
    /// Sets the world-space position of the rectangle
    pub fn at(mut self, position: impl Into<Vec2>) -> Self {
        self.dest.position = position.into();
        self
    }
    /// Sets the size of the rectangle
    pub fn size(mut self, size: Vec2) -> Self {
        self.dest.size = size;
        self
    }
    /// Pivot for rotation, relative to the top-left corner; placed at the position
    pub fn origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }
    /// Sets rotation in degrees, clockwise on screen
    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
    /// Sets the color of the rectangle (multiplied with the texture)
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
    /// Sets the texture ID for the rectangle
    pub fn texture(mut self, id: usize) -> Self {
        self.tex_id = Some(id);
        self
    }
    /// Samples the `source` pixel region of a `texture_size` texture
    pub fn source(mut self, source: Rect, texture_size: Vec2) -> Self {
        self.uvs = source_uvs(source, texture_size);
        self
    }
}

impl Drop for RectangleBuilder<'_> {
    fn drop(&mut self) {
        let corners = quad_corners(self.dest, self.origin, self.rotation);
        let color = self.color.linear();

        let verts = [0, 1, 2, 3].map(|i| Vertex::new(corners[i].into(), color, self.uvs[i]));
        self.list.push_quad(self.tex_id, verts);
    }
}
