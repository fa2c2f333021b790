use color::{AlphaColor, LinearSrgb, Srgb};

/// An sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    inner: AlphaColor<Srgb>,
}

impl Color {
    /// Create a new Color from sRGB components in [0..1]
    pub const fn new(components: [f32; 4]) -> Self {
        Self {
            inner: AlphaColor::new(components),
        }
    }

    /// Create a new Color from 8-bit sRGB components
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            inner: AlphaColor::from_rgba8(r, g, b, a),
        }
    }

    /// Get raw sRGB components
    pub fn components(&self) -> [f32; 4] {
        self.inner.components
    }

    /// Components in linear space, as blended by an sRGB render target
    pub fn linear(&self) -> [f32; 4] {
        self.inner.convert::<LinearSrgb>().components
    }
}

impl Color {
    pub const BLACK: Color = Self::rgba8(0, 0, 0, 255);
    pub const WHITE: Color = Self::rgba8(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Self::rgba8(0, 0, 0, 0);
    pub const RED: Color = Self::rgba8(230, 41, 55, 255);
    pub const GREEN: Color = Self::rgba8(0, 228, 48, 255);
    pub const BLUE: Color = Self::rgba8(0, 121, 241, 255);
    pub const LIME: Color = Self::rgba8(0, 158, 47, 255);
    pub const RAYWHITE: Color = Self::rgba8(245, 245, 245, 255);
    pub const LIGHTGRAY: Color = Self::rgba8(200, 200, 200, 255);
    pub const DARKBLUE: Color = Self::rgba8(0, 82, 172, 255);
    pub const DARKGREEN: Color = Self::rgba8(0, 117, 44, 255);
}

// Clear colors are given in the target's linear space
impl From<Color> for wgpu::Color {
    fn from(value: Color) -> Self {
        let [r, g, b, a] = value.linear();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

impl From<Color> for glyphon::Color {
    fn from(value: Color) -> Self {
        let [r, g, b, a] = value.inner.to_rgba8().to_u8_array();
        glyphon::Color::rgba(r, g, b, a)
    }
}
