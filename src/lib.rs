pub mod app;
pub mod camera;
pub mod error;
pub mod graphics;
pub mod pawn;
pub mod pixel_camera;
pub mod platform;
pub mod primitives;
pub mod sprite;
pub mod steering;

pub use app::App;
pub use error::{Error, Result};
pub use platform::{Canvas, Clock, Controls, RenderTexture, Scene, Texture};

pub mod input {
    pub use tyndustre_app::input::{Input, KeyCode, MouseButton};
}

pub mod math {
    pub use tyndustre_render::math::{Rect, Vec2, vec2};
}

pub mod render {
    pub use tyndustre_render::{Renderer, color::Color};
}
