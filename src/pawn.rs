//! The pawn demo: a ship that steers toward the pointer over a tiled floor

use std::path::Path;

use glam::{Vec2, vec2};
use tyndustre_app::input::KeyCode;
use tyndustre_render::{color::Color, math::Rect};

use crate::{
    error::Result,
    platform::{Canvas, Clock, Controls, Scene},
    sprite::Sprite,
    steering::{
        PawnConfig, PawnState, heading_degrees, keyboard_step, pointer_step, smooth_look,
    },
};

/// Directory the demo assets are read from, relative to the working directory
pub const ASSET_DIR: &str = "res";

const SPAWN: Vec2 = Vec2::new(256.0, 256.0);
const FLOOR: Rect = Rect::xywh(0.0, 0.0, 1024.0, 1024.0);

/// The four sprites the demo draws; loaded once, released by [`unload`](Self::unload)
pub struct GameAssets {
    pub crosshair: Sprite,
    pub ship: Sprite,
    pub floor: Sprite,
    pub marker: Sprite,
}

impl GameAssets {
    pub const FILES: [&'static str; 4] = [
        "crosshair.png",
        "playership.png",
        "tilefloor.png",
        "locationmark.png",
    ];

    /// Loads every sprite from `dir`; the first missing or broken file aborts the load
    pub fn load(canvas: &mut dyn Canvas, dir: &Path) -> Result<Self> {
        let [crosshair, ship, floor, marker] = Self::FILES;
        let mut sprite = |name: &str| -> Result<Sprite> {
            Ok(Sprite::new(canvas.load_texture(&dir.join(name))?))
        };

        Ok(Self {
            crosshair: sprite(crosshair)?,
            ship: sprite(ship)?,
            floor: sprite(floor)?,
            marker: sprite(marker)?,
        })
    }

    /// Releases every texture, reporting the first failure
    pub fn unload(self, canvas: &mut dyn Canvas) -> Result<()> {
        [self.crosshair, self.ship, self.floor, self.marker]
            .into_iter()
            .map(|sprite| canvas.unload_texture(sprite.texture))
            .fold(Ok(()), Result::and)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlScheme {
    /// Hold the primary button to drag the target around
    #[default]
    Pointer,
    /// WASD or arrow keys
    Keyboard,
}

impl ControlScheme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Pointer => Self::Keyboard,
            Self::Keyboard => Self::Pointer,
        }
    }
}

/// Summed direction of the held movement keys; y grows down the screen
pub fn keyboard_axis(controls: &dyn Controls) -> Vec2 {
    let held = |a, b| controls.key_down(a) || controls.key_down(b);
    let mut axis = Vec2::ZERO;
    if held(KeyCode::KeyD, KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if held(KeyCode::KeyA, KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if held(KeyCode::KeyW, KeyCode::ArrowUp) {
        axis.y -= 1.0;
    }
    if held(KeyCode::KeyS, KeyCode::ArrowDown) {
        axis.y += 1.0;
    }
    axis
}

pub struct PawnScene {
    config: PawnConfig,
    state: PawnState,
    assets: GameAssets,
    scheme: ControlScheme,
}

impl PawnScene {
    pub fn with_assets(assets: GameAssets) -> Self {
        Self {
            config: PawnConfig::default(),
            state: PawnState::at_rest(SPAWN),
            assets,
            scheme: ControlScheme::default(),
        }
    }

    pub fn state(&self) -> &PawnState {
        &self.state
    }

    pub fn assets(&self) -> &GameAssets {
        &self.assets
    }

    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }
}

impl Scene for PawnScene {
    fn load(canvas: &mut dyn Canvas) -> Result<Self> {
        let assets = GameAssets::load(canvas, Path::new(ASSET_DIR))?;
        Ok(Self::with_assets(assets))
    }

    fn update(&mut self, controls: &dyn Controls, clock: &dyn Clock) {
        if controls.key_pressed(KeyCode::Tab) {
            self.scheme = self.scheme.toggled();
            log::info!("steering with {:?}", self.scheme);
        }

        let pointer = controls.pointer_position();
        match self.scheme {
            ControlScheme::Pointer => {
                pointer_step(&mut self.state, &self.config, pointer, controls.pointer_down())
            }
            ControlScheme::Keyboard => {
                keyboard_step(&mut self.state, &self.config, keyboard_axis(controls))
            }
        }
        self.state.look = smooth_look(
            self.state.look,
            self.state.position,
            pointer,
            self.config.rot_dump,
        );

        let assets = &mut self.assets;
        assets.crosshair.position = pointer;
        assets.ship.position = self.state.position;
        assets.ship.rotation = heading_degrees(self.state.look);
        assets.marker.position = self.state.target_position;
        // frame-coupled: one degree per frame
        assets.marker.rotation = (assets.marker.rotation + 1.0) % 360.0;
        assets.marker.scale = 1.1 + (clock.time().sin() * 0.1) as f32;
    }

    fn draw(&mut self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.clear(Color::RAYWHITE);
        canvas.draw_texture_tiled(&self.assets.floor.texture, FLOOR, 1.0, Color::WHITE);
        canvas.draw_text("XXX", vec2(190.0, 200.0), 20.0, Color::LIGHTGRAY);

        self.assets.crosshair.draw(canvas);
        self.assets.ship.draw(canvas);
        self.assets.marker.draw(canvas);
        Ok(())
    }

    fn unload(self, canvas: &mut dyn Canvas) -> Result<()> {
        self.assets.unload(canvas)
    }
}
