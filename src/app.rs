use std::sync::Arc;

use tyndustre_app::{
    AppConfig, AppError, AppHandler, AppRunner, BoxError, Window, input::Input, time::FrameTimer,
};
use tyndustre_render::{Renderer, color::Color};

use crate::{graphics::Graphics, platform::Scene};

/// Window & loop settings for running a [`Scene`]
pub struct App {
    config: AppConfig,
    vsync: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new [`App`]
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            vsync: true,
        }
    }

    /// Set application title
    pub fn title(mut self, title: &str) -> Self {
        self.config.title = title.into();
        self
    }

    /// Set window size (width, height in pixels)
    pub fn screen_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Enable or disable window resizing (defaults to false)
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.config.resizable = resizable;
        self
    }

    /// Cap the frame rate on native targets; `None` runs uncapped
    pub fn target_fps(mut self, fps: Option<u32>) -> Self {
        self.config.target_fps = fps;
        self
    }

    /// Enable or disable vsync
    pub fn vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }

    /// Open the window & drive `S` until it closes
    ///
    /// Fails if the window, the GPU or [`Scene::load`] can't be brought up
    pub fn run<S: Scene + 'static>(self) -> Result<(), AppError> {
        let handler = SceneHandler::<S> {
            scene: None,
            vsync: self.vsync,
        };
        AppRunner::new(handler, self.config).run()
    }
}

struct SceneHandler<S> {
    scene: Option<S>,
    vsync: bool,
}

impl<S: Scene> AppHandler<Renderer> for SceneHandler<S> {
    async fn with_resource(&mut self, window: Arc<Window>) -> Result<Renderer, BoxError> {
        let size = window.inner_size();
        Ok(Renderer::new(size.width, size.height, window).await?)
    }

    fn on_ready(&mut self, _window: &Window, renderer: &mut Renderer) -> Result<(), BoxError> {
        renderer.set_vsync(self.vsync);

        #[cfg(target_arch = "wasm32")]
        renderer.resize(_window.inner_size().width, _window.inner_size().height);

        let (w, h) = renderer.surface_size();
        let mut graphics = Graphics::new(renderer, w, h);
        self.scene = Some(S::load(&mut graphics)?);
        Ok(())
    }

    fn frame(&mut self, _window: &Window, renderer: &mut Renderer, input: &Input, timer: &FrameTimer) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        scene.update(input, timer);

        let Some(mut frame) = renderer.begin_frame() else {
            return;
        };

        let (w, h) = renderer.surface_size();
        let mut graphics = Graphics::new(renderer, w, h);
        if let Err(err) = scene.draw(&mut graphics) {
            log::error!("draw failed: {err}");
        }
        let (mut list, clear) = graphics.finish();

        if let Err(err) = renderer.prepare_text() {
            log::error!("{err}");
        }

        {
            let clear = clear.unwrap_or(Color::BLACK);
            let mut r_pass =
                renderer.begin_render_pass(&mut frame.encoder, &frame.view, Some(clear));
            renderer.draw_list(&mut r_pass, &mut list);
            renderer.render_text(&mut r_pass);
        }

        renderer.end_frame(frame);
    }

    fn resize(&mut self, w: u32, h: u32, renderer: &mut Renderer) {
        renderer.resize(w, h);
    }

    fn on_quit(&mut self, renderer: Option<&mut Renderer>) {
        let (Some(scene), Some(renderer)) = (self.scene.take(), renderer) else {
            return;
        };
        let (w, h) = renderer.surface_size();
        if let Err(err) = scene.unload(&mut Graphics::new(renderer, w, h)) {
            log::warn!("unload failed: {err}");
        }
    }
}
