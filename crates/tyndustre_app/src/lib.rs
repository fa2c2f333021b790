pub mod input;
pub mod time;

use crate::{
    input::{Input, KeyCode},
    time::FrameTimer,
};
use std::sync::Arc;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    error::{EventLoopError, OsError},
    event::ElementState,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    keyboard::PhysicalKey,
    window::WindowId,
};
pub use winit::{event::WindowEvent, window::Window};

#[cfg(not(target_arch = "wasm32"))]
use crate::time::FramePacer;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Boxed error produced by an [`AppHandler`] hook
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop failed")]
    EventLoop(#[from] EventLoopError),
    #[error("failed to create window")]
    Window(#[from] OsError),
    #[error("startup failed")]
    Startup(#[source] BoxError),
}

pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// Redraw cap on native targets; `None` redraws as fast as the platform allows
    pub target_fps: Option<u32>,
    /// Key that closes the app, like the window close button
    pub exit_key: Option<KeyCode>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "tyndustre".to_string(),
            width: 800,
            height: 450,
            resizable: false,
            target_fps: Some(60),
            exit_key: Some(KeyCode::Escape),
        }
    }
}

/// Trait defining application behavior
///
/// Implement this for your app logic. Hooks are called during window creation,
/// every frame, on resize, & before quitting
#[allow(async_fn_in_trait)]
pub trait AppHandler<R> {
    /// Called once the window exists; should create & return the resource
    async fn with_resource(&mut self, window: Arc<Window>) -> Result<R, BoxError>;
    /// Called after the resource is initialized & window is ready
    fn on_ready(&mut self, _window: &Window, _resource: &mut R) -> Result<(), BoxError> {
        Ok(())
    }
    /// Called every frame
    fn frame(&mut self, _window: &Window, _resource: &mut R, _input: &Input, _timer: &FrameTimer) {}
    /// Called on window resize
    fn resize(&mut self, _w: u32, _h: u32, _resource: &mut R) {}
    /// Called once before the loop exits; `resource` is `None` if startup never finished
    fn on_quit(&mut self, _resource: Option<&mut R>) {}
}

type Loaded<R, H> = (Result<R, BoxError>, H);

/// Generic application entry point
///
/// Manages window creation, input, frame pacing, event loop & delegating hooks
/// to your `AppHandler`
/// Use `AppRunner::new()` to construct it, then call `.run()` to start the loop
pub struct AppRunner<R: 'static, H: AppHandler<R> + 'static> {
    handler: Option<H>,
    resource: Option<R>,
    window: Option<Arc<Window>>,
    proxy: Option<EventLoopProxy<Loaded<R, H>>>,
    input: Input,
    timer: FrameTimer,
    config: AppConfig,
    failure: Option<AppError>,
    #[cfg(not(target_arch = "wasm32"))]
    pacer: Option<FramePacer>,
}

#[doc(hidden)]
impl<R, H: AppHandler<R> + 'static> ApplicationHandler<Loaded<R, H>> for AppRunner<R, H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Called when window is ready; initializes the resource async (wasm) or sync (native)
        let Some(proxy) = self.proxy.take() else {
            return;
        };

        let win_attrs = {
            use winit::dpi::PhysicalSize;

            #[allow(unused_mut)]
            let mut attrs = Window::default_attributes()
                .with_title(&self.config.title)
                .with_resizable(self.config.resizable)
                .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

            #[cfg(target_arch = "wasm32")]
            {
                use winit::platform::web::WindowAttributesExtWebSys;
                attrs = attrs.with_append(true);
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                attrs = attrs.with_visible(false);
            }

            attrs
        };

        let window = match event_loop.create_window(win_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("window creation failed: {err}");
                self.failure = Some(err.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let Some(mut handler) = self.handler.take() else {
            return;
        };

        #[cfg(target_arch = "wasm32")]
        {
            // Wait for DOM and canvas to be ready before initializing
            wasm_bindgen_futures::spawn_local(async move {
                let resource = handler.with_resource(window).await;
                _ = proxy.send_event((resource, handler));
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let resource = pollster::block_on(handler.with_resource(window));
            _ = proxy.send_event((resource, handler));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.quit(event_loop),
            WindowEvent::RedrawRequested => {
                if let (Some(w), Some(r), Some(handler)) = (
                    self.window.as_ref(),
                    self.resource.as_mut(),
                    self.handler.as_mut(),
                ) {
                    self.timer.update();
                    handler.frame(w, r, &self.input, &self.timer);
                    self.input.end_frame();
                }

                #[cfg(target_arch = "wasm32")]
                if let Some(w) = self.window.as_ref() {
                    w.request_redraw();
                }
            }
            WindowEvent::Resized(size) => {
                if let (Some(r), Some(handler)) = (self.resource.as_mut(), self.handler.as_mut()) {
                    handler.resize(size.width, size.height, r);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let exit = self.config.exit_key.is_some_and(|key| {
                    event.state == ElementState::Pressed
                        && event.physical_key == PhysicalKey::Code(key)
                });
                if exit {
                    self.quit(event_loop);
                } else {
                    self.input.keyboard(&event);
                }
            }
            WindowEvent::MouseInput { button, state, .. } => self.input.mouse(button, state),
            WindowEvent::CursorMoved { position, .. } => self.input.cursor(position),
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, (resource, mut handler): Loaded<R, H>) {
        let mut resource = match resource {
            Ok(resource) => resource,
            Err(err) => {
                log::error!("failed to create render resource: {err}");
                self.handler = Some(handler);
                self.failure = Some(AppError::Startup(err));
                event_loop.exit();
                return;
            }
        };

        let Some(window) = self.window.clone() else {
            return;
        };

        if let Err(err) = handler.on_ready(&window, &mut resource) {
            log::error!("startup failed: {err}");
            handler.on_quit(Some(&mut resource));
            self.failure = Some(AppError::Startup(err));
            event_loop.exit();
            return;
        }
        log::info!("`{}` ready", self.config.title);
        // the first frame's delta must not include startup
        self.timer.reset();

        #[cfg(not(target_arch = "wasm32"))]
        {
            self.pacer = self
                .config
                .target_fps
                .map(|fps| FramePacer::new(fps, Instant::now()));
            window.set_visible(true);
        }
        #[cfg(target_arch = "wasm32")]
        window.request_redraw();

        self.resource = Some(resource);
        self.handler = Some(handler);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(_)) = (self.window.as_ref(), self.resource.as_ref()) else {
            return;
        };

        match self.pacer.as_mut().and_then(|p| p.poll(Instant::now())) {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => window.request_redraw(),
        }
    }
}

impl<R, H: AppHandler<R> + 'static> AppRunner<R, H> {
    /// Creates a new runner with the given handler & configuration
    pub fn new(handler: H, config: AppConfig) -> Self {
        Self {
            handler: Some(handler),
            resource: None,
            window: None,
            proxy: None,
            input: Input::default(),
            timer: FrameTimer::default(),
            config,
            failure: None,
            #[cfg(not(target_arch = "wasm32"))]
            pacer: None,
        }
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(handler) = self.handler.as_mut() {
            handler.on_quit(self.resource.as_mut());
        }
        // drop GPU resources before the window goes away
        self.resource = None;
        event_loop.exit();
    }

    /// Starts the app & runs the event loop
    ///
    /// Returns the first startup failure, if any; a normal close returns `Ok`
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::<Loaded<R, H>>::with_user_event().build()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        self.proxy = Some(event_loop.create_proxy());

        #[cfg(target_arch = "wasm32")]
        {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if let Err(err) = console_log::init_with_level(log::Level::Info) {
                web_sys::console::warn_1(&format!("logger already set: {err}").into());
            }

            use winit::platform::web::EventLoopExtWebSys;
            wasm_bindgen_futures::spawn_local(async move {
                event_loop.spawn_app(self);
            });
            Ok(())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let env = env_logger::Env::default().default_filter_or("info");
            if env_logger::Builder::from_env(env).try_init().is_err() {
                log::debug!("logger already initialised");
            }

            event_loop.run_app(&mut self)?;
            match self.failure.take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }
}
