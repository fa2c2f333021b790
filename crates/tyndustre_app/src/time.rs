#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

/// Wall clock the timer measures from
#[cfg(target_arch = "wasm32")]
type Origin = f64;
#[cfg(not(target_arch = "wasm32"))]
type Origin = Instant;

#[cfg(target_arch = "wasm32")]
fn origin() -> Origin {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now() / 1000.0)
}

#[cfg(not(target_arch = "wasm32"))]
fn origin() -> Origin {
    Instant::now()
}

#[cfg(target_arch = "wasm32")]
fn seconds_since(start: Origin) -> f64 {
    (origin() - start).max(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
fn seconds_since(start: Origin) -> f64 {
    start.elapsed().as_secs_f64()
}

pub struct FrameTimer {
    start: Origin,
    last_time: f64,
    accumulator: f32,
    frame_count: u32,
    /// Time in seconds since the last frame
    pub delta: f32,
    /// Seconds elapsed since the timer was created or last reset
    pub elapsed: f64,
    /// Frames per second, updated once per second
    pub fps: u32,
    /// Total number of frames rendered since start
    pub frame: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self {
            start: origin(),
            last_time: 0.0,
            accumulator: 0.0,
            frame_count: 0,
            delta: 0.0,
            elapsed: 0.0,
            fps: 0,
            frame: 0,
        }
    }
}

impl FrameTimer {
    /// Restarts the clock from now, as if the timer had just been created
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Updates delta time & calculates FPS
    pub(crate) fn update(&mut self) {
        self.advance_to(seconds_since(self.start));
    }

    /// Moves the clock to `cur_time` seconds since start
    pub fn advance_to(&mut self, cur_time: f64) {
        self.delta = (cur_time - self.last_time) as f32;
        self.last_time = cur_time;
        self.elapsed = cur_time;

        self.accumulator += self.delta;
        self.frame_count += 1;
        self.frame += 1;

        if self.accumulator >= 1.0 {
            self.fps = self.frame_count;
            self.frame_count = 0;
            self.accumulator = 0.0;
        }
    }
}

/// Caps the redraw rate on native targets
///
/// Browsers schedule frames themselves, so wasm builds redraw every animation frame
#[cfg(not(target_arch = "wasm32"))]
pub struct FramePacer {
    frame: Duration,
    next: Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl FramePacer {
    pub fn new(target_fps: u32, now: Instant) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            next: now,
        }
    }

    /// Returns `None` if a frame is due (scheduling the next one), otherwise the deadline to wait for
    ///
    /// Missed deadlines are dropped rather than replayed back to back
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        if now < self.next {
            return Some(self.next);
        }

        self.next += self.frame;
        if self.next <= now {
            self.next = now + self.frame;
        }
        None
    }
}
