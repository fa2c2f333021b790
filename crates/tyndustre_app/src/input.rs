pub use winit::{event::MouseButton, keyboard::KeyCode};

use std::collections::HashMap;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent},
    keyboard::PhysicalKey,
};

/// Keyboard & mouse state sampled from window events
///
/// Each key/button keeps `(current, previous)` so edges can be detected until
/// [`end_frame`](Self::end_frame) rolls the state over
#[derive(Default)]
pub struct Input {
    keyboard: HashMap<KeyCode, (ElementState, ElementState)>,
    mouse_buttons: HashMap<MouseButton, (ElementState, ElementState)>,
    mouse_position: (f32, f32),
    mouse_delta: (f32, f32),
}

impl Input {
    /// Update keyboard state from a `winit` KeyEvent
    pub(crate) fn keyboard(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.set_key(key_code, event.state);
        }
    }

    /// Update mouse button state
    pub(crate) fn mouse(&mut self, button: MouseButton, state: ElementState) {
        let prev = self
            .mouse_buttons
            .get(&button)
            .map_or(ElementState::Released, |(curr, _)| *curr);
        self.mouse_buttons.insert(button, (state, prev));
    }

    /// Update cursor position & compute delta
    pub(crate) fn cursor(&mut self, position: PhysicalPosition<f64>) {
        let pos: (f32, f32) = position.into();
        self.move_cursor(pos.0, pos.1);
    }

    fn set_key(&mut self, key: KeyCode, state: ElementState) {
        let prev = self
            .keyboard
            .get(&key)
            .map_or(ElementState::Released, |(curr, _)| *curr);
        self.keyboard.insert(key, (state, prev));
    }

    fn move_cursor(&mut self, x: f32, y: f32) {
        let prev = self.mouse_position;
        self.mouse_delta = (x - prev.0, y - prev.1);
        self.mouse_position = (x, y);
    }

    /// Update previous states & clean up released keys/buttons
    pub(crate) fn end_frame(&mut self) {
        for (curr, prev) in self.keyboard.values_mut() {
            *prev = *curr;
        }
        for (curr, prev) in self.mouse_buttons.values_mut() {
            *prev = *curr;
        }

        // drop released entries so the maps don't grow forever
        self.keyboard
            .retain(|_, (curr, _)| *curr != ElementState::Released);
        self.mouse_buttons
            .retain(|_, (curr, _)| *curr != ElementState::Released);

        self.mouse_delta = (0.0, 0.0);
    }

    /// True if the key went from not pressed last frame to pressed this frame
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.get(&key).is_some_and(|(curr, prev)| {
            *curr == ElementState::Pressed && *prev != ElementState::Pressed
        })
    }

    /// True if key is held down (pressed now regardless of last frame)
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keyboard
            .get(&key)
            .is_some_and(|(curr, _)| *curr == ElementState::Pressed)
    }

    /// True if key was just released this frame
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keyboard
            .get(&key)
            .is_some_and(|(curr, _)| *curr == ElementState::Released)
    }

    /// True if any key in slice is held
    pub fn keys_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&key| self.key_held(key))
    }

    /// True if mouse button was just pressed this frame
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).is_some_and(|(curr, prev)| {
            *curr == ElementState::Pressed && *prev != ElementState::Pressed
        })
    }

    /// True if mouse button is held down
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_buttons
            .get(&button)
            .is_some_and(|(curr, _)| *curr == ElementState::Pressed)
    }

    /// True if mouse button was released this frame
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons
            .get(&button)
            .is_some_and(|(curr, _)| *curr == ElementState::Released)
    }

    /// Current mouse cursor position in window pixels
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Delta mouse movement since last frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }
}

/// Synthetic input for driving scenes without a window (tests, headless runs)
impl Input {
    pub fn inject_key(&mut self, key: KeyCode, pressed: bool) {
        self.set_key(key, element_state(pressed));
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.mouse(button, element_state(pressed));
    }

    pub fn inject_cursor(&mut self, x: f32, y: f32) {
        self.move_cursor(x, y);
    }

    /// Rolls the frame over, same as the runner does after each frame
    pub fn advance_frame(&mut self) {
        self.end_frame();
    }
}

fn element_state(pressed: bool) -> ElementState {
    if pressed {
        ElementState::Pressed
    } else {
        ElementState::Released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_and_release_behavior() {
        // press -> hold -> release flow
        let mut input = Input::default();
        input.inject_key(KeyCode::Tab, true);
        assert!(input.key_pressed(KeyCode::Tab));
        assert!(input.key_held(KeyCode::Tab));
        assert!(!input.key_released(KeyCode::Tab));

        input.end_frame();
        assert!(!input.key_pressed(KeyCode::Tab));
        assert!(input.key_held(KeyCode::Tab));

        input.inject_key(KeyCode::Tab, false);
        assert!(input.key_released(KeyCode::Tab));
        assert!(!input.key_held(KeyCode::Tab));

        input.end_frame(); // drops released key from map
        assert!(!input.key_held(KeyCode::Tab));
        assert!(!input.key_released(KeyCode::Tab));
    }

    #[test]
    fn primary_button_held_across_frames() {
        // dragging keeps the button held while the cursor moves
        let mut input = Input::default();
        input.inject_mouse_button(MouseButton::Left, true);
        input.inject_cursor(300.0, 300.0);
        assert!(input.mouse_pressed(MouseButton::Left));

        input.end_frame();
        input.inject_cursor(310.0, 290.0);
        assert!(!input.mouse_pressed(MouseButton::Left));
        assert!(input.mouse_held(MouseButton::Left));
        assert_eq!(input.mouse_position(), (310.0, 290.0));
        assert_eq!(input.mouse_delta(), (10.0, -10.0));

        input.inject_mouse_button(MouseButton::Left, false);
        assert!(input.mouse_released(MouseButton::Left));
        assert!(!input.mouse_held(MouseButton::Left));
    }

    #[test]
    fn end_frame_cleans_released_keys_and_resets_mouse_delta() {
        let mut input = Input::default();

        input.inject_key(KeyCode::KeyW, true);
        input.inject_key(KeyCode::KeyS, false);
        input.inject_mouse_button(MouseButton::Right, false);
        input.inject_cursor(50.0, 75.0);

        input.end_frame();

        assert!(input.key_held(KeyCode::KeyW));
        assert!(!input.key_held(KeyCode::KeyS));
        assert!(!input.mouse_held(MouseButton::Right));
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
        assert_eq!(input.mouse_position(), (50.0, 75.0));
    }

    #[test]
    fn any_of_several_keys() {
        let mut input = Input::default();
        input.inject_key(KeyCode::ArrowLeft, true);

        assert!(input.keys_held(&[KeyCode::KeyA, KeyCode::ArrowLeft]));
        assert!(!input.keys_held(&[KeyCode::KeyD, KeyCode::ArrowRight]));
    }

    #[test]
    fn no_false_positives_for_untracked_keys_and_buttons() {
        let input = Input::default();

        assert!(!input.key_pressed(KeyCode::KeyZ));
        assert!(!input.key_held(KeyCode::KeyZ));
        assert!(!input.key_released(KeyCode::KeyZ));

        assert!(!input.mouse_pressed(MouseButton::Middle));
        assert!(!input.mouse_held(MouseButton::Middle));
        assert!(!input.mouse_released(MouseButton::Middle));
    }

    #[test]
    fn rapid_press_release_press_sequence() {
        // key released & pressed again within the same frame
        let mut input = Input::default();

        input.inject_key(KeyCode::KeyX, true);
        input.end_frame();

        input.inject_key(KeyCode::KeyX, false);
        assert!(input.key_released(KeyCode::KeyX));

        input.inject_key(KeyCode::KeyX, true);
        assert!(input.key_pressed(KeyCode::KeyX));
        assert!(input.key_held(KeyCode::KeyX));
        assert!(!input.key_released(KeyCode::KeyX));
    }
}
