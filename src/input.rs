use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks input state for keyboard and mouse.
///
/// "Pressed" and "released" sets are edge-triggered: they hold only what
/// changed since the last [`Input::begin_frame`]. OS key repeat never shows
/// up as a fresh press.
#[derive(Debug, Default)]
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_buttons_pressed: HashSet<MouseButton>,
    mouse_position: Vec2,
    mouse_delta: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_buttons_pressed.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.press_mouse(*button),
                ElementState::Released => self.release_mouse(*button),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            // Releases that happen while unfocused never reach us.
            WindowEvent::Focused(false) => {
                self.keys_down.clear();
                self.mouse_buttons_down.clear();
            }
            _ => {}
        }
    }

    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        if self.mouse_buttons_down.insert(button) {
            self.mouse_buttons_pressed.insert(button);
        }
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_buttons_down.remove(&button);
    }

    pub fn move_cursor(&mut self, position: Vec2) {
        self.mouse_delta += position - self.mouse_position;
        self.mouse_position = position;
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Returns true if any key went down this frame.
    pub fn any_key_pressed(&self) -> bool {
        !self.keys_pressed.is_empty()
    }

    /// Returns true if the mouse button is currently held down.
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Returns true if the mouse button was pressed this frame.
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed.contains(&button)
    }

    /// Returns true if any mouse button went down this frame.
    pub fn any_mouse_pressed(&self) -> bool {
        !self.mouse_buttons_pressed.is_empty()
    }

    /// Current mouse position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Mouse movement delta this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_only_presses_once() {
        let mut input = Input::new();
        input.press_key(KeyCode::Digit1);
        assert!(input.key_pressed(KeyCode::Digit1));

        input.begin_frame();
        // OS key repeat
        input.press_key(KeyCode::Digit1);
        assert!(!input.key_pressed(KeyCode::Digit1));
        assert!(input.key_down(KeyCode::Digit1));

        input.release_key(KeyCode::Digit1);
        assert!(input.key_released(KeyCode::Digit1));
        input.begin_frame();
        input.press_key(KeyCode::Digit1);
        assert!(input.key_pressed(KeyCode::Digit1));
    }

    #[test]
    fn cursor_delta_accumulates_until_next_frame() {
        let mut input = Input::new();
        input.move_cursor(Vec2::new(10.0, 0.0));
        input.move_cursor(Vec2::new(15.0, 5.0));
        assert_eq!(input.mouse_delta(), Vec2::new(15.0, 5.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        assert_eq!(input.mouse_position(), Vec2::new(15.0, 5.0));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = Input::new();
        input.press_key(KeyCode::KeyW);
        input.press_mouse(MouseButton::Left);
        input.handle_event(&WindowEvent::Focused(false));
        assert!(!input.key_down(KeyCode::KeyW));
        assert!(!input.mouse_down(MouseButton::Left));
    }
}
