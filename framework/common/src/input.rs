use std::collections::HashSet;

use glam::Vec2;

/// Keys the engine reacts to. Platform key codes are translated by the framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    C,
    Up,
    Down,
    Left,
    Right,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Enter,
    Escape,
    Tab,
    F5,
    F9,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Read-only view on the input devices, polled once per frame.
pub trait InputState {
    /// The key is currently held down.
    fn is_key_pressed(&self, key: Key) -> bool;

    /// The key went down since the previous frame.
    fn is_key_just_pressed(&self, key: Key) -> bool;

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;

    fn is_mouse_button_just_pressed(&self, button: MouseButton) -> bool;

    /// Cursor position in pixels, origin at the top-left corner of the surface.
    fn mouse_position(&self) -> Vec2;

    /// Scroll wheel notches since the previous frame, positive when scrolling away from
    /// the user.
    fn scroll_wheel_delta(&self) -> i32;
}

/// The state of all input devices for a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pressed_keys: HashSet<Key>,
    just_pressed_keys: HashSet<Key>,
    pressed_buttons: HashSet<MouseButton>,
    just_pressed_buttons: HashSet<MouseButton>,
    mouse_position: Vec2,
    scroll_wheel_delta: i32,
}

impl InputSnapshot {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Marks `key` as held down (and as just pressed if it was not held before).
    pub fn press_key(&mut self, key: Key) {
        if self.pressed_keys.insert(key) {
            self.just_pressed_keys.insert(key);
        }
    }

    pub fn release_key(&mut self, key: Key) {
        self.pressed_keys.remove(&key);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        if self.pressed_buttons.insert(button) {
            self.just_pressed_buttons.insert(button);
        }
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.pressed_buttons.remove(&button);
    }

    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    pub fn add_scroll(&mut self, notches: i32) {
        self.scroll_wheel_delta = self.scroll_wheel_delta.saturating_add(notches);
    }

    /// Forgets everything that only applies to a single frame: edge triggers and the
    /// accumulated scroll distance. Held keys and the cursor position remain.
    pub fn end_frame(&mut self) {
        self.just_pressed_keys.clear();
        self.just_pressed_buttons.clear();
        self.scroll_wheel_delta = 0;
    }

    #[must_use]
    pub fn with_key(mut self, key: Key) -> Self {
        self.press_key(key);
        self
    }

    #[must_use]
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.press_button(button);
        self
    }

    #[must_use]
    pub fn with_mouse_position(mut self, position: Vec2) -> Self {
        self.set_mouse_position(position);
        self
    }

    #[must_use]
    pub fn with_scroll(mut self, notches: i32) -> Self {
        self.add_scroll(notches);
        self
    }
}

impl InputState for InputSnapshot {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    fn is_key_just_pressed(&self, key: Key) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    fn is_mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.just_pressed_buttons.contains(&button)
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    fn scroll_wheel_delta(&self) -> i32 {
        self.scroll_wheel_delta
    }
}
