use glam::Vec2;
use log::trace;
use track_framework_common::input::{InputSnapshot, Key, MouseButton};
use winit::{
    event::{self, ElementState, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Touchpads report scrolling in pixels; this many pixels make up one wheel notch.
const PIXELS_PER_NOTCH: f64 = 40.0;

/// Folds winit's window events into an [`InputSnapshot`].
#[derive(Default)]
pub struct InputCollector {
    snapshot: InputSnapshot,
    /// fractional notches of pixel based scrolling not reported yet
    scroll_remainder: f64,
}

impl InputCollector {
    #[must_use]
    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    /// Clears the per-frame state after the frame has been processed.
    pub fn end_frame(&mut self) {
        self.snapshot.end_frame();
    }

    /// Returns `true` if the event was an input event and got consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match *event {
            WindowEvent::KeyboardInput {
                event: ref key_event,
                ..
            } => {
                let PhysicalKey::Code(code) = key_event.physical_key else {
                    return true;
                };
                let Some(key) = translate_key(code) else {
                    trace!("ignoring unmapped key {code:?}");
                    return true;
                };
                match key_event.state {
                    ElementState::Pressed => self.snapshot.press_key(key),
                    ElementState::Released => self.snapshot.release_key(key),
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = translate_button(button) else {
                    return true;
                };
                match state {
                    ElementState::Pressed => self.snapshot.press_button(button),
                    ElementState::Released => self.snapshot.release_button(button),
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "pixel coordinates fit into f32"
                )]
                self.snapshot
                    .set_mouse_position(Vec2::new(position.x as f32, position.y as f32));
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => f64::from(lines),
                    MouseScrollDelta::PixelDelta(pixels) => pixels.y / PIXELS_PER_NOTCH,
                };
                self.scroll_remainder += notches;
                let whole = self.scroll_remainder.trunc();
                self.scroll_remainder -= whole;
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "a single frame never scrolls more than i32::MAX notches"
                )]
                self.snapshot.add_scroll(whole as i32);
                true
            }
            _ => false,
        }
    }
}

fn translate_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyC => Key::C,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::F5 => Key::F5,
        KeyCode::F9 => Key::F9,
        _ => return None,
    };
    Some(key)
}

fn translate_button(button: event::MouseButton) -> Option<MouseButton> {
    match button {
        event::MouseButton::Left => Some(MouseButton::Left),
        event::MouseButton::Right => Some(MouseButton::Right),
        event::MouseButton::Middle => Some(MouseButton::Middle),
        event::MouseButton::Back | event::MouseButton::Forward | event::MouseButton::Other(_) => {
            None
        }
    }
}
