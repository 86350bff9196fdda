//=========================================================================
// Window Input
//=========================================================================
//
// Translates winit window events into the engine's `InputEvent`s.
//
// Modifier state arrives in its own `ModifiersChanged` event; it is
// remembered here and stamped on every later key and button event.
// Key repeats are dropped (held state already covers them).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::event::{
    ElementState, KeyEvent, MouseButton as WinitButton, MouseScrollDelta, WindowEvent,
};
use winit::keyboard::{KeyCode as WinitKey, ModifiersState, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

/// Pixels of trackpad scrolling counted as one wheel line.
const PIXELS_PER_LINE: f32 = 20.0;

//=== WindowInput =========================================================

#[derive(Debug, Default)]
pub(crate) struct WindowInput {
    modifiers: Modifiers,
}

impl WindowInput {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the engine event for `event`, or `None` if it carries no
    /// input for the scene (modifier changes, repeats, unmapped keys,
    /// non-input window events).
    pub(crate) fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = map_modifiers(state.state());
                trace!(target: "platform::input", "Modifiers now {:?}", self.modifiers);
                None
            }
            WindowEvent::KeyboardInput { event, .. } => self.key(event),
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_button(*button);
                let modifiers = self.modifiers;
                Some(match state {
                    ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
                    ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
                })
            }
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::MouseWheel { delta, .. } => Some(scroll(*delta)),
            _ => None,
        }
    }

    fn key(&self, event: &KeyEvent) -> Option<InputEvent> {
        if event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        let key = map_key(code)?;
        let modifiers = self.modifiers;
        Some(match event.state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        })
    }
}

//=== Mapping =============================================================

fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
    }
}

fn map_button(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

fn scroll(delta: MouseScrollDelta) -> InputEvent {
    let (dx, dy) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (x, y),
        MouseScrollDelta::PixelDelta(p) => {
            (p.x as f32 / PIXELS_PER_LINE, p.y as f32 / PIXELS_PER_LINE)
        }
    };
    InputEvent::MouseScrolled { dx, dy }
}

/// Both enums name their keys after the same physical positions.
macro_rules! same_named_keys {
    ($code:expr, [$($key:ident),* $(,)?]) => {
        match $code {
            $(WinitKey::$key => Some(KeyCode::$key),)*
            _ => None,
        }
    };
}

/// `None` for keys the engine does not know (numpad, media, F13+).
fn map_key(code: WinitKey) -> Option<KeyCode> {
    same_named_keys!(code, [
        Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
        KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
        F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
        ArrowDown, ArrowLeft, ArrowRight, ArrowUp, Home, End, PageUp, PageDown,
        ShiftLeft, ShiftRight, ControlLeft, ControlRight, AltLeft, AltRight,
        Space, Enter, Escape, Tab, Backspace, Delete,
    ])
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::{DeviceId, TouchPhase};

    fn device() -> DeviceId {
        // SAFETY: only compared, never handed to the windowing system.
        unsafe { DeviceId::dummy() }
    }

    fn modifiers_changed(state: ModifiersState) -> WindowEvent {
        WindowEvent::ModifiersChanged(state.into())
    }

    fn click(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: WinitButton::Left,
        }
    }

    fn wheel(delta: MouseScrollDelta) -> WindowEvent {
        WindowEvent::MouseWheel {
            device_id: device(),
            delta,
            phase: TouchPhase::Moved,
        }
    }

    //--- Modifier Tests ---------------------------------------------------

    #[test]
    fn modifier_change_is_not_forwarded() {
        let mut input = WindowInput::new();
        assert_eq!(input.translate(&modifiers_changed(ModifiersState::SHIFT)), None);
    }

    #[test]
    fn modifiers_stick_until_changed() {
        let mut input = WindowInput::new();
        input.translate(&modifiers_changed(ModifiersState::CONTROL | ModifiersState::ALT));

        assert_eq!(
            input.translate(&click(ElementState::Pressed)),
            Some(InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                modifiers: Modifiers::CTRL_ALT,
            })
        );
        assert_eq!(
            input.translate(&click(ElementState::Released)),
            Some(InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                modifiers: Modifiers::CTRL_ALT,
            })
        );

        input.translate(&modifiers_changed(ModifiersState::empty()));
        assert_eq!(
            input.translate(&click(ElementState::Pressed)),
            Some(InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                modifiers: Modifiers::NONE,
            })
        );
    }

    //--- Pointer Tests ----------------------------------------------------

    #[test]
    fn cursor_position_is_forwarded() {
        let mut input = WindowInput::new();
        let moved = WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(123.5, 456.0),
        };
        assert_eq!(
            input.translate(&moved),
            Some(InputEvent::MouseMoved { x: 123.5, y: 456.0 })
        );
    }

    #[test]
    fn scroll_lines_pass_through() {
        let mut input = WindowInput::new();
        let event = wheel(MouseScrollDelta::LineDelta(0.0, -2.0));
        assert_eq!(
            input.translate(&event),
            Some(InputEvent::MouseScrolled { dx: 0.0, dy: -2.0 })
        );
    }

    #[test]
    fn scroll_pixels_become_lines() {
        let mut input = WindowInput::new();
        let event = wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(40.0, 10.0)));
        assert_eq!(
            input.translate(&event),
            Some(InputEvent::MouseScrolled { dx: 2.0, dy: 0.5 })
        );
    }

    #[test]
    fn side_buttons_map_to_other() {
        assert_eq!(map_button(WinitButton::Back), MouseButton::Other);
        assert_eq!(map_button(WinitButton::Middle), MouseButton::Middle);
    }

    #[test]
    fn window_events_carry_no_input() {
        let mut input = WindowInput::new();
        assert_eq!(input.translate(&WindowEvent::Resized(PhysicalSize::new(10, 10))), None);
        assert_eq!(input.translate(&WindowEvent::Focused(true)), None);
    }

    //--- Key Tests --------------------------------------------------------

    #[test]
    fn known_keys_keep_their_names() {
        assert_eq!(map_key(WinitKey::KeyW), Some(KeyCode::KeyW));
        assert_eq!(map_key(WinitKey::Digit7), Some(KeyCode::Digit7));
        assert_eq!(map_key(WinitKey::F12), Some(KeyCode::F12));
        assert_eq!(map_key(WinitKey::PageDown), Some(KeyCode::PageDown));
        assert_eq!(map_key(WinitKey::ControlRight), Some(KeyCode::ControlRight));
        assert_eq!(map_key(WinitKey::Escape), Some(KeyCode::Escape));
    }

    #[test]
    fn unknown_keys_are_dropped() {
        assert_eq!(map_key(WinitKey::F13), None);
        assert_eq!(map_key(WinitKey::Numpad5), None);
        assert_eq!(map_key(WinitKey::MediaPlayPause), None);
    }
}
