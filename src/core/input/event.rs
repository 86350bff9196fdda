//=========================================================================
// Input Events
//=========================================================================
//
// Platform-neutral representation of keyboard and mouse input.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    GameDriver::push_input → current scene's InputManager
//         ↓
//    UiOverlay (first refusal) → StateTracker → Triggers
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side buttons, thumb buttons and anything else.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key, independent of layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Navigation -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Home,
    End,
    PageUp,
    PageDown,

    //--- Modifiers --------------------------------------------------------
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Keys the platform reports but the engine does not map.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state. Left and right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };
    pub const SHIFT_CTRL: Self = Self { shift: true, ctrl: true, alt: false };
    pub const CTRL_ALT: Self = Self { shift: false, ctrl: true, alt: true };
}

//=== InputEvent ==========================================================

/// Low-level input event delivered to the current scene.
///
/// Pointer coordinates are in window pixels with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },
    MouseMoved { x: f32, y: f32 },

    /// Scroll amount in lines (positive y scrolls up).
    MouseScrolled { dx: f32, dy: f32 },

    /// Unsupported event; ignored by the input manager.
    Unidentified,
}

impl InputEvent {
    /// Modifier state carried by the event, if it has one.
    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. } => Some(*modifiers),
            _ => None,
        }
    }

    /// Returns `true` for key and button events.
    pub fn is_discrete(&self) -> bool {
        self.modifiers().is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
