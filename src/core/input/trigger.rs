//=========================================================================
// Triggers
//=========================================================================
//
// Named input bindings evaluated against the frame's input state.
//
// A trigger binds one key or mouse button to an edge:
//   Down + event  → fires on the frame the input went down
//   Down + polled → satisfied every frame the input is held
//   Up   + event  → fires on the frame the input went up
//   Up   + polled → satisfied every frame the input is NOT held
//
// Modifiers, when given, must match exactly (Ctrl+S does not match
// Ctrl+Shift+S).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, Modifiers, MouseButton};
use super::state_tracker::StateTracker;

//=== TriggerInput ========================================================

/// Physical input a trigger listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerInput {
    Key(KeyCode),
    Button(MouseButton),
}

/// Edge a trigger reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEdge {
    Down,
    Up,
}

//=== Trigger =============================================================

/// Binding of an input edge, optionally constrained by modifiers.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let jump = Trigger::key_down(KeyCode::Space);
/// let run_right = Trigger::key_down(KeyCode::ArrowRight).polled(true);
/// let save = Trigger::key_down(KeyCode::KeyS).with_modifiers(Modifiers::CTRL);
/// # let _ = (jump, run_right, save);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    input: TriggerInput,
    edge: TriggerEdge,
    modifiers: Option<Modifiers>,
    polled: bool,
    active: bool,
}

impl Trigger {
    //--- Construction -----------------------------------------------------

    pub fn new(input: TriggerInput, edge: TriggerEdge) -> Self {
        Self {
            input,
            edge,
            modifiers: None,
            polled: false,
            active: true,
        }
    }

    pub fn key_down(key: KeyCode) -> Self {
        Self::new(TriggerInput::Key(key), TriggerEdge::Down)
    }

    pub fn key_up(key: KeyCode) -> Self {
        Self::new(TriggerInput::Key(key), TriggerEdge::Up)
    }

    pub fn button_down(button: MouseButton) -> Self {
        Self::new(TriggerInput::Button(button), TriggerEdge::Down)
    }

    pub fn button_up(button: MouseButton) -> Self {
        Self::new(TriggerInput::Button(button), TriggerEdge::Up)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = Some(modifiers);
        self
    }

    /// Polled triggers test held state every frame instead of edges.
    pub fn polled(mut self, polled: bool) -> Self {
        self.polled = polled;
        self
    }

    //--- State ------------------------------------------------------------

    pub fn input(&self) -> TriggerInput {
        self.input
    }

    pub fn edge(&self) -> TriggerEdge {
        self.edge
    }

    pub fn is_polled(&self) -> bool {
        self.polled
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Inactive triggers never fire.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    //--- Evaluation -------------------------------------------------------

    /// Evaluates the trigger against the current frame.
    pub fn is_satisfied(&self, state: &StateTracker) -> bool {
        if !self.active {
            return false;
        }
        if let Some(modifiers) = self.modifiers {
            if state.modifiers() != modifiers {
                return false;
            }
        }

        let (held, pressed, released) = match self.input {
            TriggerInput::Key(key) => (
                state.is_key_down(key),
                state.is_key_pressed(key),
                state.is_key_released(key),
            ),
            TriggerInput::Button(button) => (
                state.is_button_down(button),
                state.is_button_pressed(button),
                state.is_button_released(button),
            ),
        };

        match (self.edge, self.polled) {
            (TriggerEdge::Down, true) => held,
            (TriggerEdge::Down, false) => pressed,
            (TriggerEdge::Up, true) => !held,
            (TriggerEdge::Up, false) => released,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
