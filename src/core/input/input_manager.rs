//=========================================================================
// Input Manager
//=========================================================================
//
// Per-scene input dispatcher.
//
// Architecture:
//   push_event() → pending → update(ui)
//                              ├─ ui.handle_input(event)  (consumed → dropped)
//                              ├─ StateTracker::process_event
//                              └─ frame_events
//   queries: state tracker + named triggers
//
// Events are queued as they arrive from the host and applied once per
// frame, before any component update phase runs.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};
use super::state_tracker::StateTracker;
use super::trigger::Trigger;
use crate::core::ui::UiOverlay;

//=== InputManager ========================================================

/// Queues host input and exposes the per-frame state to components.
#[derive(Debug, Default)]
pub struct InputManager {
    state: StateTracker,
    pending: Vec<InputEvent>,
    frame_events: Vec<InputEvent>,
    triggers: HashMap<String, Trigger>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Event Intake -----------------------------------------------------

    /// Queues an event for the next frame.
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Applies queued events. The UI overlay sees each event first and
    /// may consume it.
    pub(crate) fn update(&mut self, ui: &mut dyn UiOverlay) {
        self.state.begin_frame();
        self.frame_events.clear();

        for event in std::mem::take(&mut self.pending) {
            if matches!(event, InputEvent::Unidentified) {
                continue;
            }
            if ui.handle_input(&event) {
                trace!("UI overlay consumed {:?}", event);
                continue;
            }
            self.state.process_event(&event);
            self.frame_events.push(event);
        }

        self.state.end_frame();
    }

    //--- Triggers ---------------------------------------------------------

    /// Registers (or replaces) a named trigger.
    pub fn map_trigger(&mut self, name: impl Into<String>, trigger: Trigger) {
        let name = name.into();
        if self.triggers.insert(name.clone(), trigger).is_some() {
            debug!("Trigger '{}' replaced", name);
        }
    }

    pub fn unmap_trigger(&mut self, name: &str) -> Option<Trigger> {
        self.triggers.remove(name)
    }

    pub fn trigger_mut(&mut self, name: &str) -> Option<&mut Trigger> {
        self.triggers.get_mut(name)
    }

    /// Returns `true` if the named trigger is satisfied this frame.
    /// Unknown names are never triggered.
    pub fn is_triggered(&self, name: &str) -> bool {
        self.triggers
            .get(name)
            .map(|t| t.is_satisfied(&self.state))
            .unwrap_or(false)
    }

    /// Names of all triggers satisfied this frame, sorted.
    pub fn triggered(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .triggers
            .iter()
            .filter(|(_, t)| t.is_satisfied(&self.state))
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    //--- State Queries ----------------------------------------------------

    pub fn state(&self) -> &StateTracker {
        &self.state
    }

    /// Events that reached the game this frame, in arrival order.
    pub fn events(&self) -> &[InputEvent] {
        &self.frame_events
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.state.is_key_pressed(key)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.state.is_key_down(key)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.state.is_button_pressed(button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.state.is_button_down(button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.state.mouse_position()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
