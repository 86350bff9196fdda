//=========================================================================
// State Tracker
//=========================================================================
//
// Held input state plus per-frame deltas.
//
// Architecture:
//   InputEvent → process_event() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: begin_frame() → process_event()* → end_frame() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame deltas (pressed/released).
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas (reset by begin_frame) ------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    scroll: (f32, f32),

    //--- Derived ----------------------------------------------------------
    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears the previous frame's deltas.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.scroll = (0.0, 0.0);
        self.last_mouse_position = self.mouse_position;
    }

    pub(crate) fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                // Spurious releases are ignored
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
            }
            InputEvent::MouseScrolled { dx, dy } => {
                self.scroll.0 += dx;
                self.scroll.1 += dy;
            }
            InputEvent::Unidentified => {}
        }
    }

    /// Computes derived values (mouse delta) for the frame.
    pub(crate) fn end_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// `true` on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` on the frame the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Scroll accumulated this frame.
    pub fn scroll(&self) -> (f32, f32) {
        self.scroll
    }

    //=====================================================================
    // Query API - Modifiers
    //=====================================================================

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.begin_frame();
        for event in events {
            tracker.process_event(event);
        }
        tracker.end_frame();
    }

    //--- Keyboard Tests ---------------------------------------------------

    #[test]
    fn pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::KeyA)]);
        assert!(tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        frame(&mut tracker, &[key_up(KeyCode::KeyA)]);
        assert!(tracker.is_key_released(KeyCode::KeyA));
        assert!(!tracker.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn fast_tap_records_both_edges() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_down(KeyCode::Space), key_up(KeyCode::Space)]);

        assert!(tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_released(KeyCode::Space));
        assert!(!tracker.is_key_down(KeyCode::Space));
    }

    #[test]
    fn spurious_release_is_ignored() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_up(KeyCode::KeyZ)]);
        assert!(!tracker.is_key_released(KeyCode::KeyZ));
    }

    //--- Mouse Tests ------------------------------------------------------

    #[test]
    fn mouse_delta_and_scroll_reset_per_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[
            InputEvent::MouseMoved { x: 100.0, y: 50.0 },
            InputEvent::MouseScrolled { dx: 0.0, dy: 1.0 },
            InputEvent::MouseScrolled { dx: 0.0, dy: 2.0 },
        ]);
        assert_eq!(tracker.mouse_delta(), (100.0, 50.0));
        assert_eq!(tracker.scroll(), (0.0, 3.0));

        frame(&mut tracker, &[]);
        assert_eq!(tracker.mouse_delta(), (0.0, 0.0));
        assert_eq!(tracker.scroll(), (0.0, 0.0));
        assert_eq!(tracker.mouse_position(), (100.0, 50.0));
    }

    #[test]
    fn buttons_track_modifiers() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            modifiers: Modifiers::SHIFT,
        }]);

        assert!(tracker.is_button_pressed(MouseButton::Left));
        assert!(tracker.is_button_down(MouseButton::Left));
        assert_eq!(tracker.modifiers(), Modifiers::SHIFT);
    }
}
