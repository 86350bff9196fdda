//=========================================================================
// Input System
//=========================================================================
//
// Platform-neutral input events, per-frame state tracking and named
// triggers. Each scene owns one `InputManager`; the game driver routes
// host events to the current scene's manager.
//
// Architecture:
//   InputEvent → InputManager (per scene)
//                  ├─ UiOverlay gets first refusal
//                  ├─ StateTracker (held + per-frame deltas)
//                  └─ Triggers (named bindings)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod input_manager;
mod state_tracker;
mod trigger;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use input_manager::InputManager;
pub use state_tracker::StateTracker;
pub use trigger::{Trigger, TriggerEdge, TriggerInput};
