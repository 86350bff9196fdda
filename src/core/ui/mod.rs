//=========================================================================
// UI Overlay
//=========================================================================
//
// Narrow interface to the UI widget collaborator hosted by each scene.
//
// Frame order:
//   input:  handle_input() sees every event before game input
//   update: act(delta) after the component update phases
//   render: draw() after cameras and debug shapes
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::RenderBackend;

//=== UiOverlay ===========================================================

/// UI layer drawn on top of a scene.
#[allow(unused_variables)]
pub trait UiOverlay {
    /// Returns `true` if the overlay consumed the event.
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        false
    }

    fn act(&mut self, delta: f32) {}

    fn draw(&mut self, renderer: &mut dyn RenderBackend) {}

    fn resize(&mut self, width: u32, height: u32) {}

    /// Releases overlay resources. Called once, when the overlay is
    /// replaced or its scene is destroyed.
    fn dispose(&mut self) {}
}

/// Overlay with no widgets; every scene starts with one.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyOverlay;

impl UiOverlay for EmptyOverlay {}
