//=========================================================================
// Built-in Components
//=========================================================================
//
// Ready-made components covering the common cases:
// - SpriteRenderer:  draws a texture region with the render camera
// - DebugRenderer:   box / cross / circle primitives in the debug passes
// - CameraComponent: ties a registered camera to a game object
// - WidgetMapper:    syncs a UI widget and a transform
//
//=========================================================================

//=== Module Declarations =================================================

mod camera_component;
mod debug_renderer;
mod sprite_renderer;
mod widget_mapper;

//=== Public API ==========================================================

pub use camera_component::CameraComponent;
pub use debug_renderer::{DebugRenderer, DebugShape};
pub use sprite_renderer::SpriteRenderer;
pub use widget_mapper::{MappingDirection, WidgetBounds, WidgetMapper};
