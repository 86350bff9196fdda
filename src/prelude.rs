//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use tessera_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine entry points
pub use crate::engine::{EngineBuilder, Game, GameDriver};
pub use crate::platform::PlatformError;

// Configuration and shared context
pub use crate::core::config::EngineSettings;
pub use crate::core::globals::EngineContext;

// Errors and services
pub use crate::core::error::{SceneError, SceneResult};
pub use crate::core::services::{
    AssetError, AssetHandle, AssetKind, AssetLoader, AudioPlayer, MemoryAssets, SilentAudio,
};

// Math
pub use crate::core::math::{Color, GameWorldUnits, Mat4, Transform, TransformComposition, Vec2, Vec3};

// Cameras and rendering
pub use crate::core::camera::{CameraId, GameCamera, Projection};
pub use crate::core::render::{
    DrawCommand, PixelRect, RecordingBackend, Rect, RenderBackend, Shape, ShapeKind, TextureId,
    TextureRegion,
};

// Scene graph
pub use crate::core::object::{
    Capability, Component, ComponentContext, ComponentId, GameObjectId, Layer, World, DEFAULT_LAYER,
};
pub use crate::core::scene::{
    Interpolation, Scene, SceneId, SceneManager, SceneScript, SceneSettings, SceneTransition,
    SliceDirection, SlideDirection, SplitAxis, TransitionKind,
};

// Built-in components
pub use crate::core::components::{
    CameraComponent, DebugRenderer, DebugShape, MappingDirection, SpriteRenderer, WidgetBounds,
    WidgetMapper,
};

// Input and UI
pub use crate::core::input::{InputEvent, InputManager, KeyCode, Modifiers, MouseButton, Trigger};
pub use crate::core::ui::UiOverlay;
