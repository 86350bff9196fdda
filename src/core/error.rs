//=========================================================================
// Scene Errors
//=========================================================================
//
// Structural misuse of the scene graph is reported through `SceneError`.
//
// These are programmer errors (a second transform, a child added as a
// scene root, an unknown layer name). They are returned at the call site
// and are expected to be propagated with `?`, never swallowed.
//
// Not-found lookups are NOT errors: they return `Option` or an empty
// collection instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== SceneError ==========================================================

/// Structural errors raised by scene graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// A component claimed the reserved transform capability.
    #[error("game object '{tag}' already owns a transform")]
    DuplicateTransform { tag: String },

    /// An attempt was made to remove the mandatory transform.
    #[error("the transform of game object '{tag}' cannot be removed")]
    TransformRemoval { tag: String },

    /// A game object with a parent was added as a scene root.
    #[error("game object '{tag}' has a parent and cannot be a scene root")]
    ChildAsRoot { tag: String },

    /// The id does not refer to a live game object of this scene.
    #[error("unknown game object")]
    UnknownGameObject,

    /// No layer with the given name exists.
    #[error("no layer named '{0}'")]
    UnknownLayer(String),

    /// A layer with the given name already exists.
    #[error("a layer named '{0}' already exists")]
    DuplicateLayer(String),

    /// The default layer is structural and cannot be removed.
    #[error("the default layer cannot be removed")]
    DefaultLayerRemoval,

    /// Adding the child would make a game object its own ancestor.
    #[error("adding '{child}' under '{parent}' would create a cycle")]
    HierarchyCycle { parent: String, child: String },

    /// A debug shape was asked to draw with a shape kind it cannot produce.
    #[error("{shape} debug shapes only support {supported:?} drawing")]
    UnsupportedShapeKind {
        shape: &'static str,
        supported: crate::core::render::ShapeKind,
    },
}

/// Convenience alias used throughout the scene graph.
pub type SceneResult<T> = Result<T, SceneError>;

//=========================================================================
// Unit Tests
//=========================================================================
