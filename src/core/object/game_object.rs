//=========================================================================
// Game Object
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ComponentId, GameObjectId};
use crate::core::math::Transform;
use crate::core::scene::SceneId;

/// Node of the scene tree.
///
/// Holds a transform, an ordered list of components and an ordered list
/// of children. It has no behaviour of its own. `parent` and `host_scene`
/// are plain ids and never keep anything alive.
#[derive(Debug)]
pub struct GameObject {
    pub(crate) tag: String,
    pub(crate) transform: Transform,
    pub(crate) components: Vec<ComponentId>,
    pub(crate) children: Vec<GameObjectId>,
    pub(crate) parent: Option<GameObjectId>,
    pub(crate) host_scene: Option<SceneId>,
}

impl GameObject {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            transform: Transform::new(),
            components: Vec::new(),
            children: Vec::new(),
            parent: None,
            host_scene: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    pub fn children(&self) -> &[GameObjectId] {
        &self.children
    }

    pub fn parent(&self) -> Option<GameObjectId> {
        self.parent
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Scene this object is live in, if any.
    pub fn host_scene(&self) -> Option<SceneId> {
        self.host_scene
    }
}
