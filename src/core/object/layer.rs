//=========================================================================
// Layer
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GameObjectId;

/// Name of the layer every scene starts with. It cannot be removed.
pub const DEFAULT_LAYER: &str = "DEFAULT_LAYER";

/// Ordered, named group of scene roots.
///
/// Layers are traversed in the order they were added to the scene, and
/// roots within a layer in insertion order.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    objects: Vec<GameObjectId>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn objects(&self) -> &[GameObjectId] {
        &self.objects
    }

    pub fn contains(&self, id: GameObjectId) -> bool {
        self.objects.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub(crate) fn push(&mut self, id: GameObjectId) {
        self.objects.push(id);
    }

    pub(crate) fn remove(&mut self, id: GameObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|&o| o != id);
        self.objects.len() != before
    }
}
