//=========================================================================
// Scene Request Queue
//=========================================================================
//
// Queue for scene switches requested from inside a frame.
//
// Components and scene scripts cannot hand a scene to the manager while
// the current scene is mid-dispatch, so they queue requests here. The
// scene manager drains the queue after each update tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Scene, SceneTransition};

//=== SceneRequest ========================================================

/// A deferred scene manager operation.
pub enum SceneRequest {
    /// Make `scene` current, optionally through an animated transition.
    Switch {
        scene: Box<Scene>,
        transition: Option<SceneTransition>,
    },

    /// Return to the most recently suspended scene.
    Revert { transition: Option<SceneTransition> },
}

impl std::fmt::Debug for SceneRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Switch { scene, transition } => f
                .debug_struct("Switch")
                .field("scene", &scene.id())
                .field("transition", transition)
                .finish(),
            Self::Revert { transition } => {
                f.debug_struct("Revert").field("transition", transition).finish()
            }
        }
    }
}

//=== TransitionQueue =====================================================

/// FIFO of scene requests processed at tick boundaries.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneRequest>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, request: SceneRequest) {
        self.queue.push(request);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all queued requests, leaving the queue empty.
    pub fn take(&mut self) -> Vec<SceneRequest> {
        std::mem::take(&mut self.queue)
    }
}
