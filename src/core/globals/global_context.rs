//=========================================================================
// Engine Context
//=========================================================================
//
// Explicit environment passed to scenes, components and the scene
// manager.
//
// Contains the collaborators and shared state the scene graph uses:
// - settings: defaults for new scenes and frame pacing
// - renderer / assets / audio: external services behind traits
// - scene_requests: queue of deferred scene switches
// - delta_time: delta of the frame being processed
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::config::EngineSettings;
use crate::core::render::{RecordingBackend, RenderBackend};
use crate::core::scene::{Scene, SceneRequest, SceneTransition, TransitionQueue};
use crate::core::services::{AssetLoader, AudioPlayer, MemoryAssets, SilentAudio};

//=== EngineContext =======================================================

/// Shared services and state, handed to every lifecycle call by `&mut`.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let mut engine = EngineContext::headless(EngineSettings::default());
/// let scene = Scene::empty(&mut engine).unwrap();
/// engine.request_scene(scene, Some(SceneTransition::fade(0.5)));
/// assert_eq!(engine.scene_requests.len(), 1);
/// ```
pub struct EngineContext {
    pub settings: EngineSettings,
    pub renderer: Box<dyn RenderBackend>,
    pub assets: Box<dyn AssetLoader>,
    pub audio: Box<dyn AudioPlayer>,

    /// Scene switches requested during the frame.
    pub scene_requests: TransitionQueue,

    delta_time: f32,
}

impl EngineContext {
    //--- Construction -----------------------------------------------------

    pub fn new(
        settings: EngineSettings,
        renderer: Box<dyn RenderBackend>,
        assets: Box<dyn AssetLoader>,
        audio: Box<dyn AudioPlayer>,
    ) -> Self {
        Self {
            settings,
            renderer,
            assets,
            audio,
            scene_requests: TransitionQueue::new(),
            delta_time: 0.0,
        }
    }

    /// Context backed by the recording renderer and in-memory services,
    /// with a screen matching the settings' viewport.
    pub fn headless(settings: EngineSettings) -> Self {
        let renderer = RecordingBackend::new(
            settings.viewport_width as u32,
            settings.viewport_height as u32,
        );
        Self::new(
            settings,
            Box::new(renderer),
            Box::new(MemoryAssets::new()),
            Box::new(SilentAudio::new()),
        )
    }

    //--- Frame State ------------------------------------------------------

    /// Delta of the frame being processed, already clamped.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub(crate) fn set_delta_time(&mut self, delta: f32) {
        self.delta_time = delta;
    }

    //--- Scene Requests ---------------------------------------------------

    /// Asks the scene manager to switch to `scene` after this update.
    pub fn request_scene(&mut self, scene: Scene, transition: Option<SceneTransition>) {
        self.scene_requests.push(SceneRequest::Switch {
            scene: Box::new(scene),
            transition,
        });
    }

    /// Asks the scene manager to return to the previous scene after this update.
    pub fn request_revert(&mut self, transition: Option<SceneTransition>) {
        self.scene_requests.push(SceneRequest::Revert { transition });
    }
}
