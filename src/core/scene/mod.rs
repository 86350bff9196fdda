//=========================================================================
// Scene System
//=========================================================================
//
// Scenes own a world of game objects, the cameras that look at it and the
// input/UI state of one screen. The scene manager switches between them.
//
// Architecture:
//   SceneManager
//     ├─ current: Scene
//     │    ├─ World (objects + components)
//     │    ├─ Layers (ordered roots)
//     │    ├─ Cameras (main + extra)
//     │    ├─ InputManager / UiOverlay
//     │    └─ SceneScript (user hooks)
//     ├─ stack: Vec<Scene>        (suspended, stackable scenes)
//     └─ transition: Option<...>  (outgoing/incoming captured frames)
//
// Flow:
//   update() → input → pre_update → update → post_update → ui.act
//   render() → clear → pre_render → per camera render → post_render
//            → debug shapes → ui.draw
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::config::EngineSettings;
use crate::core::error::SceneResult;
use crate::core::globals::EngineContext;
use crate::core::math::{Color, GameWorldUnits, TransformComposition};

//=== Module Declarations =================================================

mod dispatch;
mod game_scene;
mod interpolation;
mod scene_manager;
mod transition;
mod transition_queue;

//=== Public API ==========================================================

pub use game_scene::Scene;
pub use interpolation::Interpolation;
pub use scene_manager::SceneManager;
pub use transition::{
    SceneTransition, SliceDirection, SlideDirection, SplitAxis, TransitionKind,
};
pub use transition_queue::{SceneRequest, TransitionQueue};

//=== SceneId =============================================================

/// Process-unique scene identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u64);

impl SceneId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

//=== SceneSettings =======================================================

/// Construction parameters of a scene, adjustable in [`SceneScript::on_create`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub pixels_per_unit: f32,

    /// Whether the scene is suspended on the stack instead of destroyed
    /// when another scene replaces it.
    pub stackable: bool,
    pub background: Color,
    pub render_debug_lines: bool,
    pub transform_composition: TransformComposition,
}

impl SceneSettings {
    pub fn from_engine(settings: &EngineSettings) -> Self {
        Self {
            viewport_width: settings.viewport_width,
            viewport_height: settings.viewport_height,
            pixels_per_unit: settings.pixels_per_unit,
            stackable: true,
            background: Color::BLACK,
            render_debug_lines: true,
            transform_composition: settings.transform_composition,
        }
    }

    pub fn world_units(&self) -> GameWorldUnits {
        GameWorldUnits::new(
            self.viewport_width,
            self.viewport_height,
            self.pixels_per_unit,
        )
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self::from_engine(&EngineSettings::default())
    }
}

//=== SceneScript =========================================================

/// User hooks of a scene.
///
/// `setup` populates the scene once it exists; the transition hooks
/// report scene switches.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// struct Level;
///
/// impl SceneScript for Level {
///     fn on_create(&mut self, settings: &mut SceneSettings) {
///         settings.stackable = false;
///     }
///
///     fn setup(&mut self, scene: &mut Scene, engine: &mut EngineContext) -> SceneResult<()> {
///         let player = scene.spawn("Player");
///         scene.add_game_object(engine, player)
///     }
/// }
///
/// let mut engine = EngineContext::headless(EngineSettings::default());
/// let scene = Scene::new(&mut engine, Level).unwrap();
/// assert!(!scene.is_stackable());
/// assert!(scene.find_game_object("Player").is_some());
/// ```
#[allow(unused_variables)]
pub trait SceneScript {
    /// Adjusts construction parameters before anything is built.
    fn on_create(&mut self, settings: &mut SceneSettings) {}

    /// Populates the scene after its main camera exists.
    fn setup(&mut self, scene: &mut Scene, engine: &mut EngineContext) -> SceneResult<()> {
        Ok(())
    }

    /// The scene is being left; fired as soon as the switch starts.
    fn pause_for_transition(&mut self, scene: &mut Scene, engine: &mut EngineContext) {}

    fn transitioned_from_this_scene(
        &mut self,
        scene: &mut Scene,
        engine: &mut EngineContext,
        next: SceneId,
    ) {
    }

    fn transitioned_to_this_scene(
        &mut self,
        scene: &mut Scene,
        engine: &mut EngineContext,
        previous: Option<SceneId>,
    ) {
    }
}

impl SceneScript for () {}

/// Script made of a single setup closure.
pub struct SetupScript<F>(pub F);

impl<F> SceneScript for SetupScript<F>
where
    F: FnMut(&mut Scene, &mut EngineContext) -> SceneResult<()>,
{
    fn setup(&mut self, scene: &mut Scene, engine: &mut EngineContext) -> SceneResult<()> {
        (self.0)(scene, engine)
    }
}

//=========================================================================
// Test Support
//=========================================================================
