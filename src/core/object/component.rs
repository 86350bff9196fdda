//=========================================================================
// Component
//=========================================================================
//
// Unit of behaviour attached to exactly one game object.
//
// Lifecycle:
// ```text
//   Detached ─attach()─> Attached ─start()─> SceneBound
//                           ▲                    │
//                           └──────stop()────────┘
//   Attached ─detach(), destroy()─> Destroyed      (explicit removal)
//   any      ─destroy()──────────> Destroyed      (scene teardown)
// ```
//
// Per-frame phases (enabled components only):
//   pre_update → update → post_update
//   pre_render → render (own camera only) → post_render
//   render_shape_filled → render_shape_line → render_shape_point
//
// Every hook receives a `ComponentContext` with mutable access to the
// owning scene and the engine context. While a hook runs, the component
// itself is lifted out of the scene, so it may freely add or remove
// components and game objects, including itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::{ComponentId, GameObjectId};
use crate::core::camera::CameraId;
use crate::core::globals::EngineContext;
use crate::core::math::Transform;
use crate::core::render::RenderBackend;
use crate::core::scene::Scene;

//=== Capability ==========================================================

/// Tags a component declares for lookup.
///
/// Lookups such as [`World::find_component`](super::World::find_component)
/// match on these tags instead of on concrete types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Reserved for the built-in transform every game object owns.
    Transform,
    Renderer,
    DebugRenderer,
    Camera,
    TransformMapper,
    Behaviour,
    Custom(&'static str),
}

//=== AsAny ===============================================================

/// Upcast helper enabling typed access to boxed components.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Component Trait =====================================================

/// Behaviour attached to a game object.
///
/// All hooks default to doing nothing; implement only what you need.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// struct Spin {
///     degrees_per_second: f32,
/// }
///
/// impl Component for Spin {
///     fn update(&mut self, ctx: &mut ComponentContext<'_>, delta: f32) {
///         if let Some(transform) = ctx.transform_mut() {
///             transform.rotate(self.degrees_per_second * delta);
///         }
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait Component: AsAny {
    /// Capability tags used by lookups. Must not contain `Capability::Transform`.
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::Behaviour]
    }

    //--- Lifecycle --------------------------------------------------------

    /// Called once when added to a game object.
    fn attach(&mut self, ctx: &mut ComponentContext<'_>) {}

    /// Called when the owning game object becomes part of a live scene.
    fn start(&mut self, ctx: &mut ComponentContext<'_>) {}

    fn resume(&mut self, ctx: &mut ComponentContext<'_>) {}

    fn pause(&mut self, ctx: &mut ComponentContext<'_>) {}

    /// Called when the owning game object leaves the scene.
    fn stop(&mut self, ctx: &mut ComponentContext<'_>) {}

    /// Called when explicitly removed from the game object.
    fn detach(&mut self, ctx: &mut ComponentContext<'_>) {}

    /// Called on removal and on scene teardown to release resources.
    fn destroy(&mut self, ctx: &mut ComponentContext<'_>) {}

    //--- Peer Notifications -----------------------------------------------

    fn component_added(&mut self, ctx: &mut ComponentContext<'_>, added: ComponentId) {}

    fn component_removed(&mut self, ctx: &mut ComponentContext<'_>, removed: ComponentId) {}

    //--- Per-Frame Phases -------------------------------------------------

    fn resize(&mut self, ctx: &mut ComponentContext<'_>, width: u32, height: u32) {}

    fn pre_update(&mut self, ctx: &mut ComponentContext<'_>, delta: f32) {}

    fn update(&mut self, ctx: &mut ComponentContext<'_>, delta: f32) {}

    fn post_update(&mut self, ctx: &mut ComponentContext<'_>, delta: f32) {}

    fn pre_render(&mut self, ctx: &mut ComponentContext<'_>) {}

    /// Draws into the batch of the component's render camera.
    fn render(&mut self, ctx: &mut ComponentContext<'_>) {}

    fn post_render(&mut self, ctx: &mut ComponentContext<'_>) {}

    fn render_shape_filled(&mut self, ctx: &mut ComponentContext<'_>) {}

    fn render_shape_line(&mut self, ctx: &mut ComponentContext<'_>) {}

    fn render_shape_point(&mut self, ctx: &mut ComponentContext<'_>) {}
}

//=== ComponentContext ====================================================

/// Access handed to every component hook.
pub struct ComponentContext<'a> {
    pub scene: &'a mut Scene,
    pub engine: &'a mut EngineContext,
    object: GameObjectId,
    component: ComponentId,
}

impl<'a> ComponentContext<'a> {
    pub(crate) fn new(
        scene: &'a mut Scene,
        engine: &'a mut EngineContext,
        object: GameObjectId,
        component: ComponentId,
    ) -> Self {
        Self {
            scene,
            engine,
            object,
            component,
        }
    }

    /// The game object owning this component.
    pub fn object(&self) -> GameObjectId {
        self.object
    }

    /// This component's id.
    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// Local transform of the owner; `None` if the owner was destroyed
    /// during this hook.
    pub fn transform(&self) -> Option<&Transform> {
        self.scene.world().transform(self.object)
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.scene.world_mut().transform_mut(self.object)
    }

    /// World transform of the owner.
    pub fn world_transform(&self) -> Option<Transform> {
        self.scene.world().world_transform(self.object)
    }

    pub fn render_camera(&self) -> Option<CameraId> {
        self.scene.world().render_camera(self.component)
    }

    pub fn delta_time(&self) -> f32 {
        self.engine.delta_time()
    }

    pub fn renderer(&mut self) -> &mut dyn RenderBackend {
        self.engine.renderer.as_mut()
    }
}
