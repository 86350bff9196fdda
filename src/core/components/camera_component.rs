//=========================================================================
// Camera Component
//=========================================================================
//
// Ties a registered `GameCamera` to a game object.
//
// The camera itself stays in the scene's camera registry, where the render
// pass finds it. This component only points at it, optionally keeps it
// centred on the owner, and releases it when destroyed.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::camera::CameraId;
use crate::core::object::{Capability, Component, ComponentContext};

//=== CameraComponent =====================================================

/// Component owning one camera of the scene's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraComponent {
    camera: CameraId,
    follow: bool,
}

impl CameraComponent {
    pub fn new(camera: CameraId) -> Self {
        Self {
            camera,
            follow: false,
        }
    }

    /// Keeps the camera on the owner's world position after each update.
    pub fn following(mut self) -> Self {
        self.follow = true;
        self
    }

    pub fn camera(&self) -> CameraId {
        self.camera
    }

    pub(crate) fn set_camera(&mut self, camera: CameraId) {
        self.camera = camera;
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn set_following(&mut self, follow: bool) {
        self.follow = follow;
    }
}

impl Component for CameraComponent {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::Camera]
    }

    fn post_update(&mut self, ctx: &mut ComponentContext<'_>, _delta: f32) {
        if !self.follow {
            return;
        }
        let Some(world) = ctx.world_transform() else {
            return;
        };
        if let Some(camera) = ctx.scene.camera_mut(self.camera) {
            let z = camera.position().z;
            camera.set_position(world.position.truncate().extend(z));
        }
    }

    fn destroy(&mut self, ctx: &mut ComponentContext<'_>) {
        if let Some(mut camera) = ctx.scene.take_camera(self.camera) {
            camera.destroy(ctx.engine.renderer.as_mut());
            debug!("Camera component released camera {:?}", self.camera);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
