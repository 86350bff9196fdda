//=========================================================================
// Cameras
//=========================================================================
//
// Per-scene camera registry.
//
// Architecture:
//   Cameras
//     ├─ cameras: SlotMap<CameraId, GameCamera>
//     ├─ order:   Vec<CameraId>      (registration order = render order)
//     └─ main:    Option<CameraId>
//
// Components reference cameras by `CameraId`; a removed camera simply
// stops matching any component during the render pass.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use slotmap::{new_key_type, SlotMap};

//=== Module Declarations =================================================

mod game_camera;

//=== Public API ==========================================================

pub use game_camera::{GameCamera, Projection};

new_key_type! {
    /// Handle to a camera registered with a scene.
    pub struct CameraId;
}

//=== Cameras =============================================================

/// Ordered camera registry with one designated main camera.
#[derive(Default)]
pub struct Cameras {
    cameras: SlotMap<CameraId, GameCamera>,
    order: Vec<CameraId>,
    main: Option<CameraId>,
}

impl Cameras {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Registers a camera at the end of the render order.
    pub fn add(&mut self, camera: GameCamera) -> CameraId {
        let id = self.cameras.insert(camera);
        self.order.push(id);
        debug!("Registered camera {:?} ({} total)", id, self.order.len());
        id
    }

    /// Unregisters a camera, clearing the main designation if it held it.
    ///
    /// The caller is responsible for releasing the camera's backend resources.
    pub fn remove(&mut self, id: CameraId) -> Option<GameCamera> {
        let camera = self.cameras.remove(id)?;
        self.order.retain(|&c| c != id);
        if self.main == Some(id) {
            self.main = None;
        }
        debug!("Removed camera {:?}", id);
        Some(camera)
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, id: CameraId) -> Option<&GameCamera> {
        self.cameras.get(id)
    }

    pub fn get_mut(&mut self, id: CameraId) -> Option<&mut GameCamera> {
        self.cameras.get_mut(id)
    }

    pub fn contains(&self, id: CameraId) -> bool {
        self.cameras.contains_key(id)
    }

    pub fn main(&self) -> Option<CameraId> {
        self.main
    }

    /// Designates `id` as the main camera. Ignored for unknown ids.
    pub fn set_main(&mut self, id: Option<CameraId>) {
        match id {
            Some(id) if !self.cameras.contains_key(id) => {
                debug!("Ignoring unknown main camera {:?}", id);
            }
            _ => self.main = id,
        }
    }

    /// Camera ids in registration order.
    pub fn ordered(&self) -> &[CameraId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    //--- Bulk Operations --------------------------------------------------

    pub(crate) fn resize_all(&mut self, width: u32, height: u32) {
        for camera in self.cameras.values_mut() {
            camera.resize(width, height);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_registration_order() {
        let mut cameras = Cameras::new();
        let a = cameras.add(GameCamera::orthographic(1.0, 1.0));
        let b = cameras.add(GameCamera::orthographic(1.0, 1.0));
        let c = cameras.add(GameCamera::orthographic(1.0, 1.0));

        cameras.remove(b);
        assert_eq!(cameras.ordered(), &[a, c]);
        assert!(!cameras.contains(b));
    }

    #[test]
    fn removing_main_clears_designation() {
        let mut cameras = Cameras::new();
        let a = cameras.add(GameCamera::orthographic(1.0, 1.0));
        cameras.set_main(Some(a));
        assert_eq!(cameras.main(), Some(a));

        assert!(cameras.remove(a).is_some());
        assert_eq!(cameras.main(), None);
        assert!(cameras.remove(a).is_none());
    }

    #[test]
    fn unknown_main_is_ignored() {
        let mut cameras = Cameras::new();
        let a = cameras.add(GameCamera::orthographic(1.0, 1.0));
        cameras.set_main(Some(a));
        cameras.remove(a);

        cameras.set_main(Some(a));
        assert_eq!(cameras.main(), None);
    }
}
