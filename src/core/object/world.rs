//=========================================================================
// World
//=========================================================================
//
// Arena owning every game object and component of one scene.
//
// Architecture:
//   World
//     ├─ objects:    SlotMap<GameObjectId, GameObject>
//     └─ components: SlotMap<ComponentId, ComponentSlot>
//
// Ownership is flat: the arena owns every node, and the tree is expressed
// through id lists (`children`) and id back-references (`parent`,
// `owner`). A stale id is detected by the generational key and simply
// yields `None`.
//
// While a component hook runs, its boxed behaviour is lifted out of the
// slot (`behaviour == None`). Removal of such an in-flight component is
// recorded with `removed` and completed when the hook returns.
//
// Everything here is structural and fires no component hooks; operations
// that must notify components live on `Scene`.
//
//=========================================================================

//=== External Dependencies ===============================================

use slotmap::SlotMap;

//=== Internal Dependencies ===============================================

use super::{Capability, Component, ComponentId, GameObject, GameObjectId};
use crate::core::camera::CameraId;
use crate::core::error::{SceneError, SceneResult};
use crate::core::math::{Transform, TransformComposition};
use crate::core::scene::SceneId;

//=== ComponentSlot =======================================================

/// Arena entry for one component.
pub(crate) struct ComponentSlot {
    pub(crate) owner: GameObjectId,
    pub(crate) capabilities: &'static [Capability],
    pub(crate) enabled: bool,
    pub(crate) render_camera: Option<CameraId>,
    pub(crate) host_scene: Option<SceneId>,
    pub(crate) behaviour: Option<Box<dyn Component>>,
    pub(crate) removed: bool,
}

//=== World ===============================================================

/// Game object and component arena of a scene.
#[derive(Default)]
pub struct World {
    objects: SlotMap<GameObjectId, GameObject>,
    components: SlotMap<ComponentId, ComponentSlot>,
    composition: TransformComposition,
}

impl World {
    //--- Construction -----------------------------------------------------

    pub fn new(composition: TransformComposition) -> Self {
        Self {
            objects: SlotMap::with_key(),
            components: SlotMap::with_key(),
            composition,
        }
    }

    /// Creates a detached game object.
    ///
    /// The object is not part of any scene until it (or an ancestor) is
    /// added as a root with [`Scene::add_game_object`](crate::core::scene::Scene::add_game_object).
    pub fn spawn(&mut self, tag: impl Into<String>) -> GameObjectId {
        self.objects.insert(GameObject::new(tag))
    }

    //--- Object Queries ---------------------------------------------------

    pub fn contains(&self, id: GameObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn get(&self, id: GameObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn tag(&self, id: GameObjectId) -> Option<&str> {
        self.objects.get(id).map(|o| o.tag.as_str())
    }

    pub fn set_tag(&mut self, id: GameObjectId, tag: impl Into<String>) {
        if let Some(object) = self.objects.get_mut(id) {
            object.tag = tag.into();
        }
    }

    /// Every object with `tag`, detached ones included, in slot order.
    pub fn find_by_tag(&self, tag: &str) -> Vec<GameObjectId> {
        self.objects
            .iter()
            .filter(|(_, object)| object.tag == tag)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn host_scene(&self, id: GameObjectId) -> Option<SceneId> {
        self.objects.get(id).and_then(|o| o.host_scene)
    }

    //--- Transforms -------------------------------------------------------

    pub fn transform(&self, id: GameObjectId) -> Option<&Transform> {
        self.objects.get(id).map(|o| &o.transform)
    }

    pub fn transform_mut(&mut self, id: GameObjectId) -> Option<&mut Transform> {
        self.objects.get_mut(id).map(|o| &mut o.transform)
    }

    pub fn composition(&self) -> TransformComposition {
        self.composition
    }

    pub fn set_composition(&mut self, composition: TransformComposition) {
        self.composition = composition;
    }

    /// World-space transform, composed from the root of the chain down.
    pub fn world_transform(&self, id: GameObjectId) -> Option<Transform> {
        let mut chain = vec![id];
        let mut current = self.objects.get(id)?.parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.objects.get(parent).and_then(|o| o.parent);
        }

        let mut ids = chain.into_iter().rev();
        let root = ids.next()?;
        let mut world = self.objects.get(root)?.transform;
        for id in ids {
            let local = self.objects.get(id)?.transform;
            world = local.compose(&world, self.composition);
        }
        Some(world)
    }

    //--- Hierarchy --------------------------------------------------------

    pub fn parent(&self, id: GameObjectId) -> Option<GameObjectId> {
        self.objects.get(id).and_then(|o| o.parent)
    }

    pub fn children(&self, id: GameObjectId) -> &[GameObjectId] {
        self.objects.get(id).map(|o| o.children.as_slice()).unwrap_or(&[])
    }

    /// Attaches `child` under `parent`.
    ///
    /// Returns `Ok(false)` if it is already a child of `parent`. A child
    /// belonging to another parent is moved. Scene membership is not
    /// propagated; use [`Scene::add_child`](crate::core::scene::Scene::add_child)
    /// for that.
    ///
    /// # Errors
    ///
    /// - [`SceneError::UnknownGameObject`] if either id is stale
    /// - [`SceneError::HierarchyCycle`] if `child` is `parent` or one of its ancestors
    pub fn add_child(&mut self, parent: GameObjectId, child: GameObjectId) -> SceneResult<bool> {
        if !self.objects.contains_key(parent) || !self.objects.contains_key(child) {
            return Err(SceneError::UnknownGameObject);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::HierarchyCycle {
                parent: self.objects[parent].tag.clone(),
                child: self.objects[child].tag.clone(),
            });
        }
        if self.objects[child].parent == Some(parent) {
            return Ok(false);
        }

        if let Some(old) = self.objects[child].parent {
            if let Some(old_parent) = self.objects.get_mut(old) {
                old_parent.children.retain(|&c| c != child);
            }
        }
        self.objects[child].parent = Some(parent);
        self.objects[parent].children.push(child);
        Ok(true)
    }

    /// Detaches `child` from `parent`. Returns `false` if it was not a child.
    pub fn remove_child(&mut self, parent: GameObjectId, child: GameObjectId) -> bool {
        let Some(parent_object) = self.objects.get_mut(parent) else {
            return false;
        };
        let before = parent_object.children.len();
        parent_object.children.retain(|&c| c != child);
        if parent_object.children.len() == before {
            return false;
        }
        if let Some(child_object) = self.objects.get_mut(child) {
            child_object.parent = None;
        }
        true
    }

    /// `root` followed by all of its descendants, depth-first pre-order.
    pub fn descendants(&self, root: GameObjectId) -> Vec<GameObjectId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(object) = self.objects.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(object.children.iter().rev().copied());
        }
        out
    }

    //--- Component Queries ------------------------------------------------

    /// Components of `id` in attach order.
    pub fn components(&self, id: GameObjectId) -> &[ComponentId] {
        self.objects.get(id).map(|o| o.components.as_slice()).unwrap_or(&[])
    }

    pub fn component_owner(&self, id: ComponentId) -> Option<GameObjectId> {
        self.live_slot(id).map(|s| s.owner)
    }

    pub fn capabilities(&self, id: ComponentId) -> &'static [Capability] {
        self.live_slot(id).map(|s| s.capabilities).unwrap_or(&[])
    }

    /// First component of `object` declaring `capability`.
    ///
    /// Transforms are not components here: `Capability::Transform` never
    /// matches. Reach an object's transform through [`World::transform`]
    /// and [`World::transform_mut`].
    pub fn find_component(&self, object: GameObjectId, capability: Capability) -> Option<ComponentId> {
        self.components(object)
            .iter()
            .copied()
            .find(|&c| self.capabilities(c).contains(&capability))
    }

    /// All components of `object` declaring `capability`. Empty for
    /// `Capability::Transform`, see [`World::find_component`].
    pub fn find_components(&self, object: GameObjectId, capability: Capability) -> Vec<ComponentId> {
        self.components(object)
            .iter()
            .copied()
            .filter(|&c| self.capabilities(c).contains(&capability))
            .collect()
    }

    /// Typed access to a component.
    ///
    /// Returns `None` for stale ids, for other types, and while the
    /// component's own hook is running.
    pub fn component<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.live_slot(id)?
            .behaviour
            .as_deref()?
            .as_any()
            .downcast_ref::<T>()
    }

    pub fn component_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        let slot = self.components.get_mut(id).filter(|s| !s.removed)?;
        slot.behaviour.as_deref_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// First component of type `T` on `object`.
    pub fn get_component<T: Component>(&self, object: GameObjectId) -> Option<&T> {
        self.components(object)
            .iter()
            .find_map(|&c| self.component::<T>(c))
    }

    pub fn get_component_mut<T: Component>(&mut self, object: GameObjectId) -> Option<&mut T> {
        let id = self
            .components(object)
            .iter()
            .copied()
            .find(|&c| self.component::<T>(c).is_some())?;
        self.component_mut::<T>(id)
    }

    //--- Component Flags --------------------------------------------------

    pub fn is_enabled(&self, id: ComponentId) -> bool {
        self.live_slot(id).map(|s| s.enabled).unwrap_or(false)
    }

    /// Enables or disables per-frame dispatch. Returns `false` for stale ids.
    pub fn set_enabled(&mut self, id: ComponentId, enabled: bool) -> bool {
        match self.live_slot_mut(id) {
            Some(slot) => {
                slot.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn render_camera(&self, id: ComponentId) -> Option<CameraId> {
        self.live_slot(id).and_then(|s| s.render_camera)
    }

    /// Overrides the camera a component renders with.
    pub fn set_render_camera(&mut self, id: ComponentId, camera: Option<CameraId>) -> bool {
        match self.live_slot_mut(id) {
            Some(slot) => {
                slot.render_camera = camera;
                true
            }
            None => false,
        }
    }

    pub fn component_host_scene(&self, id: ComponentId) -> Option<SceneId> {
        self.live_slot(id).and_then(|s| s.host_scene)
    }

    //--- Crate-Internal Mutation ------------------------------------------

    pub(crate) fn insert_slot(&mut self, owner: GameObjectId, behaviour: Box<dyn Component>) -> ComponentId {
        let capabilities = behaviour.capabilities();
        self.components.insert(ComponentSlot {
            owner,
            capabilities,
            enabled: true,
            render_camera: None,
            host_scene: None,
            behaviour: Some(behaviour),
            removed: false,
        })
    }

    pub(crate) fn slot_mut(&mut self, id: ComponentId) -> Option<&mut ComponentSlot> {
        self.components.get_mut(id)
    }

    pub(crate) fn remove_slot(&mut self, id: ComponentId) -> Option<ComponentSlot> {
        self.components.remove(id)
    }

    pub(crate) fn object_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    pub(crate) fn remove_object(&mut self, id: GameObjectId) -> Option<GameObject> {
        self.objects.remove(id)
    }

    /// Sets the host scene and render camera of a whole subtree.
    pub(crate) fn bind_subtree(
        &mut self,
        root: GameObjectId,
        scene: Option<SceneId>,
        camera: Option<CameraId>,
    ) {
        for id in self.descendants(root) {
            let Some(object) = self.objects.get_mut(id) else {
                continue;
            };
            object.host_scene = scene;
            let components = object.components.clone();
            for component in components {
                self.bind_component(component, scene, camera);
            }
        }
    }

    pub(crate) fn bind_component(
        &mut self,
        id: ComponentId,
        scene: Option<SceneId>,
        camera: Option<CameraId>,
    ) {
        if let Some(slot) = self.components.get_mut(id) {
            slot.host_scene = scene;
            slot.render_camera = camera;
        }
    }

    /// Points every component rendering with `from` at `to` instead.
    pub(crate) fn retarget_camera(&mut self, from: Option<CameraId>, to: Option<CameraId>) {
        for slot in self.components.values_mut() {
            if slot.render_camera == from && slot.host_scene.is_some() {
                slot.render_camera = to;
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn live_slot(&self, id: ComponentId) -> Option<&ComponentSlot> {
        self.components.get(id).filter(|s| !s.removed)
    }

    fn live_slot_mut(&mut self, id: ComponentId) -> Option<&mut ComponentSlot> {
        self.components.get_mut(id).filter(|s| !s.removed)
    }

    pub(crate) fn is_ancestor_or_self(&self, candidate: GameObjectId, of: GameObjectId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.objects.get(id).and_then(|o| o.parent);
        }
        false
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vec3;

    struct Marker(u32);
    impl Component for Marker {
        fn capabilities(&self) -> &'static [Capability] {
            &[Capability::Custom("marker")]
        }
    }

    struct Plain;
    impl Component for Plain {}

    //--- Hierarchy Tests --------------------------------------------------

    #[test]
    fn add_child_is_idempotent() {
        let mut world = World::default();
        let parent = world.spawn("Parent");
        let child = world.spawn("Child");

        assert_eq!(world.add_child(parent, child), Ok(true));
        assert_eq!(world.add_child(parent, child), Ok(false));
        assert_eq!(world.children(parent), &[child]);
        assert_eq!(world.parent(child), Some(parent));
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut world = World::default();
        let a = world.spawn("A");
        let b = world.spawn("B");
        world.add_child(a, b).unwrap();

        assert!(matches!(world.add_child(b, a), Err(SceneError::HierarchyCycle { .. })));
        assert!(matches!(world.add_child(a, a), Err(SceneError::HierarchyCycle { .. })));
    }

    #[test]
    fn reparenting_moves_child() {
        let mut world = World::default();
        let first = world.spawn("First");
        let second = world.spawn("Second");
        let child = world.spawn("Child");

        world.add_child(first, child).unwrap();
        world.add_child(second, child).unwrap();

        assert!(world.children(first).is_empty());
        assert_eq!(world.children(second), &[child]);
    }

    #[test]
    fn remove_child_clears_parent() {
        let mut world = World::default();
        let parent = world.spawn("Parent");
        let child = world.spawn("Child");
        world.add_child(parent, child).unwrap();

        assert!(world.remove_child(parent, child));
        assert!(!world.remove_child(parent, child));
        assert_eq!(world.parent(child), None);
    }

    #[test]
    fn descendants_are_pre_order() {
        let mut world = World::default();
        let root = world.spawn("root");
        let a = world.spawn("a");
        let a1 = world.spawn("a1");
        let b = world.spawn("b");
        world.add_child(root, a).unwrap();
        world.add_child(a, a1).unwrap();
        world.add_child(root, b).unwrap();

        assert_eq!(world.descendants(root), vec![root, a, a1, b]);
    }

    //--- Transform Tests --------------------------------------------------

    #[test]
    fn find_by_tag_includes_detached_objects() {
        let mut world = World::new(TransformComposition::Additive);
        let first = world.spawn("Coin");
        world.spawn("Rock");
        let second = world.spawn("Coin");
        world.set_tag(second, "Gem");

        assert_eq!(world.find_by_tag("Coin"), vec![first]);
        assert_eq!(world.find_by_tag("Gem"), vec![second]);
        assert!(world.find_by_tag("Ghost").is_empty());
    }

    #[test]
    fn world_transform_sums_whole_chain() {
        let mut world = World::new(TransformComposition::Additive);
        let parent = world.spawn("Parent");
        let child = world.spawn("Child");
        let grandchild = world.spawn("Grandchild");
        world.add_child(parent, child).unwrap();
        world.add_child(child, grandchild).unwrap();

        world.transform_mut(parent).unwrap().set_xy(1.0, 1.0);
        world.transform_mut(child).unwrap().set_xy(2.0, 0.0);
        world.transform_mut(grandchild).unwrap().set_xy(0.0, 3.0);

        let transform = world.world_transform(grandchild).unwrap();
        assert_eq!(transform.position, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(transform.scale, Vec3::splat(3.0));
    }

    #[test]
    fn root_world_transform_is_local() {
        let mut world = World::default();
        let root = world.spawn("Root");
        world.transform_mut(root).unwrap().set_xy(5.0, 6.0);
        assert_eq!(world.world_transform(root), world.transform(root).copied());
    }

    //--- Component Query Tests --------------------------------------------

    #[test]
    fn lookups_by_capability_and_type() {
        let mut world = World::default();
        let object = world.spawn("Object");
        let plain = world.insert_slot(object, Box::new(Plain));
        let marker = world.insert_slot(object, Box::new(Marker(7)));
        world.object_mut(object).unwrap().components.extend([plain, marker]);

        assert_eq!(world.find_component(object, Capability::Custom("marker")), Some(marker));
        assert_eq!(world.find_components(object, Capability::Behaviour), vec![plain]);
        assert!(world.find_component(object, Capability::Camera).is_none());
        assert!(world.find_components(object, Capability::Transform).is_empty());
        assert!(world.transform(object).is_some());

        assert_eq!(world.get_component::<Marker>(object).map(|m| m.0), Some(7));
        world.get_component_mut::<Marker>(object).unwrap().0 = 9;
        assert_eq!(world.component::<Marker>(marker).map(|m| m.0), Some(9));
        assert!(world.component::<Marker>(plain).is_none());
    }

    #[test]
    fn in_flight_component_is_not_visible() {
        let mut world = World::default();
        let object = world.spawn("Object");
        let id = world.insert_slot(object, Box::new(Marker(1)));
        world.object_mut(object).unwrap().components.push(id);

        let behaviour = world.slot_mut(id).unwrap().behaviour.take();
        assert!(world.component::<Marker>(id).is_none());
        world.slot_mut(id).unwrap().behaviour = behaviour;
        assert!(world.component::<Marker>(id).is_some());
    }

    #[test]
    fn enabled_flag_defaults_on() {
        let mut world = World::default();
        let object = world.spawn("Object");
        let id = world.insert_slot(object, Box::new(Plain));

        assert!(world.is_enabled(id));
        assert!(world.set_enabled(id, false));
        assert!(!world.is_enabled(id));

        world.remove_slot(id);
        assert!(!world.set_enabled(id, true));
    }
}
