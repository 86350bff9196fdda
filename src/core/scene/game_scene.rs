//=========================================================================
// Scene
//=========================================================================
//
// One screen of the game: a world of game objects grouped into layers,
// the cameras looking at it, and its own input and UI state.
//
// Architecture:
//   Scene
//     ├─ world:   World             (arena of objects and components)
//     ├─ layers:  Vec<Layer>        (ordered root ids, DEFAULT_LAYER first)
//     ├─ cameras: Cameras           (main + extra, registration order)
//     ├─ input:   InputManager
//     ├─ ui:      Box<dyn UiOverlay>
//     └─ script:  Box<dyn SceneScript>
//
// Scene membership:
//   A root added with `add_game_object` binds its whole subtree to the
//   scene (host scene + main render camera) and fires `start`. Removing
//   it fires `stop` on the subtree and unbinds it.
//
// Lifecycle entry points (`resize`, `resume`, `pause`, `update`,
// `render`, `destroy`) are crate-internal: only the scene manager drives
// them.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::dispatch::Phase;
use super::{SceneId, SceneScript, SceneSettings, SetupScript};
use crate::core::camera::{CameraId, Cameras, GameCamera};
use crate::core::components::CameraComponent;
use crate::core::error::{SceneError, SceneResult};
use crate::core::globals::EngineContext;
use crate::core::input::InputManager;
use crate::core::math::{Color, GameWorldUnits};
use crate::core::object::{
    Capability, Component, ComponentId, GameObjectId, Layer, World, DEFAULT_LAYER,
};
use crate::core::render::ShapeKind;
use crate::core::ui::{EmptyOverlay, UiOverlay};

//=== Scene ===============================================================

/// A self-contained level or screen.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let mut engine = EngineContext::headless(EngineSettings::default());
/// let mut scene = Scene::empty(&mut engine).unwrap();
///
/// let ship = scene.spawn("Ship");
/// let thruster = scene.spawn("Thruster");
/// scene.add_child(&mut engine, ship, thruster).unwrap();
/// scene.add_game_object(&mut engine, ship).unwrap();
///
/// assert_eq!(scene.world().host_scene(thruster), Some(scene.id()));
/// ```
pub struct Scene {
    pub(super) id: SceneId,
    pub(super) world: World,
    pub(super) layers: Vec<Layer>,
    pub(super) cameras: Cameras,
    main_camera_host: Option<GameObjectId>,
    input: InputManager,
    ui: Box<dyn UiOverlay>,
    units: GameWorldUnits,
    active: bool,
    stackable: bool,
    render_debug_lines: bool,
    background: Color,
    size: (u32, u32),
    script: Option<Box<dyn SceneScript>>,
}

impl Scene {
    //--- Construction -----------------------------------------------------

    /// Builds a scene driven by `script`.
    ///
    /// The script first adjusts the [`SceneSettings`], then the scene
    /// creates its main camera (hosted by a `"MainCamera"` game object)
    /// and finally the script's `setup` populates it.
    ///
    /// # Errors
    ///
    /// Propagates any structural error raised by `setup`.
    pub fn new(engine: &mut EngineContext, script: impl SceneScript + 'static) -> SceneResult<Self> {
        let mut script: Box<dyn SceneScript> = Box::new(script);
        let mut settings = SceneSettings::from_engine(&engine.settings);
        script.on_create(&mut settings);

        let units = settings.world_units();
        let size = engine.renderer.screen_size();
        let mut scene = Self {
            id: SceneId::next(),
            world: World::new(settings.transform_composition),
            layers: vec![Layer::new(DEFAULT_LAYER)],
            cameras: Cameras::new(),
            main_camera_host: None,
            input: InputManager::new(),
            ui: Box::new(EmptyOverlay),
            units,
            active: false,
            stackable: settings.stackable,
            render_debug_lines: settings.render_debug_lines,
            background: settings.background,
            size,
            script: None,
        };

        let mut camera = GameCamera::for_units(&units);
        camera.set_depth(engine.settings.camera_far);
        scene.setup_main_camera(engine, camera)?;

        script.setup(&mut scene, engine)?;
        scene.script = Some(script);

        debug!("Created scene {:?} ({} objects)", scene.id, scene.world.len());
        Ok(scene)
    }

    /// Scene with only its main camera.
    pub fn empty(engine: &mut EngineContext) -> SceneResult<Self> {
        Self::new(engine, ())
    }

    /// Scene populated by a single setup closure.
    pub fn with_setup<F>(engine: &mut EngineContext, setup: F) -> SceneResult<Self>
    where
        F: FnMut(&mut Scene, &mut EngineContext) -> SceneResult<()> + 'static,
    {
        Self::new(engine, SetupScript(setup))
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Creates a detached game object owned by this scene's world.
    pub fn spawn(&mut self, tag: impl Into<String>) -> GameObjectId {
        self.world.spawn(tag)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_stackable(&self) -> bool {
        self.stackable
    }

    pub fn set_stackable(&mut self, stackable: bool) {
        self.stackable = stackable;
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }

    pub fn render_debug_lines(&self) -> bool {
        self.render_debug_lines
    }

    pub fn set_render_debug_lines(&mut self, enabled: bool) {
        self.render_debug_lines = enabled;
    }

    pub fn world_units(&self) -> &GameWorldUnits {
        &self.units
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Replaces the UI overlay, disposing the previous one.
    pub fn set_ui_overlay(&mut self, overlay: Box<dyn UiOverlay>) {
        let mut previous = std::mem::replace(&mut self.ui, overlay);
        previous.dispose();
        let (width, height) = self.size;
        self.ui.resize(width, height);
    }

    /// Last size passed to `resize`, in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    //--- Game Objects -----------------------------------------------------

    /// Adds a root game object to the default layer.
    ///
    /// # Errors
    ///
    /// - [`SceneError::ChildAsRoot`] if the object has a parent.
    /// - [`SceneError::UnknownGameObject`] for a stale id.
    pub fn add_game_object(&mut self, engine: &mut EngineContext, object: GameObjectId) -> SceneResult<()> {
        self.add_game_object_to_layer(engine, object, DEFAULT_LAYER)
    }

    /// Adds a root game object to the named layer.
    ///
    /// Binds the subtree to this scene, then fires `start` on it. Adding an
    /// object that is already a root of this scene does nothing.
    pub fn add_game_object_to_layer(
        &mut self,
        engine: &mut EngineContext,
        object: GameObjectId,
        layer: &str,
    ) -> SceneResult<()> {
        let go = self.world.get(object).ok_or(SceneError::UnknownGameObject)?;
        if go.has_parent() {
            return Err(SceneError::ChildAsRoot {
                tag: go.tag().to_owned(),
            });
        }
        let index = self
            .layer_index(layer)
            .ok_or_else(|| SceneError::UnknownLayer(layer.to_owned()))?;

        if self.is_root(object) {
            warn!("'{}' is already a root of scene {:?}, skipping", go.tag(), self.id);
            return Ok(());
        }

        self.world.bind_subtree(object, Some(self.id), self.cameras.main());
        self.layers[index].push(object);
        self.dispatch_subtree(engine, object, Phase::Start);
        Ok(())
    }

    /// Removes a root from whichever layer holds it.
    ///
    /// Fires `stop` on the subtree, then unbinds it. Returns `false` if the
    /// object is not a root of this scene.
    pub fn remove_game_object(&mut self, engine: &mut EngineContext, object: GameObjectId) -> bool {
        match self.layers.iter().position(|l| l.contains(object)) {
            Some(index) => {
                self.detach_root(engine, object, index);
                true
            }
            None => false,
        }
    }

    /// # Errors
    ///
    /// [`SceneError::UnknownLayer`] if no layer has that name.
    pub fn remove_game_object_from_layer(
        &mut self,
        engine: &mut EngineContext,
        object: GameObjectId,
        layer: &str,
    ) -> SceneResult<bool> {
        let index = self
            .layer_index(layer)
            .ok_or_else(|| SceneError::UnknownLayer(layer.to_owned()))?;
        if !self.layers[index].contains(object) {
            return Ok(false);
        }
        self.detach_root(engine, object, index);
        Ok(true)
    }

    /// Makes `child` a child of `parent`.
    ///
    /// A child joining a live parent is bound and started; a live child
    /// moving under a detached parent is stopped and unbound. A root of this
    /// scene is removed from its layer first. Returns `false` if `child` was
    /// already a child of `parent`.
    ///
    /// # Errors
    ///
    /// [`SceneError::HierarchyCycle`] or [`SceneError::UnknownGameObject`].
    pub fn add_child(
        &mut self,
        engine: &mut EngineContext,
        parent: GameObjectId,
        child: GameObjectId,
    ) -> SceneResult<bool> {
        if !self.world.contains(parent) || !self.world.contains(child) {
            return Err(SceneError::UnknownGameObject);
        }
        if self.world.is_ancestor_or_self(child, parent) {
            return Err(SceneError::HierarchyCycle {
                parent: self.world.tag(parent).unwrap_or_default().to_owned(),
                child: self.world.tag(child).unwrap_or_default().to_owned(),
            });
        }
        if self.world.parent(child) == Some(parent) {
            return Ok(false);
        }
        if self.is_root(child) {
            self.remove_game_object(engine, child);
        }

        let child_was_live = self.is_live(child);
        let added = self.world.add_child(parent, child)?;
        if !added {
            return Ok(false);
        }

        match (self.is_live(parent), child_was_live) {
            (true, false) => {
                self.world.bind_subtree(child, Some(self.id), self.cameras.main());
                self.dispatch_subtree(engine, child, Phase::Start);
            }
            (false, true) => {
                self.dispatch_subtree(engine, child, Phase::Stop);
                self.world.bind_subtree(child, None, None);
            }
            _ => {}
        }
        Ok(true)
    }

    /// Detaches `child` from `parent`, stopping it if it was live.
    pub fn remove_child(
        &mut self,
        engine: &mut EngineContext,
        parent: GameObjectId,
        child: GameObjectId,
    ) -> bool {
        if self.world.parent(child) != Some(parent) {
            return false;
        }
        if self.is_live(child) {
            self.dispatch_subtree(engine, child, Phase::Stop);
            self.world.bind_subtree(child, None, None);
        }
        self.world.remove_child(parent, child)
    }

    /// Removes `object` and its whole subtree from the scene and the world.
    ///
    /// A live object is stopped first; then every component of the subtree
    /// is detached and destroyed.
    pub fn destroy_game_object(&mut self, engine: &mut EngineContext, object: GameObjectId) -> bool {
        if !self.world.contains(object) {
            return false;
        }

        if !self.remove_game_object(engine, object) && self.is_live(object) {
            self.dispatch_subtree(engine, object, Phase::Stop);
            self.world.bind_subtree(object, None, None);
        }
        if let Some(parent) = self.world.parent(object) {
            self.world.remove_child(parent, object);
        }

        for id in self.world.descendants(object) {
            for component in self.world.components(id).to_vec() {
                self.remove_component(engine, component);
            }
        }
        for id in self.world.descendants(object) {
            self.world.remove_object(id);
        }

        if self.main_camera_host == Some(object) {
            self.main_camera_host = None;
        }
        debug!("Destroyed game object {:?} in scene {:?}", object, self.id);
        true
    }

    /// Root objects in traversal order: layer order, then insertion order.
    pub fn root_game_objects(&self) -> Vec<GameObjectId> {
        self.layers
            .iter()
            .flat_map(|layer| layer.objects().iter().copied())
            .collect()
    }

    pub fn is_root(&self, object: GameObjectId) -> bool {
        self.layers.iter().any(|l| l.contains(object))
    }

    /// First object with `tag` in traversal order, children included.
    pub fn find_game_object(&self, tag: &str) -> Option<GameObjectId> {
        self.live_objects()
            .into_iter()
            .find(|&id| self.world.tag(id) == Some(tag))
    }

    pub fn find_game_objects(&self, tag: &str) -> Vec<GameObjectId> {
        self.live_objects()
            .into_iter()
            .filter(|&id| self.world.tag(id) == Some(tag))
            .collect()
    }

    //--- Components -------------------------------------------------------

    /// Adds a component to `object`.
    ///
    /// Fires `attach`, then `component_added` on the object's other
    /// components, then binds and starts the component if the object is
    /// live in this scene.
    ///
    /// # Errors
    ///
    /// - [`SceneError::DuplicateTransform`] if the component claims
    ///   [`Capability::Transform`].
    /// - [`SceneError::UnknownGameObject`] for a stale id.
    pub fn add_component<C: Component>(
        &mut self,
        engine: &mut EngineContext,
        object: GameObjectId,
        component: C,
    ) -> SceneResult<ComponentId> {
        self.add_boxed_component(engine, object, Box::new(component))
    }

    pub fn add_boxed_component(
        &mut self,
        engine: &mut EngineContext,
        object: GameObjectId,
        component: Box<dyn Component>,
    ) -> SceneResult<ComponentId> {
        let go = self.world.get(object).ok_or(SceneError::UnknownGameObject)?;
        if component.capabilities().contains(&Capability::Transform) {
            return Err(SceneError::DuplicateTransform {
                tag: go.tag().to_owned(),
            });
        }
        let peers = go.components().to_vec();

        let id = self.world.insert_slot(object, component);
        self.invoke(engine, id, false, |c, ctx| c.attach(ctx));
        for peer in peers {
            self.invoke(engine, peer, false, |c, ctx| c.component_added(ctx, id));
        }

        // The owner may have been destroyed by one of the hooks above.
        if self.world.component_owner(id).is_none() {
            return Ok(id);
        }
        match self.world.object_mut(object) {
            Some(go) => go.components.push(id),
            None => {
                self.world.remove_slot(id);
                return Ok(id);
            }
        }

        if self.is_live(object) {
            self.world.bind_component(id, Some(self.id), self.cameras.main());
            self.invoke(engine, id, false, |c, ctx| c.start(ctx));
        }
        Ok(id)
    }

    /// Removes a component from its owner.
    ///
    /// The component is unlinked first, so lookups made by the peers'
    /// `component_removed` hooks no longer see it. Then it receives
    /// `detach` and `destroy`. If the component is the one currently
    /// running a hook, those two calls happen once the hook returns.
    pub fn remove_component(&mut self, engine: &mut EngineContext, id: ComponentId) -> bool {
        let Some(owner) = self.world.component_owner(id) else {
            return false;
        };
        if let Some(slot) = self.world.slot_mut(id) {
            slot.removed = true;
        }
        if let Some(go) = self.world.object_mut(owner) {
            go.components.retain(|&c| c != id);
        }

        for peer in self.world.components(owner).to_vec() {
            self.invoke(engine, peer, false, |c, ctx| c.component_removed(ctx, id));
        }

        let behaviour = self.world.slot_mut(id).and_then(|s| s.behaviour.take());
        if let Some(behaviour) = behaviour {
            self.finish_removal(engine, owner, id, behaviour);
        }
        true
    }

    /// Removes the first component of `object` with `capability`.
    ///
    /// # Errors
    ///
    /// [`SceneError::TransformRemoval`] for [`Capability::Transform`].
    pub fn remove_component_with(
        &mut self,
        engine: &mut EngineContext,
        object: GameObjectId,
        capability: Capability,
    ) -> SceneResult<bool> {
        self.check_removable(object, capability)?;
        Ok(match self.world.find_component(object, capability) {
            Some(id) => self.remove_component(engine, id),
            None => false,
        })
    }

    /// Removes every component of `object` with `capability`.
    ///
    /// # Errors
    ///
    /// [`SceneError::TransformRemoval`] for [`Capability::Transform`].
    pub fn remove_components_with(
        &mut self,
        engine: &mut EngineContext,
        object: GameObjectId,
        capability: Capability,
    ) -> SceneResult<usize> {
        self.check_removable(object, capability)?;
        let ids = self.world.find_components(object, capability);
        Ok(ids
            .into_iter()
            .filter(|&id| self.remove_component(engine, id))
            .count())
    }

    //--- Layers -----------------------------------------------------------

    /// Appends a layer; later layers are traversed and drawn later.
    ///
    /// # Errors
    ///
    /// [`SceneError::DuplicateLayer`] if the name is taken.
    pub fn add_layer(&mut self, name: &str) -> SceneResult<()> {
        if self.layer_index(name).is_some() {
            return Err(SceneError::DuplicateLayer(name.to_owned()));
        }
        self.layers.push(Layer::new(name));
        debug!("Added layer '{}' to scene {:?}", name, self.id);
        Ok(())
    }

    /// Removes a layer, stopping and unbinding its roots.
    ///
    /// # Errors
    ///
    /// - [`SceneError::DefaultLayerRemoval`] for [`DEFAULT_LAYER`].
    /// - [`SceneError::UnknownLayer`] if no layer has that name.
    pub fn remove_layer(&mut self, engine: &mut EngineContext, name: &str) -> SceneResult<()> {
        if name == DEFAULT_LAYER {
            return Err(SceneError::DefaultLayerRemoval);
        }
        let index = self
            .layer_index(name)
            .ok_or_else(|| SceneError::UnknownLayer(name.to_owned()))?;

        let roots = self.layers[index].objects().to_vec();
        for root in roots {
            if let Some(index) = self.layer_index(name) {
                self.detach_root(engine, root, index);
            }
        }
        if let Some(index) = self.layer_index(name) {
            self.layers.remove(index);
        }
        debug!("Removed layer '{}' from scene {:?}", name, self.id);
        Ok(())
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name() == name)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(Layer::name).collect()
    }

    //--- Cameras ----------------------------------------------------------

    pub fn main_camera(&self) -> Option<CameraId> {
        self.cameras.main()
    }

    /// The game object hosting the main camera component.
    pub fn main_camera_host(&self) -> Option<GameObjectId> {
        self.main_camera_host
    }

    pub fn cameras(&self) -> &Cameras {
        &self.cameras
    }

    pub fn camera(&self, id: CameraId) -> Option<&GameCamera> {
        self.cameras.get(id)
    }

    pub fn camera_mut(&mut self, id: CameraId) -> Option<&mut GameCamera> {
        self.cameras.get_mut(id)
    }

    /// Registers an extra camera; it renders after the ones added before it.
    ///
    /// Components draw with it once their render camera is set to the
    /// returned id.
    pub fn add_camera(&mut self, mut camera: GameCamera) -> CameraId {
        let (width, height) = self.size;
        camera.resize(width, height);
        let id = self.cameras.add(camera);
        debug!("Added camera {:?} to scene {:?}", id, self.id);
        id
    }

    /// Unregisters a camera and releases its backend resources.
    ///
    /// Components rendering with it are left without a render camera.
    pub fn remove_camera(&mut self, engine: &mut EngineContext, id: CameraId) -> bool {
        if self.cameras.main() == Some(id) {
            return self.remove_main_camera(engine);
        }
        match self.take_camera(id) {
            Some(mut camera) => {
                camera.destroy(engine.renderer.as_mut());
                true
            }
            None => false,
        }
    }

    /// Replaces the main camera.
    ///
    /// The previous main camera is released and every component that
    /// rendered with it switches to the new one.
    pub fn setup_main_camera(
        &mut self,
        engine: &mut EngineContext,
        mut camera: GameCamera,
    ) -> SceneResult<CameraId> {
        let (width, height) = self.size;
        camera.resize(width, height);

        let previous = self.cameras.main();
        let id = self.cameras.add(camera);
        self.cameras.set_main(Some(id));

        if let Some(previous) = previous {
            if let Some(mut old) = self.cameras.remove(previous) {
                old.destroy(engine.renderer.as_mut());
            }
            self.world.retarget_camera(Some(previous), Some(id));
        }

        let host = self.main_camera_host.filter(|&h| self.world.contains(h));
        match host {
            Some(host) => match self.world.get_component_mut::<CameraComponent>(host) {
                Some(rig) => rig.set_camera(id),
                None => {
                    self.add_component(engine, host, CameraComponent::new(id))?;
                }
            },
            None => {
                let host = self.spawn("MainCamera");
                self.add_component(engine, host, CameraComponent::new(id))?;
                self.add_game_object(engine, host)?;
                self.main_camera_host = Some(host);
            }
        }

        debug!("Scene {:?} main camera is now {:?}", self.id, id);
        Ok(id)
    }

    /// Removes the main camera and its camera component.
    pub fn remove_main_camera(&mut self, engine: &mut EngineContext) -> bool {
        let Some(main) = self.cameras.main() else {
            return false;
        };

        let rig = self.main_camera_host.and_then(|host| {
            self.world
                .find_components(host, Capability::Camera)
                .into_iter()
                .find(|&c| {
                    self.world
                        .component::<CameraComponent>(c)
                        .is_some_and(|rig| rig.camera() == main)
                })
        });
        if let Some(rig) = rig {
            self.remove_component(engine, rig);
        }

        if let Some(mut camera) = self.take_camera(main) {
            camera.destroy(engine.renderer.as_mut());
        }
        debug!("Removed main camera from scene {:?}", self.id);
        true
    }

    /// Unregisters a camera without releasing it, leaving its components
    /// without a render camera.
    pub(crate) fn take_camera(&mut self, id: CameraId) -> Option<GameCamera> {
        let camera = self.cameras.remove(id)?;
        self.world.retarget_camera(Some(id), None);
        Some(camera)
    }

    //--- Lifecycle Entry Points -------------------------------------------

    pub(crate) fn resize(&mut self, engine: &mut EngineContext, width: u32, height: u32) {
        self.size = (width, height);
        self.cameras.resize_all(width, height);
        self.dispatch(engine, Phase::Resize(width, height));
        self.ui.resize(width, height);
    }

    pub(crate) fn resume(&mut self, engine: &mut EngineContext) {
        self.active = true;
        self.dispatch(engine, Phase::Resume);
        debug!("Resumed scene {:?}", self.id);
    }

    pub(crate) fn pause(&mut self, engine: &mut EngineContext) {
        self.active = false;
        self.dispatch(engine, Phase::Pause);
        debug!("Paused scene {:?}", self.id);
    }

    pub(crate) fn update(&mut self, engine: &mut EngineContext, delta: f32) {
        self.input.update(self.ui.as_mut());

        self.dispatch(engine, Phase::PreUpdate(delta));
        self.dispatch(engine, Phase::Update(delta));
        self.dispatch(engine, Phase::PostUpdate(delta));

        self.ui.act(delta);
    }

    pub(crate) fn render(&mut self, engine: &mut EngineContext) {
        engine.renderer.clear(self.background);
        self.dispatch(engine, Phase::PreRender);

        for camera in self.cameras.ordered().to_vec() {
            let Some(game_camera) = self.cameras.get_mut(camera) else {
                continue;
            };
            game_camera.pre_render(engine.renderer.as_mut());
            self.dispatch(engine, Phase::Render(camera));
            if let Some(game_camera) = self.cameras.get_mut(camera) {
                game_camera.post_render(engine.renderer.as_mut());
            }
        }

        self.dispatch(engine, Phase::PostRender);
        if self.render_debug_lines {
            self.render_debug_drawings(engine);
        }
        self.ui.draw(engine.renderer.as_mut());
    }

    /// Fires `destroy` on every live component and releases all cameras.
    pub(crate) fn destroy(&mut self, engine: &mut EngineContext) {
        self.active = false;
        self.dispatch(engine, Phase::Destroy);

        for camera in self.cameras.ordered().to_vec() {
            if let Some(mut camera) = self.cameras.remove(camera) {
                camera.destroy(engine.renderer.as_mut());
            }
        }
        self.ui.dispose();
        debug!("Destroyed scene {:?}", self.id);
    }

    //--- Script Hooks -----------------------------------------------------

    pub(crate) fn pause_for_transition(&mut self, engine: &mut EngineContext) {
        self.with_script(engine, |script, scene, engine| {
            script.pause_for_transition(scene, engine)
        });
    }

    pub(crate) fn transitioned_from(&mut self, engine: &mut EngineContext, next: SceneId) {
        self.with_script(engine, |script, scene, engine| {
            script.transitioned_from_this_scene(scene, engine, next)
        });
    }

    pub(crate) fn transitioned_to(&mut self, engine: &mut EngineContext, previous: Option<SceneId>) {
        self.with_script(engine, |script, scene, engine| {
            script.transitioned_to_this_scene(scene, engine, previous)
        });
    }

    //--- Internal Helpers -------------------------------------------------

    fn with_script<F>(&mut self, engine: &mut EngineContext, hook: F)
    where
        F: FnOnce(&mut dyn SceneScript, &mut Scene, &mut EngineContext),
    {
        if let Some(mut script) = self.script.take() {
            hook(script.as_mut(), self, engine);
            self.script = Some(script);
        }
    }

    /// Draws the filled, line and point debug passes.
    ///
    /// Shapes are projected with the main camera. A scene without one
    /// falls back to its first registered camera, and skips the passes
    /// when it has no camera at all.
    fn render_debug_drawings(&mut self, engine: &mut EngineContext) {
        let camera = self
            .cameras
            .main()
            .or_else(|| self.cameras.ordered().first().copied());
        let Some(projection) = camera
            .and_then(|id| self.cameras.get(id))
            .map(GameCamera::projection_matrix)
        else {
            trace!("Scene {:?} has no camera for debug shapes", self.id);
            return;
        };

        let passes = [
            (ShapeKind::Filled, Phase::ShapeFilled),
            (ShapeKind::Line, Phase::ShapeLine),
            (ShapeKind::Point, Phase::ShapePoint),
        ];
        for (kind, phase) in passes {
            engine.renderer.begin_shapes(kind, projection);
            self.dispatch(engine, phase);
            engine.renderer.end_shapes();
        }
    }

    /// Stops, unbinds and unlinks the root at layer `index`.
    fn detach_root(&mut self, engine: &mut EngineContext, object: GameObjectId, index: usize) {
        self.dispatch_subtree(engine, object, Phase::Stop);
        self.world.bind_subtree(object, None, None);
        if let Some(layer) = self.layers.get_mut(index) {
            layer.remove(object);
        }
        debug!("Removed {:?} from scene {:?}", object, self.id);
    }

    fn check_removable(&self, object: GameObjectId, capability: Capability) -> SceneResult<()> {
        if capability == Capability::Transform {
            let tag = self.world.tag(object).unwrap_or_default().to_owned();
            return Err(SceneError::TransformRemoval { tag });
        }
        Ok(())
    }

    fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name() == name)
    }

    /// Whether `object` is bound to this scene.
    pub(super) fn is_live(&self, object: GameObjectId) -> bool {
        self.world.host_scene(object) == Some(self.id)
    }

    /// Every object reachable from the roots, in traversal order.
    fn live_objects(&self) -> Vec<GameObjectId> {
        self.root_game_objects()
            .into_iter()
            .flat_map(|root| self.world.descendants(root))
            .collect()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("objects", &self.world.len())
            .field("layers", &self.layer_names())
            .field("cameras", &self.cameras.len())
            .field("active", &self.active)
            .field("stackable", &self.stackable)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
