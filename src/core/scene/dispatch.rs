//=========================================================================
// Component Dispatch
//=========================================================================
//
// Delivers lifecycle and per-frame calls to the components of a scene.
//
// Take-out / put-back:
// ```text
//   slot.behaviour.take() ─> hook(component, ctx) ─> restore
//                                                      ├─ removed? detach + destroy, free slot
//                                                      └─ otherwise put the box back
// ```
//
// Traversal copies each id list (roots, components, children) right
// before walking it, so hooks may add or remove objects and components
// freely. Ids that died or moved in the meantime are skipped; ids added
// in the meantime are picked up by the next pass.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::camera::CameraId;
use crate::core::globals::EngineContext;
use crate::core::object::{Component, ComponentContext, ComponentId, GameObjectId};

//=== Phase ===============================================================

/// One dispatch pass over the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Phase {
    Start,
    Stop,
    Destroy,
    Resume,
    Pause,
    Resize(u32, u32),
    PreUpdate(f32),
    Update(f32),
    PostUpdate(f32),
    PreRender,
    /// Only components whose render camera is this camera.
    Render(CameraId),
    PostRender,
    ShapeFilled,
    ShapeLine,
    ShapePoint,
}

impl Phase {
    /// Lifecycle passes reach disabled components too.
    fn respects_enabled(self) -> bool {
        !matches!(self, Self::Start | Self::Stop | Self::Destroy)
    }

    fn camera(self) -> Option<CameraId> {
        match self {
            Self::Render(camera) => Some(camera),
            _ => None,
        }
    }

    fn apply(self, component: &mut dyn Component, ctx: &mut ComponentContext<'_>) {
        match self {
            Self::Start => component.start(ctx),
            Self::Stop => component.stop(ctx),
            Self::Destroy => component.destroy(ctx),
            Self::Resume => component.resume(ctx),
            Self::Pause => component.pause(ctx),
            Self::Resize(width, height) => component.resize(ctx, width, height),
            Self::PreUpdate(delta) => component.pre_update(ctx, delta),
            Self::Update(delta) => component.update(ctx, delta),
            Self::PostUpdate(delta) => component.post_update(ctx, delta),
            Self::PreRender => component.pre_render(ctx),
            Self::Render(_) => component.render(ctx),
            Self::PostRender => component.post_render(ctx),
            Self::ShapeFilled => component.render_shape_filled(ctx),
            Self::ShapeLine => component.render_shape_line(ctx),
            Self::ShapePoint => component.render_shape_point(ctx),
        }
    }
}

/// Visitor signature shared by every traversal.
type Visitor<'v> = dyn FnMut(&mut dyn Component, &mut ComponentContext<'_>) + 'v;

//=== Scene Dispatch ======================================================

impl Scene {
    /// Visits every component of `root` and its descendants, pre-order,
    /// depth-first. Disabled components are visited too.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use tessera_engine::prelude::*;
    /// let mut engine = EngineContext::headless(EngineSettings::default());
    /// let mut scene = Scene::empty(&mut engine).unwrap();
    /// let host = scene.main_camera_host().unwrap();
    ///
    /// let mut visited = 0;
    /// scene.for_each_component(&mut engine, host, |_, _| visited += 1);
    /// assert_eq!(visited, 1);
    /// ```
    pub fn for_each_component<F>(&mut self, engine: &mut EngineContext, root: GameObjectId, mut visitor: F)
    where
        F: FnMut(&mut dyn Component, &mut ComponentContext<'_>),
    {
        self.visit(engine, root, false, None, &mut visitor);
    }

    /// Runs `phase` over every root, in layer order.
    pub(crate) fn dispatch(&mut self, engine: &mut EngineContext, phase: Phase) {
        for root in self.root_game_objects() {
            // Skip roots removed by an earlier hook of this pass.
            if !self.is_root(root) {
                continue;
            }
            self.dispatch_subtree(engine, root, phase);
        }
    }

    pub(crate) fn dispatch_subtree(&mut self, engine: &mut EngineContext, root: GameObjectId, phase: Phase) {
        let mut visitor = |component: &mut dyn Component, ctx: &mut ComponentContext<'_>| {
            phase.apply(component, ctx)
        };
        self.visit(
            engine,
            root,
            phase.respects_enabled(),
            phase.camera(),
            &mut visitor,
        );
    }

    fn visit(
        &mut self,
        engine: &mut EngineContext,
        object: GameObjectId,
        respect_enabled: bool,
        camera: Option<CameraId>,
        visitor: &mut Visitor<'_>,
    ) {
        let Some(go) = self.world.get(object) else {
            return;
        };
        let components = go.components().to_vec();

        for id in components {
            if camera.is_some() && self.world.render_camera(id) != camera {
                continue;
            }
            self.invoke(engine, id, respect_enabled, |component, ctx| {
                visitor(component, ctx)
            });
        }

        for child in self.world.children(object).to_vec() {
            // Skip children reparented by an earlier hook of this pass.
            if self.world.parent(child) != Some(object) {
                continue;
            }
            self.visit(engine, child, respect_enabled, camera, visitor);
        }
    }

    //--- Single Invocation ------------------------------------------------

    /// Calls `hook` on one component with its box taken out of the slot.
    ///
    /// Returns `false` without calling anything if the component is dead,
    /// pending removal, already running a hook, or disabled while
    /// `respect_enabled` is set.
    pub(crate) fn invoke<F>(
        &mut self,
        engine: &mut EngineContext,
        id: ComponentId,
        respect_enabled: bool,
        hook: F,
    ) -> bool
    where
        F: FnOnce(&mut dyn Component, &mut ComponentContext<'_>),
    {
        let Some(slot) = self.world.slot_mut(id) else {
            return false;
        };
        if slot.removed || (respect_enabled && !slot.enabled) {
            return false;
        }
        let Some(mut behaviour) = slot.behaviour.take() else {
            trace!("Component {:?} is already running a hook", id);
            return false;
        };
        let owner = slot.owner;

        {
            let mut ctx = ComponentContext::new(self, engine, owner, id);
            hook(&mut *behaviour, &mut ctx);
        }
        self.restore(engine, id, behaviour);
        true
    }

    /// Puts a component back after its hook, or completes a removal that
    /// was requested while the hook ran.
    fn restore(&mut self, engine: &mut EngineContext, id: ComponentId, behaviour: Box<dyn Component>) {
        let Some(slot) = self.world.slot_mut(id) else {
            return;
        };
        if slot.removed {
            let owner = slot.owner;
            self.finish_removal(engine, owner, id, behaviour);
        } else {
            slot.behaviour = Some(behaviour);
        }
    }

    /// Fires `detach` and `destroy` on an unlinked component, then frees its slot.
    pub(super) fn finish_removal(
        &mut self,
        engine: &mut EngineContext,
        owner: GameObjectId,
        id: ComponentId,
        mut behaviour: Box<dyn Component>,
    ) {
        {
            let mut ctx = ComponentContext::new(self, engine, owner, id);
            behaviour.detach(&mut ctx);
            behaviour.destroy(&mut ctx);
        }
        self.world.remove_slot(id);
        trace!("Removed component {:?} from {:?}", id, owner);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::core::config::EngineSettings;
    use crate::core::scene::test_support::{clear, entries, new_log, Log, Probe};

    /// Runs a closure in `update`.
    struct OnUpdate<F>(F);

    impl<F: FnMut(&mut ComponentContext<'_>) + 'static> Component for OnUpdate<F> {
        fn update(&mut self, ctx: &mut ComponentContext<'_>, _delta: f32) {
            (self.0)(ctx)
        }
    }

    /// Removes itself during `update`.
    struct Quitter {
        log: Log,
    }

    impl Component for Quitter {
        fn update(&mut self, ctx: &mut ComponentContext<'_>, _delta: f32) {
            self.log.borrow_mut().push("q.update".into());
            let me = ctx.component();
            ctx.scene.remove_component(ctx.engine, me);
            self.log.borrow_mut().push("q.after_remove".into());
        }

        fn detach(&mut self, _ctx: &mut ComponentContext<'_>) {
            self.log.borrow_mut().push("q.detach".into());
        }

        fn destroy(&mut self, _ctx: &mut ComponentContext<'_>) {
            self.log.borrow_mut().push("q.destroy".into());
        }
    }

    fn setup() -> (EngineContext, Scene, Log) {
        let mut engine = EngineContext::headless(EngineSettings::default());
        let scene = Scene::empty(&mut engine).unwrap();
        (engine, scene, new_log())
    }

    //--- Mutation During Dispatch -----------------------------------------

    #[test]
    fn sibling_removed_mid_pass_is_skipped() {
        let (mut engine, mut scene, log) = setup();
        let hero = scene.spawn("Hero");
        let target: Rc<Cell<Option<ComponentId>>> = Rc::new(Cell::new(None));
        let shared = Rc::clone(&target);
        scene
            .add_component(
                &mut engine,
                hero,
                OnUpdate(move |ctx: &mut ComponentContext<'_>| {
                    if let Some(victim) = shared.take() {
                        ctx.scene.remove_component(ctx.engine, victim);
                    }
                }),
            )
            .unwrap();
        let victim = scene.add_component(&mut engine, hero, Probe::new("v", &log)).unwrap();
        target.set(Some(victim));
        scene.add_game_object(&mut engine, hero).unwrap();
        clear(&log);

        scene.update(&mut engine, 0.016);

        assert_eq!(entries(&log), vec!["v.pre_update", "v.detach", "v.destroy"]);
        assert_eq!(scene.world().components(hero).len(), 1);
    }

    #[test]
    fn self_removal_completes_after_hook() {
        let (mut engine, mut scene, log) = setup();
        let hero = scene.spawn("Hero");
        let id = scene
            .add_component(&mut engine, hero, Quitter { log: log.clone() })
            .unwrap();
        scene.add_game_object(&mut engine, hero).unwrap();

        scene.update(&mut engine, 0.016);

        assert_eq!(
            entries(&log),
            vec!["q.update", "q.after_remove", "q.detach", "q.destroy"]
        );
        assert_eq!(scene.world().component_owner(id), None);
        assert!(scene.world().components(hero).is_empty());
    }

    #[test]
    fn objects_added_mid_pass_join_next_pass() {
        let (mut engine, mut scene, log) = setup();
        let spawner = scene.spawn("Spawner");
        let probe_log = log.clone();
        let mut spawned = false;
        scene
            .add_component(
                &mut engine,
                spawner,
                OnUpdate(move |ctx: &mut ComponentContext<'_>| {
                    if spawned {
                        return;
                    }
                    spawned = true;
                    let fresh = ctx.scene.spawn("Fresh");
                    ctx.scene
                        .add_component(ctx.engine, fresh, Probe::new("n", &probe_log))
                        .unwrap();
                    ctx.scene.add_game_object(ctx.engine, fresh).unwrap();
                }),
            )
            .unwrap();
        scene.add_game_object(&mut engine, spawner).unwrap();

        scene.update(&mut engine, 0.016);
        assert_eq!(entries(&log), vec!["n.attach", "n.start", "n.post_update"]);

        clear(&log);
        scene.update(&mut engine, 0.016);
        assert_eq!(entries(&log), vec!["n.pre_update", "n.update", "n.post_update"]);
    }

    #[test]
    fn destroying_own_object_mid_pass() {
        let (mut engine, mut scene, log) = setup();
        let doomed = scene.spawn("Doomed");
        let survivor = scene.spawn("Survivor");
        scene
            .add_component(
                &mut engine,
                doomed,
                OnUpdate(|ctx: &mut ComponentContext<'_>| {
                    let me = ctx.object();
                    ctx.scene.destroy_game_object(ctx.engine, me);
                }),
            )
            .unwrap();
        scene.add_component(&mut engine, survivor, Probe::new("s", &log)).unwrap();
        scene.add_game_object(&mut engine, doomed).unwrap();
        scene.add_game_object(&mut engine, survivor).unwrap();
        clear(&log);

        scene.update(&mut engine, 0.016);

        assert!(!scene.world().contains(doomed));
        assert!(!scene.is_root(doomed));
        assert_eq!(entries(&log), vec!["s.pre_update", "s.update", "s.post_update"]);
    }

    //--- Visitor Tests ----------------------------------------------------

    #[test]
    fn for_each_component_includes_disabled() {
        let (mut engine, mut scene, log) = setup();
        let parent = scene.spawn("Parent");
        let child = scene.spawn("Child");
        let a = scene.add_component(&mut engine, parent, Probe::new("a", &log)).unwrap();
        let b = scene.add_component(&mut engine, child, Probe::new("b", &log)).unwrap();
        scene.add_child(&mut engine, parent, child).unwrap();
        scene.world_mut().set_enabled(a, false);

        let mut visited = Vec::new();
        scene.for_each_component(&mut engine, parent, |_, ctx| visited.push(ctx.component()));

        assert_eq!(visited, vec![a, b]);
    }

    #[test]
    fn for_each_component_walks_grandchildren_and_skips_removed_siblings() {
        let (mut engine, mut scene, log) = setup();
        let parent = scene.spawn("Parent");
        let left = scene.spawn("Left");
        let grandchild = scene.spawn("Grandchild");
        let right = scene.spawn("Right");
        let a = scene.add_component(&mut engine, parent, Probe::new("a", &log)).unwrap();
        let b = scene.add_component(&mut engine, left, Probe::new("b", &log)).unwrap();
        let x = scene.add_component(&mut engine, left, Probe::new("x", &log)).unwrap();
        let g = scene.add_component(&mut engine, grandchild, Probe::new("g", &log)).unwrap();
        scene.add_component(&mut engine, right, Probe::new("r", &log)).unwrap();
        scene.add_child(&mut engine, parent, left).unwrap();
        scene.add_child(&mut engine, left, grandchild).unwrap();
        scene.add_child(&mut engine, parent, right).unwrap();

        let mut visited = Vec::new();
        scene.for_each_component(&mut engine, parent, |_, ctx| {
            let me = ctx.component();
            visited.push(me);
            if me == b {
                ctx.scene.remove_component(ctx.engine, x);
                ctx.scene.destroy_game_object(ctx.engine, right);
            }
        });

        assert_eq!(visited, vec![a, b, g]);
        assert!(!scene.world().contains(right));
        assert_eq!(scene.world().components(left), &[b]);
    }

    #[test]
    fn invoke_refuses_component_in_flight() {
        let (mut engine, mut scene, _log) = setup();
        let hero = scene.spawn("Hero");
        let reentered = Rc::new(Cell::new(None));
        let seen = Rc::clone(&reentered);
        let id = scene
            .add_component(
                &mut engine,
                hero,
                OnUpdate(move |ctx: &mut ComponentContext<'_>| {
                    let me = ctx.component();
                    let ran = ctx.scene.invoke(ctx.engine, me, true, |_, _| {});
                    seen.set(Some(ran));
                }),
            )
            .unwrap();
        scene.add_game_object(&mut engine, hero).unwrap();

        scene.update(&mut engine, 0.016);

        assert_eq!(reentered.get(), Some(false));
        assert!(scene.invoke(&mut engine, id, true, |_, _| {}));
    }
}
