//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the current scene, a stack of suspended scenes and the transition
// running between two scenes.
//
// States:
// ```text
//   Idle(current) ──switch──> Transitioning(outgoing, incoming, elapsed)
//        ▲                               │ elapsed >= duration
//        └───────────────────────────────┘ Idle(incoming)
// ```
//
// Switching (immediate or at the end of a transition):
//   outgoing.pause → transitioned_from(next)
//     → stackable? push on stack : destroy
//   incoming.resume → transitioned_to(previous) → current = incoming
//
// Reverting pops the stack and destroys the scene being left.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneRequest, SceneTransition};
use crate::core::globals::EngineContext;
use crate::core::math::Color;
use crate::core::render::FrameHandle;

//=== Internal Types ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchKind {
    /// The outgoing scene is stacked if stackable.
    Forward,
    /// The outgoing scene is always destroyed.
    Revert,
}

struct ActiveTransition {
    incoming: Scene,
    transition: SceneTransition,
    kind: SwitchKind,
    elapsed: f32,
    outgoing_frame: FrameHandle,
    incoming_frame: FrameHandle,
}

impl ActiveTransition {
    fn progress(&self) -> f32 {
        (self.elapsed / self.transition.duration()).clamp(0.0, 1.0)
    }

    fn release_frames(&self, engine: &mut EngineContext) {
        engine.renderer.release_frame(self.outgoing_frame);
        engine.renderer.release_frame(self.incoming_frame);
    }
}

//=== SceneManager ========================================================

/// Stack-based scene switcher.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let mut engine = EngineContext::headless(EngineSettings::default());
/// let mut manager = SceneManager::new();
///
/// let menu = Scene::empty(&mut engine).unwrap();
/// let menu_id = menu.id();
/// manager.set_current_scene(&mut engine, menu, None);
///
/// let level = Scene::empty(&mut engine).unwrap();
/// manager.set_current_scene(&mut engine, level, None);
/// assert_eq!(manager.stack_len(), 1);
///
/// assert!(manager.revert_to_previous_scene(&mut engine, None));
/// assert_eq!(manager.current().map(Scene::id), Some(menu_id));
/// ```
#[derive(Default)]
pub struct SceneManager {
    current: Option<Scene>,
    stack: Vec<Scene>,
    transition: Option<ActiveTransition>,
    deferred: VecDeque<SceneRequest>,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Accessors --------------------------------------------------------

    pub fn current(&self) -> Option<&Scene> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Scene> {
        self.current.as_mut()
    }

    /// Number of suspended scenes available to revert to.
    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Linear progress of the running transition.
    pub fn transition_progress(&self) -> Option<f32> {
        self.transition.as_ref().map(ActiveTransition::progress)
    }

    //--- Switching --------------------------------------------------------

    /// Makes `next` the current scene.
    ///
    /// Without a transition (or with a zero-length one) the switch happens
    /// immediately. Otherwise both scenes are captured once and the switch
    /// completes when the transition's duration has elapsed. A switch
    /// requested while a transition runs waits for it to finish.
    pub fn set_current_scene(
        &mut self,
        engine: &mut EngineContext,
        next: Scene,
        transition: Option<SceneTransition>,
    ) {
        if self.transition.is_some() {
            warn!("Scene {:?} requested during a transition, deferring", next.id());
            self.deferred.push_back(SceneRequest::Switch {
                scene: Box::new(next),
                transition,
            });
            return;
        }
        self.begin_switch(engine, next, transition, SwitchKind::Forward);
    }

    /// Returns to the most recently suspended scene, destroying the
    /// current one.
    ///
    /// The previous scene is resumed as it was, not rebuilt. Returns
    /// `false` if the stack is empty. While a transition runs the revert is
    /// queued and `true` is returned.
    pub fn revert_to_previous_scene(
        &mut self,
        engine: &mut EngineContext,
        transition: Option<SceneTransition>,
    ) -> bool {
        if self.transition.is_some() {
            warn!("Scene revert requested during a transition, deferring");
            self.deferred.push_back(SceneRequest::Revert { transition });
            return true;
        }
        let Some(previous) = self.stack.pop() else {
            warn!("No suspended scene to revert to");
            return false;
        };
        debug!("Reverting to scene {:?}", previous.id());
        self.begin_switch(engine, previous, transition, SwitchKind::Revert);
        true
    }

    //--- Host Lifecycle ---------------------------------------------------

    /// Advances the transition or updates the current scene, then applies
    /// queued scene requests.
    pub fn update(&mut self, engine: &mut EngineContext, delta: f32) {
        // A non-finite elapsed time would never reach the duration.
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        engine.set_delta_time(delta);

        match self.transition.as_mut() {
            Some(active) => {
                active.elapsed += delta;
                if active.elapsed >= active.transition.duration() {
                    self.complete_transition(engine);
                }
            }
            None => {
                if let Some(scene) = self.current.as_mut() {
                    scene.update(engine, delta);
                }
            }
        }

        self.process_requests(engine);
    }

    /// Renders the current scene, or the transition between two scenes.
    pub fn render(&mut self, engine: &mut EngineContext) {
        if let Some(active) = &self.transition {
            let screen = engine.renderer.screen_size();
            engine.renderer.clear(Color::BLACK);
            active.transition.draw(
                engine.renderer.as_mut(),
                active.outgoing_frame,
                active.incoming_frame,
                active.progress(),
                screen,
            );
        } else if let Some(scene) = self.current.as_mut() {
            scene.render(engine);
        }
    }

    pub fn resize(&mut self, engine: &mut EngineContext, width: u32, height: u32) {
        if let Some(scene) = self.current.as_mut() {
            scene.resize(engine, width, height);
        }
        if let Some(active) = self.transition.as_mut() {
            active.incoming.resize(engine, width, height);
        }
    }

    pub fn pause(&mut self, engine: &mut EngineContext) {
        if let Some(scene) = self.current.as_mut() {
            scene.pause(engine);
        }
    }

    pub fn resume(&mut self, engine: &mut EngineContext) {
        if self.transition.is_some() {
            return;
        }
        if let Some(scene) = self.current.as_mut() {
            scene.resume(engine);
        }
    }

    /// Destroys every scene the manager holds or has queued.
    pub fn dispose(&mut self, engine: &mut EngineContext) {
        if let Some(mut active) = self.transition.take() {
            active.release_frames(engine);
            active.incoming.destroy(engine);
        }
        if let Some(mut scene) = self.current.take() {
            scene.destroy(engine);
        }
        while let Some(mut scene) = self.stack.pop() {
            scene.destroy(engine);
        }

        let queued = engine.scene_requests.take();
        for request in self.deferred.drain(..).chain(queued) {
            if let SceneRequest::Switch { mut scene, .. } = request {
                scene.destroy(engine);
            }
        }
        debug!("Scene manager disposed");
    }

    //--- Internal Helpers -------------------------------------------------

    fn begin_switch(
        &mut self,
        engine: &mut EngineContext,
        mut next: Scene,
        transition: Option<SceneTransition>,
        kind: SwitchKind,
    ) {
        let (width, height) = engine.renderer.screen_size();
        next.resize(engine, width, height);

        let Some(mut outgoing) = self.current.take() else {
            debug!("Starting with scene {:?}", next.id());
            self.activate(engine, next, None);
            return;
        };
        outgoing.pause_for_transition(engine);

        match transition.filter(|t| t.duration() > 0.0) {
            None => self.finish_switch(engine, outgoing, next, kind),
            Some(transition) => {
                let outgoing_frame = capture(engine, &mut outgoing);
                let incoming_frame = capture(engine, &mut next);
                debug!(
                    "Transition {:?} from {:?} to {:?} started",
                    transition.kind(),
                    outgoing.id(),
                    next.id()
                );
                self.current = Some(outgoing);
                self.transition = Some(ActiveTransition {
                    incoming: next,
                    transition,
                    kind,
                    elapsed: 0.0,
                    outgoing_frame,
                    incoming_frame,
                });
            }
        }
    }

    fn complete_transition(&mut self, engine: &mut EngineContext) {
        let Some(active) = self.transition.take() else {
            return;
        };
        active.release_frames(engine);
        debug!("Transition to {:?} finished", active.incoming.id());

        match self.current.take() {
            Some(outgoing) => self.finish_switch(engine, outgoing, active.incoming, active.kind),
            None => self.activate(engine, active.incoming, None),
        }
    }

    fn finish_switch(
        &mut self,
        engine: &mut EngineContext,
        mut outgoing: Scene,
        incoming: Scene,
        kind: SwitchKind,
    ) {
        outgoing.pause(engine);
        outgoing.transitioned_from(engine, incoming.id());

        let previous = outgoing.id();
        if kind == SwitchKind::Forward && outgoing.is_stackable() {
            debug!("Suspending scene {:?} on the stack", previous);
            self.stack.push(outgoing);
        } else {
            outgoing.destroy(engine);
        }

        self.activate(engine, incoming, Some(previous));
    }

    fn activate(
        &mut self,
        engine: &mut EngineContext,
        mut scene: Scene,
        previous: Option<super::SceneId>,
    ) {
        scene.resume(engine);
        scene.transitioned_to(engine, previous);
        self.current = Some(scene);
    }

    /// Applies deferred requests, then those queued through the engine
    /// context, stopping as soon as one of them starts a transition.
    fn process_requests(&mut self, engine: &mut EngineContext) {
        self.deferred.extend(engine.scene_requests.take());

        while self.transition.is_none() {
            let Some(request) = self.deferred.pop_front() else {
                break;
            };
            match request {
                SceneRequest::Switch { scene, transition } => {
                    self.set_current_scene(engine, *scene, transition);
                }
                SceneRequest::Revert { transition } => {
                    self.revert_to_previous_scene(engine, transition);
                }
            }
        }
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneManager")
            .field("current", &self.current.as_ref().map(Scene::id))
            .field("stack", &self.stack.iter().map(Scene::id).collect::<Vec<_>>())
            .field("transitioning", &self.transition.is_some())
            .field("deferred", &self.deferred.len())
            .finish()
    }
}

/// Renders `scene` once into an offscreen frame.
fn capture(engine: &mut EngineContext, scene: &mut Scene) -> FrameHandle {
    let frame = engine.renderer.begin_capture();
    scene.render(engine);
    engine.renderer.end_capture(frame);
    frame
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineSettings;
    use crate::core::render::DrawCommand;
    use crate::core::scene::test_support::{clear, entries, new_log, Log, Probe};
    use crate::core::scene::{SceneId, SceneScript};

    /// Scene script that records its transition hooks and hosts one probe.
    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl SceneScript for Recorder {
        fn setup(&mut self, scene: &mut Scene, engine: &mut EngineContext) -> crate::core::error::SceneResult<()> {
            let object = scene.spawn(self.name);
            scene.add_component(engine, object, Probe::new(self.name, &self.log))?;
            scene.add_game_object(engine, object)
        }

        fn pause_for_transition(&mut self, _scene: &mut Scene, _engine: &mut EngineContext) {
            self.log
                .borrow_mut()
                .push(format!("{}.pause_for_transition", self.name));
        }

        fn transitioned_from_this_scene(
            &mut self,
            _scene: &mut Scene,
            _engine: &mut EngineContext,
            _next: SceneId,
        ) {
            self.log.borrow_mut().push(format!("{}.transitioned_from", self.name));
        }

        fn transitioned_to_this_scene(
            &mut self,
            _scene: &mut Scene,
            _engine: &mut EngineContext,
            previous: Option<SceneId>,
        ) {
            let from = if previous.is_some() { "scene" } else { "nothing" };
            self.log
                .borrow_mut()
                .push(format!("{}.transitioned_to from {}", self.name, from));
        }
    }

    fn scene(engine: &mut EngineContext, name: &'static str, log: &Log) -> Scene {
        Scene::new(
            engine,
            Recorder {
                name,
                log: log.clone(),
            },
        )
        .unwrap()
    }

    fn setup() -> (EngineContext, SceneManager, Log) {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
        let engine = EngineContext::headless(EngineSettings::default());
        (engine, SceneManager::new(), new_log())
    }

    fn frame_draws(engine: &EngineContext) -> Vec<(u64, f32)> {
        engine
            .renderer
            .as_recording()
            .unwrap()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Frame(draw) => Some((draw.frame.0, draw.alpha)),
                _ => None,
            })
            .collect()
    }

    fn captured_frames(engine: &EngineContext) -> Vec<u64> {
        engine
            .renderer
            .as_recording()
            .unwrap()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::BeginCapture(frame) => Some(frame.0),
                _ => None,
            })
            .collect()
    }

    //--- Immediate Switching ----------------------------------------------

    #[test]
    fn first_scene_activates_immediately() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        clear(&log);

        manager.set_current_scene(&mut engine, menu, Some(SceneTransition::fade(1.0)));

        assert!(!manager.is_transitioning());
        assert!(manager.current().unwrap().is_active());
        assert_eq!(
            entries(&log),
            vec!["m.resize", "m.resume", "m.transitioned_to from nothing"]
        );
    }

    #[test]
    fn switch_fires_script_hooks_in_order() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        manager.set_current_scene(&mut engine, menu, None);
        let level = scene(&mut engine, "l", &log);
        clear(&log);

        manager.set_current_scene(&mut engine, level, None);

        assert_eq!(
            entries(&log),
            vec![
                "l.resize",
                "m.pause_for_transition",
                "m.pause",
                "m.transitioned_from",
                "l.resume",
                "l.transitioned_to from scene",
            ]
        );
        assert_eq!(manager.stack_len(), 1);
    }

    #[test]
    fn revert_resumes_suspended_scene() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        let menu_id = menu.id();
        manager.set_current_scene(&mut engine, menu, None);
        let level = scene(&mut engine, "l", &log);
        manager.set_current_scene(&mut engine, level, None);
        clear(&log);

        assert!(manager.revert_to_previous_scene(&mut engine, None));

        let current = manager.current().unwrap();
        assert_eq!(current.id(), menu_id);
        assert!(current.is_active());
        assert_eq!(manager.stack_len(), 0);
        let log = entries(&log);
        assert!(log.contains(&"m.resume".to_string()));
        assert!(log.contains(&"l.destroy".to_string()));
        assert!(!log.contains(&"m.start".to_string()));
    }

    #[test]
    fn revert_with_empty_stack_fails() {
        let (mut engine, mut manager, log) = setup();
        assert!(!manager.revert_to_previous_scene(&mut engine, None));

        let menu = scene(&mut engine, "m", &log);
        manager.set_current_scene(&mut engine, menu, None);
        assert!(!manager.revert_to_previous_scene(&mut engine, None));
        assert!(manager.current().is_some());
    }

    #[test]
    fn non_stackable_scene_is_destroyed() {
        let (mut engine, mut manager, log) = setup();
        let mut menu = scene(&mut engine, "m", &log);
        menu.set_stackable(false);
        manager.set_current_scene(&mut engine, menu, None);
        let level = scene(&mut engine, "l", &log);

        manager.set_current_scene(&mut engine, level, None);

        assert_eq!(manager.stack_len(), 0);
        assert!(entries(&log).contains(&"m.destroy".to_string()));
        assert!(!manager.revert_to_previous_scene(&mut engine, None));
    }

    #[test]
    fn zero_duration_transition_switches_immediately() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        manager.set_current_scene(&mut engine, menu, None);
        let level = scene(&mut engine, "l", &log);
        let level_id = level.id();

        manager.set_current_scene(&mut engine, level, Some(SceneTransition::fade(0.0)));

        assert!(!manager.is_transitioning());
        assert_eq!(manager.current().map(Scene::id), Some(level_id));
        assert!(captured_frames(&engine).is_empty());
    }

    //--- Transitions ------------------------------------------------------

    #[test]
    fn transition_blends_then_switches_at_duration() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        let menu_id = menu.id();
        manager.set_current_scene(&mut engine, menu, None);
        let level = scene(&mut engine, "l", &log);
        let level_id = level.id();

        manager.set_current_scene(&mut engine, level, Some(SceneTransition::fade(1.0)));
        assert!(manager.is_transitioning());
        assert_eq!(manager.transition_progress(), Some(0.0));
        assert_eq!(manager.current().map(Scene::id), Some(menu_id));

        let frames = captured_frames(&engine);
        assert_eq!(frames.len(), 2);
        manager.render(&mut engine);
        assert_eq!(frame_draws(&engine), vec![(frames[0], 1.0), (frames[1], 0.0)]);

        clear(&log);
        manager.update(&mut engine, 0.5);
        assert!(manager.is_transitioning());
        assert_eq!(manager.transition_progress(), Some(0.5));
        assert!(entries(&log).is_empty());

        manager.update(&mut engine, 0.5);
        assert!(!manager.is_transitioning());
        assert_eq!(manager.current().map(Scene::id), Some(level_id));
        assert_eq!(manager.stack_len(), 1);
        assert_eq!(engine.renderer.as_recording().unwrap().live_frames(), 0);
    }

    #[test]
    fn invalid_delta_does_not_stall_transition() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        manager.set_current_scene(&mut engine, menu, None);
        let level = scene(&mut engine, "l", &log);
        let level_id = level.id();
        manager.set_current_scene(&mut engine, level, Some(SceneTransition::fade(1.0)));

        manager.update(&mut engine, f32::NAN);
        manager.update(&mut engine, f32::INFINITY);
        manager.update(&mut engine, -3.0);
        assert_eq!(manager.transition_progress(), Some(0.0));
        assert_eq!(engine.delta_time(), 0.0);

        for _ in 0..4 {
            manager.update(&mut engine, 0.25);
        }
        assert!(!manager.is_transitioning());
        assert_eq!(manager.current().map(Scene::id), Some(level_id));
    }

    #[test]
    fn requests_during_transition_are_deferred() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        manager.set_current_scene(&mut engine, menu, None);
        let level = scene(&mut engine, "l", &log);
        manager.set_current_scene(&mut engine, level, Some(SceneTransition::fade(1.0)));

        let credits = scene(&mut engine, "c", &log);
        let credits_id = credits.id();
        manager.set_current_scene(&mut engine, credits, None);
        assert!(manager.revert_to_previous_scene(&mut engine, None));
        assert!(manager.is_transitioning());

        manager.update(&mut engine, 1.0);

        // level arrives, credits replaces it, then the revert returns to level.
        assert!(!manager.is_transitioning());
        assert_ne!(manager.current().map(Scene::id), Some(credits_id));
        assert!(entries(&log).contains(&"c.destroy".to_string()));
        assert_eq!(manager.stack_len(), 1);
    }

    #[test]
    fn engine_requests_apply_after_update() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        let menu_id = menu.id();
        manager.set_current_scene(&mut engine, menu, None);

        let level = scene(&mut engine, "l", &log);
        let level_id = level.id();
        engine.request_scene(level, None);
        manager.update(&mut engine, 0.016);
        assert_eq!(manager.current().map(Scene::id), Some(level_id));

        engine.request_revert(None);
        manager.update(&mut engine, 0.016);
        assert_eq!(manager.current().map(Scene::id), Some(menu_id));
        assert!(engine.scene_requests.is_empty());
    }

    #[test]
    fn resume_waits_for_transition() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        manager.set_current_scene(&mut engine, menu, None);
        let level = scene(&mut engine, "l", &log);
        manager.set_current_scene(&mut engine, level, Some(SceneTransition::fade(1.0)));
        clear(&log);

        manager.resume(&mut engine);

        assert!(entries(&log).is_empty());
    }

    //--- Teardown ---------------------------------------------------------

    #[test]
    fn dispose_destroys_every_scene() {
        let (mut engine, mut manager, log) = setup();
        let menu = scene(&mut engine, "m", &log);
        manager.set_current_scene(&mut engine, menu, None);
        let level = scene(&mut engine, "l", &log);
        manager.set_current_scene(&mut engine, level, None);
        let boss = scene(&mut engine, "b", &log);
        manager.set_current_scene(&mut engine, boss, Some(SceneTransition::fade(1.0)));
        let queued = scene(&mut engine, "q", &log);
        engine.request_scene(queued, None);
        manager.render(&mut engine);

        manager.dispose(&mut engine);

        let log = entries(&log);
        for name in ["m", "l", "b", "q"] {
            assert!(log.contains(&format!("{}.destroy", name)), "{} not destroyed", name);
        }
        let recording = engine.renderer.as_recording().unwrap();
        assert_eq!(recording.live_batches(), 0);
        assert_eq!(recording.live_frames(), 0);
        assert!(manager.current().is_none());
    }
}
