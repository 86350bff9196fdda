//=========================================================================
// Tessera Engine
//
// Entry point that turns host callbacks into scene manager calls.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(game)──>  GameDriver  <──callbacks──  host
//         │                               │                       (winit
//         ├─ with_settings()              ├─ on_create            window or
//         ├─ with_renderer()              ├─ on_render            a test)
//         └─ with_assets/audio()          └─ on_destroy ...
// ```
//
// The driver owns the `EngineContext` and the `SceneManager`. It never
// spawns threads: every callback runs to completion on the caller's
// thread.
//
//=========================================================================

//=== Standard Library ====================================================

use std::time::Instant;

//=== External Dependencies ===============================================

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::config::EngineSettings;
use crate::core::error::SceneResult;
use crate::core::globals::EngineContext;
use crate::core::input::InputEvent;
use crate::core::math::TransformComposition;
use crate::core::render::{RecordingBackend, RenderBackend};
use crate::core::scene::{Scene, SceneManager, SceneTransition};
use crate::core::services::{AssetLoader, AudioPlayer, MemoryAssets, SilentAudio};
use crate::platform::{self, PlatformError};

//=== Game ================================================================

/// Application entry point supplied by the game.
pub trait Game {
    /// Builds the first scene. Called once from [`GameDriver::on_create`].
    fn init_game(&mut self, engine: &mut EngineContext) -> SceneResult<Scene>;

    /// Transition used to show the first scene. `None` switches instantly.
    fn splash_transition(&self) -> Option<SceneTransition> {
        None
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing a [`GameDriver`].
///
/// Services that are not supplied fall back to the headless ones: a
/// [`RecordingBackend`] sized to the viewport, [`MemoryAssets`] and
/// [`SilentAudio`].
///
/// # Examples
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// struct Splash;
///
/// impl Game for Splash {
///     fn init_game(&mut self, engine: &mut EngineContext) -> SceneResult<Scene> {
///         Scene::empty(engine)
///     }
/// }
///
/// let mut driver = EngineBuilder::new()
///     .with_viewport(800.0, 600.0)
///     .with_max_delta_time(0.05)
///     .build(Splash);
///
/// driver.on_create();
/// driver.on_render_with_delta(0.016);
/// assert!(driver.scenes().current().is_some());
/// ```
pub struct EngineBuilder {
    settings: EngineSettings,
    renderer: Option<Box<dyn RenderBackend>>,
    assets: Option<Box<dyn AssetLoader>>,
    audio: Option<Box<dyn AudioPlayer>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: EngineSettings::default(),
            renderer: None,
            assets: None,
            audio: None,
        }
    }

    /// Replaces every setting at once.
    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the reference viewport size in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.settings = self.settings.with_viewport(width, height);
        self
    }

    /// # Panics
    ///
    /// Panics if `ppu <= 0.0`.
    pub fn with_pixels_per_unit(mut self, ppu: f32) -> Self {
        self.settings = self.settings.with_pixels_per_unit(ppu);
        self
    }

    /// Caps the delta passed to update phases.
    ///
    /// Default: 1/60 s
    ///
    /// # Panics
    ///
    /// Panics if `max <= 0.0`.
    pub fn with_max_delta_time(mut self, max: f32) -> Self {
        self.settings = self.settings.with_max_delta_time(max);
        self
    }

    pub fn with_log_fps(mut self, enabled: bool) -> Self {
        self.settings = self.settings.with_log_fps(enabled);
        self
    }

    pub fn with_transform_composition(mut self, mode: TransformComposition) -> Self {
        self.settings = self.settings.with_transform_composition(mode);
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn RenderBackend>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_assets(mut self, assets: Box<dyn AssetLoader>) -> Self {
        self.assets = Some(assets);
        self
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioPlayer>) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Builds the driver for `game`. Nothing runs until
    /// [`GameDriver::on_create`].
    pub fn build<G: Game>(self, game: G) -> GameDriver<G> {
        info!(
            "Building engine (viewport: {}x{}, ppu: {}, max delta: {})",
            self.settings.viewport_width,
            self.settings.viewport_height,
            self.settings.pixels_per_unit,
            self.settings.max_delta_time
        );

        let renderer = self.renderer.unwrap_or_else(|| {
            Box::new(RecordingBackend::new(
                self.settings.viewport_width as u32,
                self.settings.viewport_height as u32,
            ))
        });
        let assets = self.assets.unwrap_or_else(|| Box::new(MemoryAssets::new()));
        let audio = self.audio.unwrap_or_else(|| Box::new(SilentAudio::new()));

        GameDriver {
            game,
            engine: EngineContext::new(self.settings, renderer, assets, audio),
            scenes: SceneManager::new(),
            created: false,
            last_frame: None,
            fps: FpsCounter::default(),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== FpsCounter ==========================================================

#[derive(Debug, Default)]
struct FpsCounter {
    frames: u32,
    elapsed: f32,
}

impl FpsCounter {
    /// Counts a frame; returns the frame count once a full second passed.
    fn tick(&mut self, delta: f32) -> Option<u32> {
        self.frames += 1;
        self.elapsed += delta;
        if self.elapsed < 1.0 {
            return None;
        }
        let frames = self.frames;
        self.frames = 0;
        self.elapsed -= 1.0;
        Some(frames)
    }
}

//=== GameDriver ==========================================================

/// Adapts host lifecycle callbacks to the scene manager.
///
/// # Lifecycle
///
/// 1. `on_create`: asks the game for its first scene and shows it
/// 2. `on_resize` / `on_pause` / `on_resume`: forwarded to the scenes
/// 3. `on_render`: one update with the clamped frame delta, then one render
/// 4. `on_destroy`: destroys every scene the manager still owns
pub struct GameDriver<G: Game> {
    game: G,
    engine: EngineContext,
    scenes: SceneManager,
    created: bool,
    last_frame: Option<Instant>,
    fps: FpsCounter,
}

impl<G: Game> GameDriver<G> {
    //--- Host Callbacks ---------------------------------------------------

    /// Builds the game's first scene and switches to it with the splash
    /// transition. Failures are logged and leave the driver without a scene.
    pub fn on_create(&mut self) {
        if self.created {
            warn!("on_create called twice, ignoring");
            return;
        }
        self.created = true;

        match self.game.init_game(&mut self.engine) {
            Ok(scene) => {
                info!("Game created, first scene {:?}", scene.id());
                let transition = self.game.splash_transition();
                self.scenes
                    .set_current_scene(&mut self.engine, scene, transition);
            }
            Err(e) => error!("Game initialization failed: {}", e),
        }
    }

    pub fn on_resume(&mut self) {
        debug!("Host resumed");
        self.engine.audio.resume_all();
        self.scenes.resume(&mut self.engine);
        self.last_frame = None;
    }

    pub fn on_pause(&mut self) {
        debug!("Host paused");
        self.scenes.pause(&mut self.engine);
        self.engine.audio.pause_all();
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        debug!("Host resized to {}x{}", width, height);
        self.engine.renderer.resize(width, height);
        self.scenes.resize(&mut self.engine, width, height);
    }

    /// Runs one frame with the wall-clock time since the previous one.
    pub fn on_render(&mut self) {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        self.on_render_with_delta(delta);
    }

    /// Runs one frame with an explicit delta, clamped to
    /// `[0, max_delta_time]` before it reaches the scenes. A non-finite
    /// delta counts as zero.
    pub fn on_render_with_delta(&mut self, delta: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        let clamped = delta.min(self.engine.settings.max_delta_time);
        self.scenes.update(&mut self.engine, clamped);
        self.scenes.render(&mut self.engine);

        if self.engine.settings.log_fps {
            if let Some(frames) = self.fps.tick(delta) {
                info!("FPS: {}", frames);
            }
        }
    }

    pub fn on_destroy(&mut self) {
        info!("Destroying game");
        self.scenes.dispose(&mut self.engine);
    }

    /// Queues a platform input event on the current scene.
    pub fn push_input(&mut self, event: InputEvent) {
        match self.scenes.current_mut() {
            Some(scene) => scene.input_mut().push_event(event),
            None => debug!("No current scene, dropping {:?}", event),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn engine(&self) -> &EngineContext {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineContext {
        &mut self.engine
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }
}

impl<G: Game + 'static> GameDriver<G> {
    /// Opens a window and drives the game from its event loop until the
    /// window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run_windowed(self, title: &str) -> Result<(), PlatformError> {
        platform::run(self, title)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SceneError;
    use crate::core::input::KeyCode;
    use crate::core::input::Modifiers;
    use crate::core::scene::test_support::{entries, new_log, Log, Probe};

    struct ProbeGame {
        log: Log,
        splash: Option<SceneTransition>,
        fail: bool,
    }

    impl ProbeGame {
        fn new(log: &Log) -> Self {
            Self {
                log: log.clone(),
                splash: None,
                fail: false,
            }
        }
    }

    impl Game for ProbeGame {
        fn init_game(&mut self, engine: &mut EngineContext) -> SceneResult<Scene> {
            if self.fail {
                return Err(SceneError::UnknownLayer("missing".into()));
            }
            let log = self.log.clone();
            Scene::with_setup(engine, move |scene: &mut Scene, engine: &mut EngineContext| {
                let object = scene.spawn("Probe");
                scene.add_component(engine, object, Probe::new("p", &log))?;
                scene.add_game_object(engine, object)
            })
        }

        fn splash_transition(&self) -> Option<SceneTransition> {
            self.splash
        }
    }

    //--- Builder Tests ----------------------------------------------------

    #[test]
    fn builder_forwards_settings() {
        let driver = EngineBuilder::new()
            .with_viewport(640.0, 480.0)
            .with_pixels_per_unit(32.0)
            .with_max_delta_time(0.1)
            .build(ProbeGame::new(&new_log()));

        let settings = &driver.engine().settings;
        assert_eq!(settings.viewport_width, 640.0);
        assert_eq!(settings.pixels_per_unit, 32.0);
        assert_eq!(settings.max_delta_time, 0.1);
        assert_eq!(driver.engine().renderer.screen_size(), (640, 480));
    }

    #[test]
    #[should_panic(expected = "Max delta time must be positive")]
    fn builder_rejects_zero_delta() {
        let _ = EngineBuilder::new().with_max_delta_time(0.0);
    }

    //--- Driver Tests -----------------------------------------------------

    #[test]
    fn create_shows_first_scene() {
        let log = new_log();
        let mut driver = EngineBuilder::new().build(ProbeGame::new(&log));

        driver.on_create();

        let scene = driver.scenes().current().unwrap();
        assert!(scene.is_active());
        assert!(entries(&log).contains(&"p.start".to_string()));
        assert!(entries(&log).contains(&"p.resume".to_string()));
    }

    #[test]
    fn create_twice_is_ignored() {
        let log = new_log();
        let mut driver = EngineBuilder::new().build(ProbeGame::new(&log));
        driver.on_create();
        let first = driver.scenes().current().map(Scene::id);

        driver.on_create();

        assert_eq!(driver.scenes().current().map(Scene::id), first);
    }

    #[test]
    fn failed_init_leaves_no_scene() {
        let log = new_log();
        let mut game = ProbeGame::new(&log);
        game.fail = true;
        let mut driver = EngineBuilder::new().build(game);

        driver.on_create();
        driver.on_render_with_delta(0.016);

        assert!(driver.scenes().current().is_none());
    }

    #[test]
    fn render_clamps_delta() {
        let log = new_log();
        let mut driver = EngineBuilder::new()
            .with_max_delta_time(0.05)
            .build(ProbeGame::new(&log));
        driver.on_create();

        driver.on_render_with_delta(2.0);
        assert_eq!(driver.engine().delta_time(), 0.05);

        driver.on_render_with_delta(-1.0);
        assert_eq!(driver.engine().delta_time(), 0.0);

        driver.on_render_with_delta(f32::NAN);
        assert_eq!(driver.engine().delta_time(), 0.0);
    }

    #[test]
    fn splash_transition_runs_before_scene_is_current() {
        let log = new_log();
        let mut game = ProbeGame::new(&log);
        game.splash = Some(SceneTransition::fade(1.0));
        let mut driver = EngineBuilder::new().with_max_delta_time(0.5).build(game);

        driver.on_create();

        // The first scene has nothing to transition from.
        assert!(driver.scenes().current().is_some());
        assert!(!driver.scenes().is_transitioning());
    }

    #[test]
    fn pause_and_resume_reach_audio_and_scene() {
        let log = new_log();
        let mut driver = EngineBuilder::new().build(ProbeGame::new(&log));
        driver.on_create();
        crate::core::scene::test_support::clear(&log);

        driver.on_pause();
        driver.on_resume();

        assert_eq!(entries(&log), vec!["p.pause", "p.resume"]);
    }

    #[test]
    fn resize_reaches_renderer_and_scene() {
        let log = new_log();
        let mut driver = EngineBuilder::new().build(ProbeGame::new(&log));
        driver.on_create();

        driver.on_resize(1024, 768);

        assert_eq!(driver.engine().renderer.screen_size(), (1024, 768));
        assert!(entries(&log).contains(&"p.resize".to_string()));
        assert_eq!(driver.scenes().current().unwrap().size(), (1024, 768));
    }

    #[test]
    fn input_reaches_current_scene() {
        let log = new_log();
        let mut driver = EngineBuilder::new().build(ProbeGame::new(&log));
        driver.on_create();

        driver.push_input(InputEvent::KeyDown {
            key: KeyCode::Space,
            modifiers: Modifiers::NONE,
        });
        driver.on_render_with_delta(0.016);

        let input = driver.scenes().current().unwrap().input();
        assert!(input.is_key_pressed(KeyCode::Space));
    }

    #[test]
    fn destroy_releases_scene_resources() {
        let log = new_log();
        let mut driver = EngineBuilder::new().build(ProbeGame::new(&log));
        driver.on_create();
        driver.on_render_with_delta(0.016);

        driver.on_destroy();

        assert!(entries(&log).contains(&"p.destroy".to_string()));
        let recording = driver.engine().renderer.as_recording().unwrap();
        assert_eq!(recording.live_batches(), 0);
    }

    #[test]
    fn fps_counter_reports_once_a_second() {
        let mut counter = FpsCounter::default();
        let reports: Vec<_> = (0..90).filter_map(|_| counter.tick(1.0 / 60.0)).collect();
        assert_eq!(reports.len(), 1);
        assert!(reports[0] >= 60);
    }
}
