//=========================================================================
// Tessera Engine - Library Root
//
// This crate defines the public API surface of the Tessera Engine: a
// scene / game-object / component framework with a stack-based scene
// manager and animated scene transitions.
//
// Responsibilities:
// - Expose the scene graph and its services (`core`)
// - Expose the host adapter (`EngineBuilder`, `Game`, `GameDriver`)
// - Keep the winit integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use tessera_engine::prelude::*;
//
// struct MyGame;
//
// impl Game for MyGame {
//     fn init_game(&mut self, engine: &mut EngineContext) -> SceneResult<Scene> {
//         Scene::empty(engine)
//     }
// }
//
// fn main() -> Result<(), PlatformError> {
//     env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
//     EngineBuilder::new().build(MyGame).run_windowed("My Game")
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the scene graph, components, cameras, input and the
// collaborator traits. `prelude` re-exports the common subset.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window host and is kept private.
// `engine` adapts host callbacks to the scene manager.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{EngineBuilder, Game, GameDriver};
pub use platform::PlatformError;
