//=========================================================================
// Core
//
// Everything that runs without a window: the scene graph, its component
// lifecycle, cameras, input handling and the narrow interfaces to the
// rendering, asset, audio and UI collaborators.
//
// Layering (lower modules never depend on higher ones, except through
// ids):
// ```text
//   math, render, config, error, services, ui
//     → camera, input
//       → object (World, GameObject, Component)
//         → components (built-in components)
//           → scene (Scene, dispatch, SceneManager, transitions)
//             → globals (EngineContext)
// ```
//
// All dispatch is single-threaded and synchronous: the host drives the
// scene manager once per frame, and every lifecycle call completes before
// the next one starts.
//
//=========================================================================

pub mod camera;
pub mod components;
pub mod config;
pub mod error;
pub mod globals;
pub mod input;
pub mod math;
pub mod object;
pub mod render;
pub mod scene;
pub mod services;
pub mod ui;
