//=========================================================================
// Platform Subsystem
//
// Runs a `GameDriver` inside a winit window.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────────────┐
//  │  Winit Event Loop                            │
//  │   ↓                                          │
//  │  WindowInput ── InputEvent ──> push_input    │
//  │   └─ Tracks modifiers                        │
//  │   ↓                                          │
//  │  Resized / Focused ──> on_resize / on_pause  │
//  │  RedrawRequested   ──> on_render             │
//  │  CloseRequested    ──> on_destroy, exit      │
//  └──────────────────────────────────────────────┘
// ```
//
// Input is queued on the current scene's input manager and applied at the
// start of the next update, so `RedrawRequested` stays the frame boundary.
//
// Key Design Decisions:
// - **Sticky modifiers**: Modifier state persists across events until
//   explicitly changed (matches platform behavior)
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `GameDriver::run_windowed()`
//
//=========================================================================

//=== Submodules ==========================================================

mod window_input;

//=== External Crates =====================================================

use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::engine::{Game, GameDriver};
use window_input::WindowInput;

//=== PlatformError =======================================================

/// Window and event loop failures.
///
/// These are fatal: without an event loop the game cannot run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create the event loop (rare, indicates OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

//=== Entry Point =========================================================

/// Opens a window titled `title` and drives `driver` until it closes.
pub(crate) fn run<G: Game + 'static>(driver: GameDriver<G>, title: &str) -> Result<(), PlatformError> {
    debug!(target: "platform", "Starting Winit event loop");

    let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
    let mut host = WindowHost::new(driver, title);

    event_loop
        .run_app(&mut host)
        .map_err(PlatformError::EventLoopExecution)
}

//=== WindowHost ==========================================================

/// Owns the window and forwards its events to the driver.
///
/// The window is created lazily in `resumed()` (mobile compatibility);
/// the driver's `on_create` runs once, right after the first window.
struct WindowHost<G: Game> {
    driver: GameDriver<G>,
    window: Option<Window>,
    title: String,
    input: WindowInput,
    created: bool,
}

impl<G: Game> WindowHost<G> {
    fn new(driver: GameDriver<G>, title: &str) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            driver,
            window: None,
            title: title.to_owned(),
            input: WindowInput::new(),
            created: false,
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.created {
            self.driver.on_destroy();
            self.created = false;
        }
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl<G: Game> ApplicationHandler for WindowHost<G> {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            self.driver.on_resume();
            return;
        }

        let settings = &self.driver.engine().settings;
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(settings.viewport_width, settings.viewport_height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);

                if !self.created {
                    self.created = true;
                    self.driver.on_create();
                }
                self.driver.on_resize(size.width, size.height);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.driver.on_pause();
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(size) => {
                self.driver.on_resize(size.width, size.height);
            }

            WindowEvent::Focused(focused) => {
                if focused {
                    self.driver.on_resume();
                } else {
                    self.driver.on_pause();
                }
            }

            WindowEvent::RedrawRequested => {
                self.driver.on_render();

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            other => {
                if let Some(input) = self.input.translate(&other) {
                    self.driver.push_input(input);
                }
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.created {
            self.driver.on_destroy();
            self.created = false;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn platform_error_display() {
        let err = PlatformError::EventLoopCreation(winit::error::EventLoopError::ExitFailure(3));
        assert!(err.to_string().starts_with("event loop creation failed"));
        assert!(err.source().is_some());
    }
}
