//=========================================================================
// Engine Settings
//=========================================================================
//
// Default construction parameters shared by every scene.
//
// Scenes copy these into their own `SceneSettings` when they are built,
// so changing the engine settings only affects scenes created afterwards.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::TransformComposition;

//=== EngineSettings ======================================================

/// Global defaults for world units, cameras and frame pacing.
///
/// # Default Values
///
/// - **Viewport**: 1280 x 720 (reference size in pixels)
/// - **Pixels per unit**: 100
/// - **Camera**: near 1, far 300, field of view 67 degrees
/// - **Max delta time**: 1/60 s
/// - **FPS logging**: off
/// - **Transform composition**: additive
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let settings = EngineSettings::default()
///     .with_viewport(800.0, 480.0)
///     .with_pixels_per_unit(32.0);
///
/// assert_eq!(settings.viewport_width, 800.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub pixels_per_unit: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_fov: f32,

    /// Upper bound for the delta passed to update phases.
    pub max_delta_time: f32,

    /// Log frames-per-second once a second at `info` level.
    pub log_fps: bool,

    /// How child transforms inherit from their parents.
    pub transform_composition: TransformComposition,
}

impl EngineSettings {
    //--- Builder-Style Setters --------------------------------------------

    /// Sets the reference viewport size in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "Viewport must be positive, got {}x{}",
            width,
            height
        );
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Sets how many pixels make up one world unit.
    ///
    /// # Panics
    ///
    /// Panics if `ppu <= 0.0`.
    pub fn with_pixels_per_unit(mut self, ppu: f32) -> Self {
        assert!(ppu > 0.0, "Pixels per unit must be positive, got {}", ppu);
        self.pixels_per_unit = ppu;
        self
    }

    /// Sets the perspective camera defaults.
    pub fn with_camera(mut self, near: f32, far: f32, fov: f32) -> Self {
        assert!(near < far, "Camera near plane must be closer than far plane");
        self.camera_near = near;
        self.camera_far = far;
        self.camera_fov = fov;
        self
    }

    /// Caps the delta time passed to update phases.
    ///
    /// # Panics
    ///
    /// Panics if `max <= 0.0`.
    pub fn with_max_delta_time(mut self, max: f32) -> Self {
        assert!(max > 0.0, "Max delta time must be positive, got {}", max);
        self.max_delta_time = max;
        self
    }

    pub fn with_log_fps(mut self, enabled: bool) -> Self {
        self.log_fps = enabled;
        self
    }

    pub fn with_transform_composition(mut self, mode: TransformComposition) -> Self {
        self.transform_composition = mode;
        self
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            pixels_per_unit: 100.0,
            camera_near: 1.0,
            camera_far: 300.0,
            camera_fov: 67.0,
            max_delta_time: 1.0 / 60.0,
            log_fps: false,
            transform_composition: TransformComposition::Additive,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
