//=========================================================================
// Game Camera
//=========================================================================
//
// Projection and viewport wrapper deciding what part of the world is
// visible and where on screen it is drawn.
//
// Screen bounds are stored as ratios of the full drawable surface, so a
// camera covering `(0, 0, 1, 0.5)` always renders into the bottom half
// regardless of window size. This is how split-screen layouts work.
//
// Render flow (per frame, driven by the scene):
//   pre_render()  → set_viewport(bounds) → [clear] → begin_batch(projection)
//   ...components assigned to this camera draw...
//   post_render() → end_batch()
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::math::{Color, GameWorldUnits, Mat4, Vec2, Vec3};
use crate::core::render::{BatchHandle, PixelRect, RenderBackend};

//=== Projection ==========================================================

/// Camera projection kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Parallel projection; `zoom > 1` shows more of the world.
    Orthographic { zoom: f32 },

    /// Perspective projection with a vertical field of view in degrees.
    Perspective { fov: f32, near: f32, far: f32 },
}

//=== GameCamera ==========================================================

/// A camera over a world-space viewport, drawn into a ratio of the screen.
#[derive(Debug)]
pub struct GameCamera {
    projection: Projection,
    world_width: f32,
    world_height: f32,
    depth: f32,
    position: Vec3,
    bounds_position: Vec2,
    bounds_size: Vec2,
    center_on_resize: bool,
    clear_color: Option<Color>,
    screen_size: (u32, u32),
    screen_bounds: PixelRect,
    batch: Option<BatchHandle>,
}

impl GameCamera {
    //--- Construction -----------------------------------------------------

    /// Orthographic camera showing `world_width` x `world_height` units,
    /// centred on the viewport.
    pub fn orthographic(world_width: f32, world_height: f32) -> Self {
        Self::with_projection(Projection::Orthographic { zoom: 1.0 }, world_width, world_height)
    }

    /// Orthographic camera sized to a scene's world units.
    pub fn for_units(units: &GameWorldUnits) -> Self {
        Self::orthographic(units.world_width(), units.world_height())
    }

    /// Perspective camera looking down the negative z axis at the viewport.
    pub fn perspective(world_width: f32, world_height: f32, fov: f32, near: f32, far: f32) -> Self {
        Self::with_projection(Projection::Perspective { fov, near, far }, world_width, world_height)
    }

    fn with_projection(projection: Projection, world_width: f32, world_height: f32) -> Self {
        let mut camera = Self {
            projection,
            world_width,
            world_height,
            depth: 300.0,
            position: Vec3::ZERO,
            bounds_position: Vec2::ZERO,
            bounds_size: Vec2::ONE,
            center_on_resize: true,
            clear_color: None,
            screen_size: (0, 0),
            screen_bounds: PixelRect::default(),
            batch: None,
        };
        camera.center();
        camera
    }

    //--- Viewport ---------------------------------------------------------

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    pub fn set_world_size(&mut self, width: f32, height: f32) {
        self.world_width = width;
        self.world_height = height;
        if self.center_on_resize {
            self.center();
        }
    }

    /// Depth range of orthographic projections (visible z is `-depth..depth`).
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = depth;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.position += Vec3::new(x, y, z);
    }

    pub fn center_on_resize(&self) -> bool {
        self.center_on_resize
    }

    pub fn set_center_on_resize(&mut self, center: bool) {
        self.center_on_resize = center;
    }

    /// Colour the camera clears its own screen bounds with, if any.
    pub fn set_clear_color(&mut self, color: Option<Color>) {
        self.clear_color = color;
    }

    //--- Screen Bounds ----------------------------------------------------

    /// Sets the screen area as ratios of the full surface.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use tessera_engine::prelude::*;
    /// let mut top = GameCamera::orthographic(8.0, 3.0);
    /// top.set_screen_bounds_ratio(0.0, 0.5, 1.0, 0.5);
    /// top.resize(800, 600);
    /// assert_eq!(top.screen_bounds(), PixelRect::new(0, 300, 800, 300));
    /// ```
    pub fn set_screen_bounds_ratio(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.bounds_position = Vec2::new(x, y);
        self.bounds_size = Vec2::new(width, height);
        self.update_bounds(self.screen_size);
    }

    /// Returns `(position, size)` ratios.
    pub fn screen_bounds_ratio(&self) -> (Vec2, Vec2) {
        (self.bounds_position, self.bounds_size)
    }

    /// Screen bounds in pixels as of the last resize or render.
    pub fn screen_bounds(&self) -> PixelRect {
        self.screen_bounds
    }

    /// Updates the projection for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.update_bounds((width, height));
        if self.center_on_resize {
            self.center();
        }
    }

    //--- Projection -------------------------------------------------------

    /// Combined view-projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Orthographic { zoom } => {
                let half_w = self.world_width * zoom * 0.5;
                let half_h = self.world_height * zoom * 0.5;
                Mat4::orthographic_rh(
                    self.position.x - half_w,
                    self.position.x + half_w,
                    self.position.y - half_h,
                    self.position.y + half_h,
                    -self.depth,
                    self.depth,
                )
            }
            Projection::Perspective { fov, near, far } => {
                let aspect = if self.world_height > 0.0 {
                    self.world_width / self.world_height
                } else {
                    1.0
                };
                let view = Mat4::look_at_rh(self.position, self.position - Vec3::Z, Vec3::Y);
                Mat4::perspective_rh(fov.to_radians(), aspect, near, far) * view
            }
        }
    }

    /// Projects a world point to screen pixels (origin bottom-left).
    pub fn world_to_screen(&self, point: Vec3) -> Vec2 {
        let ndc = self.projection_matrix().project_point3(point);
        let bounds = self.screen_bounds;
        Vec2::new(
            bounds.x as f32 + (ndc.x + 1.0) * 0.5 * bounds.width as f32,
            bounds.y as f32 + (ndc.y + 1.0) * 0.5 * bounds.height as f32,
        )
    }

    /// Unprojects screen pixels (origin bottom-left) onto the near plane.
    ///
    /// Exact for orthographic cameras. Returns `None` before the camera
    /// has been given a screen size.
    pub fn screen_to_world(&self, point: Vec2) -> Option<Vec3> {
        let bounds = self.screen_bounds;
        if bounds.width <= 0 || bounds.height <= 0 {
            return None;
        }
        let ndc = Vec3::new(
            (point.x - bounds.x as f32) / bounds.width as f32 * 2.0 - 1.0,
            (point.y - bounds.y as f32) / bounds.height as f32 * 2.0 - 1.0,
            0.0,
        );
        Some(self.projection_matrix().inverse().project_point3(ndc))
    }

    //--- Render Hooks -----------------------------------------------------

    /// Prepares the backend for this camera's render partition.
    pub fn pre_render(&mut self, renderer: &mut dyn RenderBackend) {
        self.update_bounds(renderer.screen_size());
        renderer.set_viewport(self.screen_bounds);
        if let Some(color) = self.clear_color {
            renderer.clear(color);
        }

        let batch = match self.batch {
            Some(batch) => batch,
            None => {
                let batch = renderer.create_batch();
                debug!("Camera created batch {:?}", batch);
                self.batch = Some(batch);
                batch
            }
        };
        renderer.begin_batch(batch, self.projection_matrix());
    }

    pub fn post_render(&mut self, renderer: &mut dyn RenderBackend) {
        if let Some(batch) = self.batch {
            renderer.end_batch(batch);
        }
    }

    /// Releases backend resources owned by this camera.
    pub fn destroy(&mut self, renderer: &mut dyn RenderBackend) {
        if let Some(batch) = self.batch.take() {
            debug!("Camera released batch {:?}", batch);
            renderer.release_batch(batch);
        }
    }

    pub fn batch(&self) -> Option<BatchHandle> {
        self.batch
    }

    //--- Internal Helpers -------------------------------------------------

    fn center(&mut self) {
        let z = match self.projection {
            Projection::Orthographic { .. } => self.position.z,
            Projection::Perspective { fov, .. } => {
                self.world_height * 0.5 / (fov.to_radians() * 0.5).tan()
            }
        };
        self.position = Vec3::new(self.world_width * 0.5, self.world_height * 0.5, z);
    }

    fn update_bounds(&mut self, screen: (u32, u32)) {
        self.screen_size = screen;
        let (w, h) = (screen.0 as f32, screen.1 as f32);
        self.screen_bounds = PixelRect::new(
            (w * self.bounds_position.x) as i32,
            (h * self.bounds_position.y) as i32,
            (w * self.bounds_size.x) as i32,
            (h * self.bounds_size.y) as i32,
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
