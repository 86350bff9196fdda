//=========================================================================
// Render Backend
//=========================================================================
//
// Narrow interface to the graphics collaborator.
//
// The scene graph never talks to a graphics API directly. It asks the
// backend to draw textured regions inside camera batches, to draw debug
// primitives inside shape batches, and to capture whole frames that
// scene transitions blend together.
//
// Flow (one frame):
// ```text
//   clear(background)
//   for camera:  set_viewport → begin_batch → draw_region* → end_batch
//   debug:       begin_shapes(Filled) → draw_shape* → end_shapes
//                begin_shapes(Line)   → ...
//                begin_shapes(Point)  → ...
// ```
//
//=========================================================================

//=== Module Declarations =================================================

mod recording;

//=== Public API ==========================================================

pub use recording::{DrawCommand, RecordingBackend};

//=== Internal Dependencies ===============================================

use crate::core::math::{Color, Mat4, Transform};

//=== Handles =============================================================

/// Backend-owned sprite batch, created lazily by each camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchHandle(pub u64);

/// Backend-owned offscreen frame captured for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Texture identifier as understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

//=== Draw Vocabulary =====================================================

/// Rectangular sub-region of a texture, in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRegion {
    pub texture: TextureId,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureRegion {
    /// Region covering a whole texture of the given size.
    pub fn whole(texture: TextureId, width: u32, height: u32) -> Self {
        Self {
            texture,
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// Screen rectangle in pixels, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns `true` if the two rectangles share any pixel.
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Floating point rectangle, used for frame placement and texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The unit rectangle `(0, 0, 1, 1)`.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// Kind of debug shape batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Filled,
    Line,
    Point,
}

/// Debug primitive, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        origin_x: f32,
        origin_y: f32,
        width: f32,
        height: f32,
        scale_x: f32,
        scale_y: f32,
        rotation: f32,
    },
    Cross {
        x: f32,
        y: f32,
        size: f32,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
    },
}

/// Placement of a captured frame on screen.
///
/// `source` is in normalized texture coordinates; `dest` is in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDraw {
    pub frame: FrameHandle,
    pub dest: Rect,
    pub source: Rect,
    pub alpha: f32,
}

//=== RenderBackend =======================================================

/// Graphics collaborator used by cameras, render components and transitions.
pub trait RenderBackend {
    /// Current drawable size in pixels.
    fn screen_size(&self) -> (u32, u32);

    /// Notifies the backend that the drawable surface changed size.
    fn resize(&mut self, width: u32, height: u32);

    fn clear(&mut self, color: Color);

    fn set_viewport(&mut self, bounds: PixelRect);

    //--- Sprite Batches ---------------------------------------------------

    fn create_batch(&mut self) -> BatchHandle;

    fn release_batch(&mut self, batch: BatchHandle);

    fn begin_batch(&mut self, batch: BatchHandle, projection: Mat4);

    fn end_batch(&mut self, batch: BatchHandle);

    /// Draws `region` at the world transform `transform` in the open batch.
    fn draw_region(
        &mut self,
        region: &TextureRegion,
        transform: &Transform,
        tint: Color,
        flip_x: bool,
        flip_y: bool,
    );

    //--- Debug Shapes -----------------------------------------------------

    fn begin_shapes(&mut self, kind: ShapeKind, projection: Mat4);

    fn draw_shape(&mut self, shape: Shape, color: Color);

    fn end_shapes(&mut self);

    //--- Frame Capture ----------------------------------------------------

    /// Redirects subsequent drawing into a new offscreen frame.
    fn begin_capture(&mut self) -> FrameHandle;

    /// Stops redirecting drawing into `frame`.
    fn end_capture(&mut self, frame: FrameHandle);

    fn draw_frame(&mut self, draw: FrameDraw);

    fn release_frame(&mut self, frame: FrameHandle);

    //--- Inspection -------------------------------------------------------

    /// This backend as a [`RecordingBackend`], if it is one.
    fn as_recording(&self) -> Option<&RecordingBackend> {
        None
    }

    fn as_recording_mut(&mut self) -> Option<&mut RecordingBackend> {
        None
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacked_halves_do_not_overlap() {
        let bottom = PixelRect::new(0, 0, 800, 300);
        let top = PixelRect::new(0, 300, 800, 300);
        assert!(!bottom.overlaps(&top));
        assert!(bottom.overlaps(&PixelRect::new(10, 10, 5, 5)));
    }
}
