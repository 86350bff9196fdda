//=========================================================================
// Recording Backend
//=========================================================================
//
// Headless `RenderBackend` that records every call as a `DrawCommand`.
//
// Used as the default backend when no graphics collaborator is supplied
// and by tests that assert on render order, camera partitioning and
// transition blending.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{
    BatchHandle, FrameDraw, FrameHandle, PixelRect, RenderBackend, Shape, ShapeKind,
    TextureRegion,
};
use crate::core::math::{Color, Mat4, Transform};

//=== DrawCommand =========================================================

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Viewport(PixelRect),
    BeginBatch(BatchHandle),
    EndBatch(BatchHandle),
    Region {
        region: TextureRegion,
        transform: Transform,
        tint: Color,
    },
    BeginShapes(ShapeKind),
    Shape(Shape, Color),
    EndShapes,
    BeginCapture(FrameHandle),
    EndCapture(FrameHandle),
    Frame(FrameDraw),
}

//=== RecordingBackend ====================================================

/// In-memory backend that keeps a log of draw commands.
pub struct RecordingBackend {
    screen: (u32, u32),
    commands: Vec<DrawCommand>,
    next_handle: u64,
    live_batches: HashSet<BatchHandle>,
    live_frames: HashSet<FrameHandle>,
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: (width, height),
            commands: Vec::new(),
            next_handle: 1,
            live_batches: HashSet::new(),
            live_frames: HashSet::new(),
        }
    }

    //--- Inspection -------------------------------------------------------

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns and clears the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn live_batches(&self) -> usize {
        self.live_batches.len()
    }

    pub fn live_frames(&self) -> usize {
        self.live_frames.len()
    }

    //--- Internal Helpers -------------------------------------------------

    fn next(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

//=== RenderBackend Implementation ========================================

impl RenderBackend for RecordingBackend {
    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.screen = (width, height);
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_viewport(&mut self, bounds: PixelRect) {
        self.commands.push(DrawCommand::Viewport(bounds));
    }

    fn create_batch(&mut self) -> BatchHandle {
        let batch = BatchHandle(self.next());
        self.live_batches.insert(batch);
        batch
    }

    fn release_batch(&mut self, batch: BatchHandle) {
        if !self.live_batches.remove(&batch) {
            warn!("Released unknown batch {:?}", batch);
        }
    }

    fn begin_batch(&mut self, batch: BatchHandle, _projection: Mat4) {
        self.commands.push(DrawCommand::BeginBatch(batch));
    }

    fn end_batch(&mut self, batch: BatchHandle) {
        self.commands.push(DrawCommand::EndBatch(batch));
    }

    fn draw_region(
        &mut self,
        region: &TextureRegion,
        transform: &Transform,
        tint: Color,
        _flip_x: bool,
        _flip_y: bool,
    ) {
        self.commands.push(DrawCommand::Region {
            region: *region,
            transform: *transform,
            tint,
        });
    }

    fn begin_shapes(&mut self, kind: ShapeKind, _projection: Mat4) {
        self.commands.push(DrawCommand::BeginShapes(kind));
    }

    fn draw_shape(&mut self, shape: Shape, color: Color) {
        self.commands.push(DrawCommand::Shape(shape, color));
    }

    fn end_shapes(&mut self) {
        self.commands.push(DrawCommand::EndShapes);
    }

    fn begin_capture(&mut self) -> FrameHandle {
        let frame = FrameHandle(self.next());
        self.live_frames.insert(frame);
        self.commands.push(DrawCommand::BeginCapture(frame));
        frame
    }

    fn end_capture(&mut self, frame: FrameHandle) {
        self.commands.push(DrawCommand::EndCapture(frame));
    }

    fn draw_frame(&mut self, draw: FrameDraw) {
        self.commands.push(DrawCommand::Frame(draw));
    }

    fn release_frame(&mut self, frame: FrameHandle) {
        if !self.live_frames.remove(&frame) {
            warn!("Released unknown frame {:?}", frame);
        }
    }

    fn as_recording(&self) -> Option<&RecordingBackend> {
        Some(self)
    }

    fn as_recording_mut(&mut self) -> Option<&mut RecordingBackend> {
        Some(self)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_are_tracked_until_released() {
        let mut backend = RecordingBackend::new(800, 600);
        let a = backend.create_batch();
        let b = backend.create_batch();
        assert_ne!(a, b);
        assert_eq!(backend.live_batches(), 2);

        backend.release_batch(a);
        assert_eq!(backend.live_batches(), 1);
    }

    #[test]
    fn take_commands_drains_log() {
        let mut backend = RecordingBackend::default();
        backend.clear(Color::BLACK);
        backend.end_shapes();

        assert_eq!(backend.take_commands().len(), 2);
        assert!(backend.commands().is_empty());
    }

    #[test]
    fn resize_changes_screen_size() {
        let mut backend = RecordingBackend::default();
        backend.resize(320, 240);
        assert_eq!(backend.screen_size(), (320, 240));
    }
}
