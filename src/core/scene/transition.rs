//=========================================================================
// Scene Transitions
//=========================================================================
//
// Animated blends between the captured frames of two scenes.
//
// A transition never touches the scenes themselves. The scene manager
// captures one still frame of each, then every render call asks the
// transition to place those frames on screen for the current progress.
//
// Flow:
//   progress ∈ [0, 1] → easing.apply() → FrameDraw* → RenderBackend
//
// At progress 0 every kind shows the outgoing frame covering the screen.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::interpolation::Interpolation;
use crate::core::render::{FrameDraw, FrameHandle, Rect, RenderBackend};

//=== Transition Parameters ===============================================

/// Edge a sliding frame moves towards or comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Direction the incoming slices travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceDirection {
    Up,
    Down,
    /// Alternates per slice, starting with `Up`.
    UpDown,
}

/// Axis a split transition cuts the frame along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Halves move left and right.
    Horizontal,
    /// Halves move up and down.
    Vertical,
}

/// Visual style of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Incoming frame fades in over the outgoing one.
    Fade,

    /// With `slide_out`, the outgoing frame leaves towards `direction`;
    /// otherwise the incoming frame enters moving towards `direction`.
    Slide {
        direction: SlideDirection,
        slide_out: bool,
    },

    /// Incoming frame arrives in vertical strips, each delayed a bit more
    /// than the previous one.
    Slice {
        direction: SliceDirection,
        slices: u32,
    },

    /// With `slide_out`, the outgoing frame splits open; otherwise the
    /// incoming halves close in over it.
    Split { axis: SplitAxis, slide_out: bool },
}

//=== SceneTransition =====================================================

/// Timed transition between two scenes.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let fade = SceneTransition::fade(0.5);
/// let slide = SceneTransition::slide(1.0, SlideDirection::Left, false)
///     .with_easing(Interpolation::Pow2Out);
///
/// assert_eq!(fade.duration(), 0.5);
/// assert_eq!(slide.easing(), Interpolation::Pow2Out);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransition {
    kind: TransitionKind,
    duration: f32,
    easing: Interpolation,
}

impl SceneTransition {
    //--- Construction -----------------------------------------------------

    /// Creates a transition lasting `duration` seconds.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is negative or not finite.
    pub fn new(kind: TransitionKind, duration: f32) -> Self {
        assert!(
            duration.is_finite() && duration >= 0.0,
            "Transition duration must be a non-negative number"
        );
        Self {
            kind,
            duration,
            easing: Interpolation::Linear,
        }
    }

    pub fn fade(duration: f32) -> Self {
        Self::new(TransitionKind::Fade, duration)
    }

    pub fn slide(duration: f32, direction: SlideDirection, slide_out: bool) -> Self {
        Self::new(
            TransitionKind::Slide {
                direction,
                slide_out,
            },
            duration,
        )
    }

    /// # Panics
    ///
    /// Panics if `slices` is zero.
    pub fn slice(duration: f32, direction: SliceDirection, slices: u32) -> Self {
        assert!(slices > 0, "Slice transition needs at least one slice");
        Self::new(TransitionKind::Slice { direction, slices }, duration)
    }

    pub fn split(duration: f32, axis: SplitAxis, slide_out: bool) -> Self {
        Self::new(TransitionKind::Split { axis, slide_out }, duration)
    }

    pub fn with_easing(mut self, easing: Interpolation) -> Self {
        self.easing = easing;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn easing(&self) -> Interpolation {
        self.easing
    }

    //--- Drawing ----------------------------------------------------------

    /// Draws both captured frames for linear `progress`.
    pub fn draw(
        &self,
        renderer: &mut dyn RenderBackend,
        outgoing: FrameHandle,
        incoming: FrameHandle,
        progress: f32,
        screen: (u32, u32),
    ) {
        for draw in self.frame_draws(outgoing, incoming, progress, screen) {
            renderer.draw_frame(draw);
        }
    }

    /// Frame placements for linear `progress`, in drawing order.
    pub fn frame_draws(
        &self,
        outgoing: FrameHandle,
        incoming: FrameHandle,
        progress: f32,
        screen: (u32, u32),
    ) -> Vec<FrameDraw> {
        let t = self.easing.apply(progress);
        let (w, h) = (screen.0 as f32, screen.1 as f32);
        let full = Rect::new(0.0, 0.0, w, h);

        match self.kind {
            TransitionKind::Fade => vec![
                whole(outgoing, full, 1.0),
                whole(incoming, full, t),
            ],

            TransitionKind::Slide {
                direction,
                slide_out,
            } => {
                let (dx, dy) = match direction {
                    SlideDirection::Left => (-w, 0.0),
                    SlideDirection::Right => (w, 0.0),
                    SlideDirection::Up => (0.0, h),
                    SlideDirection::Down => (0.0, -h),
                };
                if slide_out {
                    let moved = Rect::new(dx * t, dy * t, w, h);
                    vec![whole(incoming, full, 1.0), whole(outgoing, moved, 1.0)]
                } else {
                    let moved = Rect::new(-dx * (1.0 - t), -dy * (1.0 - t), w, h);
                    vec![whole(outgoing, full, 1.0), whole(incoming, moved, 1.0)]
                }
            }

            TransitionKind::Slice { direction, slices } => {
                let mut draws = vec![whole(outgoing, full, 1.0)];
                let count = slices as f32;
                let slice_width = w / count;
                for i in 0..slices {
                    let index = i as f32;
                    let offset = h * (1.0 + index / count) * (1.0 - t);
                    let upwards = match direction {
                        SliceDirection::Up => true,
                        SliceDirection::Down => false,
                        SliceDirection::UpDown => i % 2 == 0,
                    };
                    let y = if upwards { -offset } else { offset };
                    draws.push(FrameDraw {
                        frame: incoming,
                        dest: Rect::new(index * slice_width, y, slice_width, h),
                        source: Rect::new(index / count, 0.0, 1.0 / count, 1.0),
                        alpha: 1.0,
                    });
                }
                draws
            }

            TransitionKind::Split { axis, slide_out } => {
                let (moving, still, travel) = if slide_out {
                    (outgoing, incoming, t)
                } else {
                    (incoming, outgoing, 1.0 - t)
                };
                let mut draws = vec![whole(still, full, 1.0)];
                match axis {
                    SplitAxis::Horizontal => {
                        let half = w / 2.0;
                        let shift = half * travel;
                        draws.push(part(moving, Rect::new(-shift, 0.0, half, h), Rect::new(0.0, 0.0, 0.5, 1.0)));
                        draws.push(part(moving, Rect::new(half + shift, 0.0, half, h), Rect::new(0.5, 0.0, 0.5, 1.0)));
                    }
                    SplitAxis::Vertical => {
                        let half = h / 2.0;
                        let shift = half * travel;
                        draws.push(part(moving, Rect::new(0.0, -shift, w, half), Rect::new(0.0, 0.0, 1.0, 0.5)));
                        draws.push(part(moving, Rect::new(0.0, half + shift, w, half), Rect::new(0.0, 0.5, 1.0, 0.5)));
                    }
                }
                draws
            }
        }
    }
}

//=== Helpers =============================================================

fn whole(frame: FrameHandle, dest: Rect, alpha: f32) -> FrameDraw {
    FrameDraw {
        frame,
        dest,
        source: Rect::unit(),
        alpha,
    }
}

fn part(frame: FrameHandle, dest: Rect, source: Rect) -> FrameDraw {
    FrameDraw {
        frame,
        dest,
        source,
        alpha: 1.0,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const OUT: FrameHandle = FrameHandle(1);
    const IN: FrameHandle = FrameHandle(2);
    const SCREEN: (u32, u32) = (800, 600);

    fn full() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    /// True if the outgoing frame alone covers the screen.
    fn outgoing_covers(draws: &[FrameDraw]) -> bool {
        let outgoing_full = draws
            .iter()
            .any(|d| d.frame == OUT && d.dest == full() && d.alpha == 1.0);
        let incoming_visible = draws.iter().any(|d| {
            d.frame == IN
                && d.alpha > 0.0
                && d.dest.x < 800.0
                && d.dest.x + d.dest.width > 0.0
                && d.dest.y < 600.0
                && d.dest.y + d.dest.height > 0.0
        });
        outgoing_full && !incoming_visible
    }

    //--- Start Tests ------------------------------------------------------

    #[test]
    fn every_kind_starts_on_outgoing_frame() {
        let transitions = [
            SceneTransition::fade(1.0),
            SceneTransition::slide(1.0, SlideDirection::Left, false),
            SceneTransition::slice(1.0, SliceDirection::UpDown, 5),
            SceneTransition::split(1.0, SplitAxis::Horizontal, false),
        ];
        for transition in transitions {
            let draws = transition.frame_draws(OUT, IN, 0.0, SCREEN);
            assert!(outgoing_covers(&draws), "{:?}", transition.kind());
        }
    }

    #[test]
    fn slide_out_starts_with_outgoing_on_top() {
        let transition = SceneTransition::slide(1.0, SlideDirection::Right, true);
        let draws = transition.frame_draws(OUT, IN, 0.0, SCREEN);
        let last = draws.last().unwrap();
        assert_eq!(last.frame, OUT);
        assert_eq!(last.dest, full());
    }

    //--- End Tests --------------------------------------------------------

    #[test]
    fn fade_finishes_fully_opaque() {
        let draws = SceneTransition::fade(1.0).frame_draws(OUT, IN, 1.0, SCREEN);
        assert_eq!(draws[1].frame, IN);
        assert_eq!(draws[1].alpha, 1.0);
    }

    #[test]
    fn slide_in_finishes_in_place() {
        let transition = SceneTransition::slide(1.0, SlideDirection::Up, false);
        let draws = transition.frame_draws(OUT, IN, 1.0, SCREEN);
        assert_eq!(draws[1].frame, IN);
        assert_eq!(draws[1].dest, full());
    }

    #[test]
    fn slices_partition_the_width_in_order() {
        let transition = SceneTransition::slice(1.0, SliceDirection::Down, 4);
        let draws = transition.frame_draws(OUT, IN, 1.0, SCREEN);
        assert_eq!(draws.len(), 5);
        for (i, draw) in draws[1..].iter().enumerate() {
            assert_eq!(draw.dest.x, i as f32 * 200.0);
            assert_eq!(draw.dest.y, 0.0);
            assert_eq!(draw.source.x, i as f32 * 0.25);
        }
    }

    #[test]
    fn split_out_moves_halves_apart() {
        let transition = SceneTransition::split(1.0, SplitAxis::Horizontal, true);
        let draws = transition.frame_draws(OUT, IN, 0.5, SCREEN);
        assert_eq!(draws[0].frame, IN);
        assert_eq!(draws[1].dest.x, -200.0);
        assert_eq!(draws[2].dest.x, 600.0);
    }

    #[test]
    fn draw_forwards_to_backend() {
        use crate::core::render::{DrawCommand, RecordingBackend};

        let mut backend = RecordingBackend::new(800, 600);
        SceneTransition::fade(1.0).draw(&mut backend, OUT, IN, 0.5, SCREEN);
        let frames = backend
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Frame(_)))
            .count();
        assert_eq!(frames, 2);
    }

    #[test]
    #[should_panic(expected = "at least one slice")]
    fn zero_slices_panics() {
        SceneTransition::slice(1.0, SliceDirection::Up, 0);
    }
}
