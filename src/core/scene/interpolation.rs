//=========================================================================
// Interpolation
//=========================================================================
//
// Easing curves mapping linear progress `t ∈ [0, 1]` onto eased progress.
// Every curve satisfies `apply(0) == 0` and `apply(1) == 1`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;

//=== Interpolation =======================================================

/// Easing curve used by scene transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    Linear,
    /// Smoothstep, `t²(3 - 2t)`.
    Smooth,
    /// Smootherstep, `t³(t(6t - 15) + 10)`.
    Smoother,
    /// Quadratic ease-in-out.
    Pow2,
    Pow2In,
    Pow2Out,
    /// Sine ease-in-out.
    Sine,
    SineIn,
    SineOut,
    /// Overshoots slightly, then settles.
    Swing,
}

impl Interpolation {
    /// Applies the curve to `t`, which is clamped to `[0, 1]` first.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => t * t * (3.0 - 2.0 * t),
            Self::Smoother => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
            Self::Pow2 => {
                if t <= 0.5 {
                    2.0 * t * t
                } else {
                    let u = t - 1.0;
                    1.0 - 2.0 * u * u
                }
            }
            Self::Pow2In => t * t,
            Self::Pow2Out => {
                let u = t - 1.0;
                1.0 - u * u
            }
            Self::Sine => (1.0 - (t * PI).cos()) * 0.5,
            Self::SineIn => 1.0 - (t * PI * 0.5).cos(),
            Self::SineOut => (t * PI * 0.5).sin(),
            Self::Swing => {
                const SCALE: f32 = 1.5 * 2.0;
                if t <= 0.5 {
                    let u = t * 2.0;
                    u * u * ((SCALE + 1.0) * u - SCALE) / 2.0
                } else {
                    let u = (t - 1.0) * 2.0;
                    u * u * ((SCALE + 1.0) * u + SCALE) / 2.0 + 1.0
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
