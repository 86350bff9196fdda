//=========================================================================
// Math
//=========================================================================
//
// Transform, colour and unit conversion types used by the scene graph.
// Vector and matrix types come from `glam`.
//
//=========================================================================

//=== Module Declarations =================================================

mod color;
mod transform;
mod units;

//=== Public API ==========================================================

pub use color::Color;
pub use transform::{Transform, TransformComposition};
pub use units::GameWorldUnits;

pub use glam::{Mat4, Vec2, Vec3};
