//=========================================================================
// Transform
//=========================================================================
//
// Local position, scale, size, origin and rotation of a game object.
//
// Every game object owns exactly one transform as a plain field, so it
// can neither be removed nor duplicated. World-space values are derived
// on demand by folding the parent chain with `compose`.
//
// Composition modes:
//   Additive  position, rotation and scale are summed component-wise
//             (legacy behaviour, kept bit-for-bit)
//   Affine    the child's offset is scaled and rotated by the parent,
//             rotations add, scales multiply
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{EulerRot, Quat, Vec3};

//=== TransformComposition ================================================

/// How a child's local transform combines with its parent's world transform.
///
/// `Additive` is only correct for pure translation: a rotated parent does
/// not rotate its children's offsets, and scales are summed (a child with
/// scale 1 under a parent with scale 1 ends up with world scale 2). It is
/// the default to stay compatible with existing content. Use `Affine` for
/// a proper hierarchical transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformComposition {
    #[default]
    Additive,
    Affine,
}

//=== Transform ===========================================================

/// Local transform of a game object.
///
/// Rotation is stored in degrees. Two-dimensional content only uses the
/// z component, which is what [`rotation`](Self::rotation) and
/// [`rotate`](Self::rotate) operate on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    pub size: Vec3,
    pub origin: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            size: Vec3::ZERO,
            origin: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    /// Creates a transform positioned at `(x, y, 0)`.
    pub fn at(x: f32, y: f32) -> Self {
        let mut transform = Self::new();
        transform.set_xy(x, y);
        transform
    }

    //--- Position ---------------------------------------------------------

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Sets x and y, leaving z untouched.
    pub fn set_xy(&mut self, x: f32, y: f32) -> &mut Self {
        self.position.x = x;
        self.position.y = y;
        self
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position += Vec3::new(x, y, z);
        self
    }

    //--- Rotation ---------------------------------------------------------

    /// Rotation around the z axis, in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation.z
    }

    pub fn set_rotation(&mut self, degrees: f32) -> &mut Self {
        self.rotation.z = degrees;
        self
    }

    /// Adds `degrees` to the rotation around the z axis.
    pub fn rotate(&mut self, degrees: f32) -> &mut Self {
        self.rotation.z += degrees;
        self
    }

    //--- Size, Scale & Origin ---------------------------------------------

    pub fn set_size(&mut self, width: f32, height: f32, depth: f32) -> &mut Self {
        self.size = Vec3::new(width, height, depth);
        self
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    pub fn set_origin(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.origin = Vec3::new(x, y, z);
        self
    }

    /// Places the origin at a fraction of the current size.
    ///
    /// `(0.5, 0.5, 0.5)` centres the origin. The origin does not follow
    /// later size changes.
    pub fn set_origin_percent(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.origin = self.size * Vec3::new(x, y, z);
        self
    }

    pub fn set_origin_centered(&mut self) -> &mut Self {
        self.set_origin_percent(0.5, 0.5, 0.5)
    }

    /// Length of the size vector.
    pub fn diagonal(&self) -> f32 {
        self.size.length()
    }

    /// Centre of the bounding box relative to the position.
    pub fn center(&self) -> Vec3 {
        self.position + self.size * 0.5
    }

    //--- Composition ------------------------------------------------------

    /// Combines this local transform with the world transform of its parent.
    ///
    /// Size and origin are never inherited.
    pub fn compose(&self, parent: &Transform, mode: TransformComposition) -> Transform {
        match mode {
            TransformComposition::Additive => Transform {
                position: parent.position + self.position,
                rotation: parent.rotation + self.rotation,
                scale: parent.scale + self.scale,
                size: self.size,
                origin: self.origin,
            },
            TransformComposition::Affine => {
                let rotation = Quat::from_euler(
                    EulerRot::XYZ,
                    parent.rotation.x.to_radians(),
                    parent.rotation.y.to_radians(),
                    parent.rotation.z.to_radians(),
                );
                Transform {
                    position: parent.position + rotation * (self.position * parent.scale),
                    rotation: parent.rotation + self.rotation,
                    scale: parent.scale * self.scale,
                    size: self.size,
                    origin: self.origin,
                }
            }
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    //--- Local State Tests ------------------------------------------------

    #[test]
    fn new_transform_has_unit_scale() {
        let t = Transform::new();
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.size, Vec3::ZERO);
    }

    #[test]
    fn origin_percent_uses_current_size() {
        let mut t = Transform::new();
        t.set_size(4.0, 2.0, 0.0).set_origin_centered();
        assert_eq!(t.origin, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn rotate_accumulates_around_z() {
        let mut t = Transform::new();
        t.rotate(30.0).rotate(15.0);
        assert_eq!(t.rotation(), 45.0);
    }

    #[test]
    fn diagonal_is_size_length() {
        let mut t = Transform::new();
        t.set_size(3.0, 4.0, 0.0);
        assert_eq!(t.diagonal(), 5.0);
    }

    //--- Additive Composition Tests ---------------------------------------

    #[test]
    fn additive_sums_position_rotation_and_scale() {
        let mut parent = Transform::at(10.0, 5.0);
        parent.set_rotation(90.0);

        let mut child = Transform::at(1.0, 2.0);
        child.set_rotation(10.0).set_size(2.0, 2.0, 0.0);

        let world = child.compose(&parent, TransformComposition::Additive);
        assert_eq!(world.position, Vec3::new(11.0, 7.0, 0.0));
        assert_eq!(world.rotation(), 100.0);
        // Legacy behaviour: scales are summed, not multiplied.
        assert_eq!(world.scale, Vec3::splat(2.0));
        assert_eq!(world.size, child.size);
    }

    //--- Affine Composition Tests -----------------------------------------

    #[test]
    fn affine_rotates_child_offset() {
        let mut parent = Transform::at(10.0, 0.0);
        parent.set_rotation(90.0);
        let child = Transform::at(1.0, 0.0);

        let world = child.compose(&parent, TransformComposition::Affine);
        assert!(approx(world.position, Vec3::new(10.0, 1.0, 0.0)));
        assert_eq!(world.scale, Vec3::ONE);
    }

    #[test]
    fn affine_multiplies_scale() {
        let mut parent = Transform::new();
        parent.set_scale(2.0, 3.0, 1.0);
        let mut child = Transform::at(1.0, 1.0);
        child.set_scale(0.5, 2.0, 1.0);

        let world = child.compose(&parent, TransformComposition::Affine);
        assert!(approx(world.position, Vec3::new(2.0, 3.0, 0.0)));
        assert_eq!(world.scale, Vec3::new(1.0, 6.0, 1.0));
    }
}
