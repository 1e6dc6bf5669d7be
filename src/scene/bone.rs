//! Bone State
//!
//! Local setup values that animation writes, plus the world transform cache.

use glam::{Mat2, Vec2};

use crate::assets::BoneDefinition;

/// Runtime state of one bone.
///
/// The local scale/rotation/translation are public: animation application
/// and gameplay code write them directly. The world transform is a cache
/// written only by the transform resolver
/// ([`resolve_world_transforms`](super::transform_system::resolve_world_transforms)).
#[derive(Debug, Clone, PartialEq)]
pub struct BoneState {
    // === Local pose (public) ===
    pub x: f32,
    pub y: f32,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,

    // === Resolved world transform (internal) ===
    pub(crate) parent: Option<usize>,
    pub(crate) world_matrix: Mat2,
    pub(crate) world_position: Vec2,
}

impl BoneState {
    #[must_use]
    pub fn from_definition(definition: &BoneDefinition) -> Self {
        Self {
            x: definition.x,
            y: definition.y,
            rotation: definition.rotation,
            scale_x: definition.scale_x,
            scale_y: definition.scale_y,
            parent: definition.parent,
            world_matrix: Mat2::IDENTITY,
            world_position: Vec2::ZERO,
        }
    }

    /// Restores the local pose from the definition's setup values.
    pub fn set_to_setup_pose(&mut self, definition: &BoneDefinition) {
        self.x = definition.x;
        self.y = definition.y;
        self.rotation = definition.rotation;
        self.scale_x = definition.scale_x;
        self.scale_y = definition.scale_y;
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Local linear map: rotation applied after scale.
    #[must_use]
    pub fn local_matrix(&self) -> Mat2 {
        Mat2::from_angle(self.rotation.to_radians()) * Mat2::from_diagonal(Vec2::new(self.scale_x, self.scale_y))
    }

    #[inline]
    #[must_use]
    pub fn local_translation(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    // ========================================================================
    // World transform getters
    // ========================================================================

    /// World 2×2 linear map. Column 0 is `(m00, m10)`, column 1 is `(m01, m11)`.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> Mat2 {
        self.world_matrix
    }

    /// Bone origin in skeleton space.
    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec2 {
        self.world_position
    }

    /// Skeleton-space position of a bone-space point.
    #[inline]
    #[must_use]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.world_position + self.world_matrix * local
    }

    /// Angle of the bone's x-axis in degrees.
    #[must_use]
    pub fn world_rotation(&self) -> f32 {
        let axis = self.world_matrix.x_axis;
        axis.y.atan2(axis.x).to_degrees()
    }

    /// Scale along the bone's x-axis and the signed scale along the
    /// remaining axis. Together with [`world_rotation`](Self::world_rotation)
    /// they reproduce the world matrix exactly when it carries no shear.
    #[must_use]
    pub fn world_scale(&self) -> Vec2 {
        let scale_x = self.world_matrix.x_axis.length();
        let scale_y = if scale_x > f32::EPSILON {
            self.world_matrix.determinant() / scale_x
        } else {
            self.world_matrix.y_axis.length()
        };
        Vec2::new(scale_x, scale_y)
    }

    /// End point of a bone of `length` units along its world x-axis.
    #[inline]
    #[must_use]
    pub fn tip(&self, length: f32) -> Vec2 {
        self.world_position + self.world_matrix.x_axis * length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_scale_recovers_flip() {
        let mut bone = BoneState::from_definition(&BoneDefinition::root("root"));
        bone.world_matrix = Mat2::from_diagonal(Vec2::new(-2.0, 2.0));

        assert!((bone.world_rotation().abs() - 180.0).abs() < 1e-4);
        let scale = bone.world_scale();
        assert!((scale.x - 2.0).abs() < 1e-6);
        assert!((scale.y + 2.0).abs() < 1e-6);
    }
}
