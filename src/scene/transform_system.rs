//! Transform System
//!
//! Resolves every bone's world transform from its local pose and its
//! parent's already-resolved world transform.
//!
//! # Ordering
//!
//! Bone order is a valid parent-before-child order by construction (a
//! [`SkeletonDefinition`](crate::assets::SkeletonDefinition) rejects any bone
//! whose parent index is not lower than its own), so a single forward pass
//! over the bone array is enough: no level batching, no explicit stack.
//!
//! # Purity
//!
//! The pass reads only local values and writes only the world cache, so
//! running it twice without touching local values produces bit-identical
//! output. Bounds queries rely on this to re-derive transforms at any time.

use glam::{Mat2, Vec2};

use crate::scene::bone::BoneState;

/// The frame parentless bones are composed with: the skeleton origin,
/// optionally mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RootFrame {
    pub flip_x: bool,
    pub flip_y: bool,
}

impl RootFrame {
    #[must_use]
    pub fn matrix(self) -> Mat2 {
        Mat2::from_diagonal(Vec2::new(
            if self.flip_x { -1.0 } else { 1.0 },
            if self.flip_y { -1.0 } else { 1.0 },
        ))
    }
}

/// Resolves world transforms for all bones, in index order.
pub fn resolve_world_transforms(bones: &mut [BoneState], root: RootFrame) {
    let root_matrix = root.matrix();

    for index in 0..bones.len() {
        let (resolved, pending) = bones.split_at_mut(index);
        let bone = &mut pending[0];

        let (parent_matrix, parent_position) = match bone.parent {
            Some(parent) => {
                let parent = &resolved[parent];
                (parent.world_matrix, parent.world_position)
            }
            None => (root_matrix, Vec2::ZERO),
        };

        resolve_bone(bone, parent_matrix, parent_position);
    }
}

/// Composes one bone with an already-resolved parent transform.
#[inline]
pub fn resolve_bone(bone: &mut BoneState, parent_matrix: Mat2, parent_position: Vec2) {
    bone.world_matrix = parent_matrix * bone.local_matrix();
    bone.world_position = parent_position + parent_matrix * bone.local_translation();
}
