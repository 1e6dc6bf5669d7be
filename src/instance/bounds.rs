//! Bounds Calculator

use glam::Vec2;

use crate::render::vertex::region_world_vertices;
use crate::scene::SkeletonPose;

/// Axis-aligned rectangle in host space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[must_use]
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    #[must_use]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }
}

/// Host-space box around every drawable region.
///
/// Re-resolves world transforms first, so the result is current even if bone
/// locals were written since the last frame. Corners are scaled by `scale`
/// and anchored at `position`. With nothing drawable the box is empty and
/// sits at `position`.
pub fn compute_bounds(pose: &mut SkeletonPose, position: Vec2, scale: Vec2) -> Rect {
    pose.update_world_transform();

    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    let mut any = false;

    for slot in pose.slots() {
        let Some((geometry, region)) = slot.drawable_region(pose.time()) else {
            continue;
        };
        let bone = &pose.bones()[slot.bone()];
        for corner in region_world_vertices(geometry, region, bone, pose.origin) {
            let scaled = corner * scale;
            min = min.min(scaled);
            max = max.max(scaled);
        }
        any = true;
    }

    if !any {
        return Rect::new(position, Vec2::ZERO);
    }
    Rect::new(position + min, max - min)
}
