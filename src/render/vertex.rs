//! Vertex Generator
//!
//! Turns a resolved bone transform plus an attachment's local geometry into
//! world-space vertices, texture coordinates and a tint. Both render paths
//! (batched quads and per-slot sprites) build their colors through
//! [`vertex_color`], so the two paths always agree.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use smallvec::SmallVec;

use crate::assets::{AtlasRegion, BoundingBoxAttachment, RegionGeometry};
use crate::scene::bone::BoneState;

/// One textured, tinted vertex (`V2F_T2F_C4F`).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

/// Four vertices in winding order: bottom-left, bottom-right, top-right,
/// top-left. Laid out so a slice of quads can be uploaded as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Quad {
    pub vertices: [QuadVertex; 4],
}

impl Quad {
    #[must_use]
    pub fn new(positions: [Vec2; 4], uvs: [Vec2; 4], color: Vec4) -> Self {
        let color = color.to_array();
        let mut vertices = [QuadVertex::default(); 4];
        for ((vertex, position), uv) in vertices.iter_mut().zip(positions).zip(uvs) {
            *vertex = QuadVertex {
                position: position.to_array(),
                uv: uv.to_array(),
                color,
            };
        }
        Self { vertices }
    }

    #[must_use]
    pub fn positions(&self) -> [Vec2; 4] {
        self.vertices.map(|v| Vec2::from_array(v.position))
    }

    #[must_use]
    pub fn color(&self) -> Vec4 {
        Vec4::from_array(self.vertices[0].color)
    }
}

/// Final vertex color.
///
/// `skeleton_tint` already carries the host color/opacity and the pose's own
/// tint; it is multiplied component-wise with the slot tint. With
/// `premultiplied_alpha` the RGB channels are then scaled by the final alpha.
#[inline]
#[must_use]
pub fn vertex_color(skeleton_tint: Vec4, slot_tint: Vec4, premultiplied_alpha: bool) -> Vec4 {
    let color = skeleton_tint * slot_tint;
    if premultiplied_alpha {
        (color.truncate() * color.w).extend(color.w)
    } else {
        color
    }
}

/// World corners of a region quad, winding BL, BR, TR, TL.
#[must_use]
pub fn region_world_vertices(geometry: &RegionGeometry, region: &AtlasRegion, bone: &BoneState, origin: Vec2) -> [Vec2; 4] {
    geometry
        .local_corners(region)
        .map(|corner| origin + bone.local_to_world(corner))
}

#[must_use]
pub fn bounding_box_world_vertices(bbox: &BoundingBoxAttachment, bone: &BoneState, origin: Vec2) -> SmallVec<[Vec2; 8]> {
    bbox.vertices
        .iter()
        .map(|&vertex| origin + bone.local_to_world(vertex))
        .collect()
}

/// Builds the quad for one region.
#[must_use]
pub fn region_quad(geometry: &RegionGeometry, region: &AtlasRegion, bone: &BoneState, origin: Vec2, color: Vec4) -> Quad {
    Quad::new(
        region_world_vertices(geometry, region, bone, origin),
        region.quad_uvs(),
        color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiplied_half_alpha() {
        let tint = Vec4::new(1.0, 1.0, 1.0, 0.5);

        let premultiplied = vertex_color(tint, Vec4::ONE, true);
        assert_eq!(premultiplied, Vec4::new(0.5, 0.5, 0.5, 0.5));

        let straight = vertex_color(tint, Vec4::ONE, false);
        assert_eq!(straight, Vec4::new(1.0, 1.0, 1.0, 0.5));
    }

    #[test]
    fn slot_and_skeleton_tints_multiply() {
        let color = vertex_color(Vec4::new(0.5, 1.0, 1.0, 1.0), Vec4::new(1.0, 0.5, 1.0, 0.5), false);
        assert_eq!(color, Vec4::new(0.5, 0.5, 1.0, 0.5));
    }

    #[test]
    fn quad_is_pod() {
        let quads = [Quad::default(); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&quads);
        assert_eq!(bytes.len(), 2 * 4 * 8 * 4);
    }
}
