//! Debug Overlay
//!
//! Draws slot outlines and bones through a host [`DebugDraw`] surface.

use glam::{Vec2, Vec4};

use crate::render::vertex::region_world_vertices;
use crate::scene::SkeletonPose;

pub const SLOT_COLOR: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);
pub const SLOT_LINE_WIDTH: f32 = 1.0;
pub const BONE_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
pub const BONE_LINE_WIDTH: f32 = 2.0;
pub const BONE_POINT_SIZE: f32 = 4.0;
pub const ROOT_POINT_COLOR: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);
pub const BONE_POINT_COLOR: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);

/// Immediate-mode primitive drawing provided by the host.
pub trait DebugDraw {
    fn set_color(&mut self, color: Vec4);
    fn set_line_width(&mut self, width: f32);
    fn set_point_size(&mut self, size: f32);
    fn draw_polygon(&mut self, points: &[Vec2], closed: bool);
    fn draw_line(&mut self, from: Vec2, to: Vec2);
    fn draw_point(&mut self, point: Vec2);
}

/// Which overlays to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugOverlay {
    pub slots: bool,
    pub bones: bool,
}

impl DebugOverlay {
    pub fn draw(self, pose: &SkeletonPose, draw: &mut dyn DebugDraw) {
        if self.slots {
            draw_slots(pose, draw);
        }
        if self.bones {
            draw_bones(pose, draw);
        }
    }
}

/// One closed outline per drawable slot.
pub fn draw_slots(pose: &SkeletonPose, draw: &mut dyn DebugDraw) {
    draw.set_color(SLOT_COLOR);
    draw.set_line_width(SLOT_LINE_WIDTH);

    for slot_index in pose.draw_order().iter() {
        let slot = &pose.slots()[slot_index];
        if let Some((geometry, region)) = slot.drawable_region(pose.time()) {
            let bone = &pose.bones()[slot.bone()];
            let corners = region_world_vertices(geometry, region, bone, pose.origin);
            draw.draw_polygon(&corners, true);
        }
    }
}

/// A line along every bone for its length, then a point at every bone origin.
pub fn draw_bones(pose: &SkeletonPose, draw: &mut dyn DebugDraw) {
    let definition = pose.definition();

    draw.set_color(BONE_COLOR);
    draw.set_line_width(BONE_LINE_WIDTH);
    for (bone, data) in pose.bones().iter().zip(definition.bones()) {
        let start = pose.origin + bone.world_position();
        let end = pose.origin + bone.tip(data.length);
        draw.draw_line(start, end);
    }

    draw.set_point_size(BONE_POINT_SIZE);
    for (index, bone) in pose.bones().iter().enumerate() {
        draw.set_color(if index == 0 { ROOT_POINT_COLOR } else { BONE_POINT_COLOR });
        draw.draw_point(pose.origin + bone.world_position());
    }
}
