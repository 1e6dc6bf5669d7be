//! Render Module
//!
//! Turns a resolved [`SkeletonPose`] into draw output:
//! - [`vertex`]: world-space quads and tints
//! - [`emitter`]: batched path, one quad per slot into a [`QuadBatch`]
//! - [`sprite`]: per-slot host sprites
//! - [`debug`]: slot and bone overlay
//!
//! Both paths implement [`SkeletonRenderer`]; the instance picks one at
//! construction.

pub mod batch;
pub mod blend;
pub mod debug;
pub mod emitter;
pub mod sprite;
pub mod vertex;

use glam::{Vec3, Vec4};

pub use batch::{CpuQuadBatch, DrawCall, DrawState, QuadBatch};
pub use blend::{BlendFactor, BlendFunc};
pub use debug::{DebugDraw, DebugOverlay};
pub use emitter::BatchEmitter;
pub use sprite::{SpriteHost, SpritePlacement, SpriteRenderer};
pub use vertex::{Quad, QuadVertex};

use crate::scene::SkeletonPose;

/// Per-frame inputs shared by every slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Host color × host opacity × skeleton tint.
    pub skeleton_tint: Vec4,
    pub premultiplied_alpha: bool,
    pub blend: BlendFunc,
}

impl FrameParams {
    /// Folds the host color and opacity into the pose's own tint.
    #[must_use]
    pub fn new(host_color: Vec3, host_opacity: f32, pose_tint: Vec4, premultiplied_alpha: bool, blend: BlendFunc) -> Self {
        Self {
            skeleton_tint: host_color.extend(host_opacity) * pose_tint,
            premultiplied_alpha,
            blend,
        }
    }
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            skeleton_tint: Vec4::ONE,
            premultiplied_alpha: true,
            blend: BlendFunc::default(),
        }
    }
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub quads: usize,
    /// Slots holding an attachment that cannot be drawn (bounding boxes).
    pub skipped_slots: usize,
    /// Drawable slots dropped because the batch could not grow.
    pub truncated_slots: usize,
    pub growths: usize,
}

/// Render strategy of a skeleton instance.
pub trait SkeletonRenderer {
    fn render(&mut self, pose: &SkeletonPose, params: &FrameParams) -> FrameStats;
}
