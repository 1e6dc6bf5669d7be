//! Batch Emitter
//!
//! Walks the draw order once per frame and streams one quad per drawable
//! slot into a [`QuadBatch`], flushing whenever the texture page or blend
//! function changes. Runs are emitted in draw order and never merged across
//! a state change, so overlapping translucent slots composite correctly.
//!
//! # Overflow
//!
//! When the batch is full the pending quads are flushed first and the batch
//! is then asked to double. If it refuses, the rest of the frame is dropped:
//! everything flushed so far stays drawn and the loss is reported through
//! [`FrameStats::truncated_slots`].

use crate::render::batch::{DrawState, QuadBatch};
use crate::render::vertex::{region_quad, vertex_color};
use crate::render::{FrameParams, FrameStats, SkeletonRenderer};
use crate::scene::SkeletonPose;

#[derive(Debug, Clone, Default)]
pub struct BatchEmitter<B: QuadBatch> {
    batch: B,
}

impl<B: QuadBatch> BatchEmitter<B> {
    #[must_use]
    pub fn new(batch: B) -> Self {
        Self { batch }
    }

    #[inline]
    #[must_use]
    pub fn batch(&self) -> &B {
        &self.batch
    }

    #[inline]
    pub fn batch_mut(&mut self) -> &mut B {
        &mut self.batch
    }

    /// Emits every drawable slot of `pose` in draw order.
    pub fn emit_frame(&mut self, pose: &SkeletonPose, params: &FrameParams) -> FrameStats {
        let mut stats = FrameStats::default();
        let mut open: Option<DrawState> = None;

        let definition = pose.definition();
        let time = pose.time();
        let order = pose.draw_order().as_slice();

        for (position, &slot_index) in order.iter().enumerate() {
            let slot = &pose.slots()[slot_index];
            let Some(attachment) = slot.attachment() else {
                continue;
            };
            let Some((geometry, region)) = attachment.drawable_region(slot.frame_at(time)) else {
                stats.skipped_slots += 1;
                continue;
            };

            let blend = if definition.slots()[slot_index].additive_blending {
                params.blend.additive()
            } else {
                params.blend
            };
            let state = DrawState {
                page: region.page,
                blend,
            };

            if let Some(current) = open
                && current != state
            {
                self.flush(current, &mut stats);
            }
            open = Some(state);

            if self.batch.len() >= self.batch.capacity() {
                self.flush(state, &mut stats);

                let capacity = self.batch.capacity();
                let grown = capacity.saturating_mul(2).max(1);
                if !self.batch.resize(grown) {
                    stats.truncated_slots = count_drawable(pose, &order[position..]);
                    log::warn!(
                        "Skeleton '{}': quad batch cannot grow past {capacity}, dropping {} slot(s) this frame",
                        definition.name,
                        stats.truncated_slots
                    );
                    return stats;
                }
                log::debug!("Quad batch expanding capacity: {capacity} -> {grown}");
                stats.growths += 1;
            }

            let bone = &pose.bones()[slot.bone()];
            let color = vertex_color(params.skeleton_tint, slot.color, params.premultiplied_alpha);
            self.batch
                .append(&region_quad(geometry, region, bone, pose.origin, color));
            stats.quads += 1;
        }

        if let Some(state) = open {
            self.flush(state, &mut stats);
        }
        stats
    }

    fn flush(&mut self, state: DrawState, stats: &mut FrameStats) {
        if !self.batch.is_empty() {
            self.batch.flush(state);
            stats.draw_calls += 1;
        }
    }
}

impl<B: QuadBatch> SkeletonRenderer for BatchEmitter<B> {
    fn render(&mut self, pose: &SkeletonPose, params: &FrameParams) -> FrameStats {
        self.emit_frame(pose, params)
    }
}

fn count_drawable(pose: &SkeletonPose, slots: &[usize]) -> usize {
    slots
        .iter()
        .filter(|&&index| pose.slots()[index].drawable_region(pose.time()).is_some())
        .count()
}
