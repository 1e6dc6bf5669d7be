//! Skeleton Instance
//!
//! [`SkeletonInstance`] ties one [`SkeletonPose`] to a render strategy and
//! its [`InstanceSettings`]. It is the surface a host scene talks to:
//!
//! ```rust,ignore
//! let mut hero = SkeletonInstance::from_json(
//!     &json,
//!     1.0,
//!     BatchEmitter::new(CpuQuadBatch::default()),
//!     InstanceSettings::default(),
//! )?;
//!
//! hero.set_skin(Some("gold"));
//! hero.set_to_setup_pose();
//!
//! // every frame
//! hero.update(dt);
//! let stats = hero.render(&NodeTransform::at(Vec2::new(240.0, 80.0)));
//! ```

pub mod bounds;
pub mod node;
pub mod settings;

use std::sync::Arc;

use glam::Vec4;

pub use bounds::{Rect, compute_bounds};
pub use node::{Drawable, NodeTransform, SkeletonNode};
pub use settings::InstanceSettings;

use crate::assets::{Attachment, SkeletonDefinition};
use crate::errors::Result;
use crate::render::{BlendFactor, BlendFunc, DebugDraw, DebugOverlay, FrameParams, FrameStats, SkeletonRenderer};
use crate::scene::{BoneState, SkeletonPose, SlotState};

#[derive(Debug)]
pub struct SkeletonInstance<R> {
    pose: SkeletonPose,
    renderer: R,
    settings: InstanceSettings,
    owns_definition: bool,
    last_stats: FrameStats,
}

impl<R: SkeletonRenderer> SkeletonInstance<R> {
    /// Creates an instance in the setup pose.
    ///
    /// `owns_definition` marks the definition as created for this instance
    /// alone; it is only used for diagnostics, the `Arc` decides its lifetime.
    #[must_use]
    pub fn new(definition: Arc<SkeletonDefinition>, owns_definition: bool, renderer: R, settings: InstanceSettings) -> Self {
        Self {
            pose: SkeletonPose::new(definition),
            renderer,
            settings,
            owns_definition,
            last_stats: FrameStats::default(),
        }
    }

    /// Loads a private definition from a JSON snapshot.
    pub fn from_json(json: &str, scale: f32, renderer: R, settings: InstanceSettings) -> Result<Self> {
        let definition = SkeletonDefinition::from_json(json, scale)?;
        Ok(Self::new(Arc::new(definition), true, renderer, settings))
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advances the pose clock by `delta × time_scale` and resolves world
    /// transforms.
    pub fn update(&mut self, delta: f32) {
        self.pose.update(delta * self.settings.time_scale);
        self.pose.update_world_transform();
    }

    /// Draws the pose with the host's color and opacity.
    pub fn render(&mut self, node: &NodeTransform) -> FrameStats {
        let params = FrameParams::new(
            node.color,
            node.opacity,
            self.pose.color,
            self.settings.premultiplied_alpha,
            self.settings.blend,
        );
        self.last_stats = self.renderer.render(&self.pose, &params);
        self.last_stats
    }

    /// Draws whichever overlays are enabled.
    pub fn draw_debug(&self, draw: &mut dyn DebugDraw) {
        DebugOverlay {
            slots: self.settings.debug_slots,
            bones: self.settings.debug_bones,
        }
        .draw(&self.pose, draw);
    }

    /// Host-space bounding box, see [`compute_bounds`].
    pub fn bounds(&mut self, node: &NodeTransform) -> Rect {
        compute_bounds(&mut self.pose, node.position, node.scale)
    }

    #[inline]
    #[must_use]
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

impl<R> SkeletonInstance<R> {
    // ========================================================================
    // Pose
    // ========================================================================

    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<&BoneState> {
        self.pose.find_bone(name)
    }

    #[must_use]
    pub fn find_slot(&self, name: &str) -> Option<&SlotState> {
        self.pose.find_slot(name)
    }

    pub fn set_skin(&mut self, name: Option<&str>) -> bool {
        self.pose.set_skin(name)
    }

    #[must_use]
    pub fn attachment(&self, slot_name: &str, name: &str) -> Option<Arc<Attachment>> {
        self.pose.attachment_by_slot_name(slot_name, name)
    }

    pub fn set_attachment(&mut self, slot_name: &str, name: Option<&str>) -> bool {
        self.pose.set_attachment(slot_name, name)
    }

    pub fn set_to_setup_pose(&mut self) {
        self.pose.set_to_setup_pose();
    }

    pub fn set_bones_to_setup_pose(&mut self) {
        self.pose.set_bones_to_setup_pose();
    }

    pub fn set_slots_to_setup_pose(&mut self) {
        self.pose.set_slots_to_setup_pose();
    }

    pub fn update_world_transform(&mut self) {
        self.pose.update_world_transform();
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> &SkeletonPose {
        &self.pose
    }

    #[inline]
    pub fn pose_mut(&mut self) -> &mut SkeletonPose {
        &mut self.pose
    }

    #[inline]
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[inline]
    #[must_use]
    pub fn owns_definition(&self) -> bool {
        self.owns_definition
    }

    /// Skeleton-level tint, multiplied with the host color.
    pub fn set_color(&mut self, color: Vec4) {
        self.pose.color = color;
    }

    // ========================================================================
    // Settings
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &InstanceSettings {
        &self.settings
    }

    pub fn set_debug_slots(&mut self, enabled: bool) {
        self.settings.debug_slots = enabled;
    }

    #[must_use]
    pub fn debug_slots(&self) -> bool {
        self.settings.debug_slots
    }

    pub fn set_debug_bones(&mut self, enabled: bool) {
        self.settings.debug_bones = enabled;
    }

    #[must_use]
    pub fn debug_bones(&self) -> bool {
        self.settings.debug_bones
    }

    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.settings.time_scale = time_scale;
    }

    #[must_use]
    pub fn time_scale(&self) -> f32 {
        self.settings.time_scale
    }

    pub fn set_premultiplied_alpha(&mut self, premultiplied: bool) {
        self.settings.premultiplied_alpha = premultiplied;
    }

    #[must_use]
    pub fn is_premultiplied_alpha(&self) -> bool {
        self.settings.premultiplied_alpha
    }

    pub fn set_blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.settings.blend = BlendFunc::new(src, dst);
    }

    #[must_use]
    pub fn blend_func(&self) -> BlendFunc {
        self.settings.blend
    }
}

impl<R> Drop for SkeletonInstance<R> {
    fn drop(&mut self) {
        if self.owns_definition {
            log::debug!(
                "Releasing skeleton definition '{}' ({} strong ref(s) left)",
                self.pose.definition().name,
                Arc::strong_count(self.pose.definition()) - 1
            );
        }
    }
}
