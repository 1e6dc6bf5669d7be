//! Skeleton Pose
//!
//! [`SkeletonPose`] is the mutable per-instance state built from a shared
//! [`SkeletonDefinition`]: bone locals and their resolved world transforms,
//! slot attachments and tints, the draw order and the active skin.
//!
//! Animation application is external: it writes bone locals, slot colors and
//! attachments through this API, then the renderer reads the result.

use std::sync::Arc;

use glam::{Vec2, Vec4};
use smallvec::SmallVec;

use crate::assets::{AtlasPage, Attachment, SkeletonDefinition, Skin};
use crate::scene::bone::BoneState;
use crate::scene::draw_order::DrawOrder;
use crate::scene::slot::SlotState;
use crate::scene::transform_system::{RootFrame, resolve_world_transforms};

/// World-space polygon of one bounding-box attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingPolygon {
    pub slot: usize,
    pub name: String,
    pub vertices: SmallVec<[Vec2; 8]>,
}

#[derive(Debug, Clone)]
pub struct SkeletonPose {
    definition: Arc<SkeletonDefinition>,
    bones: Vec<BoneState>,
    slots: Vec<SlotState>,
    draw_order: DrawOrder,
    skin: Option<usize>,
    time: f32,

    /// Skeleton origin added to every emitted vertex.
    pub origin: Vec2,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Skeleton-level RGBA tint (animated), multiplied into every slot.
    pub color: Vec4,
}

impl SkeletonPose {
    /// Creates a pose in the setup pose with world transforms resolved.
    #[must_use]
    pub fn new(definition: Arc<SkeletonDefinition>) -> Self {
        let bones = definition.bones().iter().map(BoneState::from_definition).collect();
        let slots = definition.slots().iter().map(SlotState::from_definition).collect();
        let draw_order = DrawOrder::identity(definition.slots().len());

        let mut pose = Self {
            definition,
            bones,
            slots,
            draw_order,
            skin: None,
            time: 0.0,
            origin: Vec2::ZERO,
            flip_x: false,
            flip_y: false,
            color: Vec4::ONE,
        };
        pose.set_slots_to_setup_pose();
        pose.update_world_transform();
        pose
    }

    #[inline]
    #[must_use]
    pub fn definition(&self) -> &Arc<SkeletonDefinition> {
        &self.definition
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Pose clock in seconds, drives region-sequence playback.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advances the pose clock.
    pub fn update(&mut self, delta: f32) {
        self.time += delta;
    }

    // ========================================================================
    // Bones
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[BoneState] {
        &self.bones
    }

    #[inline]
    pub fn bones_mut(&mut self) -> &mut [BoneState] {
        &mut self.bones
    }

    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<&BoneState> {
        self.definition.find_bone(name).map(|index| &self.bones[index])
    }

    pub fn find_bone_mut(&mut self, name: &str) -> Option<&mut BoneState> {
        let index = self.definition.find_bone(name)?;
        self.bones.get_mut(index)
    }

    /// Resolves the world transform of every bone.
    pub fn update_world_transform(&mut self) {
        resolve_world_transforms(
            &mut self.bones,
            RootFrame {
                flip_x: self.flip_x,
                flip_y: self.flip_y,
            },
        );
    }

    // ========================================================================
    // Slots & draw order
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    #[inline]
    pub fn slots_mut(&mut self) -> &mut [SlotState] {
        &mut self.slots
    }

    #[must_use]
    pub fn find_slot(&self, name: &str) -> Option<&SlotState> {
        self.definition.find_slot(name).map(|index| &self.slots[index])
    }

    pub fn find_slot_mut(&mut self, name: &str) -> Option<&mut SlotState> {
        let index = self.definition.find_slot(name)?;
        self.slots.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn draw_order(&self) -> &DrawOrder {
        &self.draw_order
    }

    #[inline]
    pub fn draw_order_mut(&mut self) -> &mut DrawOrder {
        &mut self.draw_order
    }

    /// Texture page the slot currently draws from.
    #[must_use]
    pub fn texture_page(&self, slot: usize) -> Option<&AtlasPage> {
        let (_, region) = self.slots.get(slot)?.drawable_region(self.time)?;
        self.definition.pages().get(region.page.index())
    }

    /// Pins the frame of a region sequence in [`Hold`](crate::assets::SequenceMode::Hold) mode.
    pub fn set_sequence_frame(&mut self, slot: usize, frame: usize) -> bool {
        match self.slots.get_mut(slot) {
            Some(state) => {
                state.sequence_frame = frame;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Skins & attachments
    // ========================================================================

    #[must_use]
    pub fn skin(&self) -> Option<&Skin> {
        self.skin.map(|index| &self.definition.skins()[index])
    }

    /// Makes `name` the active skin, or clears it for `None`.
    ///
    /// Only future attachment lookups are affected: attachments already
    /// assigned to slots stay as they are until re-resolved. Returns `false`
    /// (leaving the active skin unchanged) if no skin has that name.
    pub fn set_skin(&mut self, name: Option<&str>) -> bool {
        let Some(name) = name else {
            self.skin = None;
            return true;
        };
        match self.definition.find_skin(name) {
            Some(index) => {
                log::debug!("Skeleton '{}' switched to skin '{name}'", self.definition.name);
                self.skin = Some(index);
                true
            }
            None => {
                log::trace!("Skeleton '{}' has no skin '{name}'", self.definition.name);
                false
            }
        }
    }

    /// Looks `name` up for `slot` in the active skin, then in the default skin.
    #[must_use]
    pub fn attachment(&self, slot: usize, name: &str) -> Option<Arc<Attachment>> {
        let found = self
            .skin()
            .and_then(|skin| skin.attachment(slot, name))
            .or_else(|| self.definition.default_skin().and_then(|skin| skin.attachment(slot, name)));

        if found.is_none() {
            log::trace!("No attachment '{name}' for slot {slot}");
        }
        found.cloned()
    }

    /// [`attachment`](Self::attachment) addressed by slot name.
    #[must_use]
    pub fn attachment_by_slot_name(&self, slot_name: &str, name: &str) -> Option<Arc<Attachment>> {
        let slot = self.definition.find_slot(slot_name)?;
        self.attachment(slot, name)
    }

    /// Resolves `name` for `slot` and makes it the slot's current attachment.
    ///
    /// `None` clears the slot. Returns the resolved attachment; when the
    /// lookup fails the slot is left unchanged and `None` is returned.
    pub fn resolve_attachment(&mut self, slot: usize, name: Option<&str>) -> Option<Arc<Attachment>> {
        if slot >= self.slots.len() {
            return None;
        }
        let Some(name) = name else {
            self.slots[slot].set_attachment(None, self.time);
            return None;
        };
        let attachment = self.attachment(slot, name)?;
        self.slots[slot].set_attachment(Some(attachment.clone()), self.time);
        Some(attachment)
    }

    /// [`resolve_attachment`](Self::resolve_attachment) addressed by slot name.
    ///
    /// Returns `true` if the slot exists and the attachment was resolved (or
    /// cleared with `None`).
    pub fn set_attachment(&mut self, slot_name: &str, name: Option<&str>) -> bool {
        let Some(slot) = self.definition.find_slot(slot_name) else {
            log::trace!("No slot '{slot_name}'");
            return false;
        };
        self.resolve_attachment(slot, name).is_some() || name.is_none()
    }

    // ========================================================================
    // Setup pose
    // ========================================================================

    /// Bones pass, then slots pass.
    pub fn set_to_setup_pose(&mut self) {
        self.set_bones_to_setup_pose();
        self.set_slots_to_setup_pose();
    }

    pub fn set_bones_to_setup_pose(&mut self) {
        let definition = Arc::clone(&self.definition);
        for (bone, data) in self.bones.iter_mut().zip(definition.bones()) {
            bone.set_to_setup_pose(data);
        }
    }

    /// Restores slot tints, setup attachments and the setup draw order.
    pub fn set_slots_to_setup_pose(&mut self) {
        let definition = Arc::clone(&self.definition);
        self.draw_order.reset();
        for (index, data) in definition.slots().iter().enumerate() {
            let attachment = data
                .attachment
                .as_deref()
                .and_then(|name| self.attachment(index, name));
            let slot = &mut self.slots[index];
            slot.color = data.color;
            slot.set_attachment(attachment, self.time);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// World-space polygons of every slot currently holding a bounding box.
    ///
    /// Uses the last resolved world transforms.
    #[must_use]
    pub fn bounding_polygons(&self) -> Vec<BoundingPolygon> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot.attachment.as_deref() {
                Some(Attachment::BoundingBox(bbox)) => {
                    let bone = &self.bones[slot.bone];
                    Some(BoundingPolygon {
                        slot: index,
                        name: bbox.name.clone(),
                        vertices: crate::render::vertex::bounding_box_world_vertices(bbox, bone, self.origin),
                    })
                }
                _ => None,
            })
            .collect()
    }
}
