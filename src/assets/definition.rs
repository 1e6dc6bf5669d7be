//! Skeleton Definition
//!
//! The immutable setup data shared by every pose instantiated from it:
//! bones, slots, skins and the atlas pages referenced by region attachments.
//!
//! A definition is validated once at construction; every pose and renderer
//! downstream relies on the following invariants without re-checking them:
//! - a bone's parent index is strictly lower than its own index, so array
//!   order is a valid parent-before-child order and no cycle can exist
//! - every slot is bound to an existing bone
//! - every skin entry targets an existing slot
//! - every atlas region points at an existing page

use glam::{Vec2, Vec4};

use super::atlas::AtlasPage;
use super::attachment::Attachment;
use super::skin::{DEFAULT_SKIN_NAME, Skin};
use crate::errors::{Result, SkeletonError};

/// Setup pose of one bone.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneDefinition {
    pub name: String,
    pub parent: Option<usize>,
    pub x: f32,
    pub y: f32,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Used by the debug overlay only.
    pub length: f32,
}

impl BoneDefinition {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            length: 0.0,
        }
    }

    pub fn child(name: impl Into<String>, parent: usize) -> Self {
        Self {
            parent: Some(parent),
            ..Self::root(name)
        }
    }

    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    #[must_use]
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    #[must_use]
    pub fn scaled(mut self, scale_x: f32, scale_y: f32) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    #[must_use]
    pub fn with_length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Setup state of one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDefinition {
    pub name: String,
    pub bone: usize,
    /// Attachment shown in the setup pose.
    pub attachment: Option<String>,
    /// Setup tint, RGBA in `[0, 1]`.
    pub color: Vec4,
    pub additive_blending: bool,
}

impl SlotDefinition {
    pub fn new(name: impl Into<String>, bone: usize) -> Self {
        Self {
            name: name.into(),
            bone,
            attachment: None,
            color: Vec4::ONE,
            additive_blending: false,
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, name: impl Into<String>) -> Self {
        self.attachment = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn additive(mut self) -> Self {
        self.additive_blending = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct SkeletonDefinition {
    pub name: String,
    bones: Vec<BoneDefinition>,
    slots: Vec<SlotDefinition>,
    skins: Vec<Skin>,
    pages: Vec<AtlasPage>,
    default_skin: Option<usize>,
}

impl SkeletonDefinition {
    /// Builds and validates a definition.
    ///
    /// The skin named `"default"`, if any, becomes the fallback skin for
    /// attachment lookups.
    pub fn new(
        name: impl Into<String>,
        bones: Vec<BoneDefinition>,
        slots: Vec<SlotDefinition>,
        skins: Vec<Skin>,
        pages: Vec<AtlasPage>,
    ) -> Result<Self> {
        for (index, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent
                && parent >= index
            {
                return Err(SkeletonError::InvalidBoneParent {
                    bone: bone.name.clone(),
                    index,
                    parent,
                });
            }
        }

        for slot in &slots {
            if slot.bone >= bones.len() {
                return Err(SkeletonError::InvalidSlotBone {
                    slot: slot.name.clone(),
                    bone: slot.bone,
                    bone_count: bones.len(),
                });
            }
        }

        for skin in &skins {
            for (slot, _, attachment) in skin.attachments() {
                if slot >= slots.len() {
                    return Err(SkeletonError::UnknownSkinSlot {
                        skin: skin.name.clone(),
                        slot: slot.to_string(),
                    });
                }
                if let Attachment::RegionSequence(sequence) = attachment.as_ref()
                    && sequence.frames.is_empty()
                {
                    return Err(SkeletonError::EmptySequence(sequence.name.clone()));
                }
                if let Some(page) = attachment.pages().find(|page| page.index() >= pages.len()) {
                    return Err(SkeletonError::InvalidPage {
                        attachment: attachment.name().to_string(),
                        page: page.0,
                        page_count: pages.len(),
                    });
                }
            }
        }

        let default_skin = skins.iter().position(|skin| skin.name == DEFAULT_SKIN_NAME);

        Ok(Self {
            name: name.into(),
            bones,
            slots,
            skins,
            pages,
            default_skin,
        })
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[BoneDefinition] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[SlotDefinition] {
        &self.slots
    }

    #[inline]
    #[must_use]
    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    #[inline]
    #[must_use]
    pub fn pages(&self) -> &[AtlasPage] {
        &self.pages
    }

    #[must_use]
    pub fn default_skin(&self) -> Option<&Skin> {
        self.default_skin.map(|index| &self.skins[index])
    }

    /// Linear search by name, first match wins.
    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|bone| bone.name == name)
    }

    #[must_use]
    pub fn find_slot(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name == name)
    }

    #[must_use]
    pub fn find_skin(&self, name: &str) -> Option<usize> {
        self.skins.iter().position(|skin| skin.name == name)
    }
}
