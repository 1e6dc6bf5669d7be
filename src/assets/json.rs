//! JSON Skeleton Snapshots
//!
//! A crate-native JSON description of a [`SkeletonDefinition`], used by tools,
//! tests and the demo application. Bones reference their parent by name and
//! slots reference their bone by name; skins map slot name → attachment name
//! → attachment.
//!
//! ```json
//! {
//!   "name": "hero",
//!   "pages": [{ "name": "hero.png", "width": 256, "height": 256 }],
//!   "bones": [
//!     { "name": "root" },
//!     { "name": "torso", "parent": "root", "y": 10, "rotation": 90, "length": 40 }
//!   ],
//!   "slots": [{ "name": "body", "bone": "torso", "attachment": "body" }],
//!   "skins": [{
//!     "name": "default",
//!     "attachments": {
//!       "body": {
//!         "body": {
//!           "type": "region", "width": 32, "height": 64,
//!           "region": { "page": 0, "x": 0, "y": 0, "width": 32, "height": 64 }
//!         }
//!       }
//!     }
//!   }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use super::atlas::{AtlasPage, AtlasRegion, PageId};
use super::attachment::{
    Attachment, BoundingBoxAttachment, RegionAttachment, RegionGeometry, RegionSequenceAttachment,
    SequenceMode,
};
use super::definition::{BoneDefinition, SkeletonDefinition, SlotDefinition};
use super::skin::Skin;
use crate::errors::{Result, SkeletonError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkeletonDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pages: Vec<AtlasPage>,
    pub bones: Vec<BoneDocument>,
    #[serde(default)]
    pub slots: Vec<SlotDocument>,
    #[serde(default)]
    pub skins: Vec<SkinDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoneDocument {
    pub name: String,
    pub parent: Option<String>,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub length: f32,
}

impl Default for BoneDocument {
    fn default() -> Self {
        Self {
            name: String::new(),
            parent: None,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            length: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDocument {
    pub name: String,
    pub bone: String,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default = "white")]
    pub color: Vec4,
    #[serde(default)]
    pub additive: bool,
}

fn white() -> Vec4 {
    Vec4::ONE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinDocument {
    pub name: String,
    /// slot name → attachment name → attachment
    #[serde(default)]
    pub attachments: BTreeMap<String, BTreeMap<String, AttachmentDocument>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AttachmentDocument {
    Region {
        #[serde(flatten)]
        geometry: RegionGeometry,
        region: RegionDocument,
    },
    BoundingBox {
        vertices: Vec<Vec2>,
    },
    RegionSequence {
        #[serde(flatten)]
        geometry: RegionGeometry,
        frames: Vec<RegionDocument>,
        #[serde(default)]
        frame_time: f32,
        #[serde(default)]
        mode: SequenceMode,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDocument {
    pub page: PageId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub rotate: bool,
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
    #[serde(default)]
    pub original_width: Option<f32>,
    #[serde(default)]
    pub original_height: Option<f32>,
}

impl SkeletonDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves names to indices, applies the uniform loader `scale` to bone
    /// translations/lengths and attachment offsets/sizes/polygons, and
    /// validates the result.
    pub fn into_definition(self, scale: f32) -> Result<SkeletonDefinition> {
        let bone_index = |name: &str, referrer: &str, known: &[BoneDefinition]| {
            known
                .iter()
                .position(|bone| bone.name == name)
                .ok_or_else(|| SkeletonError::UnknownBone {
                    name: name.to_string(),
                    referrer: referrer.to_string(),
                })
        };

        let mut bones = Vec::with_capacity(self.bones.len());
        for doc in self.bones {
            // Parents must be listed before their children.
            let parent = match &doc.parent {
                Some(parent) => Some(bone_index(parent, &doc.name, &bones)?),
                None => None,
            };
            bones.push(BoneDefinition {
                name: doc.name,
                parent,
                x: doc.x * scale,
                y: doc.y * scale,
                rotation: doc.rotation,
                scale_x: doc.scale_x,
                scale_y: doc.scale_y,
                length: doc.length * scale,
            });
        }

        let mut slots = Vec::with_capacity(self.slots.len());
        for doc in self.slots {
            let bone = bone_index(&doc.bone, &doc.name, &bones)?;
            slots.push(SlotDefinition {
                name: doc.name,
                bone,
                attachment: doc.attachment,
                color: doc.color,
                additive_blending: doc.additive,
            });
        }

        let page_sizes: Vec<Vec2> = self.pages.iter().map(AtlasPage::size).collect();
        let mut skins = Vec::with_capacity(self.skins.len());
        for doc in self.skins {
            let mut skin = Skin::new(doc.name);
            for (slot_name, entries) in doc.attachments {
                let slot = slots
                    .iter()
                    .position(|slot| slot.name == slot_name)
                    .ok_or_else(|| SkeletonError::UnknownSkinSlot {
                        skin: skin.name.clone(),
                        slot: slot_name.clone(),
                    })?;
                for (name, attachment) in entries {
                    let attachment = attachment.into_attachment(&name, scale, &page_sizes)?;
                    skin.add_attachment(slot, name, attachment);
                }
            }
            skins.push(skin);
        }

        SkeletonDefinition::new(self.name, bones, slots, skins, self.pages)
    }
}

impl AttachmentDocument {
    fn into_attachment(self, name: &str, scale: f32, page_sizes: &[Vec2]) -> Result<Attachment> {
        let scale_geometry = |geometry: RegionGeometry| RegionGeometry {
            x: geometry.x * scale,
            y: geometry.y * scale,
            width: geometry.width * scale,
            height: geometry.height * scale,
            ..geometry
        };

        Ok(match self {
            Self::Region { geometry, region } => Attachment::Region(RegionAttachment {
                name: name.to_string(),
                geometry: scale_geometry(geometry),
                region: region.into_region(name, page_sizes)?,
            }),
            Self::BoundingBox { vertices } => Attachment::BoundingBox(BoundingBoxAttachment {
                name: name.to_string(),
                vertices: vertices.into_iter().map(|v| v * scale).collect(),
            }),
            Self::RegionSequence {
                geometry,
                frames,
                frame_time,
                mode,
            } => Attachment::RegionSequence(RegionSequenceAttachment {
                name: name.to_string(),
                geometry: scale_geometry(geometry),
                frames: frames
                    .into_iter()
                    .map(|frame| frame.into_region(name, page_sizes))
                    .collect::<Result<_>>()?,
                frame_time,
                mode,
            }),
        })
    }
}

impl RegionDocument {
    fn into_region(self, attachment: &str, page_sizes: &[Vec2]) -> Result<AtlasRegion> {
        let page_size = page_sizes
            .get(self.page.index())
            .copied()
            .ok_or_else(|| SkeletonError::InvalidPage {
                attachment: attachment.to_string(),
                page: self.page.0,
                page_count: page_sizes.len(),
            })?;

        Ok(
            AtlasRegion::new(self.page, page_size, self.x, self.y, self.width, self.height, self.rotate)
                .with_trim(
                    self.offset_x,
                    self.offset_y,
                    self.original_width.unwrap_or(self.width),
                    self.original_height.unwrap_or(self.height),
                ),
        )
    }
}

impl SkeletonDefinition {
    /// Parses a [`SkeletonDocument`] and builds a validated definition.
    pub fn from_json(json: &str, scale: f32) -> Result<Self> {
        SkeletonDocument::from_json(json)?.into_definition(scale)
    }

    pub fn from_json_file(path: impl AsRef<Path>, scale: f32) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, scale)
    }
}
