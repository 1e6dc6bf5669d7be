//! Skeleton Assets
//!
//! Immutable data loaded once and shared by every pose built from it:
//!
//! - [`SkeletonDefinition`]: bones, slots, skins and atlas pages
//! - [`Attachment`]: region image, region sequence or bounding polygon
//! - [`Skin`]: `(slot, name) → attachment` mapping
//! - [`AtlasPage`] / [`AtlasRegion`]: texture page sub-rectangles
//! - [`json`]: crate-native JSON snapshots of a definition

pub mod atlas;
pub mod attachment;
pub mod definition;
pub mod json;
pub mod skin;

pub use atlas::{AtlasPage, AtlasRegion, PageId};
pub use attachment::{
    Attachment, BoundingBoxAttachment, RegionAttachment, RegionGeometry,
    RegionSequenceAttachment, SequenceMode,
};
pub use definition::{BoneDefinition, SkeletonDefinition, SlotDefinition};
pub use json::SkeletonDocument;
pub use skin::{DEFAULT_SKIN_NAME, Skin};
