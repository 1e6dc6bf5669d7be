//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`SkeletonError`] covers the failures that can occur
//! while a [`SkeletonDefinition`](crate::assets::SkeletonDefinition) is being
//! built or a pose is being reconfigured:
//! - Malformed bone hierarchies (parents that are not resolved before children)
//! - Slots, skins and regions referencing data that does not exist
//! - Draw orders that are not a permutation of the slot indices
//! - Snapshot decoding errors
//!
//! Per-frame code (transform resolution, emission, bounds, debug drawing)
//! never returns errors: anomalies are skipped or truncated inside the frame.
//!
//! # Usage
//!
//! ```rust,ignore
//! use marrow::errors::Result;
//! use marrow::assets::SkeletonDefinition;
//!
//! fn load(json: &str) -> Result<SkeletonDefinition> {
//!     SkeletonDefinition::from_json(json, 1.0)
//! }
//! ```

use thiserror::Error;

/// The main error type for skeleton construction.
#[derive(Error, Debug)]
pub enum SkeletonError {
    // ========================================================================
    // Definition Errors
    // ========================================================================
    /// A bone references a parent that does not precede it in bone order.
    ///
    /// This also rejects every cyclic hierarchy.
    #[error("Bone '{bone}' (index {index}) references parent {parent}, which is not resolved before it")]
    InvalidBoneParent {
        /// Name of the offending bone
        bone: String,
        /// Index of the offending bone
        index: usize,
        /// The parent index it declared
        parent: usize,
    },

    /// A bone or slot references a bone name that is not defined.
    #[error("Unknown bone '{name}' referenced by '{referrer}'")]
    UnknownBone {
        /// The missing bone name
        name: String,
        /// The bone or slot carrying the reference
        referrer: String,
    },

    /// A slot is bound to a bone index outside the bone list.
    #[error("Slot '{slot}' is bound to bone index {bone}, but only {bone_count} bones exist")]
    InvalidSlotBone {
        /// Name of the offending slot
        slot: String,
        /// The bone index it declared
        bone: usize,
        /// Number of bones in the definition
        bone_count: usize,
    },

    /// A skin holds an attachment for a slot that is not defined.
    #[error("Skin '{skin}' references unknown slot '{slot}'")]
    UnknownSkinSlot {
        /// Name of the skin
        skin: String,
        /// The slot name or index that could not be resolved
        slot: String,
    },

    /// An atlas region points at a texture page that is not defined.
    #[error("Attachment '{attachment}' references texture page {page}, but only {page_count} pages exist")]
    InvalidPage {
        /// Name of the attachment owning the region
        attachment: String,
        /// The page index it declared
        page: u32,
        /// Number of pages in the definition
        page_count: usize,
    },

    /// A region sequence without any frame.
    #[error("Region sequence '{0}' has no frames")]
    EmptySequence(String),

    // ========================================================================
    // Pose Errors
    // ========================================================================
    /// A draw order that is not a permutation of `0..slot_count`.
    #[error("Draw order is not a permutation of 0..{slot_count}")]
    InvalidDrawOrder {
        /// Number of slots the draw order must cover
        slot_count: usize,
    },

    // ========================================================================
    // I/O & Format Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, SkeletonError>`.
pub type Result<T> = std::result::Result<T, SkeletonError>;
