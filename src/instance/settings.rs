//! Instance Settings
//!
//! Per-instance render configuration.
//!
//! ```rust,ignore
//! use marrow::instance::InstanceSettings;
//!
//! let settings = InstanceSettings {
//!     premultiplied_alpha: false,
//!     debug_bones: true,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::render::BlendFunc;

/// Settings of one [`SkeletonInstance`](super::SkeletonInstance).
///
/// Deserializes with every field optional, so hosts can keep partial
/// overrides in their own config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstanceSettings {
    /// Multiply vertex RGB by alpha. Must match how the atlas textures were
    /// exported.
    pub premultiplied_alpha: bool,

    /// Multiplier applied to the `dt` passed to `update`.
    pub time_scale: f32,

    /// Blend function of regular slots. Additive slots keep `src` and use
    /// `One` as destination.
    pub blend: BlendFunc,

    /// Outline every drawable slot.
    pub debug_slots: bool,

    /// Draw bone lines and origins.
    pub debug_bones: bool,
}

impl Default for InstanceSettings {
    fn default() -> Self {
        Self {
            premultiplied_alpha: true,
            time_scale: 1.0,
            blend: BlendFunc::PREMULTIPLIED,
            debug_slots: false,
            debug_bones: false,
        }
    }
}
