//! Blend Functions
//!
//! Source/destination factor pairs for straight and premultiplied alpha.

use serde::{Deserialize, Serialize};

/// Blend factor applied to the source or destination color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstColor,
    OneMinusDstColor,
    DstAlpha,
    OneMinusDstAlpha,
}

/// Source/destination blend factors of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendFunc {
    /// Blending for premultiplied-alpha colors.
    pub const PREMULTIPLIED: Self = Self {
        src: BlendFactor::One,
        dst: BlendFactor::OneMinusSrcAlpha,
    };

    /// Blending for straight (non-premultiplied) alpha.
    pub const STRAIGHT: Self = Self {
        src: BlendFactor::SrcAlpha,
        dst: BlendFactor::OneMinusSrcAlpha,
    };

    #[must_use]
    pub const fn new(src: BlendFactor, dst: BlendFactor) -> Self {
        Self { src, dst }
    }

    /// The same source factor with destination `One`, used by slots that
    /// blend additively.
    #[must_use]
    pub const fn additive(self) -> Self {
        Self {
            src: self.src,
            dst: BlendFactor::One,
        }
    }
}

impl Default for BlendFunc {
    fn default() -> Self {
        Self::PREMULTIPLIED
    }
}
