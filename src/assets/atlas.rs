//! Texture Atlas
//!
//! Texture pages and the sub-rectangles attachments sample from.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a texture page inside a [`SkeletonDefinition`](super::SkeletonDefinition).
///
/// Pages are the unit of batching: consecutive quads sharing a page (and a
/// blend function) are submitted in one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u32);

impl PageId {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A texture page of the atlas. The texture itself is owned by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasPage {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl AtlasPage {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// A sub-rectangle of a texture page.
///
/// `width`/`height` are the packed (trimmed) size of the image before any
/// atlas rotation; `original_*` and `offset_*` describe the whitespace that
/// the packer stripped, so that the quad can be placed where the untrimmed
/// image would have been.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasRegion {
    pub page: PageId,

    // Pixel rectangle on the page (as packed).
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    // Normalized texture coordinates (u, v) top-left and (u2, v2) bottom-right.
    pub u: f32,
    pub v: f32,
    pub u2: f32,
    pub v2: f32,

    /// The image was rotated 90° clockwise when packed.
    pub rotate: bool,

    pub offset_x: f32,
    pub offset_y: f32,
    pub original_width: f32,
    pub original_height: f32,
}

impl AtlasRegion {
    /// Creates an untrimmed region from its pixel rectangle on a page of
    /// `page_size` pixels.
    #[must_use]
    pub fn new(page: PageId, page_size: Vec2, x: f32, y: f32, width: f32, height: f32, rotate: bool) -> Self {
        // A rotated image occupies height × width pixels on the page.
        let (packed_w, packed_h) = if rotate { (height, width) } else { (width, height) };
        let inv = Vec2::ONE / page_size.max(Vec2::ONE);

        Self {
            page,
            x,
            y,
            width,
            height,
            u: x * inv.x,
            v: y * inv.y,
            u2: (x + packed_w) * inv.x,
            v2: (y + packed_h) * inv.y,
            rotate,
            offset_x: 0.0,
            offset_y: 0.0,
            original_width: width,
            original_height: height,
        }
    }

    /// Records the whitespace trimmed by the packer.
    #[must_use]
    pub fn with_trim(mut self, offset_x: f32, offset_y: f32, original_width: f32, original_height: f32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self.original_width = original_width;
        self.original_height = original_height;
        self
    }

    /// Texture coordinates in quad winding order: bottom-left, bottom-right,
    /// top-right, top-left.
    #[must_use]
    pub fn quad_uvs(&self) -> [Vec2; 4] {
        let (u, v, u2, v2) = (self.u, self.v, self.u2, self.v2);
        if self.rotate {
            [
                Vec2::new(u2, v2),
                Vec2::new(u2, v),
                Vec2::new(u, v),
                Vec2::new(u, v2),
            ]
        } else {
            [
                Vec2::new(u, v2),
                Vec2::new(u2, v2),
                Vec2::new(u2, v),
                Vec2::new(u, v),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_uvs_cover_pixel_rect() {
        let region = AtlasRegion::new(PageId(0), Vec2::new(256.0, 128.0), 64.0, 32.0, 64.0, 32.0, false);
        assert_eq!(region.u, 0.25);
        assert_eq!(region.v, 0.25);
        assert_eq!(region.u2, 0.5);
        assert_eq!(region.v2, 0.5);

        let uvs = region.quad_uvs();
        assert_eq!(uvs[0], Vec2::new(0.25, 0.5));
        assert_eq!(uvs[2], Vec2::new(0.5, 0.25));
    }

    #[test]
    fn rotated_region_swaps_packed_extent() {
        let region = AtlasRegion::new(PageId(0), Vec2::new(100.0, 100.0), 0.0, 0.0, 40.0, 20.0, true);
        assert!((region.u2 - 0.2).abs() < 1e-6);
        assert!((region.v2 - 0.4).abs() < 1e-6);
        // Bottom-left of the image samples the packed top-right corner's column.
        assert_eq!(region.quad_uvs()[0], Vec2::new(region.u2, region.v2));
    }
}
