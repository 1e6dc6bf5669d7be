//! Attachments
//!
//! An attachment is the piece of geometry a slot can show. It is a closed
//! sum type: region images and image sequences are drawable, bounding boxes
//! only take part in bounds/hit queries.

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

use super::atlas::{AtlasRegion, PageId};

/// Placement of an image quad relative to its bone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegionGeometry {
    pub x: f32,
    pub y: f32,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for RegionGeometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

impl RegionGeometry {
    #[must_use]
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
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

    /// Corners of the quad in attachment space, before the local rotation and
    /// offset are applied. Winding: bottom-left, bottom-right, top-right,
    /// top-left.
    ///
    /// The region's trim is honoured so that a stripped image lands where the
    /// untrimmed one would have been.
    #[must_use]
    pub fn unrotated_corners(&self, region: &AtlasRegion) -> [Vec2; 4] {
        let region_scale_x = if region.original_width > 0.0 {
            self.width / region.original_width * self.scale_x
        } else {
            self.scale_x
        };
        let region_scale_y = if region.original_height > 0.0 {
            self.height / region.original_height * self.scale_y
        } else {
            self.scale_y
        };

        let x1 = -self.width * 0.5 * self.scale_x + region.offset_x * region_scale_x;
        let y1 = -self.height * 0.5 * self.scale_y + region.offset_y * region_scale_y;
        let x2 = x1 + region.width * region_scale_x;
        let y2 = y1 + region.height * region_scale_y;

        [
            Vec2::new(x1, y1),
            Vec2::new(x2, y1),
            Vec2::new(x2, y2),
            Vec2::new(x1, y2),
        ]
    }

    /// Corners in bone space: [`unrotated_corners`](Self::unrotated_corners)
    /// rotated by the local rotation and shifted by the local offset.
    #[must_use]
    pub fn local_corners(&self, region: &AtlasRegion) -> [Vec2; 4] {
        let rotation = Mat2::from_angle(self.rotation.to_radians());
        let offset = self.offset();
        self.unrotated_corners(region)
            .map(|corner| offset + rotation * corner)
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A single image drawn from one atlas region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAttachment {
    pub name: String,
    pub geometry: RegionGeometry,
    pub region: AtlasRegion,
}

/// Playback of a [`RegionSequenceAttachment`], evaluated from the time
/// elapsed since the attachment was set on its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SequenceMode {
    /// The frame only changes through an explicit frame index.
    #[default]
    Hold,
    Forward,
    Backward,
    ForwardLoop,
    BackwardLoop,
    PingPong,
}

impl SequenceMode {
    /// Frame index for `elapsed` seconds of playback.
    ///
    /// `held` is the slot's explicit frame index, used by [`SequenceMode::Hold`]
    /// and whenever `frame_time` is not positive. The result is always a
    /// valid index for a non-empty sequence.
    #[must_use]
    pub fn frame_at(self, elapsed: f32, frame_time: f32, frame_count: usize, held: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        let last = frame_count - 1;
        if self == Self::Hold || frame_time <= 0.0 {
            return held.min(last);
        }

        let step = (elapsed.max(0.0) / frame_time).floor() as usize;
        match self {
            Self::Hold => held.min(last),
            Self::Forward => step.min(last),
            Self::Backward => last.saturating_sub(step),
            Self::ForwardLoop => step % frame_count,
            Self::BackwardLoop => last - step % frame_count,
            Self::PingPong => {
                let step = step % (frame_count * 2);
                if step >= frame_count {
                    last - (step - frame_count)
                } else {
                    step
                }
            }
        }
    }
}

/// An image whose atlas region is picked from a list of frames.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSequenceAttachment {
    pub name: String,
    pub geometry: RegionGeometry,
    pub frames: Vec<AtlasRegion>,
    /// Seconds per frame.
    pub frame_time: f32,
    pub mode: SequenceMode,
}

impl RegionSequenceAttachment {
    /// Frame region for `frame`, clamped to the last frame.
    #[must_use]
    pub fn frame(&self, frame: usize) -> Option<&AtlasRegion> {
        let last = self.frames.len().checked_sub(1)?;
        self.frames.get(frame.min(last))
    }
}

/// A polygon in bone space, used for hit and bounds queries only.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBoxAttachment {
    pub name: String,
    pub vertices: Vec<Vec2>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    Region(RegionAttachment),
    BoundingBox(BoundingBoxAttachment),
    RegionSequence(RegionSequenceAttachment),
}

impl Attachment {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Region(a) => &a.name,
            Self::BoundingBox(a) => &a.name,
            Self::RegionSequence(a) => &a.name,
        }
    }

    /// Whether this attachment produces a quad when drawn.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        match self {
            Self::Region(_) | Self::RegionSequence(_) => true,
            Self::BoundingBox(_) => false,
        }
    }

    /// Geometry and atlas region to draw for `frame`, or `None` for
    /// non-drawable attachments.
    #[must_use]
    pub fn drawable_region(&self, frame: usize) -> Option<(&RegionGeometry, &AtlasRegion)> {
        match self {
            Self::Region(a) => Some((&a.geometry, &a.region)),
            Self::RegionSequence(a) => a.frame(frame).map(|region| (&a.geometry, region)),
            Self::BoundingBox(_) => None,
        }
    }

    /// Every texture page this attachment may sample from.
    pub(crate) fn pages(&self) -> impl Iterator<Item = PageId> + '_ {
        let (single, frames): (Option<PageId>, &[AtlasRegion]) = match self {
            Self::Region(a) => (Some(a.region.page), &[]),
            Self::RegionSequence(a) => (None, &a.frames),
            Self::BoundingBox(_) => (None, &[]),
        };
        single.into_iter().chain(frames.iter().map(|r| r.page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(width: f32, height: f32) -> AtlasRegion {
        AtlasRegion::new(PageId(0), Vec2::new(256.0, 256.0), 0.0, 0.0, width, height, false)
    }

    #[test]
    fn untrimmed_quad_is_centered_on_offset() {
        let geometry = RegionGeometry::sized(20.0, 10.0).at(5.0, 0.0);
        let corners = geometry.local_corners(&region(20.0, 10.0));
        assert_eq!(corners[0], Vec2::new(-5.0, -5.0));
        assert_eq!(corners[1], Vec2::new(15.0, -5.0));
        assert_eq!(corners[2], Vec2::new(15.0, 5.0));
        assert_eq!(corners[3], Vec2::new(-5.0, 5.0));
    }

    #[test]
    fn trimmed_quad_keeps_untrimmed_placement() {
        // A 10×10 image packed as 6×4 starting 2px right, 3px up.
        let trimmed = region(6.0, 4.0).with_trim(2.0, 3.0, 10.0, 10.0);
        let corners = RegionGeometry::sized(10.0, 10.0).local_corners(&trimmed);
        assert_eq!(corners[0], Vec2::new(-3.0, -2.0));
        assert_eq!(corners[2], Vec2::new(3.0, 2.0));
    }

    #[test]
    fn sequence_modes_pick_expected_frames() {
        let pick = |mode: SequenceMode, t: f32| mode.frame_at(t, 0.1, 3, 1);

        assert_eq!(pick(SequenceMode::Hold, 5.0), 1);
        assert_eq!(pick(SequenceMode::Forward, 0.25), 2);
        assert_eq!(pick(SequenceMode::Forward, 9.0), 2);
        assert_eq!(pick(SequenceMode::Backward, 0.15), 1);
        assert_eq!(pick(SequenceMode::Backward, 9.0), 0);
        assert_eq!(pick(SequenceMode::ForwardLoop, 0.35), 0);
        assert_eq!(pick(SequenceMode::BackwardLoop, 0.05), 2);
        assert_eq!(pick(SequenceMode::BackwardLoop, 0.35), 2);

        let ping_pong: Vec<usize> = (0..7)
            .map(|i| pick(SequenceMode::PingPong, i as f32 * 0.1 + 0.05))
            .collect();
        assert_eq!(ping_pong, vec![0, 1, 2, 2, 1, 0, 0]);
    }

    #[test]
    fn bounding_box_is_not_drawable() {
        let bbox = Attachment::BoundingBox(BoundingBoxAttachment {
            name: "hit".into(),
            vertices: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
        });
        assert!(!bbox.is_drawable());
        assert!(bbox.drawable_region(0).is_none());
    }
}
