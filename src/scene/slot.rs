//! Slot State
//!
//! Per-slot tint, current attachment and region sequence clock.

use std::sync::Arc;

use glam::Vec4;

use crate::assets::{AtlasRegion, Attachment, RegionGeometry, SlotDefinition};

/// Runtime state of one slot: which attachment is visible and its tint.
#[derive(Debug, Clone)]
pub struct SlotState {
    /// RGBA tint in `[0, 1]`.
    pub color: Vec4,

    pub(crate) bone: usize,
    pub(crate) attachment: Option<Arc<Attachment>>,
    /// Pose time at which the current attachment was set.
    pub(crate) attachment_time: f32,
    /// Explicit frame for region sequences; overridden by timed playback modes.
    pub(crate) sequence_frame: usize,
}

impl SlotState {
    #[must_use]
    pub fn from_definition(definition: &SlotDefinition) -> Self {
        Self {
            color: definition.color,
            bone: definition.bone,
            attachment: None,
            attachment_time: 0.0,
            sequence_frame: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn bone(&self) -> usize {
        self.bone
    }

    #[inline]
    #[must_use]
    pub fn attachment(&self) -> Option<&Arc<Attachment>> {
        self.attachment.as_ref()
    }

    /// Replaces the attachment and restarts its sequence clock at `time`.
    ///
    /// Setting the attachment that is already shown keeps the clock running.
    pub(crate) fn set_attachment(&mut self, attachment: Option<Arc<Attachment>>, time: f32) {
        let unchanged = match (&self.attachment, &attachment) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if !unchanged {
            self.attachment = attachment;
            self.attachment_time = time;
            self.sequence_frame = 0;
        }
    }

    #[inline]
    #[must_use]
    pub fn sequence_frame(&self) -> usize {
        self.sequence_frame
    }

    /// Frame of a region-sequence attachment at pose time `time`.
    #[must_use]
    pub fn frame_at(&self, time: f32) -> usize {
        match self.attachment.as_deref() {
            Some(Attachment::RegionSequence(sequence)) => sequence.mode.frame_at(
                time - self.attachment_time,
                sequence.frame_time,
                sequence.frames.len(),
                self.sequence_frame,
            ),
            _ => self.sequence_frame,
        }
    }

    /// The geometry and atlas region to draw at pose time `time`, or `None`
    /// when the slot is empty or holds a non-drawable attachment.
    #[must_use]
    pub fn drawable_region(&self, time: f32) -> Option<(&RegionGeometry, &AtlasRegion)> {
        self.attachment.as_deref()?.drawable_region(self.frame_at(time))
    }
}
