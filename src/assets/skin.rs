//! Skins

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::attachment::Attachment;

/// Name of the skin consulted when the active skin has no entry.
pub const DEFAULT_SKIN_NAME: &str = "default";

/// A named set of attachments keyed by `(slot index, attachment name)`.
///
/// Swapping skins swaps which attachments slot lookups resolve to without
/// touching the bone or slot structure.
#[derive(Debug, Clone, Default)]
pub struct Skin {
    pub name: String,
    attachments: FxHashMap<usize, FxHashMap<String, Arc<Attachment>>>,
}

impl Skin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attachments: FxHashMap::default(),
        }
    }

    /// Builder form of [`add_attachment`](Self::add_attachment).
    #[must_use]
    pub fn with_attachment(mut self, slot: usize, name: impl Into<String>, attachment: Attachment) -> Self {
        self.add_attachment(slot, name, attachment);
        self
    }

    /// Inserts (or replaces) the attachment stored under `name` for `slot`.
    pub fn add_attachment(&mut self, slot: usize, name: impl Into<String>, attachment: Attachment) {
        self.attachments
            .entry(slot)
            .or_default()
            .insert(name.into(), Arc::new(attachment));
    }

    #[must_use]
    pub fn attachment(&self, slot: usize, name: &str) -> Option<&Arc<Attachment>> {
        self.attachments.get(&slot)?.get(name)
    }

    /// All `(slot, name, attachment)` entries, in no particular order.
    pub fn attachments(&self) -> impl Iterator<Item = (usize, &str, &Arc<Attachment>)> {
        self.attachments.iter().flat_map(|(slot, entries)| {
            entries
                .iter()
                .map(move |(name, attachment)| (*slot, name.as_str(), attachment))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attachments.values().map(FxHashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attachments.values().all(FxHashMap::is_empty)
    }
}
