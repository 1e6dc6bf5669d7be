//! Quad Batch
//!
//! The host-side batching primitive the emitter writes into, plus
//! [`CpuQuadBatch`], a CPU implementation that records every flush as a
//! [`DrawCall`]. Hosts with a GPU backend implement [`QuadBatch`] over their
//! own vertex buffer.

use crate::assets::PageId;
use crate::render::blend::BlendFunc;
use crate::render::vertex::Quad;

/// GPU state shared by every quad of one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawState {
    pub page: PageId,
    pub blend: BlendFunc,
}

/// Growable quad buffer drawn in one call per flush.
pub trait QuadBatch {
    /// Number of quads the batch can hold before it must be flushed or grown.
    fn capacity(&self) -> usize;

    /// Quads currently pending.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends one quad. Callers check `len() < capacity()` first.
    fn append(&mut self, quad: &Quad);

    /// Draws the pending quads with `state`, then clears them.
    fn flush(&mut self, state: DrawState);

    /// Changes the capacity. Returns `false` if the batch cannot grow.
    fn resize(&mut self, capacity: usize) -> bool;
}

/// One recorded flush.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub state: DrawState,
    pub quads: Vec<Quad>,
}

/// CPU [`QuadBatch`] recording its draw calls.
#[derive(Debug, Clone)]
pub struct CpuQuadBatch {
    pending: Vec<Quad>,
    capacity: usize,
    max_capacity: Option<usize>,
    draw_calls: Vec<DrawCall>,
    resizes: usize,
}

impl CpuQuadBatch {
    pub const DEFAULT_CAPACITY: usize = 128;

    /// Unbounded batch starting at `capacity` quads.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Vec::with_capacity(capacity),
            capacity,
            max_capacity: None,
            draw_calls: Vec::new(),
            resizes: 0,
        }
    }

    /// Batch that refuses to grow past `max_capacity` quads.
    #[must_use]
    pub fn with_limits(initial: usize, max_capacity: usize) -> Self {
        Self {
            max_capacity: Some(max_capacity),
            ..Self::new(initial)
        }
    }

    #[must_use]
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    /// Drains the recorded draw calls.
    pub fn take_draw_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draw_calls)
    }

    /// Successful resizes since creation.
    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.resizes
    }
}

impl Default for CpuQuadBatch {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl QuadBatch for CpuQuadBatch {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.pending.len()
    }

    fn append(&mut self, quad: &Quad) {
        self.pending.push(*quad);
    }

    fn flush(&mut self, state: DrawState) {
        if self.pending.is_empty() {
            return;
        }
        let quads = std::mem::replace(&mut self.pending, Vec::with_capacity(self.capacity));
        self.draw_calls.push(DrawCall { state, quads });
    }

    fn resize(&mut self, capacity: usize) -> bool {
        if self.max_capacity.is_some_and(|max| capacity > max) {
            return false;
        }
        self.capacity = capacity;
        self.pending.reserve(capacity.saturating_sub(self.pending.len()));
        self.resizes += 1;
        true
    }
}
