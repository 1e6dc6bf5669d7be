//! Draw Order

use crate::errors::{Result, SkeletonError};

/// Back-to-front paint order of slots.
///
/// Always a permutation of `0..slot_count`: every mutation either preserves
/// that property or is rejected without touching the current order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOrder {
    order: Vec<usize>,
}

impl DrawOrder {
    /// Slot definition order.
    #[must_use]
    pub fn identity(slot_count: usize) -> Self {
        Self {
            order: (0..slot_count).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    /// Paint position of `slot`.
    #[must_use]
    pub fn position_of(&self, slot: usize) -> Option<usize> {
        self.order.iter().position(|&s| s == slot)
    }

    pub fn reset(&mut self) {
        let count = self.order.len();
        self.order.clear();
        self.order.extend(0..count);
    }

    /// Replaces the whole order.
    pub fn set(&mut self, order: Vec<usize>) -> Result<()> {
        if !is_permutation(&order, self.order.len()) {
            log::warn!("Rejected draw order {order:?}: not a permutation of 0..{}", self.order.len());
            return Err(SkeletonError::InvalidDrawOrder {
                slot_count: self.order.len(),
            });
        }
        self.order = order;
        Ok(())
    }

    /// Swaps two paint positions. Returns `false` if either is out of range.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.order.len() || b >= self.order.len() {
            return false;
        }
        self.order.swap(a, b);
        true
    }

    /// Moves `slot` to paint position `position`, shifting the slots in
    /// between. Returns `false` if the slot or position is out of range.
    pub fn move_slot(&mut self, slot: usize, position: usize) -> bool {
        if position >= self.order.len() {
            return false;
        }
        let Some(from) = self.position_of(slot) else {
            return false;
        };
        let slot = self.order.remove(from);
        self.order.insert(position, slot);
        true
    }
}

fn is_permutation(order: &[usize], count: usize) -> bool {
    if order.len() != count {
        return false;
    }
    let mut seen = vec![false; count];
    order.iter().all(|&slot| slot < count && !std::mem::replace(&mut seen[slot], true))
}
