/*!
# Slot Representation

Vertices are stored under an internal dense index, their *slot*.
Slots address rows and columns of the adjacency matrix and are never handed out to users; the
public API only speaks in vertex values.

We choose `Slot = u32` since the matrix has `capacity^2` cells and thus could never hold anywhere
near `2^32` slots anyway.
*/

use std::num::NonZero;

/// Slots can be any unsigned integer from `0` to `Slot::MAX - 1`
pub type Slot = u32;

/// Slot-Value that is considered invalid
pub const INVALID_SLOT: Slot = Slot::MAX;

/// As `Option<Slot>` uses additional bytes for padding, a `Vec<Option<Slot>>` is twice as large
/// as needed. This instead uses the `NonZero`-Wrapper with [`INVALID_SLOT`] as the `None`-Value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalSlot(NonZero<Slot>);

impl OptionalSlot {
    /// Returns `Some(OptionalSlot)` if `slot != INVALID_SLOT` and `None` otherwise
    pub const fn new(slot: Slot) -> Option<Self> {
        match NonZero::new(slot ^ INVALID_SLOT) {
            Some(inner) => Some(OptionalSlot(inner)),
            None => None,
        }
    }

    /// Gets the underlying Slot-Value
    pub const fn get(&self) -> Slot {
        self.0.get() ^ INVALID_SLOT
    }
}

/// A renumbering of slots as produced by compaction: entry `i` holds the new slot of the vertex
/// previously stored at slot `i`, or `None` if slot `i` was dead.
pub type SlotPermutation = Vec<Option<OptionalSlot>>;

/// Looks up the new index of `old` in a [`SlotPermutation`].
/// Slots beyond the end of the permutation are treated as dead.
#[inline]
pub fn permuted(permutation: &[Option<OptionalSlot>], old: usize) -> Option<usize> {
    permutation
        .get(old)
        .copied()
        .flatten()
        .map(|slot| slot.get() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_slot_roundtrip() {
        for slot in [0, 1, 17, INVALID_SLOT - 1] {
            assert_eq!(OptionalSlot::new(slot).map(|s| s.get()), Some(slot));
        }
        assert!(OptionalSlot::new(INVALID_SLOT).is_none());
    }

    #[test]
    fn optional_slot_is_niche_optimized() {
        assert_eq!(
            std::mem::size_of::<Option<OptionalSlot>>(),
            std::mem::size_of::<Slot>()
        );
    }

    #[test]
    fn permuted_lookup() {
        let permutation: SlotPermutation = vec![OptionalSlot::new(1), None, OptionalSlot::new(0)];
        assert_eq!(permuted(&permutation, 0), Some(1));
        assert_eq!(permuted(&permutation, 1), None);
        assert_eq!(permuted(&permutation, 2), Some(0));
        assert_eq!(permuted(&permutation, 3), None);
    }
}
