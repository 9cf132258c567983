use std::{cmp::Reverse, collections::BinaryHeap, hash::Hash, iter::Flatten, slice::Iter};

use fxhash::FxHashMap;

use crate::{error::*, slot::*};

/// Iterator over the vertices of a [`MatrixGraph`](super::MatrixGraph) in slot order
pub type Values<'a, V> = Flatten<Iter<'a, Option<V>>>;

/// Bidirectional mapping between vertex values and dense slots.
///
/// Slots are handed out from the high-water mark unless a released slot is available, in which
/// case the smallest released slot is reused. [`IndexAllocator::compact`] renumbers all live values
/// into `0..len()`.
#[derive(Clone, Debug)]
pub(crate) struct IndexAllocator<V> {
    slots: FxHashMap<V, Slot>,
    values: Vec<Option<V>>,
    free: BinaryHeap<Reverse<Slot>>,
}

impl<V> Default for IndexAllocator<V> {
    fn default() -> Self {
        Self {
            slots: FxHashMap::default(),
            values: Vec::new(),
            free: BinaryHeap::new(),
        }
    }
}

impl<V: Eq + Hash + Clone> IndexAllocator<V> {
    /// Creates an allocator without any values
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live values
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the smallest slot not handed out since the last compaction
    pub fn high_water_mark(&self) -> usize {
        self.values.len()
    }

    /// Returns *true* if the next [`IndexAllocator::assign`] yields a slot below `capacity`
    pub fn has_free_slot_below(&self, capacity: usize) -> bool {
        !self.free.is_empty() || self.values.len() < capacity
    }

    /// Returns *true* if `value` is live
    pub fn contains(&self, value: &V) -> bool {
        self.slots.contains_key(value)
    }

    /// Maps `value` to a fresh slot
    pub fn assign(&mut self, value: V) -> Result<Slot> {
        if self.contains(&value) {
            return Err(GraphError::DuplicateVertex);
        }

        let slot = match self.free.pop() {
            Some(Reverse(slot)) => {
                debug_assert!(self.values[slot as usize].is_none());
                self.values[slot as usize] = Some(value.clone());
                slot
            }
            None => {
                let slot = self.values.len() as Slot;
                self.values.push(Some(value.clone()));
                slot
            }
        };

        self.slots.insert(value, slot);
        Ok(slot)
    }

    /// Unmaps `value` and returns the slot it occupied
    pub fn release(&mut self, value: &V) -> Result<Slot> {
        let slot = self.slots.remove(value).ok_or(GraphError::UnknownVertex)?;
        self.values[slot as usize] = None;
        self.free.push(Reverse(slot));
        Ok(slot)
    }

    /// Returns the slot of `value`
    pub fn resolve(&self, value: &V) -> Result<Slot> {
        self.slots
            .get(value)
            .copied()
            .ok_or(GraphError::UnknownVertex)
    }

    /// Returns the value occupying `slot`
    pub fn resolve_reverse(&self, slot: Slot) -> Result<&V> {
        self.values
            .get(slot as usize)
            .and_then(Option::as_ref)
            .ok_or(GraphError::UnknownVertex)
    }

    /// Returns an iterator over all live values in slot order
    pub fn values(&self) -> Values<'_, V> {
        self.values.iter().flatten()
    }

    /// Renumbers all live values into `0..len()` keeping their relative slot order.
    ///
    /// Returns the permutation from old to new slots which has to be applied to all storage
    /// addressed by slots.
    pub fn compact(&mut self) -> SlotPermutation {
        let mut permutation: SlotPermutation = vec![None; self.values.len()];
        let old_values = std::mem::replace(&mut self.values, Vec::with_capacity(self.slots.len()));

        for (old_slot, value) in old_values.into_iter().enumerate() {
            let Some(value) = value else {
                continue;
            };

            let new_slot = self.values.len() as Slot;
            permutation[old_slot] = OptionalSlot::new(new_slot);
            if let Some(slot) = self.slots.get_mut(&value) {
                *slot = new_slot;
            }
            self.values.push(Some(value));
        }

        self.free.clear();
        debug_assert_eq!(self.values.len(), self.slots.len());
        permutation
    }

    /// Forgets all values
    pub fn clear(&mut self) {
        self.slots.clear();
        self.values.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn assign_and_resolve() {
        let mut allocator = IndexAllocator::new();
        assert_eq!(allocator.assign("a"), Ok(0));
        assert_eq!(allocator.assign("b"), Ok(1));
        assert_eq!(allocator.assign("a"), Err(GraphError::DuplicateVertex));

        assert_eq!(allocator.len(), 2);
        assert_eq!(allocator.resolve(&"b"), Ok(1));
        assert_eq!(allocator.resolve_reverse(0), Ok(&"a"));
        assert_eq!(allocator.resolve(&"c"), Err(GraphError::UnknownVertex));
        assert_eq!(allocator.resolve_reverse(2), Err(GraphError::UnknownVertex));
    }

    #[test]
    fn release_recycles_smallest_slot() {
        let mut allocator = IndexAllocator::new();
        for v in 0..5 {
            allocator.assign(v).unwrap();
        }

        assert_eq!(allocator.release(&3), Ok(3));
        assert_eq!(allocator.release(&1), Ok(1));
        assert_eq!(allocator.release(&1), Err(GraphError::UnknownVertex));
        assert_eq!(allocator.resolve_reverse(1), Err(GraphError::UnknownVertex));
        assert_eq!(allocator.len(), 3);
        assert_eq!(allocator.high_water_mark(), 5);

        assert_eq!(allocator.assign(10), Ok(1));
        assert_eq!(allocator.assign(11), Ok(3));
        assert_eq!(allocator.assign(12), Ok(5));
    }

    #[test]
    fn free_slots_below_capacity() {
        let mut allocator = IndexAllocator::new();
        assert!(allocator.has_free_slot_below(1));
        allocator.assign('x').unwrap();
        assert!(!allocator.has_free_slot_below(1));
        allocator.release(&'x').unwrap();
        assert!(allocator.has_free_slot_below(1));
    }

    #[test]
    fn compact_is_stable_and_dense() {
        let mut allocator = IndexAllocator::new();
        for v in ['a', 'b', 'c', 'd', 'e'] {
            allocator.assign(v).unwrap();
        }
        allocator.release(&'a').unwrap();
        allocator.release(&'d').unwrap();

        let permutation = allocator.compact();
        assert_eq!(
            permutation.iter().map(|s| s.map(|s| s.get())).collect_vec(),
            vec![None, Some(0), Some(1), None, Some(2)]
        );

        assert_eq!(allocator.high_water_mark(), 3);
        assert_eq!(allocator.values().copied().collect_vec(), vec!['b', 'c', 'e']);
        for v in ['b', 'c', 'e'] {
            let slot = allocator.resolve(&v).unwrap();
            assert_eq!(allocator.resolve_reverse(slot), Ok(&v));
        }

        // no stale free slots survive compaction
        assert_eq!(allocator.assign('f'), Ok(3));
    }
}
