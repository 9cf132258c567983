use std::mem;

use fixedbitset::FixedBitSet;

/// Square `capacity x capacity` storage of edge cells addressed by slot coordinates.
///
/// A cell is either *present* (holds a value) or *absent*. Row `i` holds the cells `(i, _)`,
/// column `j` the cells `(_, j)`.
pub trait MatrixStore: Clone {
    /// Value held by present cells
    type Value: Clone;

    /// Creates a store of the same kind and configuration with all `capacity^2` cells absent
    fn empty_like(&self, capacity: usize) -> Self;

    /// Returns the dimension of the matrix
    fn capacity(&self) -> usize;

    /// Returns *true* if `value` marks an absent cell
    fn is_absent(&self, value: &Self::Value) -> bool;

    /// Returns the value of cell `(i, j)` or `None` if it is absent.
    /// ** Panics if `i >= capacity || j >= capacity` **
    fn get(&self, i: usize, j: usize) -> Option<&Self::Value>;

    /// Returns *true* if cell `(i, j)` is present.
    /// ** Panics if `i >= capacity || j >= capacity` **
    fn contains(&self, i: usize, j: usize) -> bool {
        self.get(i, j).is_some()
    }

    /// Writes `value` into cell `(i, j)` and returns the previous value if the cell was present.
    /// Writing an absent value is equivalent to [`MatrixStore::reset`].
    /// ** Panics if `i >= capacity || j >= capacity` **
    fn set(&mut self, i: usize, j: usize, value: Self::Value) -> Option<Self::Value>;

    /// Clears cell `(i, j)` and returns its previous value if it was present.
    /// ** Panics if `i >= capacity || j >= capacity` **
    fn reset(&mut self, i: usize, j: usize) -> Option<Self::Value>;

    /// Clears row `i` and column `i`. Returns the number of cells that were present.
    /// ** Panics if `i >= capacity` **
    fn clear_slot(&mut self, i: usize) -> usize {
        let mut cleared = 0;
        for k in 0..self.capacity() {
            cleared += self.reset(i, k).is_some() as usize;
            if k != i {
                cleared += self.reset(k, i).is_some() as usize;
            }
        }
        cleared
    }

    /// Consumes the store and returns one of dimension `new_capacity` in which every present cell
    /// `(i, j)` with both `permutation(i)` and `permutation(j)` being `Some` is moved to
    /// `(permutation(i), permutation(j))`. All other cells are dropped.
    ///
    /// Runs in `O(capacity^2 + new_capacity^2)`.
    /// ** Panics if a permuted index is `>= new_capacity` **
    fn resized(self, new_capacity: usize, permutation: impl Fn(usize) -> Option<usize>) -> Self;

    /// Returns the number of present cells
    fn count_present(&self) -> usize;
}

/// Unweighted adjacency matrix: one bit per cell, stored row-major in a single bitset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix {
    bits: FixedBitSet,
    capacity: usize,
}

impl BitMatrix {
    /// Creates a matrix with all cells absent
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity * capacity),
            capacity,
        }
    }

    #[inline]
    fn position(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.capacity && j < self.capacity,
            "cell ({i}, {j}) out of bounds for capacity {}",
            self.capacity
        );
        i * self.capacity + j
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MatrixStore for BitMatrix {
    type Value = bool;

    fn empty_like(&self, capacity: usize) -> Self {
        Self::new(capacity)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_absent(&self, value: &bool) -> bool {
        !*value
    }

    fn get(&self, i: usize, j: usize) -> Option<&bool> {
        self.bits.contains(self.position(i, j)).then_some(&true)
    }

    fn set(&mut self, i: usize, j: usize, value: bool) -> Option<bool> {
        if !value {
            return self.reset(i, j);
        }
        let pos = self.position(i, j);
        self.bits.put(pos).then_some(true)
    }

    fn reset(&mut self, i: usize, j: usize) -> Option<bool> {
        let pos = self.position(i, j);
        let was_set = self.bits.contains(pos);
        self.bits.set(pos, false);
        was_set.then_some(true)
    }

    fn resized(self, new_capacity: usize, permutation: impl Fn(usize) -> Option<usize>) -> Self {
        let mut matrix = Self::new(new_capacity);
        for pos in self.bits.ones() {
            let (i, j) = (pos / self.capacity, pos % self.capacity);
            if let (Some(i), Some(j)) = (permutation(i), permutation(j)) {
                let pos = matrix.position(i, j);
                matrix.bits.insert(pos);
            }
        }
        matrix
    }

    fn count_present(&self) -> usize {
        self.bits.count_ones(..)
    }
}

/// Weighted adjacency matrix: one weight per cell, stored row-major.
///
/// Absent cells hold a configured `sentinel`, hence the sentinel itself can never be stored as a
/// weight.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightMatrix<W> {
    cells: Vec<W>,
    capacity: usize,
    sentinel: W,
}

impl<W: Clone + PartialEq> WeightMatrix<W> {
    /// Creates a matrix with all cells holding `sentinel`
    pub fn new(capacity: usize, sentinel: W) -> Self {
        Self {
            cells: vec![sentinel.clone(); capacity * capacity],
            capacity,
            sentinel,
        }
    }

    /// Returns the value marking absent cells
    pub fn sentinel(&self) -> &W {
        &self.sentinel
    }

    #[inline]
    fn position(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.capacity && j < self.capacity,
            "cell ({i}, {j}) out of bounds for capacity {}",
            self.capacity
        );
        i * self.capacity + j
    }

    #[inline]
    fn present(&self, value: W) -> Option<W> {
        if value == self.sentinel {
            None
        } else {
            Some(value)
        }
    }
}

impl<W: Clone + PartialEq> MatrixStore for WeightMatrix<W> {
    type Value = W;

    fn empty_like(&self, capacity: usize) -> Self {
        Self::new(capacity, self.sentinel.clone())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_absent(&self, value: &W) -> bool {
        *value == self.sentinel
    }

    fn get(&self, i: usize, j: usize) -> Option<&W> {
        let cell = &self.cells[self.position(i, j)];
        (*cell != self.sentinel).then_some(cell)
    }

    fn set(&mut self, i: usize, j: usize, value: W) -> Option<W> {
        let pos = self.position(i, j);
        let prev = mem::replace(&mut self.cells[pos], value);
        self.present(prev)
    }

    fn reset(&mut self, i: usize, j: usize) -> Option<W> {
        let pos = self.position(i, j);
        let prev = mem::replace(&mut self.cells[pos], self.sentinel.clone());
        self.present(prev)
    }

    fn resized(self, new_capacity: usize, permutation: impl Fn(usize) -> Option<usize>) -> Self {
        let mut matrix = self.empty_like(new_capacity);
        let capacity = self.capacity;
        for (pos, cell) in self.cells.into_iter().enumerate() {
            if matrix.is_absent(&cell) {
                continue;
            }
            let (i, j) = (pos / capacity, pos % capacity);
            if let (Some(i), Some(j)) = (permutation(i), permutation(j)) {
                let pos = matrix.position(i, j);
                matrix.cells[pos] = cell;
            }
        }
        matrix
    }

    fn count_present(&self) -> usize {
        self.cells.iter().filter(|w| **w != self.sentinel).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_matrix_cells() {
        let mut matrix = BitMatrix::new(4);
        assert_eq!(matrix.count_present(), 0);

        assert_eq!(matrix.set(1, 2, true), None);
        assert_eq!(matrix.set(1, 2, true), Some(true));
        assert!(matrix.contains(1, 2));
        assert!(!matrix.contains(2, 1));

        assert_eq!(matrix.set(1, 2, false), Some(true));
        assert_eq!(matrix.reset(1, 2), None);
        assert_eq!(matrix.count_present(), 0);
    }

    #[test]
    #[should_panic]
    fn bit_matrix_out_of_bounds() {
        BitMatrix::new(2).get(0, 2);
    }

    #[test]
    fn weight_matrix_cells() {
        let mut matrix = WeightMatrix::new(2, 0i32);
        assert_eq!(matrix.get(0, 1), None);
        assert_eq!(matrix.set(0, 1, 7), None);
        assert_eq!(matrix.get(0, 1), Some(&7));
        assert_eq!(matrix.set(0, 1, -3), Some(7));
        assert_eq!(matrix.reset(0, 1), Some(-3));
        assert_eq!(matrix.get(0, 1), None);
    }

    #[test]
    fn weight_matrix_custom_sentinel() {
        let mut matrix = WeightMatrix::new(2, f64::INFINITY);
        assert!(matrix.is_absent(&f64::INFINITY));
        assert!(!matrix.is_absent(&0.0));
        matrix.set(1, 1, 0.0);
        assert_eq!(matrix.get(1, 1), Some(&0.0));
        assert_eq!(matrix.count_present(), 1);
    }

    #[test]
    fn clear_slot_counts_cells_once() {
        let mut matrix = BitMatrix::new(4);
        for (i, j) in [(2, 0), (2, 2), (3, 2), (2, 3), (0, 1)] {
            matrix.set(i, j, true);
        }
        assert_eq!(matrix.clear_slot(2), 4);
        assert_eq!(matrix.count_present(), 1);
        assert!(matrix.contains(0, 1));
    }

    #[test]
    fn resize_grows_with_identity() {
        let mut matrix = WeightMatrix::new(2, 0u8);
        matrix.set(0, 1, 5);
        matrix.set(1, 1, 6);

        let matrix = matrix.resized(4, Some);
        assert_eq!(matrix.capacity(), 4);
        assert_eq!(matrix.get(0, 1), Some(&5));
        assert_eq!(matrix.get(1, 1), Some(&6));
        assert_eq!(matrix.count_present(), 2);
    }

    #[test]
    fn resize_applies_permutation_and_drops_dead_cells() {
        let mut matrix = BitMatrix::new(4);
        matrix.set(0, 3, true);
        matrix.set(3, 0, true);
        matrix.set(1, 3, true);

        // slot 1 is dead, 3 -> 1, 0 -> 0
        let permutation = [Some(0), None, None, Some(1)];
        let matrix = matrix.resized(2, |i| permutation[i]);

        assert_eq!(matrix.capacity(), 2);
        assert!(matrix.contains(0, 1));
        assert!(matrix.contains(1, 0));
        assert_eq!(matrix.count_present(), 2);
    }
}
