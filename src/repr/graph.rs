/*!
# Matrix Graph

[`MatrixGraph`] composes a slot allocator (vertex values to slots) with a [`MatrixStore`]
(cells addressed by slots). The direction `Dir` decides whether edge writes are mirrored.

## Resizing
The matrix dimension (`capacity`) is always a power of two with
`vertex_count <= capacity <= 4 * vertex_count` (or `capacity == 1`):
- before a vertex is inserted into a full matrix, the capacity doubles,
- after a removal leaves at most `capacity / 4` vertices, the capacity halves.

Each resize compacts the allocator and replays all live cells through the resulting permutation
into a fresh matrix, so the costs amortize to `O(1)` per vertex operation.
*/

use std::{fmt, hash::Hash, marker::PhantomData};

use fxhash::FxHashSet;
use itertools::Itertools;
use tracing::{debug, trace};

use super::{IndexAllocator, MatrixStore, Values};
use crate::{edge::*, error::*, ops::*, slot::*};

/// A graph over vertex values of type `V` backed by a dynamically resized adjacency matrix.
///
/// # Type parameters
/// - `V`: vertex values, must be unique within a graph
/// - `S`: [`MatrixStore`] holding the edge cells (bits or weights)
/// - `Dir`: [`Directed`] or [`Undirected`]
pub struct MatrixGraph<V, S, Dir> {
    allocator: IndexAllocator<V>,
    matrix: S,
    num_edges: NumEdges,
    dir: PhantomData<Dir>,
}

impl<V: Clone, S: Clone, Dir> Clone for MatrixGraph<V, S, Dir> {
    fn clone(&self) -> Self {
        Self {
            allocator: self.allocator.clone(),
            matrix: self.matrix.clone(),
            num_edges: self.num_edges,
            dir: PhantomData,
        }
    }
}

impl<V, S, Dir> MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
    Dir: EdgeType,
{
    /// Wraps an empty store. The store is reset to capacity `1`.
    pub(crate) fn from_store(matrix: S) -> Self {
        Self {
            allocator: IndexAllocator::new(),
            matrix: matrix.empty_like(1),
            num_edges: 0,
            dir: PhantomData,
        }
    }

    /// Returns the current dimension of the adjacency matrix
    pub fn capacity(&self) -> usize {
        self.matrix.capacity()
    }

    pub(crate) fn matrix_store(&self) -> &S {
        &self.matrix
    }

    /// Compacts the slots and moves all live cells into a matrix of dimension `new_capacity`
    fn rebuild(&mut self, new_capacity: usize) {
        let old_capacity = self.matrix.capacity();
        let permutation = self.allocator.compact();

        let placeholder = self.matrix.empty_like(0);
        let matrix = std::mem::replace(&mut self.matrix, placeholder);
        self.matrix = matrix.resized(new_capacity, |old| permuted(&permutation, old));

        debug!(
            old_capacity,
            new_capacity,
            vertices = self.allocator.len(),
            "resized adjacency matrix"
        );
    }

    /// Doubles the capacity if the next vertex would not find a free slot
    fn reserve_slot(&mut self) {
        let capacity = self.matrix.capacity();
        if !self.allocator.has_free_slot_below(capacity) {
            self.rebuild(capacity * 2);
        }
    }

    /// Halves the capacity if at most a quarter of it is used
    fn shrink_if_sparse(&mut self) {
        let capacity = self.matrix.capacity();
        if capacity > 1 && self.allocator.len() <= capacity / 4 {
            self.rebuild(capacity / 2);
        }
    }

    fn slot_of(&self, u: &V) -> Result<usize> {
        Ok(self.allocator.resolve(u)? as usize)
    }

    fn slots_of(&self, u: &V, v: &V) -> Result<(usize, usize)> {
        Ok((self.slot_of(u)?, self.slot_of(v)?))
    }

    /// Writes cell `(i, j)` (and `(j, i)` if undirected). Returns the previous value.
    fn write_cell(&mut self, i: usize, j: usize, value: S::Value) -> Option<S::Value> {
        debug_assert!(!self.matrix.is_absent(&value));
        if !Dir::is_directed() && i != j {
            self.matrix.set(j, i, value.clone());
        }
        let prev = self.matrix.set(i, j, value);
        if prev.is_none() {
            self.num_edges += 1;
        }
        prev
    }

    /// Clears cell `(i, j)` (and `(j, i)` if undirected). Returns the previous value.
    fn erase_cell(&mut self, i: usize, j: usize) -> Option<S::Value> {
        if !Dir::is_directed() && i != j {
            self.matrix.reset(j, i);
        }
        let prev = self.matrix.reset(i, j);
        if prev.is_some() {
            self.num_edges -= 1;
        }
        prev
    }

    /// Inserts all cells of `batch` or, if any is already present or repeated, none
    fn write_cell_batch(&mut self, batch: Vec<(usize, usize, S::Value)>) -> Result<()> {
        let mut seen = FxHashSet::default();
        for &(i, j, _) in &batch {
            let key = if Dir::is_directed() {
                (i, j)
            } else {
                (i.min(j), i.max(j))
            };
            if self.matrix.contains(i, j) || !seen.insert(key) {
                return Err(GraphError::DuplicateEdge);
            }
        }

        for (i, j, value) in batch {
            self.write_cell(i, j, value);
        }
        Ok(())
    }

    /// Resolves all endpoints of `edges` and pairs them with the value to be stored
    fn resolve_batch<I>(&self, edges: I) -> Result<Vec<(usize, usize, S::Value)>>
    where
        I: IntoIterator<Item = (V, V, S::Value)>,
    {
        edges
            .into_iter()
            .map(|(u, v, value)| {
                if self.matrix.is_absent(&value) {
                    return Err(GraphError::InvalidWeight);
                }
                let (i, j) = self.slots_of(&u, &v)?;
                Ok((i, j, value))
            })
            .collect()
    }

    fn cells_of(&self, i: usize, transposed: bool) -> EdgesOf<'_, V, S> {
        EdgesOf {
            allocator: &self.allocator,
            matrix: &self.matrix,
            slot: i,
            cursor: 0,
            end: self.allocator.high_water_mark(),
            transposed,
        }
    }

    /// Checks all structural invariants. Used by tests.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self)
    where
        V: fmt::Debug,
        S::Value: PartialEq + fmt::Debug,
    {
        let n = self.allocator.len();
        let capacity = self.capacity();

        assert!(capacity.is_power_of_two());
        assert!(n <= capacity);
        assert!(capacity == 1 || capacity <= 4 * n, "n={n} capacity={capacity}");
        assert!(self.allocator.high_water_mark() <= capacity);

        for v in self.allocator.values() {
            let slot = self.allocator.resolve(v).unwrap();
            assert_eq!(self.allocator.resolve_reverse(slot).unwrap(), v);
        }

        let mut cells = 0;
        let mut loops = 0;
        for i in 0..capacity {
            for j in 0..capacity {
                if self.matrix.contains(i, j) {
                    assert!(self.allocator.resolve_reverse(i as Slot).is_ok());
                    assert!(self.allocator.resolve_reverse(j as Slot).is_ok());
                    cells += 1;
                    loops += (i == j) as usize;
                }
                if !Dir::is_directed() {
                    assert_eq!(self.matrix.get(i, j), self.matrix.get(j, i));
                }
            }
        }
        assert_eq!(cells, self.matrix.count_present());

        let expected_edges = if Dir::is_directed() {
            cells
        } else {
            (cells + loops) / 2
        };
        assert_eq!(self.num_edges, expected_edges);
    }
}

impl<V, S, Dir> GraphType for MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
    Dir: EdgeType,
{
    type Vertex = V;
    type Dir = Dir;
}

impl<V, S, Dir> GraphVertexOrder for MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
    Dir: EdgeType,
{
    fn vertex_count(&self) -> usize {
        self.allocator.len()
    }

    fn vertices(&self) -> impl Iterator<Item = &V> + Clone + '_ {
        self.allocator.values()
    }

    fn contains_vertex(&self, u: &V) -> bool {
        self.allocator.contains(u)
    }

    fn find_vertex(&self, u: &V) -> Option<&V> {
        let slot = self.allocator.resolve(u).ok()?;
        self.allocator.resolve_reverse(slot).ok()
    }
}

impl<V, S, Dir> GraphEdgeOrder for MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
    Dir: EdgeType,
{
    fn edge_count(&self) -> NumEdges {
        self.num_edges
    }
}

impl<V, S, Dir> GraphVertexEditing for MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
    Dir: EdgeType,
{
    fn add_vertex(&mut self, u: V) -> Result<()> {
        if self.allocator.contains(&u) {
            return Err(GraphError::DuplicateVertex);
        }

        self.reserve_slot();
        let slot = self.allocator.assign(u)?;
        trace!(slot, "added vertex");
        Ok(())
    }

    fn add_vertices(&mut self, vertices: impl IntoIterator<Item = V>) -> Result<()> {
        let vertices = vertices.into_iter().collect_vec();

        let mut seen = FxHashSet::default();
        if vertices
            .iter()
            .any(|u| self.allocator.contains(u) || !seen.insert(u))
        {
            return Err(GraphError::DuplicateVertex);
        }

        for u in vertices {
            self.add_vertex(u)?;
        }
        Ok(())
    }

    fn remove_vertex(&mut self, u: &V) -> Result<()> {
        let slot = self.slot_of(u)?;

        let has_loop = self.matrix.contains(slot, slot);
        let cleared = self.matrix.clear_slot(slot);
        self.num_edges -= if Dir::is_directed() {
            cleared
        } else {
            (cleared + has_loop as usize) / 2
        };

        self.allocator.release(u)?;
        trace!(slot, "removed vertex");

        self.shrink_if_sparse();
        Ok(())
    }

    fn clear(&mut self) {
        self.allocator.clear();
        self.matrix = self.matrix.empty_like(1);
        self.num_edges = 0;
    }
}

impl<V, S, Dir> AdjacencyTest for MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
    Dir: EdgeType,
{
    fn has_edge(&self, u: &V, v: &V) -> Result<bool> {
        let (i, j) = self.slots_of(u, v)?;
        Ok(self.matrix.contains(i, j))
    }
}

impl<V, S, Dir> AdjacencyList for MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
    Dir: EdgeType,
{
    type Weight = S::Value;

    fn edges_of(
        &self,
        u: &V,
    ) -> Result<impl Iterator<Item = (&V, &S::Value)> + Clone + '_> {
        Ok(self.cells_of(self.slot_of(u)?, false))
    }

    fn edges(&self) -> impl Iterator<Item = (&V, &V, &S::Value)> + '_ {
        EdgeReferences {
            allocator: &self.allocator,
            matrix: &self.matrix,
            row: 0,
            column: 0,
            end: self.allocator.high_water_mark(),
            directed: Dir::is_directed(),
        }
    }
}

impl<V, S> DirectedAdjacencyList for MatrixGraph<V, S, Directed>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
{
    fn in_edges_of(
        &self,
        u: &V,
    ) -> Result<impl Iterator<Item = (&V, &S::Value)> + Clone + '_> {
        Ok(self.cells_of(self.slot_of(u)?, true))
    }
}

/// Edge editing shared by weighted and unweighted graphs.
/// Unweighted graphs store `true` as their value.
impl<V, S, Dir> MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
    Dir: EdgeType,
{
    pub(crate) fn insert_edge(&mut self, u: &V, v: &V, value: S::Value) -> Result<()> {
        if self.matrix.is_absent(&value) {
            return Err(GraphError::InvalidWeight);
        }
        let (i, j) = self.slots_of(u, v)?;
        if self.matrix.contains(i, j) {
            return Err(GraphError::DuplicateEdge);
        }
        self.write_cell(i, j, value);
        Ok(())
    }

    pub(crate) fn upsert_edge(
        &mut self,
        u: &V,
        v: &V,
        value: S::Value,
    ) -> Result<Option<S::Value>> {
        if self.matrix.is_absent(&value) {
            return Err(GraphError::InvalidWeight);
        }
        let (i, j) = self.slots_of(u, v)?;
        Ok(self.write_cell(i, j, value))
    }

    pub(crate) fn insert_edges<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (V, V, S::Value)>,
    {
        let batch = self.resolve_batch(edges)?;
        self.write_cell_batch(batch)
    }

    pub(crate) fn delete_edge(&mut self, u: &V, v: &V) -> Result<Option<S::Value>> {
        let (i, j) = self.slots_of(u, v)?;
        Ok(self.erase_cell(i, j))
    }

    pub(crate) fn cell(&self, u: &V, v: &V) -> Result<Option<&S::Value>> {
        let (i, j) = self.slots_of(u, v)?;
        Ok(self.matrix.get(i, j))
    }
}

impl<'a, V, S, Dir> IntoIterator for &'a MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
    Dir: EdgeType,
{
    type Item = &'a V;
    type IntoIter = Values<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.allocator.values()
    }
}

impl<V, S, Dir> fmt::Debug for MatrixGraph<V, S, Dir>
where
    V: Eq + Hash + Clone + fmt::Debug,
    S: MatrixStore,
    S::Value: fmt::Debug,
    Dir: EdgeType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixGraph")
            .field("directed", &Dir::is_directed())
            .field("capacity", &self.capacity())
            .field("vertices", &self.vertices().collect_vec())
            .field("edges", &self.edges().collect_vec())
            .finish()
    }
}

/// Iterator over the present cells of one row (or column, if `transposed`) as
/// `(neighbor, value)` in slot order.
///
/// Created by [`AdjacencyList::edges_of`] and [`DirectedAdjacencyList::in_edges_of`].
pub struct EdgesOf<'a, V, S> {
    allocator: &'a IndexAllocator<V>,
    matrix: &'a S,
    slot: usize,
    cursor: usize,
    end: usize,
    transposed: bool,
}

impl<V, S> Clone for EdgesOf<'_, V, S> {
    fn clone(&self) -> Self {
        Self {
            allocator: self.allocator,
            matrix: self.matrix,
            slot: self.slot,
            cursor: self.cursor,
            end: self.end,
            transposed: self.transposed,
        }
    }
}

impl<'a, V, S> Iterator for EdgesOf<'a, V, S>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
{
    type Item = (&'a V, &'a S::Value);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.end {
            let k = self.cursor;
            self.cursor += 1;

            let cell = if self.transposed {
                self.matrix.get(k, self.slot)
            } else {
                self.matrix.get(self.slot, k)
            };

            if let Some(value) = cell {
                if let Ok(v) = self.allocator.resolve_reverse(k as Slot) {
                    return Some((v, value));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end - self.cursor))
    }
}

/// Iterator over all edges of a graph as `(u, v, value)`.
///
/// For undirected graphs, only cells `(i, j)` with `i <= j` are reported.
pub struct EdgeReferences<'a, V, S> {
    allocator: &'a IndexAllocator<V>,
    matrix: &'a S,
    row: usize,
    column: usize,
    end: usize,
    directed: bool,
}

impl<'a, V, S> Iterator for EdgeReferences<'a, V, S>
where
    V: Eq + Hash + Clone,
    S: MatrixStore,
{
    type Item = (&'a V, &'a V, &'a S::Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.column >= self.end {
                self.row += 1;
                self.column = if self.directed { 0 } else { self.row };
            }
            if self.row >= self.end {
                return None;
            }

            let (i, j) = (self.row, self.column);
            self.column += 1;

            if let Some(value) = self.matrix.get(i, j) {
                if let (Ok(u), Ok(v)) = (
                    self.allocator.resolve_reverse(i as Slot),
                    self.allocator.resolve_reverse(j as Slot),
                ) {
                    return Some((u, v, value));
                }
            }
        }
    }
}
