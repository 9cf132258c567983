/*!
# Adjacency Lists

[`AdjListGraph`] stores for every vertex a hash map of its outgoing neighbors (and, if directed,
one of its incoming neighbors). In contrast to [`MatrixGraph`](super::MatrixGraph), memory is
proportional to `n + m` and there is no resizing, but edge lookups cost a hash instead of an
index computation.

All maps keep insertion order, hence iteration is deterministic: vertices are reported in the
order they were added, neighbors in the order their edges were added.

```
use dyngraphs::prelude::*;

let mut graph = WeightedListDiGraph::new();
graph.add_vertices(["a", "b", "c"]).unwrap();
graph.add_edges([("a", "b", 2), ("c", "b", 5)]).unwrap();

assert_eq!(graph.reference_vertex(), Some(&"a"));
assert_eq!(graph.in_edges_of(&"b").unwrap().collect::<Vec<_>>(), vec![(&"a", &2), (&"c", &5)]);
```
*/

use std::{fmt, hash::Hash, marker::PhantomData};

use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::trace;

use crate::{edge::*, error::*, ops::*, testing::test_graph_ops};

type Map<K, T> = IndexMap<K, T, FxBuildHasher>;

/// Selects what an [`AdjListGraph`] stores per edge
pub trait ListWeighting {
    /// Value stored per edge
    type Value: Clone;
}

/// Marker for adjacency lists without edge weights
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Unweighted {}

/// Marker for adjacency lists with edge weights of type `W`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Weighted<W>(PhantomData<W>);

impl ListWeighting for Unweighted {
    type Value = ();
}

impl<W: Clone> ListWeighting for Weighted<W> {
    type Value = W;
}

#[derive(Clone)]
struct Adjacency<V, W> {
    out: Map<V, W>,
    inc: Map<V, W>,
}

impl<V, W> Default for Adjacency<V, W> {
    fn default() -> Self {
        Self {
            out: Map::default(),
            inc: Map::default(),
        }
    }
}

/// A graph over vertex values of type `V` storing one hash map of neighbors per vertex.
///
/// # Type parameters
/// - `V`: vertex values, must be unique within a graph
/// - `S`: [`Unweighted`] or [`Weighted<W>`]
/// - `Dir`: [`Directed`] or [`Undirected`]
pub struct AdjListGraph<V, S: ListWeighting, Dir> {
    vertices: Map<V, Adjacency<V, S::Value>>,
    num_edges: NumEdges,
    dir: PhantomData<(S, Dir)>,
}

/// Unweighted directed adjacency list over vertices `V`
pub type ListDiGraph<V> = AdjListGraph<V, Unweighted, Directed>;

/// Unweighted undirected adjacency list over vertices `V`
pub type ListGraph<V> = AdjListGraph<V, Unweighted, Undirected>;

/// Weighted directed adjacency list over vertices `V` with edge weights `W`
pub type WeightedListDiGraph<V, W> = AdjListGraph<V, Weighted<W>, Directed>;

/// Weighted undirected adjacency list over vertices `V` with edge weights `W`
pub type WeightedListGraph<V, W> = AdjListGraph<V, Weighted<W>, Undirected>;

impl<V: Clone, S: ListWeighting, Dir> Clone for AdjListGraph<V, S, Dir> {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            num_edges: self.num_edges,
            dir: PhantomData,
        }
    }
}

impl<V, S, Dir> AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
    Dir: EdgeType,
{
    fn adjacency(&self, u: &V) -> Result<&Adjacency<V, S::Value>> {
        self.vertices.get(u).ok_or(GraphError::UnknownVertex)
    }

    fn index_of(&self, u: &V) -> Result<usize> {
        self.vertices.get_index_of(u).ok_or(GraphError::UnknownVertex)
    }

    fn indices_of(&self, u: &V, v: &V) -> Result<(usize, usize)> {
        Ok((self.index_of(u)?, self.index_of(v)?))
    }

    /// Writes `(u, v)` where `i`/`j` are the positions of `u`/`v`. Returns the previous value.
    fn write(
        &mut self,
        (u, i): (&V, usize),
        (v, j): (&V, usize),
        value: S::Value,
    ) -> Option<S::Value> {
        let prev = self.vertices[i].out.insert(v.clone(), value.clone());
        if Dir::is_directed() {
            self.vertices[j].inc.insert(u.clone(), value);
        } else if i != j {
            self.vertices[j].out.insert(u.clone(), value);
        }

        if prev.is_none() {
            self.num_edges += 1;
        }
        prev
    }

    /// Clears `(u, v)` where `i`/`j` are the positions of `u`/`v`. Returns the previous value.
    fn erase(&mut self, (u, i): (&V, usize), (v, j): (&V, usize)) -> Option<S::Value> {
        let prev = self.vertices[i].out.shift_remove(v)?;
        if Dir::is_directed() {
            self.vertices[j].inc.shift_remove(u);
        } else if i != j {
            self.vertices[j].out.shift_remove(u);
        }

        self.num_edges -= 1;
        Some(prev)
    }

    fn insert_edge(&mut self, u: &V, v: &V, value: S::Value) -> Result<()> {
        let (i, j) = self.indices_of(u, v)?;
        if self.vertices[i].out.contains_key(v) {
            return Err(GraphError::DuplicateEdge);
        }
        self.write((u, i), (v, j), value);
        Ok(())
    }

    fn upsert_edge(&mut self, u: &V, v: &V, value: S::Value) -> Result<Option<S::Value>> {
        let (i, j) = self.indices_of(u, v)?;
        Ok(self.write((u, i), (v, j), value))
    }

    fn delete_edge(&mut self, u: &V, v: &V) -> Result<Option<S::Value>> {
        let (i, j) = self.indices_of(u, v)?;
        Ok(self.erase((u, i), (v, j)))
    }

    fn cell(&self, u: &V, v: &V) -> Result<Option<&S::Value>> {
        let (i, _) = self.indices_of(u, v)?;
        Ok(self.vertices[i].out.get(v))
    }

    /// Inserts all edges or, if any endpoint is unknown or any edge already present or repeated,
    /// none
    fn insert_edges<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (V, V, S::Value)>,
    {
        let batch: Vec<_> = edges
            .into_iter()
            .map(|(u, v, value)| {
                let (i, j) = self.indices_of(&u, &v)?;
                Ok((u, i, v, j, value))
            })
            .collect::<Result<_>>()?;

        let mut seen = FxHashSet::default();
        for (_, i, v, j, _) in &batch {
            let key = if Dir::is_directed() {
                (*i, *j)
            } else {
                (*i.min(j), *i.max(j))
            };
            if self.vertices[*i].out.contains_key(v) || !seen.insert(key) {
                return Err(GraphError::DuplicateEdge);
            }
        }

        for (u, i, v, j, value) in batch {
            self.write((&u, i), (&v, j), value);
        }
        Ok(())
    }

    /// Checks that every edge is stored at both endpoints and counted. Used by tests.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self)
    where
        V: fmt::Debug,
        S::Value: PartialEq + fmt::Debug,
    {
        let mut entries = 0;
        let mut loops = 0;
        for (u, adjacency) in &self.vertices {
            for (v, value) in &adjacency.out {
                let other = self.vertices.get(v).expect("neighbor must be a vertex");
                let mirror = if Dir::is_directed() {
                    other.inc.get(u)
                } else {
                    other.out.get(u)
                };
                assert_eq!(mirror, Some(value), "edge ({u:?}, {v:?}) is not mirrored");

                entries += 1;
                loops += (u == v) as usize;
            }

            if Dir::is_directed() {
                for (v, value) in &adjacency.inc {
                    assert_eq!(self.vertices.get(v).and_then(|o| o.out.get(u)), Some(value));
                }
            } else {
                assert!(adjacency.inc.is_empty());
            }
        }

        let expected_edges = if Dir::is_directed() {
            entries
        } else {
            (entries + loops) / 2
        };
        assert_eq!(self.num_edges, expected_edges);
    }
}

impl<V, S, Dir> GraphType for AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
    Dir: EdgeType,
{
    type Vertex = V;
    type Dir = Dir;
}

impl<V, S, Dir> GraphNew for AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
    Dir: EdgeType,
{
    fn new() -> Self {
        Self {
            vertices: Map::default(),
            num_edges: 0,
            dir: PhantomData,
        }
    }
}

impl<V, S, Dir> Default for AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
    Dir: EdgeType,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S, Dir> GraphVertexOrder for AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
    Dir: EdgeType,
{
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertices(&self) -> impl Iterator<Item = &V> + Clone + '_ {
        self.vertices.keys()
    }

    fn contains_vertex(&self, u: &V) -> bool {
        self.vertices.contains_key(u)
    }

    fn find_vertex(&self, u: &V) -> Option<&V> {
        self.vertices.get_key_value(u).map(|(v, _)| v)
    }
}

impl<V, S, Dir> GraphEdgeOrder for AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
    Dir: EdgeType,
{
    fn edge_count(&self) -> NumEdges {
        self.num_edges
    }
}

impl<V, S, Dir> GraphVertexEditing for AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
    Dir: EdgeType,
{
    fn add_vertex(&mut self, u: V) -> Result<()> {
        if self.vertices.contains_key(&u) {
            return Err(GraphError::DuplicateVertex);
        }
        self.vertices.insert(u, Adjacency::default());
        trace!(vertices = self.vertices.len(), "added vertex");
        Ok(())
    }

    fn add_vertices(&mut self, vertices: impl IntoIterator<Item = V>) -> Result<()> {
        let vertices = vertices.into_iter().collect_vec();

        let mut seen = FxHashSet::default();
        if vertices
            .iter()
            .any(|u| self.vertices.contains_key(u) || !seen.insert(u))
        {
            return Err(GraphError::DuplicateVertex);
        }

        for u in vertices {
            self.add_vertex(u)?;
        }
        Ok(())
    }

    fn remove_vertex(&mut self, u: &V) -> Result<()> {
        let adjacency = self
            .vertices
            .shift_remove(u)
            .ok_or(GraphError::UnknownVertex)?;

        for v in adjacency.out.keys().filter(|v| *v != u) {
            if let Some(other) = self.vertices.get_mut(v) {
                if Dir::is_directed() {
                    other.inc.shift_remove(u);
                } else {
                    other.out.shift_remove(u);
                }
            }
        }
        for v in adjacency.inc.keys().filter(|v| *v != u) {
            if let Some(other) = self.vertices.get_mut(v) {
                other.out.shift_remove(u);
            }
        }

        let has_loop = adjacency.out.contains_key(u) as usize;
        self.num_edges -= if Dir::is_directed() {
            adjacency.out.len() + adjacency.inc.len() - has_loop
        } else {
            adjacency.out.len()
        };

        trace!(vertices = self.vertices.len(), "removed vertex");
        Ok(())
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.num_edges = 0;
    }
}

impl<V, S, Dir> AdjacencyTest for AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
    Dir: EdgeType,
{
    fn has_edge(&self, u: &V, v: &V) -> Result<bool> {
        Ok(self.cell(u, v)?.is_some())
    }
}

impl<V, S, Dir> AdjacencyList for AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
    Dir: EdgeType,
{
    type Weight = S::Value;

    fn edges_of(
        &self,
        u: &V,
    ) -> Result<impl Iterator<Item = (&V, &S::Value)> + Clone + '_> {
        Ok(self.adjacency(u)?.out.iter())
    }

    fn degree_of(&self, u: &V) -> Result<usize> {
        Ok(self.adjacency(u)?.out.len())
    }

    fn edges(&self) -> impl Iterator<Item = (&V, &V, &S::Value)> + '_ {
        let vertices = &self.vertices;
        vertices
            .iter()
            .enumerate()
            .flat_map(move |(i, (u, adjacency))| {
                adjacency
                    .out
                    .iter()
                    .filter(move |(v, _)| {
                        Dir::is_directed() || vertices.get_index_of(*v).is_some_and(|j| i <= j)
                    })
                    .map(move |(v, value)| (u, v, value))
            })
    }
}

impl<V, S> DirectedAdjacencyList for AdjListGraph<V, S, Directed>
where
    V: Eq + Hash + Clone,
    S: ListWeighting,
{
    fn in_edges_of(
        &self,
        u: &V,
    ) -> Result<impl Iterator<Item = (&V, &S::Value)> + Clone + '_> {
        Ok(self.adjacency(u)?.inc.iter())
    }

    fn in_degree_of(&self, u: &V) -> Result<usize> {
        Ok(self.adjacency(u)?.inc.len())
    }
}

impl<V, Dir> GraphEdgeEditing for AdjListGraph<V, Unweighted, Dir>
where
    V: Eq + Hash + Clone,
    Dir: EdgeType,
{
    fn add_edge(&mut self, u: &V, v: &V) -> Result<()> {
        self.insert_edge(u, v, ())
    }

    fn try_add_edge(&mut self, u: &V, v: &V) -> Result<bool> {
        Ok(self.upsert_edge(u, v, ())?.is_some())
    }

    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge<V>>>) -> Result<()> {
        self.insert_edges(edges.into_iter().map(|e| {
            let Edge(u, v) = e.into();
            (u, v, ())
        }))
    }

    fn try_remove_edge(&mut self, u: &V, v: &V) -> Result<bool> {
        Ok(self.delete_edge(u, v)?.is_some())
    }
}

impl<V, W, Dir> WeightedGraphEdgeEditing for AdjListGraph<V, Weighted<W>, Dir>
where
    V: Eq + Hash + Clone,
    W: Clone,
    Dir: EdgeType,
{
    fn add_edge(&mut self, u: &V, v: &V, weight: W) -> Result<()> {
        self.insert_edge(u, v, weight)
    }

    fn update_edge(&mut self, u: &V, v: &V, weight: W) -> Result<Option<W>> {
        self.upsert_edge(u, v, weight)
    }

    fn add_edges(
        &mut self,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<V, W>>>,
    ) -> Result<()> {
        self.insert_edges(edges.into_iter().map(|e| {
            let WeightedEdge(u, v, weight) = e.into();
            (u, v, weight)
        }))
    }

    fn remove_edge(&mut self, u: &V, v: &V) -> Result<W> {
        self.delete_edge(u, v)?.ok_or(GraphError::EdgeNotFound)
    }

    fn edge_weight(&self, u: &V, v: &V) -> Result<Option<&W>> {
        self.cell(u, v)
    }
}

impl<V, S, Dir> fmt::Debug for AdjListGraph<V, S, Dir>
where
    V: Eq + Hash + Clone + fmt::Debug,
    S: ListWeighting,
    S::Value: fmt::Debug,
    Dir: EdgeType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdjListGraph")
            .field("directed", &Dir::is_directed())
            .field("vertices", &self.vertices().collect_vec())
            .field("edges", &self.edges().collect_vec())
            .finish()
    }
}

test_graph_ops!(
    test_list_digraph,
    ListDiGraph<u32>,
    true,
    (VertexEditing, EdgeEditing, DirectedAdjacencyList)
);

test_graph_ops!(
    test_weighted_list_digraph,
    WeightedListDiGraph<u32, i64>,
    true,
    (VertexEditing, WeightedEdgeEditing)
);

test_graph_ops!(test_list_graph, ListGraph<u32>, false, (VertexEditing, EdgeEditing));

test_graph_ops!(
    test_weighted_list_graph,
    WeightedListGraph<u32, i64>,
    false,
    (VertexEditing, WeightedEdgeEditing)
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_keeps_insertion_order() {
        let mut graph = ListGraph::new();
        graph.add_vertices(["A", "B", "C"]).unwrap();
        graph.add_edge(&"A", &"B").unwrap();
        graph.add_edge(&"B", &"C").unwrap();

        assert_eq!(graph.has_edge(&"A", &"C"), Ok(false));
        assert_eq!(graph.has_edge(&"C", &"B"), Ok(true));

        let neighbors = graph.neighbors_of(&"B").unwrap();
        assert_eq!(neighbors.clone().collect_vec(), vec![&"A", &"C"]);
        assert_eq!(neighbors.collect_vec(), vec![&"A", &"C"]);
        graph.assert_invariants();
    }

    #[test]
    fn reference_and_find_vertex() {
        let mut graph = ListDiGraph::new();
        assert_eq!(graph.reference_vertex(), None);

        graph.add_vertices([String::from("x"), String::from("y")]).unwrap();
        assert_eq!(graph.reference_vertex().map(String::as_str), Some("x"));
        assert_eq!(graph.find_vertex(&String::from("y")).map(String::as_str), Some("y"));
        assert_eq!(graph.find_vertex(&String::from("z")), None);

        graph.remove_vertex(&String::from("x")).unwrap();
        assert_eq!(graph.reference_vertex().map(String::as_str), Some("y"));
    }

    #[test]
    fn directed_loops_and_removal() {
        let mut graph = ListDiGraph::from_edges([(0, 1), (1, 1), (1, 2), (2, 1), (0, 2)]).unwrap();
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.in_degree_of(&1), Ok(3));
        assert_eq!(graph.out_degree_of(&1), Ok(2));

        graph.remove_vertex(&1).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.in_neighbors_of(&2).unwrap().collect_vec(), vec![&0]);
        graph.assert_invariants();
    }

    #[test]
    fn undirected_loops_count_once() {
        let mut graph = ListGraph::from_edges([(1, 1), (1, 2)]).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree_of(&1), Ok(2));
        assert_eq!(graph.edges().count(), 2);

        graph.remove_vertex(&1).unwrap();
        assert!(graph.is_edgeless());
        assert_eq!(graph.degree_of(&2), Ok(0));
        graph.assert_invariants();
    }

    #[test]
    fn zero_weights_are_edges() {
        let mut graph = WeightedListGraph::new();
        graph.add_vertices(['a', 'b']).unwrap();
        assert_eq!(graph.add_edge(&'a', &'b', 0.0), Ok(()));
        assert_eq!(graph.edge_weight(&'b', &'a'), Ok(Some(&0.0)));
        assert_eq!(graph.update_edge(&'b', &'a', f64::NAN).map(|w| w.is_some()), Ok(true));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.remove_edge(&'a', &'b').unwrap().is_nan());
        assert!(graph.is_edgeless());
    }

    #[test]
    fn debug_output() {
        let graph = ListDiGraph::from_edges([(1, 2)]).unwrap();
        let text = format!("{graph:?}");
        assert!(text.starts_with("AdjListGraph"));
        assert!(text.contains("(1, 2, ())"));
    }
}
