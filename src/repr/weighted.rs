use std::hash::Hash;

use num::Zero;

use super::*;
use crate::{edge::*, error::*, ops::*};

impl<V, W, Dir> MatrixGraph<V, WeightMatrix<W>, Dir>
where
    V: Eq + Hash + Clone,
    W: Clone + PartialEq,
    Dir: EdgeType,
{
    /// Creates an empty graph in which `sentinel` marks absent edges.
    /// The sentinel can not be used as an edge weight.
    ///
    /// # Panics
    /// Panics if `sentinel` is not equal to itself (e.g. `f64::NAN`), as absent cells could then
    /// not be told apart from present ones.
    ///
    /// # Example
    /// ```
    /// use dyngraphs::prelude::*;
    ///
    /// // zero-weight edges are legitimate here
    /// let mut graph = WeightedDiGraph::with_sentinel(f64::INFINITY);
    /// graph.add_vertices(["a", "b"]).unwrap();
    /// graph.add_edge(&"a", &"b", 0.0).unwrap();
    /// assert_eq!(graph.edge_weight(&"a", &"b"), Ok(Some(&0.0)));
    /// assert_eq!(graph.add_edge(&"b", &"a", f64::INFINITY), Err(GraphError::InvalidWeight));
    /// ```
    pub fn with_sentinel(sentinel: W) -> Self {
        let copy = sentinel.clone();
        assert!(copy == sentinel, "sentinel must be equal to itself");
        Self::from_store(WeightMatrix::new(1, sentinel))
    }

    /// Returns the value marking absent edges
    pub fn sentinel(&self) -> &W {
        self.matrix_store().sentinel()
    }
}

impl<V, W, Dir> GraphNew for MatrixGraph<V, WeightMatrix<W>, Dir>
where
    V: Eq + Hash + Clone,
    W: Clone + PartialEq + Zero,
    Dir: EdgeType,
{
    /// Creates an empty graph using `W::zero()` as sentinel
    fn new() -> Self {
        Self::with_sentinel(W::zero())
    }
}

impl<V, W, Dir> Default for MatrixGraph<V, WeightMatrix<W>, Dir>
where
    V: Eq + Hash + Clone,
    W: Clone + PartialEq + Zero,
    Dir: EdgeType,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, W, Dir> WeightedGraphEdgeEditing for MatrixGraph<V, WeightMatrix<W>, Dir>
where
    V: Eq + Hash + Clone,
    W: Clone + PartialEq,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "sentinel must be equal to itself")]
    fn nan_sentinel_is_rejected() {
        let _ = WeightedDiGraph::<u32, f64>::with_sentinel(f64::NAN);
    }

    #[test]
    fn infinite_sentinel_is_accepted() {
        let graph = WeightedGraph::<u32, f64>::with_sentinel(f64::NEG_INFINITY);
        assert_eq!(*graph.sentinel(), f64::NEG_INFINITY);
    }
}
