use std::hash::Hash;

use super::*;
use crate::{edge::*, error::*, ops::*};

impl<V, Dir> GraphNew for MatrixGraph<V, BitMatrix, Dir>
where
    V: Eq + Hash + Clone,
    Dir: EdgeType,
{
    fn new() -> Self {
        Self::from_store(BitMatrix::default())
    }
}

impl<V, Dir> Default for MatrixGraph<V, BitMatrix, Dir>
where
    V: Eq + Hash + Clone,
    Dir: EdgeType,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, Dir> GraphEdgeEditing for MatrixGraph<V, BitMatrix, Dir>
where
    V: Eq + Hash + Clone,
    Dir: EdgeType,
{
    fn add_edge(&mut self, u: &V, v: &V) -> Result<()> {
        self.insert_edge(u, v, true)
    }

    fn try_add_edge(&mut self, u: &V, v: &V) -> Result<bool> {
        Ok(self.upsert_edge(u, v, true)?.is_some())
    }

    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge<V>>>) -> Result<()> {
        self.insert_edges(edges.into_iter().map(|e| {
            let Edge(u, v) = e.into();
            (u, v, true)
        }))
    }

    fn try_remove_edge(&mut self, u: &V, v: &V) -> Result<bool> {
        Ok(self.delete_edge(u, v)?.is_some())
    }
}
