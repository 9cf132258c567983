/*!
`dyngraphs` provides graphs over arbitrary vertex values that are backed by an adjacency matrix
which grows and shrinks with the number of vertices.

# Representation

Vertices are client values of any type `V: Eq + Hash + Clone`. Internally, every vertex occupies a
dense *slot* which addresses a row and a column of a square matrix. The dimension of the matrix
(its *capacity*) is always a power of two between the number of vertices and four times that
number, so memory stays proportional to the current graph and not to its largest past size.

For **edges**, we use a simple tuple-struct `Edge(V, V)` or `WeightedEdge(V, V, W)`.

### Directed vs Undirected

We support both **directed** and **undirected** graphs:

- In a **directed** graph, `Edge(u, v)` and `Edge(v, u)` are distinct edges.
- In an **undirected** graph, `Edge(u, v)` is the same edge as `Edge(v, u)`; it is stored in both
  matrix cells but counted once.

### Available Representations

See the [`repr`] module for details:

- [`DiGraph`](crate::repr::DiGraph) and [`Graph`](crate::repr::Graph) store one bit per cell,
- [`WeightedDiGraph`](crate::repr::WeightedDiGraph) and
  [`WeightedGraph`](crate::repr::WeightedGraph) store one weight per cell and use a *sentinel*
  weight (`0` by default) to mark absent edges,
- [`ListDiGraph`](crate::repr::ListDiGraph), [`ListGraph`](crate::repr::ListGraph) and their
  weighted variants keep a hash map of neighbors per vertex instead of a matrix.

# Usage

All functionality is exposed via traits in [`ops`] which are implemented by every representation.
In most use-cases, `use dyngraphs::prelude::*;` suffices.

```
use dyngraphs::prelude::*;

let mut graph = Graph::new();
graph.add_vertices(["a", "b", "c"]).unwrap();
graph.add_edges([("a", "b"), ("b", "c"), ("c", "a")]).unwrap();

assert_eq!(graph.edge_count(), 3);
assert_eq!(graph.has_edge(&"b", &"a"), Ok(true));

graph.remove_vertex(&"b").unwrap();
assert_eq!(graph.edge_count(), 1);
assert_eq!(graph.add_edge(&"a", &"b"), Err(GraphError::UnknownVertex));
```

Failed operations never modify the graph; see [`error`].

# Logging

Matrix resizes are reported as `tracing` events on level `DEBUG`, vertex insertions and removals on
level `TRACE`. The crate does not install a subscriber.
*/

pub mod edge;
pub mod error;
pub mod ops;
pub mod repr;
pub(crate) mod slot;
pub(crate) mod testing;

/// `dyngraphs::prelude` includes definitions for edges and errors, all basic graph operation traits
/// as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, error::*, ops::*, repr::*};
}
