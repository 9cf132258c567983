/*!
# Directed Graphs

In a directed graph, the edge `(u, v)` occupies only the cell `(slot(u), slot(v))`. Outgoing edges
of `u` are found by scanning its row, incoming edges by scanning its column, so both directions
cost `O(capacity)` per vertex without storing anything twice.

```
use dyngraphs::prelude::*;

let mut graph = DiGraph::new();
graph.add_vertices(["a", "b", "c"]).unwrap();
graph.add_edges([("a", "b"), ("c", "b")]).unwrap();

assert_eq!(graph.in_degree_of(&"b"), Ok(2));
assert_eq!(graph.out_degree_of(&"b"), Ok(0));
assert_eq!(graph.has_edge(&"b", &"a"), Ok(false));
```
*/

use super::*;
use crate::{ops::*, testing::test_graph_ops};

/// Unweighted directed graph over vertices `V`
pub type DiGraph<V> = MatrixGraph<V, BitMatrix, Directed>;

/// Weighted directed graph over vertices `V` with edge weights `W`
pub type WeightedDiGraph<V, W> = MatrixGraph<V, WeightMatrix<W>, Directed>;

test_graph_ops!(
    test_digraph,
    DiGraph<u32>,
    true,
    (VertexEditing, EdgeEditing, Resize, DirectedAdjacencyList)
);

test_graph_ops!(
    test_weighted_digraph,
    WeightedDiGraph<u32, i64>,
    true,
    (VertexEditing, WeightedEdgeEditing, Sentinel)
);

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::error::*;

    #[test]
    fn growth_on_second_vertex() {
        let mut graph = DiGraph::new();
        assert_eq!(graph.capacity(), 1);

        graph.add_vertex('x').unwrap();
        assert_eq!(graph.capacity(), 1);

        graph.add_vertex('y').unwrap();
        assert_eq!(graph.capacity(), 2);
        assert_eq!(graph.vertex_count(), 2);

        graph.add_vertex('z').unwrap();
        assert_eq!(graph.capacity(), 4);
        graph.assert_invariants();
    }

    #[test]
    fn freed_slot_is_reused_without_resize() {
        let mut graph = DiGraph::new();
        graph.add_vertices(0..4).unwrap();
        graph.add_edge(&1, &3).unwrap();
        assert_eq!(graph.capacity(), 4);

        graph.remove_vertex(&2).unwrap();
        graph.add_vertex(9).unwrap();
        assert_eq!(graph.capacity(), 4);
        assert_eq!(graph.has_edge(&1, &3), Ok(true));
        assert_eq!(graph.degree_of(&9), Ok(0));
        graph.assert_invariants();
    }

    #[test]
    fn orientation_is_kept() {
        let mut graph = DiGraph::new();
        graph.add_vertices(["a", "b"]).unwrap();
        graph.add_edge(&"a", &"b").unwrap();
        graph.add_edge(&"b", &"a").unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.has_bidirected_edge(&"a", &"b"), Ok(true));

        graph.remove_edge(&"a", &"b").unwrap();
        assert_eq!(graph.has_edge(&"b", &"a"), Ok(true));
        assert_eq!(graph.has_bidirected_edge(&"a", &"b"), Ok(false));
        assert_eq!(graph.edges().map(|(u, v, _)| (*u, *v)).collect_vec(), vec![("b", "a")]);
    }

    #[test]
    fn removing_a_vertex_removes_in_and_out_edges() {
        let mut graph = DiGraph::from_edges([(0, 1), (1, 2), (2, 1), (1, 1), (0, 2)]).unwrap();
        assert_eq!(graph.edge_count(), 5);

        graph.remove_vertex(&1).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.has_edge(&0, &2), Ok(true));
        assert_eq!(graph.has_edge(&0, &1), Err(GraphError::UnknownVertex));
        graph.assert_invariants();
    }

    #[test]
    fn weighted_paths() {
        let mut graph = WeightedDiGraph::from_edges([("s", "a", 4.0), ("a", "t", 1.5)]).unwrap();
        assert_eq!(graph.sentinel(), &0.0);
        assert_eq!(graph.edge_weight(&"s", &"a"), Ok(Some(&4.0)));
        assert_eq!(graph.edge_weight(&"a", &"s"), Ok(None));

        assert_eq!(graph.in_edges_of(&"t").unwrap().collect_vec(), vec![(&"a", &1.5)]);
        assert_eq!(graph.update_edge(&"s", &"t", 9.0), Ok(None));
        assert_eq!(
            graph.out_edges_of(&"s").unwrap().map(|(v, w)| (*v, *w)).collect_vec(),
            vec![("a", 4.0), ("t", 9.0)]
        );
    }

    #[test]
    fn vertices_in_insertion_order() {
        let mut graph = DiGraph::new();
        graph.add_vertices([3, 1, 2]).unwrap();
        assert_eq!(graph.vertices().copied().collect_vec(), vec![3, 1, 2]);
        assert_eq!((&graph).into_iter().count(), 3);

        let clone = graph.clone();
        graph.remove_vertex(&1).unwrap();
        assert_eq!(clone.vertex_count(), 3);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn debug_output() {
        let mut graph = DiGraph::new();
        graph.add_vertices([1, 2]).unwrap();
        graph.add_edge(&1, &2).unwrap();
        let text = format!("{graph:?}");
        assert!(text.starts_with("MatrixGraph"));
        assert!(text.contains("directed: true"));
        assert!(text.contains("(1, 2, true)"));
    }
}
