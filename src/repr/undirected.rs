/*!
# Undirected Graphs

In an undirected graph, the edge `{u, v}` occupies both cells `(slot(u), slot(v))` and
`(slot(v), slot(u))`, a self-loop only its diagonal cell. Every edge counts once in
[`GraphEdgeOrder::edge_count`](crate::ops::GraphEdgeOrder::edge_count) and is reported once by
[`AdjacencyList::edges`](crate::ops::AdjacencyList::edges).

```
use dyngraphs::prelude::*;

let mut graph = WeightedGraph::new();
graph.add_vertices(['a', 'b']).unwrap();
graph.add_edge(&'a', &'b', 3u32).unwrap();

assert_eq!(graph.edge_weight(&'b', &'a'), Ok(Some(&3)));
assert_eq!(graph.add_edge(&'b', &'a', 4), Err(GraphError::DuplicateEdge));
```
*/

use super::*;
use crate::{ops::*, testing::test_graph_ops};

/// Unweighted undirected graph over vertices `V`
pub type Graph<V> = MatrixGraph<V, BitMatrix, Undirected>;

/// Weighted undirected graph over vertices `V` with edge weights `W`
pub type WeightedGraph<V, W> = MatrixGraph<V, WeightMatrix<W>, Undirected>;

test_graph_ops!(
    test_graph,
    Graph<u32>,
    false,
    (VertexEditing, EdgeEditing, Resize)
);

test_graph_ops!(
    test_weighted_graph,
    WeightedGraph<u32, i64>,
    false,
    (VertexEditing, WeightedEdgeEditing, Sentinel)
);

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::error::*;

    #[test]
    fn triangle() {
        let mut graph = Graph::new();
        graph.add_vertices(["a", "b", "c"]).unwrap();
        graph.add_edges([("a", "b"), ("b", "c"), ("c", "a")]).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.capacity(), 4);
        for (u, v) in [("a", "b"), ("b", "c"), ("c", "a")] {
            assert_eq!(graph.has_edge(&u, &v), Ok(true));
            assert_eq!(graph.has_edge(&v, &u), Ok(true));
        }

        graph.remove_vertex(&"b").unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors_of(&"a").unwrap().collect_vec(), vec![&"c"]);
        graph.assert_invariants();
    }

    #[test]
    fn open_triangle() {
        let mut graph = Graph::new();
        graph.add_vertices(["A", "B", "C"]).unwrap();
        graph.add_edge(&"A", &"B").unwrap();
        graph.add_edge(&"B", &"C").unwrap();

        assert_eq!(graph.has_edge(&"A", &"C"), Ok(false));
        assert_eq!(graph.has_edge(&"C", &"A"), Ok(false));

        let edges = graph.edges_of(&"B").unwrap();
        let neighbors = edges.clone().map(|(v, _)| *v).collect_vec();
        assert_eq!(neighbors, vec!["A", "C"]);
        assert_eq!(edges.map(|(v, _)| *v).collect_vec(), neighbors);
        assert_eq!(graph.edges_of(&"B").unwrap().map(|(v, _)| *v).collect_vec(), neighbors);
        graph.assert_invariants();
    }

    #[test]
    fn writes_are_mirrored() {
        let mut graph = Graph::new();
        graph.add_vertices(0..3).unwrap();
        graph.add_edge(&2, &0).unwrap();
        assert_eq!(graph.add_edge(&0, &2), Err(GraphError::DuplicateEdge));
        assert_eq!(graph.try_add_edge(&0, &2), Ok(true));
        assert_eq!(graph.edge_count(), 1);

        assert_eq!(graph.remove_edge(&0, &2), Ok(()));
        assert_eq!(graph.has_edge(&2, &0), Ok(false));
        assert!(graph.is_edgeless());
    }

    #[test]
    fn self_loops_count_once() {
        let mut graph = Graph::from_edges([(1, 1), (1, 2)]).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.has_self_loop(&1), Ok(true));
        assert_eq!(graph.degree_of(&1), Ok(2));
        assert_eq!(graph.edges().count(), 2);

        graph.remove_vertex(&1).unwrap();
        assert_eq!(graph.edge_count(), 0);
        graph.assert_invariants();
    }

    #[test]
    fn bulk_rejects_both_orientations() {
        let mut graph = Graph::new();
        graph.add_vertices(0..2).unwrap();
        assert_eq!(graph.add_edges([(0, 1), (1, 0)]), Err(GraphError::DuplicateEdge));
        assert!(graph.is_edgeless());
    }

    #[test]
    fn zero_weight_is_rejected() {
        let mut graph = WeightedGraph::new();
        graph.add_vertices([0, 1]).unwrap();
        assert_eq!(graph.add_edge(&0, &1, 0), Err(GraphError::InvalidWeight));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.add_edge(&0, &1, -2), Ok(()));
        assert_eq!(graph.edge_weight(&1, &0), Ok(Some(&-2)));
    }

    #[test]
    fn custom_sentinel_allows_zero() {
        let mut graph = WeightedGraph::with_sentinel(u8::MAX);
        graph.add_vertices([0, 1]).unwrap();
        assert_eq!(graph.add_edge(&0, &1, 0), Ok(()));
        assert_eq!(graph.add_edge(&1, &1, u8::MAX), Err(GraphError::InvalidWeight));
        assert_eq!(graph.sentinel(), &u8::MAX);
        assert_eq!(graph.remove_edge(&1, &0), Ok(0));
    }

    #[test]
    fn resize_keeps_weights() {
        let mut graph = WeightedGraph::new();
        graph.add_vertices(0..9u32).unwrap();
        assert_eq!(graph.capacity(), 16);
        for u in 1..9 {
            graph.add_edge(&0, &u, u as i32 * 10).unwrap();
        }

        for u in 1..7 {
            graph.remove_vertex(&u).unwrap();
        }
        assert_eq!(graph.capacity(), 8);
        assert_eq!(graph.edge_weight(&0, &7), Ok(Some(&70)));
        assert_eq!(graph.edge_weight(&8, &0), Ok(Some(&80)));
        assert_eq!(graph.edge_count(), 2);

        graph.remove_vertex(&7).unwrap();
        assert_eq!(graph.capacity(), 4);
        assert_eq!(graph.edge_weight(&8, &0), Ok(Some(&80)));
        assert_eq!(graph.edge_count(), 1);
        graph.assert_invariants();
    }
}
