/// Randomized tests shared by all graph aliases.
///
/// Every graph is tested with `u32` vertices against a simple reference model; weighted graphs
/// additionally need an `i64` weight type. The arms `Resize` and `Sentinel` only apply to
/// matrix-backed graphs.
macro_rules! test_graph_ops {
    ($env:ident, $graph:ty, $directed:literal, ($($arm:ident),*)) => {
        #[cfg(test)]
        mod $env {
            #![allow(unused_imports)]
            use crate::{error::*, ops::*, repr::*, testing::test_graph_ops};
            use fxhash::{FxHashMap, FxHashSet};
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            type TestGraph = $graph;

            /// Normalizes `(u, v)` such that both orientations of an undirected edge agree
            #[allow(dead_code)]
            fn key(u: u32, v: u32) -> (u32, u32) {
                if $directed { (u, v) } else { (u.min(v), u.max(v)) }
            }

            /// Returns all edges of the graph as sorted list of normalized pairs
            #[allow(dead_code)]
            fn sorted_edges(graph: &TestGraph) -> Vec<(u32, u32)> {
                graph.edges().map(|(&u, &v, _)| key(u, v)).sorted().collect_vec()
            }

            /// Creates a graph with vertices `0..n`
            #[allow(dead_code)]
            fn graph_with_vertices(n: u32) -> TestGraph {
                let mut graph = TestGraph::new();
                graph.add_vertices(0..n).unwrap();
                graph
            }

            $(
                test_graph_ops!(@$arm, $directed);
            )*
        }
    };
    (@VertexEditing, $directed:literal) => {
        #[test]
        fn vertex_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for range in [4u32, 16, 64] {
                let mut graph = TestGraph::new();
                let mut reference = FxHashSet::default();

                for _ in 0..(range * 20) {
                    let u = rng.random_range(0..range);
                    if reference.contains(&u) {
                        assert_eq!(graph.add_vertex(u), Err(GraphError::DuplicateVertex));
                        graph.remove_vertex(&u).unwrap();
                        reference.remove(&u);
                    } else {
                        assert_eq!(graph.remove_vertex(&u), Err(GraphError::UnknownVertex));
                        graph.add_vertex(u).unwrap();
                        reference.insert(u);
                    }

                    graph.assert_invariants();
                    assert_eq!(graph.vertex_count(), reference.len());
                    assert_eq!(graph.contains_vertex(&u), reference.contains(&u));
                    assert_eq!(graph.find_vertex(&u), reference.get(&u));
                    assert_eq!(graph.reference_vertex(), graph.vertices().next());
                }

                assert_eq!(
                    graph.vertices().copied().sorted().collect_vec(),
                    reference.iter().copied().sorted().collect_vec()
                );

                graph.clear();
                graph.assert_invariants();
                assert!(graph.is_empty());
                assert_eq!(graph.reference_vertex(), None);
            }
        }

        #[test]
        fn bulk_vertices_are_atomic() {
            let mut graph = graph_with_vertices(3);
            assert_eq!(graph.add_vertices([5, 6, 5]), Err(GraphError::DuplicateVertex));
            assert_eq!(graph.add_vertices([7, 2]), Err(GraphError::DuplicateVertex));
            assert_eq!(graph.vertex_count(), 3);
            assert!(!graph.contains_vertex(&5));
            assert!(!graph.contains_vertex(&7));
            graph.assert_invariants();
        }
    };
    (@EdgeEditing, $directed:literal) => {
        #[test]
        fn edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5u32, 12, 30] {
                for m in [n, n * 3, n * 8] {
                    let mut graph = graph_with_vertices(n);
                    let mut reference = FxHashSet::default();

                    for _ in 0..m {
                        let (u, v) = (rng.random_range(0..n), rng.random_range(0..n));
                        let was_present = !reference.insert(key(u, v));
                        assert_eq!(graph.try_add_edge(&u, &v), Ok(was_present));
                    }

                    graph.assert_invariants();
                    assert_eq!(graph.edge_count(), reference.len());
                    assert_eq!(sorted_edges(&graph), reference.iter().copied().sorted().collect_vec());

                    for u in 0..n {
                        for v in 0..n {
                            assert_eq!(graph.has_edge(&u, &v), Ok(reference.contains(&key(u, v))));
                        }
                    }

                    for _ in 0..m {
                        let (u, v) = (rng.random_range(0..n), rng.random_range(0..n));
                        let was_present = reference.remove(&key(u, v));
                        assert_eq!(graph.try_remove_edge(&u, &v), Ok(was_present));
                        assert_eq!(graph.edge_count(), reference.len());
                    }
                    graph.assert_invariants();

                    for u in (0..n).step_by(3) {
                        graph.remove_vertex(&u).unwrap();
                        reference.retain(|&(a, b)| a != u && b != u);
                        graph.assert_invariants();
                        assert_eq!(graph.edge_count(), reference.len());
                    }
                    assert_eq!(sorted_edges(&graph), reference.iter().copied().sorted().collect_vec());
                }
            }
        }

        #[test]
        fn edge_errors() {
            let mut graph = graph_with_vertices(2);
            assert_eq!(graph.add_edge(&0, &1), Ok(()));
            assert_eq!(graph.add_edge(&0, &1), Err(GraphError::DuplicateEdge));
            assert_eq!(graph.add_edge(&0, &2), Err(GraphError::UnknownVertex));
            assert_eq!(graph.has_edge(&2, &0), Err(GraphError::UnknownVertex));
            assert_eq!(graph.remove_edge(&0, &1), Ok(()));
            assert_eq!(graph.remove_edge(&0, &1), Err(GraphError::EdgeNotFound));
            assert_eq!(graph.remove_edge(&3, &1), Err(GraphError::UnknownVertex));
            assert!(graph.is_edgeless());
        }

        #[test]
        fn bulk_edges_are_atomic() {
            let mut graph = graph_with_vertices(4);
            graph.add_edge(&0, &1).unwrap();

            assert_eq!(graph.add_edges([(1, 2), (0, 1)]), Err(GraphError::DuplicateEdge));
            assert_eq!(graph.add_edges([(1, 2), (1, 2)]), Err(GraphError::DuplicateEdge));
            assert_eq!(graph.add_edges([(1, 2), (2, 9)]), Err(GraphError::UnknownVertex));
            assert_eq!(graph.edge_count(), 1);
            assert_eq!(graph.has_edge(&1, &2), Ok(false));

            assert_eq!(graph.add_edges([(1, 2), (2, 3), (3, 3)]), Ok(()));
            assert_eq!(graph.edge_count(), 4);
            graph.assert_invariants();
        }

        #[test]
        fn from_edges_adds_endpoints() {
            let graph = TestGraph::from_edges([(0, 1), (1, 2), (2, 0)]).unwrap();
            assert_eq!(graph.vertex_count(), 3);
            assert_eq!(graph.edge_count(), 3);
            graph.assert_invariants();

            assert_eq!(
                TestGraph::from_edges([(0, 1), (0, 1)]).map(|g| g.edge_count()),
                Err(GraphError::DuplicateEdge)
            );
        }
    };
    (@WeightedEdgeEditing, $directed:literal) => {
        #[test]
        fn weighted_edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5u32, 12, 30] {
                let mut graph = graph_with_vertices(n);
                let mut reference = FxHashMap::default();

                for _ in 0..(n * 10) {
                    let (u, v) = (rng.random_range(0..n), rng.random_range(0..n));
                    if rng.random_bool(0.3) {
                        let expected = reference.remove(&key(u, v)).ok_or(GraphError::EdgeNotFound);
                        assert_eq!(graph.remove_edge(&u, &v), expected);
                    } else {
                        let weight = rng.random_range(1..100);
                        assert_eq!(graph.update_edge(&u, &v, weight), Ok(reference.insert(key(u, v), weight)));
                    }
                }

                graph.assert_invariants();
                assert_eq!(graph.edge_count(), reference.len());
                for u in 0..n {
                    for v in 0..n {
                        assert_eq!(graph.edge_weight(&u, &v), Ok(reference.get(&key(u, v))));
                    }
                }

                let total: i64 = graph.edges().map(|(_, _, &w)| w).sum();
                assert_eq!(total, reference.values().sum::<i64>());

                for u in (0..n).step_by(2) {
                    graph.remove_vertex(&u).unwrap();
                    reference.retain(|&(a, b), _| a != u && b != u);
                    graph.assert_invariants();
                }
                for (&(u, v), w) in &reference {
                    assert_eq!(graph.edge_weight(&u, &v), Ok(Some(w)));
                }
                assert_eq!(graph.edge_count(), reference.len());
            }
        }

        #[test]
        fn weighted_edge_errors() {
            let mut graph = graph_with_vertices(2);
            assert_eq!(graph.add_edge(&0, &7, 1), Err(GraphError::UnknownVertex));
            assert_eq!(graph.update_edge(&7, &1, 1), Err(GraphError::UnknownVertex));

            assert_eq!(graph.add_edge(&0, &1, 5), Ok(()));
            assert_eq!(graph.add_edge(&0, &1, 6), Err(GraphError::DuplicateEdge));
            assert_eq!(graph.edge_weight(&0, &1), Ok(Some(&5)));
            assert_eq!(graph.update_edge(&0, &1, 6), Ok(Some(5)));
            assert_eq!(graph.remove_edge(&0, &1), Ok(6));
            assert_eq!(graph.remove_edge(&0, &1), Err(GraphError::EdgeNotFound));
            assert_eq!(graph.edge_weight(&0, &1), Ok(None));
            assert_eq!(graph.edge_count(), 0);
        }

        #[test]
        fn bulk_weighted_edges_are_atomic() {
            let mut graph = graph_with_vertices(3);
            assert_eq!(graph.add_edges([(0, 1, 2), (1, 9, 3)]), Err(GraphError::UnknownVertex));
            assert_eq!(graph.add_edges([(0, 1, 2), (0, 1, 3)]), Err(GraphError::DuplicateEdge));
            assert_eq!(graph.edge_count(), 0);

            assert_eq!(graph.add_edges([(0, 1, 2), (1, 2, 3)]), Ok(()));
            assert_eq!(graph.edge_weight(&1, &2), Ok(Some(&3)));
            assert_eq!(graph.edge_count(), 2);
            graph.assert_invariants();
        }
    };
    (@Resize, $directed:literal) => {
        #[test]
        fn capacity_follows_vertex_count() {
            let mut graph = TestGraph::new();
            assert_eq!(graph.capacity(), 1);

            graph.add_vertices(0..3).unwrap();
            assert_eq!(graph.capacity(), 4);
            graph.add_vertex(3).unwrap();
            assert_eq!(graph.capacity(), 4);
            graph.add_vertex(4).unwrap();
            assert_eq!(graph.capacity(), 8);

            graph.clear();
            assert_eq!(graph.capacity(), 1);
        }

        #[test]
        fn resize_preserves_edges() {
            let n = 40u32;
            let mut graph = graph_with_vertices(n);
            assert_eq!(graph.capacity(), 64);

            let mut reference = FxHashSet::default();
            for u in 0..n {
                let v = (u * 7 + 3) % n;
                graph.try_add_edge(&u, &v).unwrap();
                reference.insert(key(u, v));
            }

            let mut capacities = vec![graph.capacity()];
            for u in 0..n {
                graph.remove_vertex(&u).unwrap();
                reference.retain(|&(a, b)| a != u && b != u);

                graph.assert_invariants();
                assert_eq!(sorted_edges(&graph), reference.iter().copied().sorted().collect_vec());
                capacities.push(graph.capacity());
            }

            assert_eq!(capacities.into_iter().dedup().collect_vec(), vec![64, 32, 16, 8, 4, 2, 1]);
        }
    };
    (@Sentinel, $directed:literal) => {
        #[test]
        fn sentinel_weight_is_rejected() {
            let mut graph = graph_with_vertices(3);
            assert_eq!(graph.add_edge(&0, &1, 0), Err(GraphError::InvalidWeight));
            assert_eq!(graph.add_edge(&0, &7, 0), Err(GraphError::InvalidWeight));
            assert_eq!(graph.update_edge(&0, &1, 0), Err(GraphError::InvalidWeight));
            assert_eq!(graph.add_edges([(0, 1, 2), (1, 2, 0)]), Err(GraphError::InvalidWeight));
            assert_eq!(graph.add_edges([(0, 9, 2), (1, 2, 0)]), Err(GraphError::InvalidWeight));
            assert_eq!(graph.edge_count(), 0);
            graph.assert_invariants();
        }
    };
    (@DirectedAdjacencyList, $directed:literal) => {
        #[test]
        fn directed_adjacency_list() {
            assert!($directed);
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5u32, 12, 30] {
                let mut graph = graph_with_vertices(n);
                let mut out_nbs: FxHashMap<u32, Vec<u32>> = FxHashMap::default();
                let mut in_nbs: FxHashMap<u32, Vec<u32>> = FxHashMap::default();

                for _ in 0..(n * 4) {
                    let (u, v) = (rng.random_range(0..n), rng.random_range(0..n));
                    if !graph.try_add_edge(&u, &v).unwrap() {
                        out_nbs.entry(u).or_default().push(v);
                        in_nbs.entry(v).or_default().push(u);
                    }
                }

                for u in 0..n {
                    let outs = out_nbs.get(&u).cloned().unwrap_or_default();
                    let ins = in_nbs.get(&u).cloned().unwrap_or_default();

                    assert_eq!(graph.out_neighbors_of(&u).unwrap().copied().sorted().collect_vec(), outs.iter().copied().sorted().collect_vec());
                    assert_eq!(graph.in_neighbors_of(&u).unwrap().copied().sorted().collect_vec(), ins.iter().copied().sorted().collect_vec());
                    assert_eq!(graph.out_degree_of(&u), Ok(outs.len()));
                    assert_eq!(graph.in_degree_of(&u), Ok(ins.len()));
                    assert_eq!(graph.total_degree_of(&u), Ok(outs.len() + ins.len()));
                }

                assert_eq!(graph.max_out_degree(), out_nbs.values().map(Vec::len).max().unwrap_or(0));
                assert_eq!(graph.max_in_degree(), in_nbs.values().map(Vec::len).max().unwrap_or(0));
                assert_eq!(graph.in_edges_of(&n).map(|it| it.count()), Err(GraphError::UnknownVertex));
            }
        }
    };
}

pub(crate) use test_graph_ops;
