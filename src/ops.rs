use std::hash::Hash;

use crate::{edge::*, error::*};

/// Marker trait for the direction of the edges of a graph
pub trait EdgeType {
    /// Returns *true* if `(u, v)` and `(v, u)` are distinct edges
    fn is_directed() -> bool;
}

/// Marker type for directed graphs
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Directed {}

/// Marker type for undirected graphs
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Undirected {}

impl EdgeType for Directed {
    #[inline]
    fn is_directed() -> bool {
        true
    }
}

impl EdgeType for Undirected {
    #[inline]
    fn is_directed() -> bool {
        false
    }
}

/// Provides the vertex type and edge direction of a graph
pub trait GraphType {
    /// Client-supplied vertex values; a graph keeps its own copies
    type Vertex: Eq + Hash + Clone;

    /// Either [`Directed`] or [`Undirected`]
    type Dir: EdgeType;

    /// Returns *true* if the graph is directed
    fn is_directed(&self) -> bool {
        Self::Dir::is_directed()
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph
    fn new() -> Self;
}

/// Provides getters pertaining to the vertex-size of a graph
pub trait GraphVertexOrder: GraphType {
    /// Returns the number of vertices of the graph
    fn vertex_count(&self) -> usize;

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = &Self::Vertex> + Clone + '_;

    /// Returns *true* if the vertex is present in the graph
    fn contains_vertex(&self, u: &Self::Vertex) -> bool;

    /// Returns the stored vertex equal to `u` or `None` if there is none
    fn find_vertex(&self, u: &Self::Vertex) -> Option<&Self::Vertex>;

    /// Returns an arbitrary but fixed vertex (the first one reported by
    /// [`GraphVertexOrder::vertices`]) or `None` if the graph is empty
    fn reference_vertex(&self) -> Option<&Self::Vertex> {
        self.vertices().next()
    }

    /// Returns *true* if the graph has no vertices (and thus no edges)
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph.
    /// In undirected graphs, `{u, v}` counts once.
    fn edge_count(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_edgeless(&self) -> bool {
        self.edge_count() == 0
    }
}

/// Provides functions to insert/delete vertices
pub trait GraphVertexEditing: GraphVertexOrder {
    /// Adds a vertex to the graph.
    /// Fails with [`GraphError::DuplicateVertex`] if the value is already present.
    fn add_vertex(&mut self, u: Self::Vertex) -> Result<()>;

    /// Adds all vertices in the collection.
    /// Either all vertices are added or, if any is already present or repeated, none.
    fn add_vertices(&mut self, vertices: impl IntoIterator<Item = Self::Vertex>) -> Result<()>;

    /// Removes a vertex and all edges adjacent to it.
    /// Fails with [`GraphError::UnknownVertex`] if the value is not present.
    fn remove_vertex(&mut self, u: &Self::Vertex) -> Result<()>;

    /// Removes all vertices and edges
    fn clear(&mut self);
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphType {
    /// Returns *true* if the edge (u,v) exists in the graph.
    /// Fails with [`GraphError::UnknownVertex`] if an endpoint is not present.
    fn has_edge(&self, u: &Self::Vertex, v: &Self::Vertex) -> Result<bool>;

    /// Returns *true* if a self-loop (u,u) exists.
    fn has_self_loop(&self, u: &Self::Vertex) -> Result<bool> {
        self.has_edge(u, u)
    }

    /// Returns *true* if there exists an edge (u,v) as well as (v,u) in the graph.
    /// Note that for undirected graphs with edge {u,v} this function always returns *true*.
    fn has_bidirected_edge(&self, u: &Self::Vertex, v: &Self::Vertex) -> Result<bool> {
        Ok(self.has_edge(u, v)? && self.has_edge(v, u)?)
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphVertexOrder {
    /// Value stored per edge: `bool` for unweighted matrices, `()` for unweighted adjacency lists,
    /// the weight otherwise
    type Weight;

    /// Returns an iterator over `(neighbor, weight)` of all edges leaving `u`, in storage order.
    /// The iterator is lazy and can be restarted by cloning it.
    ///
    /// Note that for directed graphs, this is equivalent to `out_edges_of`
    fn edges_of(
        &self,
        u: &Self::Vertex,
    ) -> Result<impl Iterator<Item = (&Self::Vertex, &Self::Weight)> + Clone + '_>;

    /// Returns an iterator over the (open) neighborhood of a given vertex.
    fn neighbors_of(
        &self,
        u: &Self::Vertex,
    ) -> Result<impl Iterator<Item = &Self::Vertex> + Clone + '_> {
        Ok(self.edges_of(u)?.map(|(v, _)| v))
    }

    /// Returns the number of (outgoing) neighbors of `u`
    fn degree_of(&self, u: &Self::Vertex) -> Result<usize> {
        Ok(self.edges_of(u)?.count())
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> usize {
        self.vertices()
            .filter_map(|u| self.degree_of(u).ok())
            .max()
            .unwrap_or(0)
    }

    /// Returns an iterator over all edges `(u, v, weight)` in the graph.
    /// For undirected graphs, every edge is reported exactly once.
    fn edges(&self) -> impl Iterator<Item = (&Self::Vertex, &Self::Vertex, &Self::Weight)> + '_;
}

macro_rules! propagate {
    ($out_fn:ident => $fn:ident($($arg:ident : $type:ty),*) -> $ret:ty) => {
        #[inline]
        fn $out_fn(&self, $($arg: $type),*) -> $ret {
            self.$fn($($arg),*)
        }
    };
}

pub trait DirectedAdjacencyList: AdjacencyList {
    propagate!(out_edges_of => edges_of(u: &Self::Vertex) -> Result<impl Iterator<Item = (&Self::Vertex, &Self::Weight)> + Clone + '_>);
    propagate!(out_neighbors_of => neighbors_of(u: &Self::Vertex) -> Result<impl Iterator<Item = &Self::Vertex> + Clone + '_>);
    propagate!(out_degree_of => degree_of(u: &Self::Vertex) -> Result<usize>);
    propagate!(max_out_degree => max_degree() -> usize);

    /// Returns an iterator over `(v, weight)` of all edges `(v, u)`, in storage order.
    fn in_edges_of(
        &self,
        u: &Self::Vertex,
    ) -> Result<impl Iterator<Item = (&Self::Vertex, &Self::Weight)> + Clone + '_>;

    /// Returns an iterator over vertices `v` with edges `(v, u)`
    fn in_neighbors_of(
        &self,
        u: &Self::Vertex,
    ) -> Result<impl Iterator<Item = &Self::Vertex> + Clone + '_> {
        Ok(self.in_edges_of(u)?.map(|(v, _)| v))
    }

    /// Returns the number of incoming neighbors of a given vertex
    fn in_degree_of(&self, u: &Self::Vertex) -> Result<usize> {
        Ok(self.in_edges_of(u)?.count())
    }

    /// Returns the out-degree plus the in-degree of a given vertex
    #[inline]
    fn total_degree_of(&self, u: &Self::Vertex) -> Result<usize> {
        Ok(self.out_degree_of(u)? + self.in_degree_of(u)?)
    }

    /// Returns the maximum in-degree in the graph
    fn max_in_degree(&self) -> usize {
        self.vertices()
            .filter_map(|u| self.in_degree_of(u).ok())
            .max()
            .unwrap_or(0)
    }
}

/// Provides functions to insert/delete edges of unweighted graphs
pub trait GraphEdgeEditing: GraphType {
    /// Adds the edge *(u,v)* to the graph.
    /// Fails with [`GraphError::DuplicateEdge`] if the edge was already present.
    fn add_edge(&mut self, u: &Self::Vertex, v: &Self::Vertex) -> Result<()> {
        if self.try_add_edge(u, v)? {
            Err(GraphError::DuplicateEdge)
        } else {
            Ok(())
        }
    }

    /// Adds the edge `(u, v)` to the graph.
    /// Returns *true* exactly if the edge was present previously.
    fn try_add_edge(&mut self, u: &Self::Vertex, v: &Self::Vertex) -> Result<bool>;

    /// Adds all edges in the collection.
    /// Either all edges are added or, if any endpoint is unknown or any edge already present or
    /// repeated, none.
    fn add_edges(
        &mut self,
        edges: impl IntoIterator<Item = impl Into<Edge<Self::Vertex>>>,
    ) -> Result<()>;

    /// Removes the edge *(u,v)* from the graph.
    /// Fails with [`GraphError::EdgeNotFound`] if the edge is not present.
    fn remove_edge(&mut self, u: &Self::Vertex, v: &Self::Vertex) -> Result<()> {
        if self.try_remove_edge(u, v)? {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound)
        }
    }

    /// Removes the edge *(u,v)* from the graph.
    /// If the edge was removed, returns *true* and *false* otherwise.
    fn try_remove_edge(&mut self, u: &Self::Vertex, v: &Self::Vertex) -> Result<bool>;
}

/// Provides functions to insert/delete edges of weighted graphs
pub trait WeightedGraphEdgeEditing: AdjacencyList {
    /// Adds the edge *(u,v)* with the given weight.
    /// Fails with [`GraphError::InvalidWeight`] if the weight equals the sentinel and
    /// with [`GraphError::DuplicateEdge`] if the edge was already present.
    fn add_edge(&mut self, u: &Self::Vertex, v: &Self::Vertex, weight: Self::Weight) -> Result<()>;

    /// Inserts the edge *(u,v)* or replaces its weight.
    /// Returns the previous weight if the edge was present.
    fn update_edge(
        &mut self,
        u: &Self::Vertex,
        v: &Self::Vertex,
        weight: Self::Weight,
    ) -> Result<Option<Self::Weight>>;

    /// Adds all weighted edges in the collection.
    /// Either all edges are added or none.
    fn add_edges(
        &mut self,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::Vertex, Self::Weight>>>,
    ) -> Result<()>;

    /// Removes the edge *(u,v)* and returns its weight.
    /// Fails with [`GraphError::EdgeNotFound`] if the edge is not present.
    fn remove_edge(&mut self, u: &Self::Vertex, v: &Self::Vertex) -> Result<Self::Weight>;

    /// Returns the weight of *(u,v)* or `None` if the edge is not present
    fn edge_weight(&self, u: &Self::Vertex, v: &Self::Vertex) -> Result<Option<&Self::Weight>>;
}

/// A super trait for creating an unweighted graph from scratch from a set of edges.
/// Endpoints are added as vertices when first encountered.
pub trait GraphFromScratch: GraphType + Sized {
    /// Create a graph from an iterator over Edges
    fn from_edges(edges: impl IntoIterator<Item = impl Into<Edge<Self::Vertex>>>)
    -> Result<Self>;
}

impl<G> GraphFromScratch for G
where
    G: GraphNew + GraphVertexEditing + GraphEdgeEditing,
{
    fn from_edges(
        edges: impl IntoIterator<Item = impl Into<Edge<Self::Vertex>>>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
            add_missing_endpoints(&mut graph, &u, &v)?;
            GraphEdgeEditing::add_edge(&mut graph, &u, &v)?;
        }
        Ok(graph)
    }
}

/// A super trait for creating a weighted graph from scratch from a set of weighted edges.
/// Endpoints are added as vertices when first encountered.
pub trait WeightedGraphFromScratch: AdjacencyList + Sized {
    /// Create a graph from an iterator over WeightedEdges
    fn from_edges(
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::Vertex, Self::Weight>>>,
    ) -> Result<Self>;
}

impl<G> WeightedGraphFromScratch for G
where
    G: GraphNew + GraphVertexEditing + WeightedGraphEdgeEditing,
{
    fn from_edges(
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::Vertex, Self::Weight>>>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        for WeightedEdge(u, v, weight) in edges.into_iter().map(|e| e.into()) {
            add_missing_endpoints(&mut graph, &u, &v)?;
            WeightedGraphEdgeEditing::add_edge(&mut graph, &u, &v, weight)?;
        }
        Ok(graph)
    }
}

fn add_missing_endpoints<G: GraphVertexEditing>(
    graph: &mut G,
    u: &G::Vertex,
    v: &G::Vertex,
) -> Result<()> {
    for x in [u, v] {
        if !graph.contains_vertex(x) {
            graph.add_vertex(x.clone())?;
        }
    }
    Ok(())
}
