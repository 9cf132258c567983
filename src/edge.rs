use std::fmt::{Debug, Display};

/// An edge is defined by two vertex values/endpoints.
/// It is up to the graph whether an Edge is directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge<V>(pub V, pub V);

/// An edge together with its weight
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct WeightedEdge<V, W>(pub V, pub V, pub W);

/// We limit the number of edges to `2^64 - 1`, the matrix could not hold more cells anyway.
pub type NumEdges = usize;

impl<V: Display> Display for Edge<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl<V: Debug> Debug for Edge<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?},{:?})", self.0, self.1)
    }
}

impl<V> Edge<V> {
    /// Reverses the edge by switching the endpoints
    pub fn reverse(self) -> Self {
        Edge(self.1, self.0)
    }

    /// Attaches a weight to the edge
    pub fn with_weight<W>(self, weight: W) -> WeightedEdge<V, W> {
        WeightedEdge(self.0, self.1, weight)
    }

    /// Returns an edge of references to both endpoints
    pub fn as_ref(&self) -> Edge<&V> {
        Edge(&self.0, &self.1)
    }
}

impl<V: PartialEq> Edge<V> {
    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }
}

impl<V: Clone> Edge<&V> {
    /// Clones both endpoints
    pub fn cloned(&self) -> Edge<V> {
        Edge(self.0.clone(), self.1.clone())
    }
}

impl<V, W> WeightedEdge<V, W> {
    /// Splits off the weight
    pub fn into_parts(self) -> (Edge<V>, W) {
        (Edge(self.0, self.1), self.2)
    }
}

impl<V> From<(V, V)> for Edge<V> {
    fn from(value: (V, V)) -> Self {
        Edge(value.0, value.1)
    }
}

impl<V: Clone> From<&(V, V)> for Edge<V> {
    fn from(value: &(V, V)) -> Self {
        Edge(value.0.clone(), value.1.clone())
    }
}

impl<V: Clone> From<&Edge<V>> for Edge<V> {
    fn from(value: &Edge<V>) -> Self {
        value.clone()
    }
}

impl<V, W> From<(V, V, W)> for WeightedEdge<V, W> {
    fn from(value: (V, V, W)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_debug() {
        assert_eq!(format!("{}", Edge(1, 2)), "(1,2)");
        assert_eq!(format!("{:?}", Edge("a", "b")), "(\"a\",\"b\")");
    }

    #[test]
    fn reverse_and_loops() {
        assert_eq!(Edge('a', 'b').reverse(), Edge('b', 'a'));
        assert!(Edge(3, 3).is_loop());
        assert!(!Edge(3, 4).is_loop());
    }

    #[test]
    fn weights() {
        let (edge, weight) = Edge(0, 1).with_weight(2.5).into_parts();
        assert_eq!(edge, Edge(0, 1));
        assert_eq!(weight, 2.5);
        assert_eq!(WeightedEdge::from((1, 2, 3)), WeightedEdge(1, 2, 3));
    }
}
