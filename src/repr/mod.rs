/*!
# Graph Representations

Matrix-backed graphs are instances of [`MatrixGraph`], parameterized by
- the [`MatrixStore`] holding the cells: [`BitMatrix`] (unweighted) or [`WeightMatrix`] (weighted),
- the direction: [`Directed`](crate::ops::Directed) or [`Undirected`](crate::ops::Undirected).

The four combinations are available as aliases:

| | unweighted | weighted |
|---|---|---|
| directed | [`DiGraph`] | [`WeightedDiGraph`] |
| undirected | [`Graph`] | [`WeightedGraph`] |

Vertices are arbitrary client values. Internally, each vertex occupies a dense *slot*, and slots
address rows and columns of the matrix.

Graphs without a matrix are instances of [`AdjListGraph`], which stores a hash map of neighbors per
vertex:

| | unweighted | weighted |
|---|---|---|
| directed | [`ListDiGraph`] | [`WeightedListDiGraph`] |
| undirected | [`ListGraph`] | [`WeightedListGraph`] |
*/

mod allocator;
mod directed;
mod graph;
mod list;
mod matrix;
mod undirected;
mod unweighted;
mod weighted;

pub(crate) use allocator::IndexAllocator;
pub use allocator::Values;
pub use directed::*;
pub use graph::*;
pub use list::*;
pub use matrix::*;
pub use undirected::*;
