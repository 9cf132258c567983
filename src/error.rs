/*!
# Errors

Every fallible graph operation returns [`Result`]. All preconditions are checked before a graph
is mutated, so an `Err` always leaves the graph exactly as it was before the call.
*/

use thiserror::Error;

/// Errors reported by the graph operations of this crate
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphError {
    /// The vertex value is already present in the graph
    #[error("vertex already exists")]
    DuplicateVertex,

    /// The vertex value is not present in the graph
    #[error("vertex does not exist")]
    UnknownVertex,

    /// The edge is already present in the graph
    #[error("edge already exists")]
    DuplicateEdge,

    /// The edge is not present in the graph
    #[error("edge does not exist")]
    EdgeNotFound,

    /// The weight equals the sentinel marking absent edges and can thus not be stored
    #[error("weight equals the sentinel for absent edges")]
    InvalidWeight,
}

/// Shorthand for results of graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
