//! Errors raised when mutating a [`Graph`](crate::Graph)

use crate::model::NodeId;
use thiserror::Error;

/// The graph refused a node or edge insertion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node with the same id was already inserted.
    #[error("node {0} already exists in the graph")]
    DuplicateNode(NodeId),

    /// An edge referenced a node that has not been inserted yet.
    #[error("node {0} does not exist in the graph")]
    UnknownNode(NodeId),
}
