use thiserror::Error;

use crate::graph::NodeId;

/// Graph-level failures. Each aborts the operation that triggered it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("node {id} is defined twice")]
    DuplicateNode { id: NodeId },

    #[error("node {id} is not in the graph")]
    UnknownNode { id: NodeId },

    #[error("cannot snap non-finite coordinate ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    #[error("edge {from} -> {to} has invalid weight {weight}; weights must be finite and >= 0")]
    InvalidWeight {
        from: NodeId,
        to: NodeId,
        weight: f64,
    },
}

/// Precondition failures of a route query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("origin node {id} is not in the graph")]
    UnknownOrigin { id: NodeId },

    #[error("target node {id} is not in the graph")]
    UnknownTarget { id: NodeId },

    #[error("no target nodes given")]
    NoTargets,
}
