use thiserror::Error;

use doorway_core::GeometryError;
use doorway_graph::{GraphError, RouteError};

/// Failures that abort catalog preparation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("failed to start snapping workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Failures of a single route query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("route search exceeded {timeout_ms} ms")]
    TimedOut { timeout_ms: u64 },

    #[error("route search worker failed: {0}")]
    Worker(String),
}

impl QueryError {
    /// Whether the same query may succeed if simply tried again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QueryError::TimedOut { .. })
    }
}
