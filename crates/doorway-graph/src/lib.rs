//! Routable walkway graph, nearest-node snapping and multi-target routing.

pub mod error;
pub mod graph;
pub mod index;
pub mod router;

pub use error::{GraphError, RouteError};
pub use graph::{NodeId, WalkGraph, WalkNode};
pub use index::{nearest, SnapIndex};
pub use router::{route, Route, RouteOutcome};
