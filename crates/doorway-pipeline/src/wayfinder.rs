use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use doorway_config::RouterConfig;
use doorway_graph::{route, NodeId, Route, RouteOutcome, WalkGraph};

use crate::catalog::BuildingCatalog;
use crate::error::QueryError;

/// Answer to "how do I walk from here to that building?".
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Found(Route),
    /// The catalog has no entrances for this name; nothing was routed.
    UnknownBuilding { name: String },
    /// The building is known but none of its entrances is reachable.
    NoPath,
}

/// Query facade over a shared graph and catalog.
#[derive(Debug, Clone)]
pub struct Wayfinder {
    graph: Arc<WalkGraph>,
    catalog: Arc<BuildingCatalog>,
    router: RouterConfig,
}

impl Wayfinder {
    pub fn new(graph: Arc<WalkGraph>, catalog: Arc<BuildingCatalog>, router: RouterConfig) -> Self {
        Self { graph, catalog, router }
    }

    pub fn graph(&self) -> &WalkGraph {
        &self.graph
    }

    pub fn catalog(&self) -> &BuildingCatalog {
        &self.catalog
    }

    /// Origin used when the caller names none: the lowest node id.
    pub fn default_origin(&self) -> Option<NodeId> {
        self.graph.min_node_id()
    }

    pub fn route_to_building(&self, origin: NodeId, building: &str) -> Result<QueryOutcome, QueryError> {
        let targets = self.catalog.lookup(building);
        if targets.is_empty() {
            debug!(building, "no entrances catalogued");
            return Ok(QueryOutcome::UnknownBuilding {
                name: building.to_string(),
            });
        }

        Ok(match route(&self.graph, origin, targets, self.router.strategy)? {
            RouteOutcome::Found(found) => QueryOutcome::Found(found),
            RouteOutcome::NoPath => QueryOutcome::NoPath,
        })
    }

    /// Same as [`route_to_building`](Self::route_to_building), bounded by
    /// `router.timeout_ms`. The search runs on tokio's blocking pool; a
    /// timeout is reported as the retryable `QueryError::TimedOut`.
    ///
    /// The blocking search is detached, not cancelled, when the limit
    /// fires: it runs to completion and its result is discarded. Every
    /// search terminates, so the worker is always returned to the pool.
    pub async fn route_to_building_with_timeout(
        &self,
        origin: NodeId,
        building: &str,
    ) -> Result<QueryOutcome, QueryError> {
        let this = self.clone();
        let name = building.to_string();
        let limit = self.router.timeout_ms;

        let task = tokio::task::spawn_blocking(move || this.route_to_building(origin, &name));
        match timeout(Duration::from_millis(limit), task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(QueryError::Worker(join_error.to_string())),
            Err(_) => {
                warn!(building, timeout_ms = limit, "route search timed out");
                Err(QueryError::TimedOut { timeout_ms: limit })
            }
        }
    }
}
