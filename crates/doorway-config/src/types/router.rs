//! Router configuration

use serde::{Deserialize, Serialize};

/// Multi-target routing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Search strategy
    #[serde(default)]
    pub strategy: RouteStrategy,

    /// Per-query time limit for service callers (milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// How the router explores candidate targets
///
/// Every strategy returns the same route and weight.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteStrategy {
    /// One Dijkstra run per target
    PerTarget,
    /// One Dijkstra run that stops once every target is settled
    #[default]
    SingleSearch,
    /// One Dijkstra run per target, spread over the rayon pool
    Parallel,
}

impl RouteStrategy {
    /// Accepted spellings, for error messages
    pub const OPTIONS: [&'static str; 3] = ["per_target", "single_search", "parallel"];

    /// Parse the snake_case name
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().replace('-', "_").as_str() {
            "per_target" => Some(Self::PerTarget),
            "single_search" => Some(Self::SingleSearch),
            "parallel" => Some(Self::Parallel),
            _ => None,
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strategy: RouteStrategy::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl crate::validation::Validate for RouterConfig {
    fn validate(&self) -> crate::error::Result<()> {
        crate::validation::validate_positive("router.timeout_ms", self.timeout_ms)
    }
}

fn default_timeout_ms() -> u64 {
    5_000
}
