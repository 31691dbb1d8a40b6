//! Nearest-node snapping configuration

use serde::{Deserialize, Serialize};

/// How entrance points are matched to graph nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Distance metric for nearest-node queries
    #[serde(default)]
    pub metric: DistanceMetric,

    /// Node count below which a linear scan replaces the R-tree
    #[serde(default = "default_linear_scan_threshold")]
    pub linear_scan_threshold: usize,
}

/// Distance metric enum
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Planar coordinates, straight-line distance
    #[default]
    Euclidean,
    /// Geodetic coordinates (x = longitude, y = latitude), great-circle distance
    Haversine,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            metric: DistanceMetric::default(),
            linear_scan_threshold: default_linear_scan_threshold(),
        }
    }
}

impl crate::validation::Validate for SnapConfig {
    fn validate(&self) -> crate::error::Result<()> {
        crate::validation::validate_positive("snap.linear_scan_threshold", self.linear_scan_threshold as u64)
    }
}

fn default_linear_scan_threshold() -> usize {
    256
}
