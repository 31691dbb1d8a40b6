//! Partial configuration: only the settings a source actually names

use crate::types::*;
use crate::Config;
use serde::Deserialize;
use std::path::PathBuf;

/// A setting is overridden exactly when its field is `Some`, whatever the
/// value, including one equal to the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    pub data: DataOverlay,
    pub snap: SnapOverlay,
    pub catalog: CatalogOverlay,
    pub router: RouterOverlay,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataOverlay {
    pub graph_path: Option<PathBuf>,
    /// `Some(None)` removes a cache path set by an earlier source
    pub graph_cache_path: Option<Option<PathBuf>>,
    pub buildings_path: Option<PathBuf>,
    pub entrances_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnapOverlay {
    pub metric: Option<DistanceMetric>,
    pub linear_scan_threshold: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogOverlay {
    pub parallel: Option<bool>,
    pub workers: Option<usize>,
    pub unnamed_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouterOverlay {
    pub strategy: Option<RouteStrategy>,
    pub timeout_ms: Option<u64>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl ConfigOverlay {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, config: &mut Config) {
        let Self {
            data,
            snap,
            catalog,
            router,
        } = self;

        set(&mut config.data.graph_path, data.graph_path);
        set(&mut config.data.graph_cache_path, data.graph_cache_path);
        set(&mut config.data.buildings_path, data.buildings_path);
        set(&mut config.data.entrances_path, data.entrances_path);
        set(&mut config.data.catalog_path, data.catalog_path);

        set(&mut config.snap.metric, snap.metric);
        set(&mut config.snap.linear_scan_threshold, snap.linear_scan_threshold);

        set(&mut config.catalog.parallel, catalog.parallel);
        set(&mut config.catalog.workers, catalog.workers);
        set(&mut config.catalog.unnamed_prefix, catalog.unnamed_prefix);

        set(&mut config.router.strategy, router.strategy);
        set(&mut config.router.timeout_ms, router.timeout_ms);
    }
}

/// Every setting of `config`, so applying it reproduces `config` exactly.
impl From<Config> for ConfigOverlay {
    fn from(config: Config) -> Self {
        let Config {
            data,
            snap,
            catalog,
            router,
        } = config;
        Self {
            data: DataOverlay {
                graph_path: Some(data.graph_path),
                graph_cache_path: Some(data.graph_cache_path),
                buildings_path: Some(data.buildings_path),
                entrances_path: Some(data.entrances_path),
                catalog_path: Some(data.catalog_path),
            },
            snap: SnapOverlay {
                metric: Some(snap.metric),
                linear_scan_threshold: Some(snap.linear_scan_threshold),
            },
            catalog: CatalogOverlay {
                parallel: Some(catalog.parallel),
                workers: Some(catalog.workers),
                unnamed_prefix: Some(catalog.unnamed_prefix),
            },
            router: RouterOverlay {
                strategy: Some(router.strategy),
                timeout_ms: Some(router.timeout_ms),
            },
        }
    }
}
