//! Data file locations used by the CLI

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the walk graph, layers and catalog live on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Walk graph in JSON form (nodes, edges, crs)
    #[serde(default = "default_graph_path")]
    pub graph_path: PathBuf,

    /// Optional bincode cache of the imported graph
    ///
    /// Loaded instead of `graph_path` when present; written after an import.
    #[serde(default)]
    pub graph_cache_path: Option<PathBuf>,

    /// Building footprints layer
    #[serde(default = "default_buildings_path")]
    pub buildings_path: PathBuf,

    /// Entrance geometries layer
    #[serde(default = "default_entrances_path")]
    pub entrances_path: PathBuf,

    /// Building entrance → node table
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            graph_path: default_graph_path(),
            graph_cache_path: None,
            buildings_path: default_buildings_path(),
            entrances_path: default_entrances_path(),
            catalog_path: default_catalog_path(),
        }
    }
}

impl crate::validation::Validate for DataConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        let required = [
            ("data.graph_path", &self.graph_path),
            ("data.buildings_path", &self.buildings_path),
            ("data.entrances_path", &self.entrances_path),
            ("data.catalog_path", &self.catalog_path),
        ];
        for (field, path) in required {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn default_graph_path() -> PathBuf {
    PathBuf::from("maps/graph.json")
}

fn default_buildings_path() -> PathBuf {
    PathBuf::from("maps/buildings.json")
}

fn default_entrances_path() -> PathBuf {
    PathBuf::from("maps/entrances.json")
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("maps/building_entrances_nodes.json")
}
