pub mod buildings;
pub mod catalog;
pub mod route;

pub use buildings::handle_buildings;
pub use catalog::handle_catalog;
pub use route::handle_route;

use anyhow::Result;
use clap::{Parser, Subcommand};
use doorway_config::{Config, ErrorFormatter};
use doorway_graph::WalkGraph;
use doorway_pipeline::BuildingCatalog;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "doorway")]
#[command(about = "shortest walking routes to the best entrance of a building")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the building entrance catalog and write it to disk
    Catalog,
    /// Route from a graph node to the closest entrance of a building
    Route {
        /// Building name (case-insensitive)
        building: String,

        /// Origin node id (defaults to the lowest node id)
        #[arg(long)]
        origin: Option<u64>,
    },
    /// List catalogued buildings and their entrance counts
    Buildings,
}

/// Load configuration, printing a formatted error on failure.
pub fn load_config(path: Option<&Path>) -> Option<Config> {
    let loaded = match path {
        Some(p) => Config::from_file(p),
        None => Config::load(),
    };
    match loaded {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("{}", ErrorFormatter::new(e));
            None
        }
    }
}

pub fn load_graph(config: &Config) -> Result<WalkGraph> {
    doorway_store::load_graph(&config.data.graph_path, config.data.graph_cache_path.as_deref())
}

/// Read the catalog file, building and writing it first if it is missing.
pub fn load_or_build_catalog(config: &Config, graph: &WalkGraph) -> Result<BuildingCatalog> {
    let path = &config.data.catalog_path;
    if path.exists() {
        return doorway_store::load_catalog(path, graph);
    }
    info!(path = %path.display(), "catalog file missing, building it");
    let prepared = catalog::build_catalog(config, graph)?;
    Ok(prepared.catalog)
}
