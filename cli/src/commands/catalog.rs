use anyhow::{Context, Result};
use doorway_config::Config;
use doorway_graph::WalkGraph;
use doorway_pipeline::{prepare_catalog, PreparedCatalog};
use std::process::ExitCode;

use super::load_graph;

pub fn handle_catalog(config: &Config) -> Result<ExitCode> {
    let graph = load_graph(config)?;
    let prepared = build_catalog(config, &graph)?;
    let d = prepared.diagnostics;

    println!(
        "Catalogued {} buildings ({} entrances) -> {}",
        prepared.catalog.len(),
        d.snapped,
        config.data.catalog_path.display()
    );
    if d.skipped_degenerate + d.skipped_unsnappable > 0 {
        println!(
            "Skipped {} degenerate and {} unsnappable entrances",
            d.skipped_degenerate, d.skipped_unsnappable
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Join, snap and persist the entrance-node table.
pub(crate) fn build_catalog(config: &Config, graph: &WalkGraph) -> Result<PreparedCatalog> {
    let buildings = doorway_store::read_buildings(&config.data.buildings_path)?;
    let entrances = doorway_store::read_entrances(&config.data.entrances_path)?;
    let prepared = prepare_catalog(graph, &buildings, &entrances, config)
        .context("failed to build building catalog")?;
    doorway_store::write_entrance_nodes(&config.data.catalog_path, prepared.catalog.entrance_nodes())?;
    Ok(prepared)
}
