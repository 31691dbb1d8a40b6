use anyhow::Result;
use doorway_config::Config;
use std::process::ExitCode;

use super::{load_graph, load_or_build_catalog};

pub fn handle_buildings(config: &Config) -> Result<ExitCode> {
    let graph = load_graph(config)?;
    let catalog = load_or_build_catalog(config, &graph)?;

    if catalog.is_empty() {
        println!("No buildings with entrances.");
        return Ok(ExitCode::SUCCESS);
    }
    let width = catalog.buildings().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, nodes) in catalog.buildings() {
        println!("{:<width$}  {} entrance node(s)", name, nodes.len(), width = width);
    }
    Ok(ExitCode::SUCCESS)
}
