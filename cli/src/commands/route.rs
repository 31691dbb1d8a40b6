use anyhow::{bail, Result};
use doorway_config::Config;
use doorway_pipeline::{QueryOutcome, Wayfinder};
use std::process::ExitCode;
use std::sync::Arc;

use super::{load_graph, load_or_build_catalog};

pub async fn handle_route(config: &Config, building: &str, origin: Option<u64>) -> Result<ExitCode> {
    let graph = load_graph(config)?;
    let catalog = load_or_build_catalog(config, &graph)?;
    let finder = Wayfinder::new(Arc::new(graph), Arc::new(catalog), config.router.clone());

    let origin = match origin.or_else(|| finder.default_origin()) {
        Some(id) => id,
        None => bail!("graph has no nodes to start from"),
    };

    match finder.route_to_building_with_timeout(origin, building).await {
        Ok(QueryOutcome::Found(found)) => {
            let path: Vec<String> = found.nodes.iter().map(u64::to_string).collect();
            println!("Route: {}", path.join(" -> "));
            println!("Distance: {:.1}", found.weight);
            Ok(ExitCode::SUCCESS)
        }
        Ok(QueryOutcome::UnknownBuilding { name }) => {
            eprintln!("No entrances found for building '{}'", name);
            Ok(ExitCode::from(1))
        }
        Ok(QueryOutcome::NoPath) => {
            eprintln!("No route from node {} to any entrance of '{}'", origin, building);
            Ok(ExitCode::from(1))
        }
        Err(e) if e.is_retryable() => {
            eprintln!("{} (try again)", e);
            Ok(ExitCode::from(75))
        }
        Err(e) => Err(e.into()),
    }
}
