use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use doorway_graph::WalkGraph;
use doorway_pipeline::{BuildingCatalog, EntranceNode};

/// Write the entrance-node table as a JSON array of
/// `{building, entrance, node}` rows.
pub fn write_entrance_nodes(path: &Path, rows: &[EntranceNode]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, rows).context("failed to serialize entrance nodes")?;
    writer.flush()?;
    info!(rows = rows.len(), path = %path.display(), "entrance nodes written");
    Ok(())
}

pub fn read_entrance_nodes(path: &Path) -> Result<Vec<EntranceNode>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse entrance nodes in {}", path.display()))
}

/// Read the table and rebuild the catalog against `graph`.
pub fn load_catalog(path: &Path, graph: &WalkGraph) -> Result<BuildingCatalog> {
    let rows = read_entrance_nodes(path)?;
    let (catalog, dropped) = BuildingCatalog::from_entrance_nodes(rows, graph);
    if dropped > 0 {
        warn!(dropped, path = %path.display(), "catalog rows referenced nodes missing from the graph");
    }
    Ok(catalog)
}
