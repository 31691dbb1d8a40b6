use tracing::info;

use doorway_config::Config;
use doorway_core::{collect_entrance_records, BuildingFootprint, EntranceGeometry, Layer};
use doorway_graph::{GraphError, SnapIndex, WalkGraph};

use crate::builder::{CatalogBuilder, CatalogDiagnostics};
use crate::catalog::BuildingCatalog;
use crate::error::PipelineError;

#[derive(Debug, Clone)]
pub struct PreparedCatalog {
    pub catalog: BuildingCatalog,
    pub diagnostics: CatalogDiagnostics,
}

/// Join, normalize and snap: layers in, catalog out.
///
/// Both layers must share the graph's coordinate frame. An empty graph is
/// rejected before any entrance is looked at.
pub fn prepare_catalog(
    graph: &WalkGraph,
    buildings: &Layer<BuildingFootprint>,
    entrances: &Layer<EntranceGeometry>,
    config: &Config,
) -> Result<PreparedCatalog, PipelineError> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph.into());
    }
    graph.crs().ensure_same(&buildings.crs)?;
    graph.crs().ensure_same(&entrances.crs)?;

    let index = SnapIndex::build(graph, &config.snap)?;
    let batch = collect_entrance_records(buildings, entrances, &config.catalog.unnamed_prefix)?;
    let (catalog, diagnostics) = CatalogBuilder::new(&index, &config.catalog).build(&batch)?;

    info!(
        buildings = buildings.len(),
        entrances = entrances.len(),
        catalogued = catalog.len(),
        "catalog prepared"
    );
    Ok(PreparedCatalog { catalog, diagnostics })
}
