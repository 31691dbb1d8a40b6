use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use doorway_config::CatalogConfig;
use doorway_core::{EntranceRecord, RecordBatch};
use doorway_graph::{NodeId, SnapIndex};

use crate::catalog::{BuildingCatalog, EntranceNode};
use crate::error::PipelineError;

/// Counts surfaced by a catalog build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDiagnostics {
    /// Entrance records offered to the builder.
    pub records: usize,
    /// Records that became catalog rows.
    pub snapped: usize,
    /// Entrances dropped earlier for having no usable point.
    pub skipped_degenerate: usize,
    /// Records whose point could not be matched to any node.
    pub skipped_unsnappable: usize,
}

pub struct CatalogBuilder<'a> {
    index: &'a SnapIndex,
    config: &'a CatalogConfig,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(index: &'a SnapIndex, config: &'a CatalogConfig) -> Self {
        Self { index, config }
    }

    /// Snap every record and assemble the catalog.
    ///
    /// Parallel snapping keeps record order, so the result does not depend
    /// on the worker count.
    pub fn build(&self, batch: &RecordBatch) -> Result<(BuildingCatalog, CatalogDiagnostics), PipelineError> {
        let snapped: Vec<Option<NodeId>> = if self.config.parallel {
            self.snap_parallel(&batch.records)?
        } else {
            batch.records.iter().map(|r| self.snap(r)).collect()
        };

        let mut diagnostics = CatalogDiagnostics {
            records: batch.records.len(),
            skipped_degenerate: batch.skipped_degenerate,
            ..CatalogDiagnostics::default()
        };
        let mut rows = Vec::with_capacity(batch.records.len());
        for (record, node) in batch.records.iter().zip(snapped) {
            match node {
                Some(node) => rows.push(EntranceNode {
                    building: record.building.clone(),
                    entrance: record.entrance_type.clone(),
                    node,
                }),
                None => {
                    warn!(building = %record.building, "entrance could not be snapped to the graph");
                    diagnostics.skipped_unsnappable += 1;
                }
            }
        }
        diagnostics.snapped = rows.len();

        let catalog = BuildingCatalog::from_rows(rows);
        info!(
            buildings = catalog.len(),
            snapped = diagnostics.snapped,
            skipped_degenerate = diagnostics.skipped_degenerate,
            skipped_unsnappable = diagnostics.skipped_unsnappable,
            "catalog built"
        );
        Ok((catalog, diagnostics))
    }

    fn snap(&self, record: &EntranceRecord) -> Option<NodeId> {
        self.index.nearest(record.point.x(), record.point.y())
    }

    fn snap_parallel(&self, records: &[EntranceRecord]) -> Result<Vec<Option<NodeId>>, PipelineError> {
        if self.config.workers == 0 {
            return Ok(records.par_iter().map(|r| self.snap(r)).collect());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()?;
        Ok(pool.install(|| records.par_iter().map(|r| self.snap(r)).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doorway_config::SnapConfig;
    use doorway_graph::WalkGraph;
    use geo::Point;

    fn record(building: &str, x: f64, y: f64) -> EntranceRecord {
        EntranceRecord {
            building_index: 0,
            building: building.to_string(),
            entrance_type: Some("main".to_string()),
            point: Point::new(x, y),
        }
    }

    fn index() -> SnapIndex {
        let mut graph = WalkGraph::new("EPSG:3116", false);
        for (id, x) in [(1, 0.0), (2, 10.0), (3, 20.0)] {
            graph.add_node(id, x, 0.0).unwrap();
        }
        SnapIndex::build(&graph, &SnapConfig::default()).unwrap()
    }

    #[test]
    fn sequential_and_parallel_builds_agree() {
        let index = index();
        let batch = RecordBatch {
            records: vec![
                record("B", 19.0, 1.0),
                record("A", 1.0, 1.0),
                record("B", 9.0, -1.0),
                record("A", 11.0, 0.0),
            ],
            skipped_degenerate: 2,
        };

        let mut results = Vec::new();
        for (parallel, workers) in [(false, 0), (true, 0), (true, 3)] {
            let config = CatalogConfig {
                parallel,
                workers,
                ..CatalogConfig::default()
            };
            results.push(CatalogBuilder::new(&index, &config).build(&batch).unwrap());
        }

        let (catalog, diagnostics) = &results[0];
        assert_eq!(catalog.lookup("a"), &[1, 2]);
        assert_eq!(catalog.lookup("b"), &[3, 2]);
        assert_eq!(
            *diagnostics,
            CatalogDiagnostics {
                records: 4,
                snapped: 4,
                skipped_degenerate: 2,
                skipped_unsnappable: 0
            }
        );
        assert!(results.iter().all(|r| r == &results[0]));
    }

    #[test]
    fn unsnappable_points_are_counted() {
        let index = index();
        let batch = RecordBatch {
            records: vec![record("A", f64::INFINITY, 0.0), record("A", 0.0, 0.0)],
            skipped_degenerate: 0,
        };
        let config = CatalogConfig::default();
        let (catalog, diagnostics) = CatalogBuilder::new(&index, &config).build(&batch).unwrap();
        assert_eq!(diagnostics.skipped_unsnappable, 1);
        assert_eq!(catalog.lookup("A"), &[1]);
    }
}
