use geo::Point;
use tracing::{info, warn};

use crate::error::GeometryError;
use crate::join::join;
use crate::models::{BuildingFootprint, EntranceGeometry, Layer};
use crate::normalize::normalize;

/// One entrance of one building, reduced to a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct EntranceRecord {
    /// Position of the building in its layer.
    pub building_index: usize,
    pub building: String,
    pub entrance_type: Option<String>,
    pub point: Point<f64>,
}

/// Records produced by the join + normalize stage, plus how many entrances
/// were dropped because they had no usable point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    pub records: Vec<EntranceRecord>,
    pub skipped_degenerate: usize,
}

impl RecordBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Join entrances to buildings and normalize each match to a point.
///
/// Records come out grouped by building position, entrances in layer order.
/// A CRS mismatch aborts the whole batch. A degenerate entrance (empty, with
/// a non-finite coordinate, or without a usable centroid) is only counted
/// and skipped.
pub fn collect_entrance_records(
    buildings: &Layer<BuildingFootprint>,
    entrances: &Layer<EntranceGeometry>,
    unnamed_prefix: &str,
) -> Result<RecordBatch, GeometryError> {
    let joined = join(buildings, entrances)?;
    let mut batch = RecordBatch::default();

    // the join cannot place these, so they would otherwise vanish uncounted
    for (index, entrance) in entrances.features.iter().enumerate() {
        if entrance.shape.envelope().is_none() {
            warn!(entrance = index, kind = entrance.shape.kind(), "skipping entrance without usable coordinates");
            batch.skipped_degenerate += 1;
        }
    }

    for (building_index, (building, matches)) in
        buildings.features.iter().zip(joined).enumerate()
    {
        if matches.is_empty() {
            continue;
        }
        let identifier = building.identifier(building_index, unnamed_prefix);

        for entrance in matches {
            match normalize(&entrance.shape) {
                Ok(point) => batch.records.push(EntranceRecord {
                    building_index,
                    building: identifier.clone(),
                    entrance_type: entrance.entrance_type.clone(),
                    point,
                }),
                Err(e) => {
                    warn!(building = %identifier, error = %e, "skipping entrance");
                    batch.skipped_degenerate += 1;
                }
            }
        }
    }

    info!(
        records = batch.records.len(),
        skipped = batch.skipped_degenerate,
        "collected entrance records"
    );
    Ok(batch)
}
