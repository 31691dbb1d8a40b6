//! Building ↔ entrance spatial join.
//!
//! Entrance envelopes go into an R-tree; each building's envelope pulls the
//! candidates, and an exact intersection test decides membership.

use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use tracing::debug;

use crate::error::GeometryError;
use crate::models::{BuildingFootprint, EntranceGeometry, Layer};

type EntranceRtreeItem = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// For every building (by position), the entrances that intersect it.
///
/// Entrances inside one building are listed in layer order. An entrance
/// touching two buildings appears under both.
pub fn join<'a>(
    buildings: &Layer<BuildingFootprint>,
    entrances: &'a Layer<EntranceGeometry>,
) -> Result<Vec<Vec<&'a EntranceGeometry>>, GeometryError> {
    buildings.crs.ensure_same(&entrances.crs)?;

    let items: Vec<EntranceRtreeItem> = entrances
        .features
        .iter()
        .enumerate()
        .filter_map(|(index, entrance)| {
            let rect = entrance.shape.envelope()?;
            let (min, max) = (rect.min(), rect.max());
            Some(GeomWithData::new(
                Rectangle::from_corners([min.x, min.y], [max.x, max.y]),
                index,
            ))
        })
        .collect();
    let tree = RTree::bulk_load(items);

    let matches: Vec<Vec<&EntranceGeometry>> = buildings
        .features
        .iter()
        .map(|building| {
            let Some(rect) = building.envelope() else {
                return Vec::new();
            };
            let (min, max) = (rect.min(), rect.max());
            let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);

            let mut hits: Vec<usize> = tree
                .locate_in_envelope_intersecting(&envelope)
                .map(|item| item.data)
                .filter(|&index| building.intersects(&entrances.features[index].shape))
                .collect();
            hits.sort_unstable();
            hits.into_iter().map(|index| &entrances.features[index]).collect()
        })
        .collect();

    debug!(
        buildings = buildings.len(),
        entrances = entrances.len(),
        joined = matches.iter().map(Vec::len).sum::<usize>(),
        "spatial join complete"
    );
    Ok(matches)
}
