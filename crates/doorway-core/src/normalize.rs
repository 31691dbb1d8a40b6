use geo::{Centroid, Point};

use crate::error::GeometryError;
use crate::models::EntranceShape;

/// Reduce an entrance shape to one representative point.
///
/// Points come back unchanged; lines and polygons yield their planar
/// centroid (length-weighted for lines, area-weighted for polygons).
/// Empty shapes and points with non-finite coordinates are
/// `DegenerateGeometry`.
pub fn normalize(shape: &EntranceShape) -> Result<Point<f64>, GeometryError> {
    let point = match shape {
        EntranceShape::Point(p) => Some(*p),
        EntranceShape::Line(line) => line.centroid(),
        EntranceShape::Polygon(polygon) => polygon.centroid(),
    };

    point
        .filter(|p| p.x().is_finite() && p.y().is_finite())
        .ok_or(GeometryError::DegenerateGeometry { kind: shape.kind() })
}
