use thiserror::Error;

use crate::crs::Crs;

/// Geometry-level failures.
///
/// `CoordinateSystemMismatch` aborts the operation that hit it;
/// `DegenerateGeometry` only disqualifies the one feature it names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("coordinate system mismatch: {left} vs {right}; reproject before joining")]
    CoordinateSystemMismatch { left: Crs, right: Crs },

    #[error("degenerate {kind} geometry has no usable point")]
    DegenerateGeometry { kind: &'static str },
}
