//! Geometry side of doorway: layers, coordinate frames, the entrance /
//! building spatial join and centroid normalization.
//!
//! Everything here is a pure function over in-memory values. Reading the
//! layers from disk is the job of `doorway-store`.

pub mod crs;
pub mod error;
pub mod join;
pub mod models;
pub mod normalize;
pub mod records;

pub use crs::Crs;
pub use error::GeometryError;
pub use join::join;
pub use models::{BuildingFootprint, EntranceGeometry, EntranceShape, Layer};
pub use normalize::normalize;
pub use records::{collect_entrance_records, EntranceRecord, RecordBatch};
