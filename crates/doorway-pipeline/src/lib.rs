//! From layers to answers: builds the building-entrance catalog and serves
//! "route me to building X" queries.

pub mod builder;
pub mod catalog;
pub mod error;
pub mod prepare;
pub mod wayfinder;

pub use builder::{CatalogBuilder, CatalogDiagnostics};
pub use catalog::{BuildingCatalog, EntranceNode};
pub use error::{PipelineError, QueryError};
pub use prepare::{prepare_catalog, PreparedCatalog};
pub use wayfinder::{QueryOutcome, Wayfinder};
