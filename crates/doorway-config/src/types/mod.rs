//! Configuration type definitions
//!
//! One module per concern. Each type carries serde defaults and validation.

pub mod catalog;
pub mod data;
pub mod router;
pub mod snap;

pub use catalog::CatalogConfig;
pub use data::DataConfig;
pub use router::{RouteStrategy, RouterConfig};
pub use snap::{DistanceMetric, SnapConfig};

use serde::{Deserialize, Serialize};

/// Main configuration struct aggregating all settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input/output file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Nearest-node snapping
    #[serde(default)]
    pub snap: SnapConfig,

    /// Catalog construction
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Multi-target routing
    #[serde(default)]
    pub router: RouterConfig,
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.data.validate()?;
        self.snap.validate()?;
        self.catalog.validate()?;
        self.router.validate()?;
        Ok(())
    }
}
