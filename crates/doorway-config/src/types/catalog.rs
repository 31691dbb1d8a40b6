//! Catalog construction configuration

use serde::{Deserialize, Serialize};

/// Building-entrance catalog build settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Snap entrances on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Worker threads for parallel snapping (0 = rayon default)
    #[serde(default)]
    pub workers: usize,

    /// Identifier prefix for buildings without a name
    ///
    /// The polygon's position is appended, e.g. `unnamed 12`.
    #[serde(default = "default_unnamed_prefix")]
    pub unnamed_prefix: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            workers: 0,
            unnamed_prefix: default_unnamed_prefix(),
        }
    }
}

impl crate::validation::Validate for CatalogConfig {
    fn validate(&self) -> crate::error::Result<()> {
        crate::validation::validate_not_blank("catalog.unnamed_prefix", &self.unnamed_prefix)?;
        if self.workers > 1024 {
            return Err(crate::error::ConfigError::Invalid {
                field: "catalog.workers".to_string(),
                message: format!("too many workers ({}), use <= 1024", self.workers),
            });
        }
        Ok(())
    }
}

fn default_parallel() -> bool {
    true
}

fn default_unnamed_prefix() -> String {
    "unnamed".to_string()
}
