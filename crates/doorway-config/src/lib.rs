//! Settings for doorway: data paths, snapping, catalog building and routing.
//!
//! A config is resolved from layered sources (defaults, a YAML/TOML/JSON
//! file, `DOORWAY_*` variables, programmatic overlays) and validated once
//! at the end.
//!
//! # Example
//!
//! ```no_run
//! use doorway_config::Config;
//!
//! // Load from default location (.doorway.{toml,yml,yaml,json})
//! let config = Config::load()?;
//!
//! // Or load from specific file
//! let config = Config::from_file("path/to/config.toml")?;
//!
//! let metric = config.snap.metric;
//! let timeout = config.router.timeout_ms;
//! # Ok::<(), doorway_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::{ConfigBuilder, ConfigOverlay};
pub use types::*;
pub use validation::Validate;
