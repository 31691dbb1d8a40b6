//! Layered configuration loading
//!
//! Every source yields a [`ConfigOverlay`] holding only the settings it
//! names. Overlays are applied onto the defaults in the order their sources
//! were added, so a later source wins for exactly the fields it sets.

pub mod env;
pub mod file;
pub mod formats;
pub mod overlay;

pub use overlay::ConfigOverlay;

use crate::{Config, ConfigError, Result, Validate};
use std::fmt;
use std::path::{Path, PathBuf};

/// Config file syntax, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedExtension {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::Json => "JSON",
        })
    }
}

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Environment,
    Overlay(ConfigOverlay),
}

/// Collects sources, then resolves and validates them in [`build`](Self::build).
///
/// ```no_run
/// use doorway_config::loader::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file(".doorway.toml")
///     .with_env()
///     .build()?;
/// # Ok::<(), doorway_config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    sources: Vec<Source>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources.push(Source::File(path.as_ref().to_path_buf()));
        self
    }

    /// `DOORWAY_<SECTION>_<FIELD>` variables, read when `build` runs.
    pub fn with_env(mut self) -> Self {
        self.sources.push(Source::Environment);
        self
    }

    pub fn with_overlay(mut self, overlay: ConfigOverlay) -> Self {
        self.sources.push(Source::Overlay(overlay));
        self
    }

    /// Replaces every setting with the ones in `config`.
    pub fn with_config(self, config: Config) -> Self {
        self.with_overlay(ConfigOverlay::from(config))
    }

    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();
        for source in self.sources {
            let overlay = match source {
                Source::File(path) => file::load_overlay(&path)?,
                Source::Environment => env::from_env(),
                Source::Overlay(overlay) => overlay,
            };
            overlay.apply_to(&mut config);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Looked up in the working directory, first match wins.
pub const DEFAULT_PATHS: [&str; 4] = [
    ".doorway.toml",
    ".doorway.yml",
    ".doorway.yaml",
    ".doorway.json",
];

impl Config {
    /// The first default file found (if any), then the environment.
    pub fn load() -> Result<Self> {
        let mut builder = ConfigBuilder::new();
        if let Some(path) = DEFAULT_PATHS.iter().find(|p| Path::new(p).exists()) {
            tracing::debug!(path, "using config file");
            builder = builder.with_file(path);
        }
        builder.with_env().build()
    }

    /// `path`, then the environment. A missing file is an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        ConfigBuilder::new().with_file(path).with_env().build()
    }
}

/// Serializes tests that touch `DOORWAY_*` variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn clear_doorway_env() {
    let keys: Vec<String> = std::env::vars()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with(env::PREFIX))
        .collect();
    for key in keys {
        std::env::remove_var(key);
    }
}
