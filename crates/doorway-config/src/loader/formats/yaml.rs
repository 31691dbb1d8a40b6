use crate::loader::{ConfigFormat, ConfigOverlay};
use crate::{ConfigError, Result};
use std::path::Path;

pub fn parse(content: &str, path: Option<&Path>) -> Result<ConfigOverlay> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::from_yaml(e, content, path))
}
