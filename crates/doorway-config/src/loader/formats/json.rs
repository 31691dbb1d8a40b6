use crate::loader::ConfigOverlay;
use crate::{ConfigError, Result};
use std::path::Path;

pub fn parse(content: &str, path: Option<&Path>) -> Result<ConfigOverlay> {
    serde_json::from_str(content).map_err(|e| ConfigError::from_json(e, content, path))
}
