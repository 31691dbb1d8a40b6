//! One parser per supported syntax

pub mod json;
pub mod toml;
pub mod yaml;

use super::{ConfigFormat, ConfigOverlay};
use crate::Result;
use std::path::Path;

/// `path` only labels errors.
pub fn parse(format: ConfigFormat, content: &str, path: Option<&Path>) -> Result<ConfigOverlay> {
    match format {
        ConfigFormat::Yaml => yaml::parse(content, path),
        ConfigFormat::Toml => toml::parse(content, path),
        ConfigFormat::Json => json::parse(content, path),
    }
}
