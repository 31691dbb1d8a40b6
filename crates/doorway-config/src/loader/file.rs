//! Reading a config file into an overlay

use super::{formats, ConfigFormat, ConfigOverlay};
use crate::{ConfigError, Result};
use std::path::Path;

/// Parse `path` as the format its extension names. Only syntax and types are
/// checked here; value checks run once every source is applied.
pub fn load_overlay(path: &Path) -> Result<ConfigOverlay> {
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let overlay = formats::parse(format, &content, Some(path))?;
    tracing::debug!(path = %path.display(), %format, "read config file");
    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::overlay::RouterOverlay;
    use crate::types::DistanceMetric;
    use std::io::Write;

    #[test]
    fn reads_only_named_settings() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[snap]\nmetric = \"haversine\"").unwrap();
        let overlay = load_overlay(file.path()).unwrap();
        assert_eq!(overlay.snap.metric, Some(DistanceMetric::Haversine));
        assert_eq!(overlay.snap.linear_scan_threshold, None);
        assert_eq!(overlay.router, RouterOverlay::default());
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory with a config extension passes the format check
        let path = dir.path().join("nested.yml");
        std::fs::create_dir(&path).unwrap();
        assert!(matches!(load_overlay(&path), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn parse_error_names_the_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{\"router\": {{\"timeout_ms\": \"soon\"}}}}").unwrap();
        let err = load_overlay(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
