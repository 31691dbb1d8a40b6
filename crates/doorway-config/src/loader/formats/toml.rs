use crate::loader::ConfigOverlay;
use crate::{ConfigError, Result};
use std::path::Path;

pub fn parse(content: &str, path: Option<&Path>) -> Result<ConfigOverlay> {
    ::toml::from_str(content).map_err(|e| ConfigError::from_toml(e, content, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_section() {
        let toml = r#"
[catalog]
parallel = false
unnamed_prefix = "sin nombre"
"#;
        let overlay = parse(toml, None).unwrap();
        assert_eq!(overlay.catalog.parallel, Some(false));
        assert_eq!(overlay.catalog.unnamed_prefix.as_deref(), Some("sin nombre"));
        assert_eq!(overlay.catalog.workers, None);
    }

    #[test]
    fn type_error_names_file_and_line() {
        let content = "[snap]\nlinear_scan_threshold = \"many\"\n";
        let err = parse(content, Some(Path::new("x.toml"))).unwrap_err();
        let shown = err.to_string();
        assert!(shown.starts_with("invalid TOML config in x.toml"));
        assert!(shown.contains(">    2 | linear_scan_threshold"));
    }
}
