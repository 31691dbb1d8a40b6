//! `DOORWAY_<SECTION>_<FIELD>` environment variables
//!
//! ```text
//! DOORWAY_SNAP_METRIC=haversine
//! DOORWAY_ROUTER_TIMEOUT_MS=2000
//! DOORWAY_DATA_GRAPH_PATH=maps/campus.json
//! ```

use super::overlay::{CatalogOverlay, ConfigOverlay, DataOverlay, RouterOverlay, SnapOverlay};
use crate::types::{DistanceMetric, RouteStrategy};
use crate::{ConfigError, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub(crate) const PREFIX: &str = "DOORWAY_";

/// Overlay of the `DOORWAY_` variables in the process environment.
///
/// Variables that name no setting or carry an unparsable value are logged
/// and left out, so they never override another source.
pub fn from_env() -> ConfigOverlay {
    from_vars(std::env::vars())
}

fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> ConfigOverlay {
    let mut overlay = ConfigOverlay::default();
    for (key, value) in vars {
        let Some(name) = key.strip_prefix(PREFIX) else {
            continue;
        };
        if let Err(e) = set_var(&mut overlay, name, &value) {
            tracing::warn!(var = %key, "ignoring environment variable: {}", e);
        }
    }
    overlay
}

fn set_var(overlay: &mut ConfigOverlay, name: &str, value: &str) -> Result<()> {
    let lower = name.to_lowercase();
    let Some((section, field)) = lower.split_once('_').filter(|(_, field)| !field.is_empty()) else {
        return Err(env_error(name, "expected DOORWAY_<SECTION>_<FIELD>"));
    };

    match section {
        "data" => set_data(&mut overlay.data, field, value),
        "snap" => set_snap(&mut overlay.snap, field, value),
        "catalog" => set_catalog(&mut overlay.catalog, field, value),
        "router" => set_router(&mut overlay.router, field, value),
        _ => Err(env_error(name, format!("no section named {}", section))),
    }
}

fn set_data(data: &mut DataOverlay, field: &str, value: &str) -> Result<()> {
    let path = Some(PathBuf::from(value));
    match field {
        "graph_path" => data.graph_path = path,
        "graph_cache_path" => data.graph_cache_path = Some(path),
        "buildings_path" => data.buildings_path = path,
        "entrances_path" => data.entrances_path = path,
        "catalog_path" => data.catalog_path = path,
        _ => return Err(unknown_field("data", field)),
    }
    Ok(())
}

fn set_snap(snap: &mut SnapOverlay, field: &str, value: &str) -> Result<()> {
    match field {
        "metric" => {
            snap.metric = Some(match value.to_lowercase().as_str() {
                "euclidean" => DistanceMetric::Euclidean,
                "haversine" => DistanceMetric::Haversine,
                _ => {
                    return Err(ConfigError::unknown_choice(
                        "snap.metric",
                        value,
                        &["euclidean", "haversine"],
                    ))
                }
            })
        }
        "linear_scan_threshold" => snap.linear_scan_threshold = Some(number("snap", field, value)?),
        _ => return Err(unknown_field("snap", field)),
    }
    Ok(())
}

fn set_catalog(catalog: &mut CatalogOverlay, field: &str, value: &str) -> Result<()> {
    match field {
        "parallel" => catalog.parallel = Some(flag("catalog", field, value)?),
        "workers" => catalog.workers = Some(number("catalog", field, value)?),
        "unnamed_prefix" => catalog.unnamed_prefix = Some(value.to_string()),
        _ => return Err(unknown_field("catalog", field)),
    }
    Ok(())
}

fn set_router(router: &mut RouterOverlay, field: &str, value: &str) -> Result<()> {
    match field {
        "strategy" => {
            router.strategy = Some(RouteStrategy::parse(value).ok_or_else(|| {
                ConfigError::unknown_choice("router.strategy", value, &RouteStrategy::OPTIONS)
            })?)
        }
        "timeout_ms" => router.timeout_ms = Some(number("router", field, value)?),
        _ => return Err(unknown_field("router", field)),
    }
    Ok(())
}

fn var_name(section: &str, field: &str) -> String {
    format!("{}{}_{}", PREFIX, section, field).to_uppercase()
}

fn env_error(name: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::EnvVar {
        var: format!("{}{}", PREFIX, name),
        message: message.into(),
    }
}

fn unknown_field(section: &str, field: &str) -> ConfigError {
    ConfigError::EnvVar {
        var: var_name(section, field),
        message: format!("{} has no setting named {}", section, field),
    }
}

fn number<T: FromStr>(section: &str, field: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ConfigError::EnvVar {
        var: var_name(section, field),
        message: format!("expected a non-negative integer, got '{}'", value),
    })
}

fn flag(section: &str, field: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvVar {
            var: var_name(section, field),
            message: format!("expected true/false, got '{}'", value),
        }),
    }
}
