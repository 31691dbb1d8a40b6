use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GeometryError;

/// Coordinate reference system tag, e.g. `EPSG:3116`.
///
/// Only compared, never used for reprojection. Comparison ignores case and
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Crs(String);

impl Crs {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fail with `CoordinateSystemMismatch` unless both frames agree.
    pub fn ensure_same(&self, other: &Crs) -> Result<(), GeometryError> {
        if self == other {
            Ok(())
        } else {
            Err(GeometryError::CoordinateSystemMismatch {
                left: self.clone(),
                right: other.clone(),
            })
        }
    }
}

impl From<String> for Crs {
    fn from(value: String) -> Self {
        Crs::new(value)
    }
}

impl From<&str> for Crs {
    fn from(value: &str) -> Self {
        Crs::new(value)
    }
}

impl From<Crs> for String {
    fn from(value: Crs) -> Self {
        value.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
