//! Configuration errors

pub mod format;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::loader::ConfigFormat;

pub use format::ErrorFormatter;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Why a configuration could not be loaded or was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} does not exist")]
    FileNotFound { path: PathBuf },

    #[error("cannot tell the format of {path}; use .toml, .yml, .yaml or .json")]
    UnsupportedExtension { path: PathBuf },

    #[error("cannot read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Syntax or type error, with the surrounding lines when known
    #[error("invalid {format} config{}: {message}{excerpt}", origin(.path))]
    Parse {
        format: ConfigFormat,
        path: Option<PathBuf>,
        message: String,
        excerpt: String,
    },

    #[error("{field}: '{value}' is not one of {choices}{}", did_you_mean(.suggestion))]
    UnknownChoice {
        field: String,
        value: String,
        choices: String,
        suggestion: Option<String>,
    },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: String, value: u64 },

    #[error("environment variable {var}: {message}")]
    EnvVar { var: String, message: String },

    #[error("{field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    /// `value` is not among `choices`; suggests the nearest one when it is a
    /// likely typo.
    pub fn unknown_choice(field: impl Into<String>, value: impl Into<String>, choices: &[&str]) -> Self {
        let value = value.into();
        let suggestion = closest_choice(&value, choices).map(str::to_string);
        Self::UnknownChoice {
            field: field.into(),
            value,
            choices: choices.join(", "),
            suggestion,
        }
    }

    pub(crate) fn from_yaml(err: serde_yaml::Error, content: &str, path: Option<&Path>) -> Self {
        let line = err.location().map(|at| at.line());
        Self::Parse {
            format: ConfigFormat::Yaml,
            path: path.map(Path::to_path_buf),
            message: err.to_string(),
            excerpt: line.map(|line| excerpt(content, line, None)).unwrap_or_default(),
        }
    }

    pub(crate) fn from_toml(err: ::toml::de::Error, content: &str, path: Option<&Path>) -> Self {
        let line = err.span().map(|span| {
            content.as_bytes().iter().take(span.start).filter(|&&b| b == b'\n').count() + 1
        });
        Self::Parse {
            format: ConfigFormat::Toml,
            path: path.map(Path::to_path_buf),
            message: err.message().to_string(),
            excerpt: line.map(|line| excerpt(content, line, None)).unwrap_or_default(),
        }
    }

    pub(crate) fn from_json(err: serde_json::Error, content: &str, path: Option<&Path>) -> Self {
        Self::Parse {
            format: ConfigFormat::Json,
            path: path.map(Path::to_path_buf),
            message: err.to_string(),
            excerpt: excerpt(content, err.line(), Some(err.column())),
        }
    }
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{}'?)", s))
        .unwrap_or_default()
}

/// Nearest choice within three edits, ignoring case.
fn closest_choice<'a>(value: &str, choices: &[&'a str]) -> Option<&'a str> {
    let value = value.to_lowercase();
    choices
        .iter()
        .map(|choice| (*choice, edit_distance(&value, &choice.to_lowercase())))
        .filter(|(_, distance)| *distance <= 3)
        .min_by_key(|(_, distance)| *distance)
        .map(|(choice, _)| choice)
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != *cb);
            curr[j + 1] = substitute.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Lines `line - 1 ..= line + 1` (1-based) with the failing one marked.
fn excerpt(content: &str, line: usize, column: Option<usize>) -> String {
    let lines: Vec<&str> = content.lines().collect();
    if line == 0 || line > lines.len() {
        return String::new();
    }

    let mut out = String::new();
    for num in line.saturating_sub(1).max(1)..=(line + 1).min(lines.len()) {
        let marker = if num == line { '>' } else { ' ' };
        out.push_str(&format!("\n{} {:>4} | {}", marker, num, lines[num - 1]));
        if let Some(col) = column.filter(|c| num == line && *c > 0) {
            out.push_str(&format!("\n  {:>4} | {}^", "", " ".repeat(col - 1)));
        }
    }
    out
}
