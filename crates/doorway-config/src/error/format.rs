//! Terminal rendering of config errors

use crate::error::ConfigError;
use std::fmt;
use yansi::Paint;

/// Displays a [`ConfigError`] for stderr, highlighted when stderr is a
/// terminal and `NO_COLOR` is unset.
pub struct ErrorFormatter {
    error: ConfigError,
    color: bool,
}

impl ErrorFormatter {
    pub fn new(error: ConfigError) -> Self {
        let color = color_enabled(
            std::env::var_os("NO_COLOR").is_some(),
            atty::is(atty::Stream::Stderr),
        );
        Self { error, color }
    }

    pub fn plain(error: ConfigError) -> Self {
        Self { error, color: false }
    }

    fn render(&self) -> String {
        if !self.color {
            return format!("config error: {}", self.error);
        }

        let head = "config error:".red().bold();
        match &self.error {
            ConfigError::UnknownChoice {
                field,
                value,
                choices,
                suggestion,
            } => {
                let mut out = format!(
                    "{} {}: '{}' is not one of {}",
                    head,
                    field.cyan(),
                    value.yellow(),
                    choices
                );
                if let Some(s) = suggestion {
                    out.push_str(&format!("\n  did you mean '{}'?", s.green()));
                }
                out
            }
            ConfigError::Parse { excerpt, .. } if !excerpt.is_empty() => {
                // the plain message already ends with the excerpt; dim just that part
                let message = self.error.to_string();
                let body = message.strip_suffix(excerpt.as_str()).unwrap_or(&message);
                format!("{} {}{}", head, body, excerpt.dim())
            }
            other => format!("{} {}", head, other),
        }
    }
}

fn color_enabled(no_color: bool, stderr_is_tty: bool) -> bool {
    !no_color && stderr_is_tty
}

impl fmt::Display for ErrorFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
