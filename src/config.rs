//! Configuration for histogram arithmetic.
//!
//! Supports YAML configuration with precedence: ENV > file > defaults.
//!
//! ```yaml
//! x_tolerance: 1.0e-9
//! check_x: true
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`Config::x_tolerance`].
pub const ENV_X_TOLERANCE: &str = "TRUENO_HISTOGRAM_X_TOLERANCE";

/// Environment variable overriding [`Config::check_x`].
pub const ENV_CHECK_X: &str = "TRUENO_HISTOGRAM_CHECK_X";

/// Settings consumed by [`HistogramMath`](crate::HistogramMath).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Relative tolerance when comparing X values of two histograms.
    #[serde(default = "default_x_tolerance")]
    pub x_tolerance: f64,

    /// Compare X values at all before combining histograms.
    #[serde(default = "default_check_x")]
    pub check_x: bool,
}

fn default_x_tolerance() -> f64 {
    1e-12
}
fn default_check_x() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            x_tolerance: default_x_tolerance(),
            check_x: default_check_x(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigNotFound {
            path: path.display().to_string(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "loading histogram config");
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or
    /// [`Error::ConfigInvalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from a file, falling back to defaults on any error.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default histogram config");
            Self::default()
        })
    }

    /// Applies `TRUENO_HISTOGRAM_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if a variable is set to an
    /// unparseable or out-of-range value.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_X_TOLERANCE) {
            self.x_tolerance = raw.trim().parse().map_err(|_| Error::ConfigInvalid {
                key: ENV_X_TOLERANCE.to_string(),
                message: format!("'{raw}' is not a number"),
            })?;
        }
        if let Some(raw) = lookup(ENV_CHECK_X) {
            self.check_x = parse_flag(&raw).ok_or_else(|| Error::ConfigInvalid {
                key: ENV_CHECK_X.to_string(),
                message: format!("'{raw}' is not a boolean"),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if `x_tolerance` is negative or not
    /// finite.
    pub fn validate(&self) -> Result<()> {
        if !self.x_tolerance.is_finite() || self.x_tolerance < 0.0 {
            return Err(Error::ConfigInvalid {
                key: "x_tolerance".to_string(),
                message: format!("must be finite and non-negative, got {}", self.x_tolerance),
            });
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
