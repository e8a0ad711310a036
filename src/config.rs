//! Configuration for block extraction
//!
//! Defaults match the host plugin: labels live on the `block_title` layer and
//! must sit within `1e-6` of the boundary's min corner on every axis. Both
//! can be overridden in code or from a TOML file:
//!
//! ```toml
//! marker_layer = "titles"
//! tolerance = 1e-4
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Layer scanned for label text unless configured otherwise
pub const DEFAULT_MARKER_LAYER: &str = "block_title";

/// Per-axis absolute tolerance for label placement
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Errors that can occur when loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("tolerance must be a finite, non-negative number (got {0})")]
    InvalidTolerance(f64),
    #[error("marker layer name must not be empty")]
    EmptyLayer,
}

/// Configuration options for extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    /// Layer holding the label text that names the new definition
    pub marker_layer: String,

    /// Per-axis tolerance when matching a label anchor to the boundary corner
    pub tolerance: f64,
}

/// TOML structure for deserializing configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    marker_layer: Option<String>,
    tolerance: Option<f64>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            marker_layer: DEFAULT_MARKER_LAYER.to_string(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ExtractConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker layer
    pub fn with_marker_layer(mut self, layer: impl Into<String>) -> Self {
        self.marker_layer = layer.into();
        self
    }

    /// Set the point comparison tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// Missing keys keep their defaults.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let config = ExtractConfig {
            marker_layer: parsed.marker_layer.unwrap_or(defaults.marker_layer),
            tolerance: parsed.tolerance.unwrap_or(defaults.tolerance),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.marker_layer.trim().is_empty() {
            return Err(ConfigError::EmptyLayer);
        }
        Ok(())
    }
}
