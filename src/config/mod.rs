//! Pipeline Configuration
//!
//! Settings for one median-degree stream. Values come from defaults, an
//! optional YAML file, and finally command-line overrides.
//!
//! ```yaml
//! window_size: 60
//! input: ./venmo_input/venmo-trans.txt
//! output: ./venmo_output/output.txt
//! fields:
//!   actor: actor
//!   target: target
//!   time: created_time
//!   time_format: "%Y-%m-%dT%H:%M:%SZ"
//! no_data_output: "0.00"
//! ```

use crate::datasource::EdgeFieldMapping;
use crate::format::DEFAULT_NO_DATA_OUTPUT;
use crate::window::{DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INPUT_PATH: &str = "./venmo_input/venmo-trans.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "./venmo_output/output.txt";

/// Errors raised while building or validating configuration.
///
/// All of them are fatal before the first event is read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("window size must be a positive integer, got {size}")]
    InvalidWindowSize { size: i64 },

    #[error("window size {size} exceeds the maximum of {max}")]
    WindowTooLarge { size: i64, max: i64 },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("IO error reading {file}: {error}")]
    IoError {
        file: PathBuf,
        error: std::io::Error,
    },

    #[error("YAML parsing error in {file}: {error}")]
    ParseError {
        file: PathBuf,
        error: serde_yaml::Error,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Configuration of a median-degree pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Trailing window length in seconds (bucket count)
    pub window_size: i64,

    /// JSON-lines file of graph events
    pub input: PathBuf,

    /// Destination for one median per event
    pub output: PathBuf,

    /// Where endpoints and event time live in each record
    pub fields: EdgeFieldMapping,

    /// Written instead of a median while the window holds no nodes
    pub no_data_output: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fields: EdgeFieldMapping::default(),
            no_data_output: DEFAULT_NO_DATA_OUTPUT.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_size(mut self, window_size: i64) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_fields(mut self, fields: EdgeFieldMapping) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_no_data_output(mut self, placeholder: impl Into<String>) -> Self {
        self.no_data_output = placeholder.into();
        self
    }

    /// Parse a configuration from YAML text; missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str, source: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|error| ConfigError::ParseError {
            file: source.to_path_buf(),
            error,
        })
    }

    /// Load and validate a YAML configuration file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|error| ConfigError::IoError {
            file: path.to_path_buf(),
            error,
        })?;
        let config = Self::from_yaml_str(&content, path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size <= 0 {
            return Err(ConfigError::InvalidWindowSize {
                size: self.window_size,
            });
        }
        if self.window_size > MAX_WINDOW_SIZE {
            return Err(ConfigError::WindowTooLarge {
                size: self.window_size,
                max: MAX_WINDOW_SIZE,
            });
        }
        self.fields.validate()
    }
}
