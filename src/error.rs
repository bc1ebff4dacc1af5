/*!
# Error Types for velodegree

Centralized error handling: each area keeps its own error enum and this
module unifies them for the pipeline and the CLI.
*/

use crate::config::ConfigError;
use crate::datasource::DatasourceError;
use crate::reducer::ReducerError;
use std::error::Error as _;
use thiserror::Error;

/// Main error type of the median-degree pipeline
#[derive(Debug, Error)]
pub enum DegreeError {
    /// Invalid or unreadable configuration
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// A record could not be turned into an edge
    #[error("input error")]
    Datasource(#[from] DatasourceError),

    /// Window cache and degree reducer disagree; the stream cannot continue
    #[error("internal consistency violation")]
    Reducer(#[from] ReducerError),

    /// I/O errors with additional context
    #[error("I/O operation failed: {operation}")]
    Io {
        #[source]
        source: std::io::Error,
        operation: String,
    },
}

impl DegreeError {
    /// Helper to create I/O errors with context
    pub fn io(source: std::io::Error, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            operation: operation.into(),
        }
    }

    /// Whether the error indicates corrupted internal state rather than bad
    /// input or environment.
    pub fn is_internal(&self) -> bool {
        matches!(self, DegreeError::Reducer(_))
    }

    /// One-line rendering of this error and every underlying cause,
    /// outermost first, joined by `": "`.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            report.push_str(": ");
            report.push_str(&cause.to_string());
            source = cause.source();
        }
        report
    }
}

/// Result type alias for convenience
pub type DegreeResult<T> = Result<T, DegreeError>;
