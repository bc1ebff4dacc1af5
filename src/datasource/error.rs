use super::event_time::EventTimeError;
use thiserror::Error;

/// Errors produced while turning raw input lines into edges.
///
/// Line numbers are 1-based and count blank lines.
#[derive(Debug, Error)]
pub enum DatasourceError {
    /// The line is not valid JSON
    #[error("line {line}: invalid JSON")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The line is valid JSON but not an object
    #[error("line {line}: expected a JSON object, got {actual}")]
    NotAnObject { line: usize, actual: &'static str },

    /// A required endpoint field is absent or null
    #[error("line {line}: missing field '{field}'")]
    MissingField { line: usize, field: String },

    /// An endpoint field holds something other than a string or number
    #[error("line {line}: field '{field}' must be a string or number, got {actual}")]
    TypeMismatch {
        line: usize,
        field: String,
        actual: &'static str,
    },

    /// The time field could not be converted to epoch seconds
    #[error("line {line}: invalid time field '{field}'")]
    EventTime {
        line: usize,
        field: String,
        #[source]
        source: EventTimeError,
    },

    /// Reading from the underlying stream failed
    #[error("line {line}: read failed")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl DatasourceError {
    /// 1-based input line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            DatasourceError::Json { line, .. }
            | DatasourceError::NotAnObject { line, .. }
            | DatasourceError::MissingField { line, .. }
            | DatasourceError::TypeMismatch { line, .. }
            | DatasourceError::EventTime { line, .. }
            | DatasourceError::Io { line, .. } => *line,
        }
    }
}
