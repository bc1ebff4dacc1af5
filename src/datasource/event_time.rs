//! Event-Time Extraction
//!
//! Converts the time field of a raw record into integer epoch seconds, the
//! only time representation the window cache understands.
//!
//! ## Usage
//!
//! ```rust
//! use velodegree::datasource::event_time::{TimestampFormat, parse_event_time};
//! use serde_json::json;
//!
//! let format = TimestampFormat::default();
//! let seconds = parse_event_time(&json!("2016-03-29T02:05:17Z"), &format).unwrap();
//! assert_eq!(seconds, 1459217117);
//! ```

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Time layout of the Venmo payment feed, always UTC.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Timestamp format enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimestampFormat {
    /// Unix epoch seconds, as a JSON integer or a string of digits
    EpochSeconds,
    /// RFC 3339 / ISO 8601 with an explicit offset (e.g., "2016-03-29T02:05:17+00:00")
    ISO8601,
    /// Custom chrono format string, interpreted as UTC
    Custom(String),
}

impl TimestampFormat {
    /// Parse a timestamp format name; anything unrecognised is a chrono pattern.
    pub fn parse(s: &str) -> Self {
        match s {
            "epoch_seconds" | "epoch" => TimestampFormat::EpochSeconds,
            "iso8601" | "ISO8601" | "rfc3339" => TimestampFormat::ISO8601,
            custom => TimestampFormat::Custom(custom.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TimestampFormat::EpochSeconds => "epoch_seconds",
            TimestampFormat::ISO8601 => "iso8601",
            TimestampFormat::Custom(fmt) => fmt,
        }
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::Custom(DEFAULT_TIME_FORMAT.to_string())
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TimestampFormat {
    fn from(s: String) -> Self {
        TimestampFormat::parse(&s)
    }
}

impl From<TimestampFormat> for String {
    fn from(format: TimestampFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Event-time extraction errors
#[derive(Debug, Error)]
pub enum EventTimeError {
    /// Field value type doesn't match expected type for format
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Failed to parse timestamp value
    #[error("failed to parse '{value}' as {format}: {error}")]
    ParseError {
        value: String,
        format: String,
        error: String,
    },
}

/// Convert a JSON time value into epoch seconds.
pub fn parse_event_time(value: &Value, format: &TimestampFormat) -> Result<i64, EventTimeError> {
    match format {
        TimestampFormat::EpochSeconds => parse_epoch_seconds(value),
        TimestampFormat::ISO8601 => {
            let s = expect_string(value, "String (ISO 8601)")?;
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.timestamp())
                .map_err(|e| EventTimeError::ParseError {
                    value: s.to_string(),
                    format: "ISO8601".to_string(),
                    error: e.to_string(),
                })
        }
        TimestampFormat::Custom(fmt) => {
            let s = expect_string(value, "String (custom format)")?;
            NaiveDateTime::parse_from_str(s, fmt)
                .map(|naive| naive.and_utc().timestamp())
                .map_err(|e| EventTimeError::ParseError {
                    value: s.to_string(),
                    format: fmt.clone(),
                    error: e.to_string(),
                })
        }
    }
}

fn parse_epoch_seconds(value: &Value) -> Result<i64, EventTimeError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| EventTimeError::ParseError {
            value: n.to_string(),
            format: "epoch_seconds".to_string(),
            error: "not an integer".to_string(),
        }),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| EventTimeError::ParseError {
                value: s.clone(),
                format: "epoch_seconds".to_string(),
                error: e.to_string(),
            }),
        other => Err(EventTimeError::TypeMismatch {
            expected: "Integer (epoch seconds)",
            actual: json_type_name(other),
        }),
    }
}

fn expect_string<'a>(value: &'a Value, expected: &'static str) -> Result<&'a str, EventTimeError> {
    value.as_str().ok_or(EventTimeError::TypeMismatch {
        expected,
        actual: json_type_name(value),
    })
}

/// Short name of a JSON value's type for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
