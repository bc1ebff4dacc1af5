//! JSON Lines Edge Reader
//!
//! Maps raw payment records to edge observations:
//!
//! ```text
//! {"created_time": "2016-03-29T02:15:39Z", "target": "target_a", "actor": "actor_b"}
//!     -> Edge { a: "actor_b", b: "target_a", timestamp: 1459217739 }
//! ```

use super::error::DatasourceError;
use super::event_time::{TimestampFormat, json_type_name, parse_event_time};
use crate::config::ConfigError;
use crate::window::Edge;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::{self, BufRead};

/// Which record fields hold the endpoints and the event time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeFieldMapping {
    /// First endpoint (payer)
    pub actor: String,

    /// Second endpoint (payee)
    pub target: String,

    /// Event time field
    pub time: String,

    /// Format of the event time field
    pub time_format: TimestampFormat,
}

impl Default for EdgeFieldMapping {
    fn default() -> Self {
        Self {
            actor: "actor".to_string(),
            target: "target".to_string(),
            time: "created_time".to_string(),
            time_format: TimestampFormat::default(),
        }
    }
}

impl EdgeFieldMapping {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (role, name) in [
            ("actor", &self.actor),
            ("target", &self.target),
            ("time", &self.time),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::invalid(format!("{} field name is empty", role)));
            }
        }
        Ok(())
    }

    /// Parse one raw JSON line into an edge.
    ///
    /// A missing or null time field maps to timestamp 0, which places the
    /// record behind any window that has already advanced.
    pub fn parse_edge(&self, raw: &str, line: usize) -> Result<Edge<String>, DatasourceError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|source| DatasourceError::Json { line, source })?;
        let record = match value {
            Value::Object(record) => record,
            other => {
                return Err(DatasourceError::NotAnObject {
                    line,
                    actual: json_type_name(&other),
                });
            }
        };

        let actor = self.endpoint(&record, &self.actor, line)?;
        let target = self.endpoint(&record, &self.target, line)?;
        let timestamp = match record.get(&self.time) {
            None | Some(Value::Null) => {
                warn!("line {}: no '{}' field, using timestamp 0", line, self.time);
                0
            }
            Some(value) => parse_event_time(value, &self.time_format).map_err(|source| {
                DatasourceError::EventTime {
                    line,
                    field: self.time.clone(),
                    source,
                }
            })?,
        };

        debug!("parsed(edge): [{}] {} -> {}", timestamp, actor, target);
        Ok(Edge::new(actor, target, timestamp))
    }

    fn endpoint(
        &self,
        record: &Map<String, Value>,
        field: &str,
        line: usize,
    ) -> Result<String, DatasourceError> {
        match record.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            None | Some(Value::Null) => Err(DatasourceError::MissingField {
                line,
                field: field.to_string(),
            }),
            Some(other) => Err(DatasourceError::TypeMismatch {
                line,
                field: field.to_string(),
                actual: json_type_name(other),
            }),
        }
    }
}

/// Iterator over the edges of a JSON-lines stream.
///
/// Blank lines are skipped; every other line yields exactly one item.
pub struct EdgeReader<R> {
    lines: io::Lines<R>,
    line_number: usize,
    mapping: EdgeFieldMapping,
}

impl<R: BufRead> EdgeReader<R> {
    pub fn new(reader: R, mapping: EdgeFieldMapping) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            mapping,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for EdgeReader<R> {
    type Item = Result<Edge<String>, DatasourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;
            let raw = match line {
                Ok(raw) => raw,
                Err(source) => {
                    return Some(Err(DatasourceError::Io {
                        line: self.line_number,
                        source,
                    }));
                }
            };
            if raw.trim().is_empty() {
                continue;
            }
            debug!("raw:{}: {}", self.line_number, raw.trim_end());
            return Some(self.mapping.parse_edge(&raw, self.line_number));
        }
    }
}
