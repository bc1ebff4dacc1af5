//! Event Sources
//!
//! Line-oriented JSON input mapped to edge observations.

pub mod edge_reader;
pub mod error;
pub mod event_time;

pub use edge_reader::{EdgeFieldMapping, EdgeReader};
pub use error::DatasourceError;
pub use event_time::{DEFAULT_TIME_FORMAT, EventTimeError, TimestampFormat, parse_event_time};
