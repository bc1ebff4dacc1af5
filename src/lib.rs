//! # velodegree
//!
//! Streaming median vertex degree of a dynamic, undirected graph over a
//! trailing time window. Every incoming edge produces exactly one median, in
//! input order, without rescanning active edges or re-sorting degrees.
//!
//! ## Architecture
//!
//! ```text
//!  JSON line --> EdgeReader --> WindowCache --(EdgeDiff)--> DegreeReducer --> median
//!                               (buckets +                 (degree counter +
//!                                edge index)                order-statistic multiset)
//! ```
//!
//! - [`window::WindowCache`] tracks which edges are active and reports which
//!   ones entered (`+1`) or left (`-1`) the window on each observation.
//! - [`reducer::DegreeReducer`] folds those diffs into per-node degrees and
//!   answers median queries from a [`reducer::DegreeMultiset`].
//! - [`pipeline::MedianDegreePipeline`] wires both to a line-oriented source
//!   and sink.
//!
//! ## Quick Start
//!
//! ```rust
//! use velodegree::{DegreeReducer, Edge, WindowCache, format_median};
//!
//! let mut cache = WindowCache::new(60)?;
//! let mut reducer = DegreeReducer::new();
//!
//! let mut medians = Vec::new();
//! for (a, b, t) in [("a", "b", 0), ("a", "c", 10), ("b", "c", 70)] {
//!     let diff = cache.update(&Edge::new(a.to_string(), b.to_string(), t));
//!     let median = reducer.update(&diff)?.expect("edge just observed");
//!     medians.push(format_median(median));
//! }
//! assert_eq!(medians, ["1.00", "1.00", "1.00"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod datasource;
pub mod error;
pub mod format;
pub mod observability;
pub mod pipeline;
pub mod reducer;
pub mod window;

pub use config::{ConfigError, PipelineConfig};
pub use datasource::{DatasourceError, EdgeFieldMapping, EdgeReader, TimestampFormat};
pub use error::{DegreeError, DegreeResult};
pub use format::{format_median, format_output};
pub use observability::PipelineStats;
pub use pipeline::MedianDegreePipeline;
pub use reducer::{DegreeMultiset, DegreeReducer, ReducerError};
pub use window::{Edge, EdgeDiff, EdgeKey, WindowCache, WindowPosition};
