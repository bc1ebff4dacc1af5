//! Rolling Time Window
//!
//! Tracks which graph edges are active (observed within the trailing window)
//! and reports activation/eviction diffs for each new observation.

pub mod cache;
pub mod types;

pub use cache::{DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE, WindowCache, WindowCacheStats};
pub use types::{Edge, EdgeDiff, EdgeKey, NodeId, WindowPosition};
