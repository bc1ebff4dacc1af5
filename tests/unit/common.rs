// Common helpers shared by the unit and integration tests

use std::path::PathBuf;

pub use velodegree::{
    DegreeMultiset, DegreeReducer, Edge, EdgeDiff, EdgeKey, ReducerError, WindowCache,
    WindowPosition,
};

pub fn edge(a: &str, b: &str, timestamp: i64) -> Edge<String> {
    Edge::new(a.to_string(), b.to_string(), timestamp)
}

pub fn key(a: &str, b: &str) -> EdgeKey<String> {
    EdgeKey::new(a.to_string(), b.to_string())
}

pub fn node(name: &str) -> String {
    name.to_string()
}

/// Absolute path of a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Build a diff from `(a, b, change)` triples.
pub fn diff_of(changes: &[(&str, &str, i64)]) -> EdgeDiff<String> {
    changes
        .iter()
        .map(|&(a, b, change)| (key(a, b), change))
        .collect()
}
