//! Core types shared by the window cache and the degree reducer.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::hash::Hash;

/// Bounds every node identifier must satisfy: a total order for canonical
/// edge keys, hashing for the indexes, and `Debug` for log output.
pub trait NodeId: Ord + Hash + Clone + fmt::Debug {}

impl<T: Ord + Hash + Clone + fmt::Debug> NodeId for T {}

/// Canonical identity of an undirected edge.
///
/// The endpoints are stored sorted by their total order, so `(a, b)` and
/// `(b, a)` always produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey<N> {
    low: N,
    high: N,
}

impl<N: Ord> EdgeKey<N> {
    /// Build the canonical key for an unordered endpoint pair.
    pub fn new(a: N, b: N) -> Self {
        if a < b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

impl<N> EdgeKey<N> {
    /// The lexically smaller endpoint.
    pub fn low(&self) -> &N {
        &self.low
    }

    /// The lexically larger endpoint.
    pub fn high(&self) -> &N {
        &self.high
    }

    /// Both endpoints, smaller first.
    pub fn endpoints(&self) -> (&N, &N) {
        (&self.low, &self.high)
    }
}

impl<N: fmt::Display> fmt::Display for EdgeKey<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// One observation of an edge: two endpoints plus the event time in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<N> {
    pub a: N,
    pub b: N,
    pub timestamp: i64,
}

impl<N> Edge<N> {
    pub fn new(a: N, b: N, timestamp: i64) -> Self {
        Self { a, b, timestamp }
    }
}

impl<N: Ord + Clone> Edge<N> {
    /// Canonical key of this observation.
    pub fn key(&self) -> EdgeKey<N> {
        EdgeKey::new(self.a.clone(), self.b.clone())
    }
}

impl<N: Into<String>> From<(N, N, i64)> for Edge<String> {
    fn from((a, b, timestamp): (N, N, i64)) -> Self {
        Edge::new(a.into(), b.into(), timestamp)
    }
}

/// Where a timestamp falls relative to the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// `delta < 0`: older than the lower bound, dropped on arrival.
    Behind,
    /// `0 <= delta < size`.
    Within,
    /// `delta >= size`: the window must advance before placement.
    Ahead,
}

/// Edge-level changes produced by one cache update.
///
/// Entries for the same key are summed and keys whose change nets to zero are
/// removed, so every entry is either an activation (`+1`) or an eviction
/// (`-1`). Iteration order is the key order, which keeps reducer application
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDiff<N> {
    changes: BTreeMap<EdgeKey<N>, i64>,
}

impl<N: Ord> EdgeDiff<N> {
    pub fn new() -> Self {
        Self {
            changes: BTreeMap::new(),
        }
    }

    /// Add `change` to the entry for `key`.
    pub fn accumulate(&mut self, key: EdgeKey<N>, change: i64) {
        match self.changes.entry(key) {
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += change;
                if *entry.get() == 0 {
                    entry.remove();
                }
            }
            Entry::Vacant(entry) => {
                if change != 0 {
                    entry.insert(change);
                }
            }
        }
    }

    /// Net change recorded for `key`, if any.
    pub fn get(&self, key: &EdgeKey<N>) -> Option<i64> {
        self.changes.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey<N>, i64)> {
        self.changes.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of edges this diff activates.
    pub fn activations(&self) -> usize {
        self.changes.values().filter(|v| **v > 0).count()
    }

    /// Number of edges this diff evicts.
    pub fn evictions(&self) -> usize {
        self.changes.values().filter(|v| **v < 0).count()
    }
}

impl<N: Ord> Default for EdgeDiff<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Ord> FromIterator<(EdgeKey<N>, i64)> for EdgeDiff<N> {
    fn from_iter<I: IntoIterator<Item = (EdgeKey<N>, i64)>>(iter: I) -> Self {
        let mut diff = EdgeDiff::new();
        for (key, change) in iter {
            diff.accumulate(key, change);
        }
        diff
    }
}

impl<N: fmt::Display> fmt::Display for EdgeDiff<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, change)) in self.changes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:+}", key, change)?;
        }
        write!(f, "}}")
    }
}
