//! Rolling-Window Edge Cache
//!
//! Fixed-capacity, time-bucketed cache of the edges observed within the
//! trailing window. Each bucket covers one time unit:
//!
//! ```text
//!  lower_bound                                 lower_bound + size - 1
//!      |                                                 |
//!      v                                                 v
//!    [ b0 ][ b1 ][ b2 ] ............................ [ b(size-1) ]
//!      ^ rolled off first when the window advances
//! ```
//!
//! The edge index (key -> last observed timestamp) is authoritative. Buckets
//! only hint at which keys may have expired: a key refreshed later keeps its
//! entry in the older bucket, and eviction re-checks the index before
//! removing anything. Pruning the old bucket on every refresh would also be
//! correct, but costs an extra lookup and removal per touch.

use super::types::{Edge, EdgeDiff, EdgeKey, NodeId, WindowPosition};
use crate::config::ConfigError;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};

/// Default window length in seconds.
pub const DEFAULT_WINDOW_SIZE: i64 = 60;

/// Largest accepted window length: one week of one-second buckets.
pub const MAX_WINDOW_SIZE: i64 = 7 * 24 * 60 * 60;

/// Window cache statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCacheStats {
    /// Number of buckets (time units) in the window
    pub size: i64,

    /// Earliest timestamp still inside the window (inclusive)
    pub lower_bound: i64,

    /// Number of distinct active edges
    pub active_edges: usize,

    /// Total bucket entries, including stale duplicates
    pub bucket_entries: usize,
}

/// Rolling-window cache of active edges.
///
/// Performance characteristics:
/// - O(1) placement of an in-window observation
/// - O(K) window advance, K = keys held by the rolled-off buckets
/// - Memory: bounded by the edges observed within one window length
pub struct WindowCache<N: NodeId = String> {
    /// Window length in time units, equal to the bucket count
    size: i64,

    /// Earliest timestamp considered part of the window
    lower_bound: i64,

    /// One set of edge keys per time unit, oldest first
    buckets: VecDeque<HashSet<EdgeKey<N>>>,

    /// Edge key -> most recent observation time
    index: HashMap<EdgeKey<N>, i64>,
}

impl<N: NodeId> WindowCache<N> {
    /// Create a cache covering `size` time units.
    ///
    /// Fails when `size` is not a positive integer or exceeds
    /// [`MAX_WINDOW_SIZE`]; the buckets are allocated up front.
    pub fn new(size: i64) -> Result<Self, ConfigError> {
        if size <= 0 {
            return Err(ConfigError::InvalidWindowSize { size });
        }
        if size > MAX_WINDOW_SIZE {
            return Err(ConfigError::WindowTooLarge {
                size,
                max: MAX_WINDOW_SIZE,
            });
        }
        let slots = usize::try_from(size).map_err(|_| ConfigError::InvalidWindowSize { size })?;

        let mut buckets = VecDeque::with_capacity(slots);
        buckets.resize_with(slots, HashSet::new);

        Ok(Self {
            size,
            lower_bound: 0,
            buckets,
            index: HashMap::new(),
        })
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn lower_bound(&self) -> i64 {
        self.lower_bound
    }

    /// Offset of `timestamp` from the lower bound.
    pub fn delta(&self, timestamp: i64) -> i64 {
        timestamp.saturating_sub(self.lower_bound)
    }

    /// Locate `timestamp` relative to the current window.
    pub fn classify(&self, timestamp: i64) -> WindowPosition {
        let delta = self.delta(timestamp);
        if delta < 0 {
            WindowPosition::Behind
        } else if delta >= self.size {
            WindowPosition::Ahead
        } else {
            WindowPosition::Within
        }
    }

    /// Number of distinct active edges.
    pub fn active_edges(&self) -> usize {
        self.index.len()
    }

    pub fn contains(&self, key: &EdgeKey<N>) -> bool {
        self.index.contains_key(key)
    }

    /// Most recent observation time of an active edge.
    pub fn timestamp_of(&self, key: &EdgeKey<N>) -> Option<i64> {
        self.index.get(key).copied()
    }

    /// Active edge keys, in no particular order.
    pub fn active_keys(&self) -> impl Iterator<Item = &EdgeKey<N>> {
        self.index.keys()
    }

    /// Entry count of each bucket, oldest first.
    pub fn bucket_occupancy(&self) -> Vec<usize> {
        self.buckets.iter().map(HashSet::len).collect()
    }

    pub fn stats(&self) -> WindowCacheStats {
        WindowCacheStats {
            size: self.size,
            lower_bound: self.lower_bound,
            active_edges: self.index.len(),
            bucket_entries: self.buckets.iter().map(HashSet::len).sum(),
        }
    }

    /// Apply one edge observation and report which edges changed state.
    ///
    /// - behind the window: dropped, empty diff, no mutation
    /// - ahead of the window: the window advances first, evicting every edge
    ///   whose last observation falls before the new lower bound (`-1`)
    /// - a key new to the index is activated (`+1`); a known key only has its
    ///   timestamp refreshed
    pub fn update(&mut self, edge: &Edge<N>) -> EdgeDiff<N> {
        let mut diff = EdgeDiff::new();

        match self.classify(edge.timestamp) {
            WindowPosition::Behind => {
                debug!(
                    "dropping stale edge {:?}-{:?} at {} (lower_bound {})",
                    edge.a, edge.b, edge.timestamp, self.lower_bound
                );
                return diff;
            }
            WindowPosition::Ahead => self.advance(edge.timestamp, &mut diff),
            WindowPosition::Within => {}
        }

        self.observe(edge.key(), edge.timestamp, &mut diff);
        diff
    }

    /// Move the window so that it ends exactly at `timestamp`.
    fn advance(&mut self, timestamp: i64, diff: &mut EdgeDiff<N>) {
        let shift = self.delta(timestamp) - self.size + 1;
        self.lower_bound = timestamp - self.size + 1;
        debug!(
            "lower_bound -> {} - {} + 1: {} (shift {})",
            timestamp, self.size, self.lower_bound, shift
        );

        for key in self.roll_buckets(shift) {
            let expired = matches!(self.index.get(&key), Some(&seen) if seen < self.lower_bound);
            if expired {
                self.index.remove(&key);
                debug!("evicted {:?}", key);
                diff.accumulate(key, -1);
            }
        }
    }

    /// Drop the oldest `shift` buckets and refill the back with empty ones.
    ///
    /// Returns the union of the dropped buckets' keys as eviction candidates.
    fn roll_buckets(&mut self, shift: i64) -> HashSet<EdgeKey<N>> {
        // A shift past the whole window empties every bucket.
        let count = shift.clamp(0, self.size) as usize;
        let mut candidates = HashSet::new();
        for _ in 0..count {
            if let Some(bucket) = self.buckets.pop_front() {
                candidates.extend(bucket);
            }
            self.buckets.push_back(HashSet::new());
        }
        candidates
    }

    /// Record an in-window observation.
    fn observe(&mut self, key: EdgeKey<N>, timestamp: i64, diff: &mut EdgeDiff<N>) {
        let slot = self.delta(timestamp) as usize;

        match self.index.entry(key.clone()) {
            Entry::Occupied(mut seen) => {
                if timestamp > *seen.get() {
                    seen.insert(timestamp);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(timestamp);
                diff.accumulate(key.clone(), 1);
            }
        }

        self.buckets[slot].insert(key);
    }
}
