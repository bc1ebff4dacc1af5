// Brute-force model of the rolling window used as a property-test oracle.

use std::collections::HashMap;

/// Active edges recomputed from scratch; no buckets, no incremental degrees.
#[derive(Debug, Default)]
pub struct ReferenceWindow {
    size: i64,
    lower_bound: i64,
    seen: HashMap<(u8, u8), i64>,
}

impl ReferenceWindow {
    pub fn new(size: i64) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn lower_bound(&self) -> i64 {
        self.lower_bound
    }

    pub fn observe(&mut self, a: u8, b: u8, timestamp: i64) {
        if timestamp < self.lower_bound {
            return;
        }
        if timestamp - self.lower_bound >= self.size {
            self.lower_bound = timestamp - self.size + 1;
            let bound = self.lower_bound;
            self.seen.retain(|_, seen| *seen >= bound);
        }
        let seen = self.seen.entry((a.min(b), a.max(b))).or_insert(timestamp);
        *seen = (*seen).max(timestamp);
    }

    /// Active edges with their last observation time, sorted by key.
    pub fn active(&self) -> Vec<((u8, u8), i64)> {
        let mut active: Vec<_> = self.seen.iter().map(|(k, t)| (*k, *t)).collect();
        active.sort_unstable();
        active
    }

    /// Degrees of all nodes with at least one active edge, ascending.
    pub fn degrees(&self) -> Vec<u64> {
        let mut degrees: HashMap<u8, u64> = HashMap::new();
        for &(a, b) in self.seen.keys() {
            *degrees.entry(a).or_default() += 1;
            *degrees.entry(b).or_default() += 1;
        }
        let mut sorted: Vec<u64> = degrees.into_values().collect();
        sorted.sort_unstable();
        sorted
    }

    pub fn median(&self) -> Option<f64> {
        sorted_median(&self.degrees())
    }
}

/// Median of an ascending slice; even lengths average the middle pair.
pub fn sorted_median(sorted: &[u64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[n / 2] as f64)
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0)
    }
}
