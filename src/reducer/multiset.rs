//! Order-Statistic Degree Multiset
//!
//! A bag of positive degree values backed by a Fenwick (binary indexed) tree
//! of per-value counts. Equal degrees from different nodes are distinct
//! entries.
//!
//! Performance characteristics (D = largest degree seen):
//! - O(log D) insert and remove by value
//! - O(log D) rank selection, so the median costs two selections
//! - Memory: O(D), grown by doubling

use std::iter;

const INITIAL_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct DegreeMultiset {
    /// Fenwick tree over `counts`, 1-based. `tree.len() - 1` is always a power
    /// of two so rank selection can descend by halving steps.
    tree: Vec<usize>,

    /// Occurrences of each degree; index 0 is unused
    counts: Vec<usize>,

    /// Total number of entries
    len: usize,
}

impl DegreeMultiset {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create a multiset pre-sized for degrees up to `max_degree`.
    pub fn with_capacity(max_degree: usize) -> Self {
        let capacity = max_degree.max(1).next_power_of_two();
        Self {
            tree: vec![0; capacity + 1],
            counts: vec![0; capacity + 1],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of entries equal to `value`.
    pub fn count_of(&self, value: u64) -> usize {
        if value == 0 {
            return 0;
        }
        usize::try_from(value)
            .ok()
            .and_then(|idx| self.counts.get(idx))
            .copied()
            .unwrap_or(0)
    }

    /// Insert one occurrence of `value`.
    ///
    /// Returns false for zero, which is never a valid degree.
    pub fn insert(&mut self, value: u64) -> bool {
        let Some(idx) = usize::try_from(value).ok().filter(|idx| *idx > 0) else {
            return false;
        };
        if idx > self.capacity() {
            self.grow(idx);
        }

        self.counts[idx] += 1;
        let mut i = idx;
        while i < self.tree.len() {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
        self.len += 1;
        true
    }

    /// Remove one occurrence of `value`.
    ///
    /// Returns false when `value` is not present.
    pub fn remove(&mut self, value: u64) -> bool {
        if self.count_of(value) == 0 {
            return false;
        }
        let idx = value as usize;

        self.counts[idx] -= 1;
        let mut i = idx;
        while i < self.tree.len() {
            self.tree[i] -= 1;
            i += i & i.wrapping_neg();
        }
        self.len -= 1;
        true
    }

    /// The value at zero-based `rank` in ascending order.
    pub fn select(&self, rank: usize) -> Option<u64> {
        if rank >= self.len {
            return None;
        }

        let capacity = self.capacity();
        let mut pos = 0;
        let mut remaining = rank + 1;
        let mut step = capacity;
        while step > 0 {
            let next = pos + step;
            if next <= capacity && self.tree[next] < remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        Some((pos + 1) as u64)
    }

    /// Median of the stored values, `None` when empty.
    ///
    /// Even-sized bags average the two central values.
    pub fn median(&self) -> Option<f64> {
        let n = self.len;
        if n == 0 {
            return None;
        }
        if n % 2 == 1 {
            return self.select(n / 2).map(|v| v as f64);
        }
        let lower = self.select(n / 2 - 1)?;
        let upper = self.select(n / 2)?;
        Some((lower as f64 + upper as f64) / 2.0)
    }

    pub fn min(&self) -> Option<u64> {
        self.select(0)
    }

    pub fn max(&self) -> Option<u64> {
        self.len.checked_sub(1).and_then(|rank| self.select(rank))
    }

    /// Sum of all stored values.
    pub fn sum(&self) -> u64 {
        self.counts
            .iter()
            .enumerate()
            .map(|(degree, count)| degree as u64 * *count as u64)
            .sum()
    }

    /// All values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts
            .iter()
            .enumerate()
            .skip(1)
            .flat_map(|(degree, count)| iter::repeat_n(degree as u64, *count))
    }

    pub fn to_vec(&self) -> Vec<u64> {
        self.iter().collect()
    }

    fn capacity(&self) -> usize {
        self.tree.len() - 1
    }

    /// Resize to hold `max_index` and rebuild the tree in linear time.
    fn grow(&mut self, max_index: usize) {
        let capacity = max_index.next_power_of_two();
        self.counts.resize(capacity + 1, 0);

        self.tree = self.counts.clone();
        for i in 1..=capacity {
            let parent = i + (i & i.wrapping_neg());
            if parent <= capacity {
                self.tree[parent] += self.tree[i];
            }
        }
    }
}

impl Default for DegreeMultiset {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<u64> for DegreeMultiset {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }
}
