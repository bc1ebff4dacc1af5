//! Degree Reducer
//!
//! Folds edge diffs into per-node degree counts and keeps an order-statistic
//! multiset of those counts in step, so the median is answered without
//! re-sorting the distribution on every event.

use super::error::ReducerError;
use super::multiset::DegreeMultiset;
use crate::window::{EdgeDiff, NodeId};
use log::{Level, log_enabled, trace};
use std::collections::HashMap;

/// Per-node degree counter plus its degree distribution.
///
/// Invariants:
/// - a node is tracked iff its degree is strictly positive
/// - the multiset holds exactly the counter's values
#[derive(Debug, Clone)]
pub struct DegreeReducer<N: NodeId = String> {
    degrees: HashMap<N, u64>,
    distribution: DegreeMultiset,
}

impl<N: NodeId> DegreeReducer<N> {
    pub fn new() -> Self {
        Self {
            degrees: HashMap::new(),
            distribution: DegreeMultiset::new(),
        }
    }

    /// Update, insert, or delete a node as needed.
    ///
    /// A node reaching degree zero is dropped. Only a positive change may
    /// create a node; anything else is a desynchronisation fault.
    pub fn upsert_node(&mut self, node: &N, delta: i64) -> Result<(), ReducerError> {
        let Some(&current) = self.degrees.get(node) else {
            if delta <= 0 {
                return Err(ReducerError::Desynchronized {
                    node: format!("{:?}", node),
                    delta,
                });
            }
            let degree = delta as u64;
            self.degrees.insert(node.clone(), degree);
            self.distribution.insert(degree);
            return Ok(());
        };

        let next = current as i64 + delta;
        if next < 0 {
            return Err(ReducerError::NegativeDegree {
                node: format!("{:?}", node),
                degree: current,
                delta,
            });
        }
        if !self.distribution.remove(current) {
            return Err(ReducerError::MultisetMismatch {
                node: format!("{:?}", node),
                degree: current,
            });
        }

        if next == 0 {
            self.degrees.remove(node);
        } else {
            let next = next as u64;
            if let Some(degree) = self.degrees.get_mut(node) {
                *degree = next;
            }
            self.distribution.insert(next);
        }
        Ok(())
    }

    /// Apply an edge diff to both endpoints of every changed edge and return
    /// the resulting median degree (`None` when no node is tracked).
    pub fn update(&mut self, diff: &EdgeDiff<N>) -> Result<Option<f64>, ReducerError> {
        for (key, change) in diff.iter() {
            if change == 0 {
                continue;
            }
            let (a, b) = key.endpoints();
            self.upsert_node(a, change)?;
            self.upsert_node(b, change)?;
        }

        if log_enabled!(Level::Trace) {
            trace!(
                "degree distribution (len {}): {:?}",
                self.distribution.len(),
                self.distribution.to_vec()
            );
        }
        Ok(self.median())
    }

    /// Current median degree, `None` when no node is tracked.
    pub fn median(&self) -> Option<f64> {
        self.distribution.median()
    }

    pub fn degree_of(&self, node: &N) -> Option<u64> {
        self.degrees.get(node).copied()
    }

    /// Number of nodes with positive degree.
    pub fn node_count(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Sum of all degrees; twice the number of active edges.
    pub fn degree_sum(&self) -> u64 {
        self.degrees.values().sum()
    }

    /// All degrees in ascending order.
    pub fn distribution(&self) -> Vec<u64> {
        self.distribution.to_vec()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&N, u64)> {
        self.degrees.iter().map(|(node, degree)| (node, *degree))
    }
}

impl<N: NodeId> Default for DegreeReducer<N> {
    fn default() -> Self {
        Self::new()
    }
}
