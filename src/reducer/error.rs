use thiserror::Error;

/// Internal-consistency faults raised by the degree reducer.
///
/// Every variant means the window cache and the reducer disagree about which
/// edges are active. None of them is caused by bad input, so callers should
/// abort the stream rather than skip the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReducerError {
    /// A non-positive change was applied to a node that is not tracked
    #[error("cannot create node {node} with non-positive degree change {delta}")]
    Desynchronized { node: String, delta: i64 },

    /// Applying the change would leave a tracked node with a negative degree
    #[error("degree change {delta} would take node {node} below zero (current degree {degree})")]
    NegativeDegree {
        node: String,
        degree: u64,
        delta: i64,
    },

    /// The order-statistic multiset does not hold a degree the counter reports
    #[error("degree {degree} of node {node} is missing from the degree distribution")]
    MultisetMismatch { node: String, degree: u64 },
}
