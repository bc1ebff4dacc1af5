//! Degree Reduction
//!
//! Applies window diffs to per-node degrees and answers median-degree queries
//! from an order-statistic multiset.

pub mod degree;
pub mod error;
pub mod multiset;

pub use degree::DegreeReducer;
pub use error::ReducerError;
pub use multiset::DegreeMultiset;
