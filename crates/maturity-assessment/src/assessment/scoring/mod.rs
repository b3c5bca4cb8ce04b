//! Score aggregation and classification.
//!
//! Every average in this module excludes not-applicable answers from both
//! the numerator and the denominator, and an empty denominator is `None`,
//! never zero. The `None` flows through all three aggregation levels; the
//! only sanctioned `None -> 0` substitution lives in the radar projection.

mod aggregation;
mod classification;
mod pareto;

pub use aggregation::{
    applicable_mean, mean_of_present, CompletionStats, ProcessAggregate, RowAggregate,
    SessionAggregates,
};
pub use classification::{ClassificationBands, ClassifiedRow, Tier, TierBuckets};
pub use pareto::{ParetoAnalysis, ParetoEntry};
