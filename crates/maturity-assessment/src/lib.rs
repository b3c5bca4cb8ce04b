//! Digital-maturity assessment engine.
//!
//! The `assessment` module owns the domain: answer storage, the score
//! aggregation fold, threshold classification, and report projections. The
//! remaining modules carry service plumbing (configuration, telemetry, and
//! the application error type) shared with the HTTP binary.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
