//! Assessment domain: templates, answer storage, score aggregation,
//! classification, and report projections.
//!
//! The scoring pipeline is deliberately a set of pure functions over the
//! answer store so every presentation surface (HTTP report, CLI demo,
//! charts) computes from the same implementation and the same thresholds.

pub mod domain;
pub mod import;
pub mod radar;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod template;

#[cfg(test)]
mod tests;

pub use domain::{
    Answer, AnswerRecord, AssessmentSession, Category, CompanyProfile, DomainError, QuestionKey,
    Score, SessionId, SessionStatus, MAX_SCORE, MIN_SCORE,
};
pub use import::{TemplateCsvImporter, TemplateImportError};
pub use radar::{process_series, RadarSeries};
pub use report::views::{AssessmentReportSummary, MaturityLevel, Recommendations};
pub use report::AssessmentReport;
pub use repository::{RepositoryError, SessionRecord, SessionRepository, SessionView};
pub use router::assessment_router;
pub use scoring::{
    applicable_mean, mean_of_present, ClassificationBands, ClassifiedRow, CompletionStats,
    ParetoAnalysis, ParetoEntry, ProcessAggregate, RowAggregate, SessionAggregates, Tier,
    TierBuckets,
};
pub use service::{AssessmentService, ServiceError, SubmissionReceipt};
pub use store::{AnswerStore, AnswerUpdate, StoreError, DEFAULT_SCORE};
pub use template::{ActivityTemplate, AssessmentTemplate, ProcessTemplate, TemplateError};
