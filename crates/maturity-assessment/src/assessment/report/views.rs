use serde::Serialize;

use super::super::radar::RadarSeries;
use super::super::scoring::Tier;

/// Rounding is applied here and only here; the aggregates underneath keep
/// full precision so the three levels never compound rounding error.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// One result-table row: per-category averages and the row rating. `null`
/// means "no applicable answers", which is distinct from a rating of zero
/// and is preserved on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct RowRatingView {
    pub process: String,
    pub activity: String,
    pub governance: Option<f64>,
    pub monitoring_control: Option<f64>,
    pub technology: Option<f64>,
    pub organization: Option<f64>,
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_label: Option<&'static str>,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessRatingView {
    pub process: String,
    pub governance: Option<f64>,
    pub monitoring_control: Option<f64>,
    pub technology: Option<f64>,
    pub organization: Option<f64>,
    pub rating: Option<f64>,
}

/// A row that landed in one of the three flagged buckets.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedRowView {
    pub process: String,
    pub activity: String,
    pub rating: f64,
    pub tier: Tier,
    pub tier_label: &'static str,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionView {
    pub total_questions: usize,
    pub applicable: usize,
    pub not_applicable: usize,
    pub completion_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParetoEntryView {
    pub name: String,
    pub gap: f64,
    pub share_pct: f64,
    pub cumulative_pct: f64,
    pub is_critical: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParetoView {
    pub by_process: Vec<ParetoEntryView>,
    pub by_category: Vec<ParetoEntryView>,
    pub total_gap: f64,
}

/// The full external-facing report for one session's answers.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReportSummary {
    pub final_rate: Option<f64>,
    pub completion: CompletionView,
    pub processes: Vec<ProcessRatingView>,
    pub rows: Vec<RowRatingView>,
    pub strengths: Vec<ClassifiedRowView>,
    pub weaknesses: Vec<ClassifiedRowView>,
    pub critical_points: Vec<ClassifiedRowView>,
    pub radar: Vec<RadarSeries>,
    pub pareto: ParetoView,
}

/// Overall maturity stage derived from the final rate, one stage per
/// classification band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Initial,
    Emerging,
    Established,
    Advanced,
}

impl MaturityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Emerging => "Emerging",
            Self::Established => "Established",
            Self::Advanced => "Advanced",
        }
    }
}

/// Deterministic narrative derived from the aggregates; no external calls.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_level: Option<MaturityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_process: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}
