use super::super::domain::{Answer, Category};
use super::super::radar::{process_series, RadarSeries};
use super::super::scoring::{
    ClassificationBands, ClassifiedRow, CompletionStats, ParetoAnalysis, ParetoEntry,
    SessionAggregates, TierBuckets,
};
use super::views::{
    round2, round4, AssessmentReportSummary, ClassifiedRowView, CompletionView, ParetoEntryView,
    ParetoView, ProcessRatingView, Recommendations, RowRatingView,
};

/// Full-precision report state for one answer set. Built fresh on every
/// request; `summary()` projects it into the rounded wire views.
#[derive(Debug, Clone)]
pub struct AssessmentReport {
    pub aggregates: SessionAggregates,
    pub buckets: TierBuckets,
    pub pareto: ParetoAnalysis,
    pub completion: CompletionStats,
    bands: ClassificationBands,
}

impl AssessmentReport {
    pub fn build(answers: &[Answer], bands: &ClassificationBands) -> Self {
        let bands = bands.normalized();
        let aggregates = SessionAggregates::compute(answers);
        let buckets = TierBuckets::from_rows(&aggregates.rows, &bands);
        let pareto = ParetoAnalysis::compute(answers);
        let completion = CompletionStats::from_answers(answers);

        Self {
            aggregates,
            buckets,
            pareto,
            completion,
            bands,
        }
    }

    pub fn bands(&self) -> &ClassificationBands {
        &self.bands
    }

    pub fn summary(&self) -> AssessmentReportSummary {
        let rows = self
            .aggregates
            .rows
            .iter()
            .map(|row| {
                let tier = row.rating.map(|rating| self.bands.classify(rating));
                RowRatingView {
                    process: row.process.clone(),
                    activity: row.activity.clone(),
                    governance: rounded_cell(row.cells.get(&Category::Governance)),
                    monitoring_control: rounded_cell(row.cells.get(&Category::MonitoringControl)),
                    technology: rounded_cell(row.cells.get(&Category::Technology)),
                    organization: rounded_cell(row.cells.get(&Category::Organization)),
                    rating: row.rating.map(round2),
                    tier,
                    tier_label: tier.map(|tier| tier.label()),
                    notes: row.notes.join("; "),
                }
            })
            .collect();

        let processes = self
            .aggregates
            .processes
            .iter()
            .map(|process| ProcessRatingView {
                process: process.process.clone(),
                governance: rounded_cell(process.categories.get(&Category::Governance)),
                monitoring_control: rounded_cell(
                    process.categories.get(&Category::MonitoringControl),
                ),
                technology: rounded_cell(process.categories.get(&Category::Technology)),
                organization: rounded_cell(process.categories.get(&Category::Organization)),
                rating: process.rating.map(round2),
            })
            .collect();

        let radar = process_series(&self.aggregates)
            .into_iter()
            .map(|series| RadarSeries {
                process: series.process,
                governance: round2(series.governance),
                monitoring_control: round2(series.monitoring_control),
                technology: round2(series.technology),
                organization: round2(series.organization),
            })
            .collect();

        AssessmentReportSummary {
            final_rate: self.aggregates.final_rate.map(round2),
            completion: CompletionView {
                total_questions: self.completion.total,
                applicable: self.completion.applicable,
                not_applicable: self.completion.not_applicable,
                completion_pct: round2(self.completion.completion_pct()),
            },
            processes,
            rows,
            strengths: self.buckets.strengths.iter().map(classified_view).collect(),
            weaknesses: self
                .buckets
                .weaknesses
                .iter()
                .map(classified_view)
                .collect(),
            critical_points: self.buckets.critical.iter().map(classified_view).collect(),
            radar,
            pareto: ParetoView {
                by_process: self.pareto.by_process.iter().map(pareto_view).collect(),
                by_category: self.pareto.by_category.iter().map(pareto_view).collect(),
                total_gap: round4(self.pareto.total_gap),
            },
        }
    }
}

impl AssessmentReportSummary {
    pub fn recommendations(&self, bands: &ClassificationBands) -> Recommendations {
        super::generate_recommendations(self, bands)
    }
}

fn rounded_cell(cell: Option<&Option<f64>>) -> Option<f64> {
    cell.copied().flatten().map(round2)
}

fn classified_view(row: &ClassifiedRow) -> ClassifiedRowView {
    ClassifiedRowView {
        process: row.process.clone(),
        activity: row.activity.clone(),
        rating: round2(row.rating),
        tier: row.tier,
        tier_label: row.tier.label(),
        notes: row.notes.join("; "),
    }
}

fn pareto_view(entry: &ParetoEntry) -> ParetoEntryView {
    ParetoEntryView {
        name: entry.name.clone(),
        gap: round4(entry.gap),
        share_pct: round2(entry.share_pct),
        cumulative_pct: round2(entry.cumulative_pct),
        is_critical: entry.is_critical,
    }
}
