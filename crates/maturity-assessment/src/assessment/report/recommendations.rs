use super::super::scoring::{ClassificationBands, Tier};
use super::views::{AssessmentReportSummary, MaturityLevel, Recommendations};

/// Derive the narrative block of a report from its summary. Everything here
/// is a pure function of the aggregates, so the same answers always produce
/// the same text.
pub(crate) fn generate_recommendations(
    summary: &AssessmentReportSummary,
    bands: &ClassificationBands,
) -> Recommendations {
    let maturity_level = summary
        .final_rate
        .map(|rate| match bands.classify(rate) {
            Tier::Critical => MaturityLevel::Initial,
            Tier::Weakness => MaturityLevel::Emerging,
            Tier::Neutral => MaturityLevel::Established,
            Tier::Strength => MaturityLevel::Advanced,
        });

    let focus_process = summary
        .pareto
        .by_process
        .first()
        .filter(|entry| entry.is_critical)
        .map(|entry| entry.name.clone());

    let mut observations = Vec::new();

    if let (Some(rate), Some(level)) = (summary.final_rate, maturity_level) {
        observations.push(format!(
            "Overall final rate {:.2} places the company at the {} stage",
            rate,
            level.label()
        ));
    }

    if summary.completion.not_applicable > 0 {
        observations.push(format!(
            "{} of {} questions marked not applicable and excluded from every average",
            summary.completion.not_applicable, summary.completion.total_questions
        ));
    }

    if !summary.critical_points.is_empty() {
        observations.push(format!(
            "{} activity area(s) at or below the critical threshold",
            summary.critical_points.len()
        ));
    }

    if let Some(entry) = summary.pareto.by_process.first() {
        if entry.share_pct > 0.0 {
            observations.push(format!(
                "'{}' carries {:.2}% of the total maturity gap",
                entry.name, entry.share_pct
            ));
        }
    }

    let mut recommended_actions = Vec::new();

    for row in summary.critical_points.iter().take(3) {
        recommended_actions.push(format!(
            "Prioritize '{}' in '{}' (rating {:.2})",
            row.activity, row.process, row.rating
        ));
    }

    if let Some(process) = &focus_process {
        recommended_actions.push(format!(
            "Concentrate the improvement roadmap on '{}', the largest contributor to the gap",
            process
        ));
    }

    if !summary.weaknesses.is_empty() {
        recommended_actions.push(format!(
            "Plan remediation for {} activity area(s) in the weakness band",
            summary.weaknesses.len()
        ));
    }

    if let Some(best) = summary.strengths.first() {
        recommended_actions.push(format!(
            "Replicate the practices behind '{}' in '{}' across weaker areas",
            best.activity, best.process
        ));
    }

    Recommendations {
        maturity_level,
        focus_process,
        observations,
        recommended_actions,
    }
}
