use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::infra::{builtin_template, default_classification_bands, InMemorySessionRepository};
use maturity_assessment::assessment::{
    Answer, AnswerRecord, AssessmentReport, AssessmentReportSummary, AssessmentService, Category,
    ClassificationBands, CompanyProfile, ServiceError,
};
use maturity_assessment::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// JSON file containing a flat array of answer records
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Include the per-activity result rows in the output
    #[arg(long)]
    pub(crate) include_rows: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the per-activity result rows in the output
    #[arg(long)]
    pub(crate) include_rows: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.answers)?;
    let records: Vec<AnswerRecord> = serde_json::from_str(&raw)?;

    let bands = default_classification_bands();
    let answers: Vec<Answer> = records
        .into_iter()
        .map(Answer::try_from)
        .collect::<Result<_, _>>()
        .map_err(|err| AppError::from(ServiceError::from(err)))?;

    let report = AssessmentReport::build(&answers, &bands);
    render_report(&report.summary(), &bands, args.include_rows);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Maturity assessment demo");

    let template = builtin_template()?;
    let repository = Arc::new(InMemorySessionRepository::default());
    let service = AssessmentService::new(repository, template, default_classification_bands());

    let created = service
        .create(CompanyProfile {
            company_name: "Mondo Meccanica Srl".to_string(),
            sector: Some("Industrial machinery".to_string()),
            contact_email: Some("operations@mondomeccanica.example".to_string()),
            conducted_by: Some("Demo operator".to_string()),
        })
        .map_err(AppError::from)?;
    let session_id = created.session.id.clone();
    println!(
        "- Opened session {} on template '{}' ({} questions, default score 3)",
        session_id,
        service.template().code,
        created.store.len()
    );

    let receipt = service
        .submit(&session_id, demo_edits())
        .map_err(AppError::from)?;
    println!("- Applied {} answer edit(s)\n", receipt.accepted);

    let summary = service.report(&session_id).map_err(AppError::from)?;
    render_report(&summary, service.bands(), args.include_rows);

    let closed = service.close(&session_id).map_err(AppError::from)?;
    if let Some(closed_at) = closed.closed_at {
        println!("\nSession closed at {closed_at}");
    }

    Ok(())
}

/// Sample edits against the built-in template: a strong governance story, a
/// weak production line, and one axis excluded as not applicable.
fn demo_edits() -> Vec<AnswerRecord> {
    let edit = |process: &str,
                activity: &str,
                category: Category,
                dimension: &str,
                score: u8,
                not_applicable: bool,
                note: &str| AnswerRecord {
        process: process.to_string(),
        activity: activity.to_string(),
        category,
        dimension: dimension.to_string(),
        score,
        note: note.to_string(),
        is_not_applicable: not_applicable,
    };

    vec![
        edit(
            "Customer Care",
            "Inbound Support",
            Category::Governance,
            "Escalation policy",
            5,
            false,
            "Reviewed quarterly with management",
        ),
        edit(
            "Customer Care",
            "Inbound Support",
            Category::Technology,
            "CRM integration",
            1,
            false,
            "Spreadsheet-driven today",
        ),
        edit(
            "Customer Care",
            "Complaint Management",
            Category::Organization,
            "Ownership model",
            2,
            false,
            "",
        ),
        edit(
            "Production",
            "Final Assembly",
            Category::Technology,
            "Line automation",
            0,
            true,
            "Manual line by design, not assessed",
        ),
        edit(
            "Production",
            "Final Assembly",
            Category::MonitoringControl,
            "Takt adherence",
            1,
            false,
            "",
        ),
        edit(
            "Supply Chain",
            "Inbound Logistics",
            Category::Governance,
            "Supplier qualification",
            4,
            false,
            "Audited supplier panel",
        ),
    ]
}

pub(crate) fn render_report(
    summary: &AssessmentReportSummary,
    bands: &ClassificationBands,
    include_rows: bool,
) {
    println!("Assessment report");
    println!(
        "Final rate: {} | completion {:.2}% ({} of {} applicable)",
        fmt_opt(summary.final_rate),
        summary.completion.completion_pct,
        summary.completion.applicable,
        summary.completion.total_questions
    );

    println!("\nProcess ratings");
    for process in &summary.processes {
        println!(
            "- {}: {} (G {} | M&C {} | T {} | O {})",
            process.process,
            fmt_opt(process.rating),
            fmt_opt(process.governance),
            fmt_opt(process.monitoring_control),
            fmt_opt(process.technology),
            fmt_opt(process.organization)
        );
    }

    if summary.strengths.is_empty() {
        println!("\nStrengths: none");
    } else {
        println!("\nStrengths");
        for row in &summary.strengths {
            println!("- {} / {}: {:.2}", row.process, row.activity, row.rating);
        }
    }

    if summary.weaknesses.is_empty() {
        println!("\nWeaknesses: none");
    } else {
        println!("\nWeaknesses");
        for row in &summary.weaknesses {
            println!("- {} / {}: {:.2}", row.process, row.activity, row.rating);
        }
    }

    if summary.critical_points.is_empty() {
        println!("\nCritical points: none");
    } else {
        println!("\nCritical points");
        for row in &summary.critical_points {
            println!("- {} / {}: {:.2}", row.process, row.activity, row.rating);
        }
    }

    println!("\nRadar (absent axes plotted as 0)");
    for series in &summary.radar {
        println!(
            "- {}: G {:.2} | M&C {:.2} | T {:.2} | O {:.2}",
            series.process,
            series.governance,
            series.monitoring_control,
            series.technology,
            series.organization
        );
    }

    println!("\nPareto by process (cumulative 80% flagged)");
    for entry in &summary.pareto.by_process {
        println!(
            "- {}: {:.2}% of gap (cumulative {:.2}%){}",
            entry.name,
            entry.share_pct,
            entry.cumulative_pct,
            if entry.is_critical { " [critical]" } else { "" }
        );
    }

    if include_rows {
        println!("\nResult rows");
        for row in &summary.rows {
            println!(
                "- {} / {}: rating {} (G {} | M&C {} | T {} | O {})",
                row.process,
                row.activity,
                fmt_opt(row.rating),
                fmt_opt(row.governance),
                fmt_opt(row.monitoring_control),
                fmt_opt(row.technology),
                fmt_opt(row.organization)
            );
        }
    }

    let recommendations = summary.recommendations(bands);
    if let Some(level) = recommendations.maturity_level {
        println!("\nMaturity level: {}", level.label());
    }
    if !recommendations.observations.is_empty() {
        println!("\nObservations");
        for note in &recommendations.observations {
            println!("- {}", note);
        }
    }
    if !recommendations.recommended_actions.is_empty() {
        println!("\nRecommended actions");
        for action in &recommendations.recommended_actions {
            println!("- {}", action);
        }
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => "n/a".to_string(),
    }
}
