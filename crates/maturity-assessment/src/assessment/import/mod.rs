//! CSV template import.
//!
//! Accepts flat `Process,Activity,Category,Dimension,Weight` exports (the
//! shape produced by the spreadsheet the questionnaires are authored in) and
//! folds them into the same validated [`AssessmentTemplate`] the JSON loader
//! produces. Row order defines process and activity order.

mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::template::{ActivityTemplate, AssessmentTemplate, ProcessTemplate, TemplateError};

pub struct TemplateCsvImporter;

impl TemplateCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        code: &str,
        path: P,
    ) -> Result<AssessmentTemplate, TemplateImportError> {
        let file = File::open(path)?;
        Self::from_reader(code, file)
    }

    pub fn from_reader<R: Read>(
        code: &str,
        reader: R,
    ) -> Result<AssessmentTemplate, TemplateImportError> {
        let rows = parser::parse_rows(reader)?;
        if rows.is_empty() {
            return Err(TemplateImportError::Empty);
        }

        let mut processes: Vec<ProcessTemplate> = Vec::new();
        for row in rows {
            let process_position = match processes
                .iter()
                .position(|process| process.process == row.process)
            {
                Some(position) => position,
                None => {
                    processes.push(ProcessTemplate {
                        process: row.process.clone(),
                        activities: Vec::new(),
                    });
                    processes.len() - 1
                }
            };
            let process = &mut processes[process_position];

            let activity_position = match process
                .activities
                .iter()
                .position(|activity| activity.name == row.activity)
            {
                Some(position) => position,
                None => {
                    process.activities.push(ActivityTemplate {
                        name: row.activity.clone(),
                        categories: Default::default(),
                    });
                    process.activities.len() - 1
                }
            };
            let activity = &mut process.activities[activity_position];

            let previous = activity
                .categories
                .entry(row.category)
                .or_default()
                .insert(row.dimension.clone(), row.weight);
            if previous.is_some() {
                return Err(TemplateImportError::DuplicateRow {
                    process: row.process,
                    activity: row.activity,
                    dimension: row.dimension,
                });
            }
        }

        AssessmentTemplate::from_processes(code, processes).map_err(Into::into)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateImportError {
    #[error("template CSV could not be read: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unknown category label '{label}' in template CSV")]
    UnknownCategory { label: String },
    #[error("duplicate template row: {process} / {activity} / {dimension}")]
    DuplicateRow {
        process: String,
        activity: String,
        dimension: String,
    },
    #[error("template CSV contains no rows")]
    Empty,
    #[error(transparent)]
    Template(#[from] TemplateError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::Category;
    use std::io::Cursor;

    const SAMPLE: &str = "\
Process,Activity,Category,Dimension,Weight
Customer Care,Inbound Support,Governance,Escalation policy,2
Customer Care,Inbound Support,Technology,CRM integration,
Production,Scheduling,Monitoring & Control,Plan adherence KPI,1
";

    #[test]
    fn imports_rows_into_a_validated_template() {
        let template = TemplateCsvImporter::from_reader("i40-baseline", Cursor::new(SAMPLE))
            .expect("csv imports");

        assert_eq!(template.code, "i40-baseline");
        assert_eq!(template.processes.len(), 2);
        assert_eq!(template.processes[0].process, "Customer Care");
        assert_eq!(template.question_count(), 3);

        let keys = template.question_keys();
        assert_eq!(keys[0].category, Category::Governance);
        assert_eq!(keys[1].category, Category::Technology);
    }

    #[test]
    fn missing_weight_defaults_to_one() {
        let template = TemplateCsvImporter::from_reader("i40-baseline", Cursor::new(SAMPLE))
            .expect("csv imports");
        let activity = &template.processes[0].activities[0];
        let technology = &activity.categories[&Category::Technology];
        assert_eq!(technology["CRM integration"], 1.0);
    }

    #[test]
    fn rejects_unknown_category_labels() {
        let raw = "Process,Activity,Category,Dimension,Weight\nA,B,Finance,C,1\n";
        assert!(matches!(
            TemplateCsvImporter::from_reader("x", Cursor::new(raw)),
            Err(TemplateImportError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_rows() {
        let raw = "Process,Activity,Category,Dimension,Weight\n\
                   A,B,Governance,C,1\n\
                   A,B,Governance,C,2\n";
        assert!(matches!(
            TemplateCsvImporter::from_reader("x", Cursor::new(raw)),
            Err(TemplateImportError::DuplicateRow { .. })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        let raw = "Process,Activity,Category,Dimension,Weight\n";
        assert!(matches!(
            TemplateCsvImporter::from_reader("x", Cursor::new(raw)),
            Err(TemplateImportError::Empty)
        ));
    }
}
