use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::domain::{Category, QuestionKey};

/// One questionnaire structure: processes, their activities, and the weighted
/// dimensions under each category. Immutable once loaded; weights are carried
/// for export fidelity but are not consumed by scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentTemplate {
    pub code: String,
    pub processes: Vec<ProcessTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessTemplate {
    pub process: String,
    pub activities: Vec<ActivityTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub name: String,
    pub categories: BTreeMap<Category, BTreeMap<String, f64>>,
}

impl AssessmentTemplate {
    /// Parse the canonical template shape: a JSON array of processes. Any
    /// other shape (an object wrapper, a bare string, ...) is a parse error;
    /// there is deliberately no fallback shape-sniffing here.
    pub fn from_json_str(code: &str, raw: &str) -> Result<Self, TemplateError> {
        let processes: Vec<ProcessTemplate> = serde_json::from_str(raw)?;
        Self::from_processes(code, processes)
    }

    /// Assemble and validate a template from already-structured processes.
    pub fn from_processes(
        code: &str,
        processes: Vec<ProcessTemplate>,
    ) -> Result<Self, TemplateError> {
        let template = Self {
            code: code.to_string(),
            processes,
        };
        template.validate()?;
        Ok(template)
    }

    fn validate(&self) -> Result<(), TemplateError> {
        if self.processes.is_empty() {
            return Err(TemplateError::EmptyTemplate);
        }

        let mut seen = HashSet::new();
        for process in &self.processes {
            if process.activities.is_empty() {
                return Err(TemplateError::EmptyProcess {
                    process: process.process.clone(),
                });
            }

            for activity in &process.activities {
                let dimension_count: usize = activity
                    .categories
                    .values()
                    .map(|dimensions| dimensions.len())
                    .sum();
                if dimension_count == 0 {
                    return Err(TemplateError::EmptyActivity {
                        process: process.process.clone(),
                        activity: activity.name.clone(),
                    });
                }

                for (category, dimensions) in &activity.categories {
                    for (dimension, weight) in dimensions {
                        if !weight.is_finite() || *weight < 0.0 {
                            return Err(TemplateError::InvalidWeight {
                                process: process.process.clone(),
                                activity: activity.name.clone(),
                                dimension: dimension.clone(),
                                weight: *weight,
                            });
                        }

                        let key = QuestionKey {
                            process: process.process.clone(),
                            activity: activity.name.clone(),
                            category: *category,
                            dimension: dimension.clone(),
                        };
                        if !seen.insert(key.clone()) {
                            return Err(TemplateError::DuplicateQuestion { key });
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Enumerate every question identity in template order: process, then
    /// activity, then category (fixed domain order), then dimension.
    pub fn question_keys(&self) -> Vec<QuestionKey> {
        let mut keys = Vec::new();
        for process in &self.processes {
            for activity in &process.activities {
                for (category, dimensions) in &activity.categories {
                    for dimension in dimensions.keys() {
                        keys.push(QuestionKey {
                            process: process.process.clone(),
                            activity: activity.name.clone(),
                            category: *category,
                            dimension: dimension.clone(),
                        });
                    }
                }
            }
        }
        keys
    }

    pub fn question_count(&self) -> usize {
        self.processes
            .iter()
            .flat_map(|process| &process.activities)
            .flat_map(|activity| activity.categories.values())
            .map(|dimensions| dimensions.len())
            .sum()
    }
}

/// Template load failures. All of these abort the load; a session can never
/// be seeded from a half-understood structure.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("template defines no processes")]
    EmptyTemplate,
    #[error("process '{process}' defines no activities")]
    EmptyProcess { process: String },
    #[error("activity '{activity}' in process '{process}' defines no dimensions")]
    EmptyActivity { process: String, activity: String },
    #[error("duplicate question identity: {key}")]
    DuplicateQuestion { key: QuestionKey },
    #[error("invalid weight {weight} on '{dimension}' ({process} / {activity})")]
    InvalidWeight {
        process: String,
        activity: String,
        dimension: String,
        weight: f64,
    },
}
