use serde::Serialize;

use super::domain::Category;
use super::scoring::SessionAggregates;

/// One radar vector: a process plotted against the four fixed categories.
///
/// Chart geometry needs a number on every axis, so this projection is the
/// single place an absent category average becomes `0.0`. The substitution
/// happens on the way out only; the aggregates themselves keep `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub process: String,
    pub governance: f64,
    pub monitoring_control: f64,
    pub technology: f64,
    pub organization: f64,
}

pub fn process_series(aggregates: &SessionAggregates) -> Vec<RadarSeries> {
    aggregates
        .processes
        .iter()
        .map(|process| {
            let axis = |category: Category| {
                process
                    .categories
                    .get(&category)
                    .copied()
                    .flatten()
                    .unwrap_or(0.0)
            };

            RadarSeries {
                process: process.process.clone(),
                governance: axis(Category::Governance),
                monitoring_control: axis(Category::MonitoringControl),
                technology: axis(Category::Technology),
                organization: axis(Category::Organization),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{Answer, QuestionKey, Score};

    fn answer(category: Category, score: Score) -> Answer {
        Answer {
            key: QuestionKey {
                process: "Customer Care".to_string(),
                activity: "Inbound Support".to_string(),
                category,
                dimension: format!("{} item", category.label()),
            },
            score,
            note: String::new(),
        }
    }

    #[test]
    fn absent_category_projects_to_zero_without_touching_aggregates() {
        let answers = vec![
            answer(Category::Governance, Score::Rating(4)),
            answer(Category::Technology, Score::NotApplicable),
        ];

        let aggregates = SessionAggregates::compute(&answers);
        let technology = aggregates.processes[0].categories[&Category::Technology];
        assert_eq!(technology, None);

        let series = process_series(&aggregates);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].governance, 4.0);
        assert_eq!(series[0].technology, 0.0);
        assert_eq!(series[0].organization, 0.0);
    }
}
