use std::collections::{BTreeMap, HashMap};

use super::super::domain::{Answer, Category};

/// Mean of the applicable scores in `answers`; `None` when nothing is
/// applicable. This is the row average of the result table: one call per
/// grouping the caller has already performed.
pub fn applicable_mean<'a, I>(answers: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Answer>,
{
    let mut sum = 0.0;
    let mut count = 0u32;
    for answer in answers {
        if let Some(value) = answer.score.value() {
            sum += f64::from(value);
            count += 1;
        }
    }

    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

/// Mean of the present values; absent inputs contribute to neither the sum
/// nor the count, and an all-absent input yields `None`.
pub fn mean_of_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut sum = 0.0;
    let mut count = 0u32;
    for value in values.into_iter().flatten() {
        sum += value;
        count += 1;
    }

    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

/// Aggregates for one (process, activity) row: the per-category cell
/// averages and their mean.
#[derive(Debug, Clone, PartialEq)]
pub struct RowAggregate {
    pub process: String,
    pub activity: String,
    pub cells: BTreeMap<Category, Option<f64>>,
    pub rating: Option<f64>,
    pub notes: Vec<String>,
}

/// Aggregates for one process: category averages across its rows and the
/// process rating (mean of the present category averages).
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessAggregate {
    pub process: String,
    pub categories: BTreeMap<Category, Option<f64>>,
    pub rating: Option<f64>,
}

/// The full three-level aggregation of a session, recomputed from the
/// current answers on every call; nothing here is ever persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAggregates {
    pub rows: Vec<RowAggregate>,
    pub processes: Vec<ProcessAggregate>,
    pub final_rate: Option<f64>,
}

impl SessionAggregates {
    /// One fold over the answers. Rows and processes keep first-seen order,
    /// which is the template order when the input comes from a seeded store.
    ///
    /// The final rate flattens every present category average across all
    /// processes before averaging; a process contributes one term per
    /// populated category, so sparse processes are not double-weighted.
    pub fn compute(answers: &[Answer]) -> Self {
        let mut order: Vec<(String, String)> = Vec::new();
        let mut index: HashMap<(String, String), usize> = HashMap::new();
        let mut grouped: Vec<BTreeMap<Category, Vec<&Answer>>> = Vec::new();
        let mut notes: Vec<Vec<String>> = Vec::new();

        for answer in answers {
            let row_key = (answer.key.process.clone(), answer.key.activity.clone());
            let position = match index.get(&row_key) {
                Some(&position) => position,
                None => {
                    let position = order.len();
                    index.insert(row_key.clone(), position);
                    order.push(row_key);
                    grouped.push(BTreeMap::new());
                    notes.push(Vec::new());
                    position
                }
            };

            grouped[position]
                .entry(answer.key.category)
                .or_default()
                .push(answer);
            if !answer.note.trim().is_empty() {
                notes[position].push(answer.note.clone());
            }
        }

        let rows: Vec<RowAggregate> = order
            .iter()
            .enumerate()
            .map(|(position, (process, activity))| {
                let mut cells = BTreeMap::new();
                for category in Category::ordered() {
                    let cell = grouped[position]
                        .get(&category)
                        .and_then(|answers| applicable_mean(answers.iter().copied()));
                    cells.insert(category, cell);
                }
                let rating = mean_of_present(cells.values().copied());

                RowAggregate {
                    process: process.clone(),
                    activity: activity.clone(),
                    cells,
                    rating,
                    notes: notes[position].clone(),
                }
            })
            .collect();

        let mut process_order: Vec<String> = Vec::new();
        for (process, _) in &order {
            if !process_order.iter().any(|seen| seen == process) {
                process_order.push(process.clone());
            }
        }

        let processes: Vec<ProcessAggregate> = process_order
            .into_iter()
            .map(|process| {
                let mut categories = BTreeMap::new();
                for category in Category::ordered() {
                    let average = mean_of_present(
                        rows.iter()
                            .filter(|row| row.process == process)
                            .map(|row| row.cells[&category]),
                    );
                    categories.insert(category, average);
                }
                let rating = mean_of_present(categories.values().copied());

                ProcessAggregate {
                    process,
                    categories,
                    rating,
                }
            })
            .collect();

        let final_rate = mean_of_present(
            processes
                .iter()
                .flat_map(|process| process.categories.values().copied()),
        );

        Self {
            rows,
            processes,
            final_rate,
        }
    }
}

/// Answer-count statistics shown alongside the aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStats {
    pub total: usize,
    pub applicable: usize,
    pub not_applicable: usize,
}

impl CompletionStats {
    pub fn from_answers(answers: &[Answer]) -> Self {
        let not_applicable = answers
            .iter()
            .filter(|answer| answer.score.is_not_applicable())
            .count();

        Self {
            total: answers.len(),
            applicable: answers.len() - not_applicable,
            not_applicable,
        }
    }

    pub fn completion_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.applicable as f64 / self.total as f64 * 100.0
    }
}
