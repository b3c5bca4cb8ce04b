use std::collections::HashMap;

use super::super::domain::{Answer, Category};

const MAX_RATING: f64 = 5.0;
const CRITICAL_CUMULATIVE_PCT: f64 = 80.0;

/// One ranked entry of a Pareto analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ParetoEntry {
    pub name: String,
    pub gap: f64,
    pub share_pct: f64,
    pub cumulative_pct: f64,
    pub is_critical: bool,
}

/// Gap-to-excellence analysis: for every process, the distance of each of
/// its category means from the maximum rating, normalized by process count
/// and expressed as a share of the total system gap; entries inside the
/// cumulative 80% are flagged critical. The `by_category` view is the
/// symmetric computation normalized by category count.
#[derive(Debug, Clone, PartialEq)]
pub struct ParetoAnalysis {
    pub by_process: Vec<ParetoEntry>,
    pub by_category: Vec<ParetoEntry>,
    pub total_gap: f64,
}

impl ParetoAnalysis {
    pub fn compute(answers: &[Answer]) -> Self {
        let mut processes: Vec<String> = Vec::new();
        let mut cells: HashMap<(String, Category), (f64, u32)> = HashMap::new();

        for answer in answers {
            if !processes.iter().any(|seen| seen == &answer.key.process) {
                processes.push(answer.key.process.clone());
            }
            if let Some(value) = answer.score.value() {
                let cell = cells
                    .entry((answer.key.process.clone(), answer.key.category))
                    .or_insert((0.0, 0));
                cell.0 += f64::from(value);
                cell.1 += 1;
            }
        }

        let categories: Vec<Category> = Category::ordered()
            .into_iter()
            .filter(|category| {
                answers
                    .iter()
                    .any(|answer| answer.key.category == *category)
            })
            .collect();

        let process_count = processes.len() as f64;
        let category_count = categories.len() as f64;

        let process_gaps: Vec<(String, f64)> = processes
            .iter()
            .map(|process| {
                let gap = categories
                    .iter()
                    .filter_map(|category| {
                        mean_of_cell(&cells, process, *category)
                            .map(|mean| (MAX_RATING - mean) / process_count)
                    })
                    .sum();
                (process.clone(), gap)
            })
            .collect();

        let category_gaps: Vec<(String, f64)> = categories
            .iter()
            .map(|category| {
                let gap = processes
                    .iter()
                    .filter_map(|process| {
                        mean_of_cell(&cells, process, *category)
                            .map(|mean| (MAX_RATING - mean) / category_count)
                    })
                    .sum();
                (category.label().to_string(), gap)
            })
            .collect();

        let (by_process, total_gap) = rank(process_gaps);
        let (by_category, _) = rank(category_gaps);

        Self {
            by_process,
            by_category,
            total_gap,
        }
    }
}

fn mean_of_cell(
    cells: &HashMap<(String, Category), (f64, u32)>,
    process: &str,
    category: Category,
) -> Option<f64> {
    cells
        .get(&(process.to_string(), category))
        .filter(|(_, count)| *count > 0)
        .map(|(sum, count)| sum / f64::from(*count))
}

fn rank(gaps: Vec<(String, f64)>) -> (Vec<ParetoEntry>, f64) {
    let total: f64 = gaps.iter().map(|(_, gap)| gap).sum();

    let mut entries: Vec<ParetoEntry> = gaps
        .into_iter()
        .map(|(name, gap)| {
            let share_pct = if total > 0.0 { gap / total * 100.0 } else { 0.0 };
            ParetoEntry {
                name,
                gap,
                share_pct,
                cumulative_pct: 0.0,
                is_critical: false,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.share_pct.total_cmp(&a.share_pct));

    let mut cumulative = 0.0;
    for entry in &mut entries {
        // An entry belongs to the vital few when the cumulative share before
        // it has not yet reached the threshold; a zero-gap entry never does.
        entry.is_critical = entry.share_pct > 0.0 && cumulative < CRITICAL_CUMULATIVE_PCT;
        cumulative += entry.share_pct;
        entry.cumulative_pct = cumulative;
    }

    (entries, total)
}
