use std::io::Read;

use serde::Deserialize;

use super::super::domain::Category;
use super::TemplateImportError;

#[derive(Debug)]
pub(crate) struct TemplateRow {
    pub(crate) process: String,
    pub(crate) activity: String,
    pub(crate) category: Category,
    pub(crate) dimension: String,
    pub(crate) weight: f64,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<TemplateRow>, TemplateImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<CsvRow>() {
        let row = record?;
        let category = Category::from_label(&row.category).ok_or_else(|| {
            TemplateImportError::UnknownCategory {
                label: row.category.clone(),
            }
        })?;

        rows.push(TemplateRow {
            process: normalize_name(&row.process),
            activity: normalize_name(&row.activity),
            category,
            dimension: normalize_name(&row.dimension),
            weight: row.weight.unwrap_or(1.0),
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Process")]
    process: String,
    #[serde(rename = "Activity")]
    activity: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Dimension")]
    dimension: String,
    #[serde(rename = "Weight", default)]
    weight: Option<f64>,
}

/// Collapse runs of whitespace so hand-edited exports compare equal to the
/// canonical names.
pub(crate) fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
