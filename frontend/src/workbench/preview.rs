//! Row sample and dataset summary shown under "Dataset information".

use common::model::dataset::{MissingCounts, SampleRow};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreviewTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// `(column, missing count)` in header order.
    pub missing: Vec<(String, u64)>,
}

impl PreviewTable {
    pub fn build(columns: &[String], sample: &[SampleRow], missing: &MissingCounts) -> Self {
        let rows = sample
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| row.get(column).map(render_cell).unwrap_or_default())
                    .collect()
            })
            .collect();
        let missing = columns
            .iter()
            .map(|column| (column.clone(), missing.get(column).copied().unwrap_or(0)))
            .collect();
        Self {
            header: columns.to_vec(),
            rows,
            missing,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
