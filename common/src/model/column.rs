use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type tag the dataset service assigns to a column.
///
/// The service only ever reports `"numeric"` and `"categorical"`; any other
/// tag (and columns the client had to classify itself) map to `Other`.
/// `Other` columns are offered by the generic selectors (missing values, drop,
/// chart axes) but never by the type-specific ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Other,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Other => "other",
        }
    }
}

impl From<String> for ColumnType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "numeric" => ColumnType::Numeric,
            "categorical" => ColumnType::Categorical,
            _ => ColumnType::Other,
        }
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        column_type.as_str().to_string()
    }
}

/// Column name to type mapping as sent by the upload endpoint.
pub type ColumnTypes = HashMap<String, ColumnType>;
