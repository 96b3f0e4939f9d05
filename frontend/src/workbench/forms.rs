//! Free-form inputs of the operation forms and the options offered for them.
//!
//! Values are sent to the service verbatim; the service is the only judge of
//! whether a method applies to a column.

/// `(value, label)` pairs for the missing-value method picker.
pub const MISSING_METHODS: &[(&str, &str)] = &[
    ("mean", "Mean (numeric only)"),
    ("median", "Median (numeric only)"),
    ("mode", "Mode (most frequent value)"),
    ("constant", "Fill with constant (0 or \"unknown\")"),
    ("drop_rows", "Drop rows with missing values"),
];

pub const NORMALIZE_METHODS: &[(&str, &str)] = &[
    ("minmax", "Min-Max Scaling (0-1)"),
    ("standard", "Standard Scaling (z-score)"),
    ("robust", "Robust Scaling (using quantiles)"),
];

pub const ENCODING_METHODS: &[(&str, &str)] = &[
    ("onehot", "One-Hot Encoding"),
    ("label", "Label Encoding"),
];

pub const CHART_TYPES: &[(&str, &str)] = &[
    ("bar", "Bar Chart"),
    ("histogram", "Histogram"),
    ("scatter", "Scatter Plot"),
    ("box", "Box Plot"),
    ("line", "Line Chart"),
    ("heatmap", "Correlation Heatmap"),
    ("pairplot", "Pair Plot"),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInputs {
    pub missing_method: String,
    pub normalize_method: String,
    pub encoding_method: String,
    pub chart_type: String,
    pub chart_title: String,
}
