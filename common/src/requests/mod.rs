//! Form payloads sent to the mutating endpoints.
//!
//! The service reads URL-encoded forms. The selected column list travels as a
//! JSON array serialized into the single `columns` field, e.g.
//! `columns=["age","income"]`; this encoding is what the service parses and
//! must not change.

use crate::error::ApiError;

/// Ordered `(name, value)` pairs of a URL-encoded form.
pub type FormFields = Vec<(&'static str, String)>;

/// Payload for missing-value handling, normalization, encoding and column drop.
///
/// `method` is `None` only for column drop, which takes no method.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnsForm {
    pub columns: Vec<String>,
    pub method: Option<String>,
}

impl ColumnsForm {
    pub fn with_method(columns: Vec<String>, method: impl Into<String>) -> Self {
        Self {
            columns,
            method: Some(method.into()),
        }
    }

    pub fn columns_only(columns: Vec<String>) -> Self {
        Self {
            columns,
            method: None,
        }
    }

    pub fn fields(&self) -> Result<FormFields, ApiError> {
        let columns = serde_json::to_string(&self.columns)
            .map_err(|e| ApiError::Transport(format!("cannot encode columns: {}", e)))?;
        let mut fields = vec![("columns", columns)];
        if let Some(method) = &self.method {
            fields.push(("method", method.clone()));
        }
        Ok(fields)
    }
}

/// Payload for `POST /visualization/create/`.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizationForm {
    pub chart_type: String,
    pub x_column: String,
    pub y_column: Option<String>,
    pub hue: Option<String>,
    pub title: Option<String>,
}

impl VisualizationForm {
    /// Absent optional fields are sent as empty strings.
    pub fn fields(&self) -> FormFields {
        vec![
            ("chart_type", self.chart_type.clone()),
            ("x_column", self.x_column.clone()),
            ("y_column", self.y_column.clone().unwrap_or_default()),
            ("hue", self.hue.clone().unwrap_or_default()),
            ("title", self.title.clone().unwrap_or_default()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn columns_are_a_json_array_string() {
        let form = ColumnsForm::with_method(vec!["age".into(), "first name".into()], "median");
        assert_eq!(
            form.fields().unwrap(),
            vec![
                ("columns", r#"["age","first name"]"#.to_string()),
                ("method", "median".to_string()),
            ]
        );
    }

    #[test]
    fn drop_form_has_no_method_field() {
        let form = ColumnsForm::columns_only(vec!["id".into()]);
        assert_eq!(form.fields().unwrap(), vec![("columns", r#"["id"]"#.to_string())]);
    }

    #[test]
    fn quotes_in_column_names_are_escaped() {
        let form = ColumnsForm::columns_only(vec![r#"say "hi""#.into()]);
        assert_eq!(form.fields().unwrap()[0].1, r#"["say \"hi\""]"#);
    }

    #[test]
    fn visualization_optionals_are_empty_strings() {
        let form = VisualizationForm {
            chart_type: "histogram".into(),
            x_column: "age".into(),
            y_column: None,
            hue: None,
            title: Some("Ages".into()),
        };
        assert_eq!(
            form.fields(),
            vec![
                ("chart_type", "histogram".to_string()),
                ("x_column", "age".to_string()),
                ("y_column", String::new()),
                ("hue", String::new()),
                ("title", "Ages".to_string()),
            ]
        );
    }
}
