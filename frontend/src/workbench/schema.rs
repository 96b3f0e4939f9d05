//! Client-side cache of the service's dataset schema.
//!
//! `DatasetSchema` is immutable once built: the synchronizer swaps whole
//! schemas and never edits one in place. `SchemaSynchronizer` owns the current
//! schema, sequences refreshes, and pushes derived column lists into the
//! selectors on `redistribute`.

use std::collections::{HashMap, HashSet};

use common::error::ApiError;
use common::model::column::{ColumnType, ColumnTypes};
use common::model::dataset::{PreviewResponse, SampleRow, UploadResponse};
use serde_json::Value;

use super::selector::{AxisPicker, ColumnSelector};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatasetSchema {
    filename: String,
    row_count: u64,
    columns: Vec<String>,
    column_types: HashMap<String, ColumnType>,
}

impl DatasetSchema {
    pub fn from_upload(upload: &UploadResponse) -> Self {
        Self::build(
            upload.filename.clone(),
            upload.rows,
            &upload.columns,
            |column| {
                upload
                    .column_types
                    .get(column)
                    .copied()
                    .unwrap_or_else(|| infer_column_type(column, &upload.sample_data))
            },
        )
    }

    /// Builds the schema described by a preview payload.
    ///
    /// Types are taken from the payload when it carries them, then from
    /// `previous` for columns that already existed, and are otherwise inferred
    /// from the sampled rows.
    pub fn from_preview(preview: &PreviewResponse, previous: Option<&DatasetSchema>) -> Self {
        let filename = preview
            .filename
            .clone()
            .or_else(|| previous.map(|p| p.filename.clone()))
            .unwrap_or_default();
        let reported: Option<&ColumnTypes> = preview.column_types.as_ref();
        Self::build(filename, preview.rows, &preview.columns, |column| {
            reported
                .and_then(|types| types.get(column).copied())
                .or_else(|| previous.and_then(|p| p.column_types.get(column).copied()))
                .unwrap_or_else(|| infer_column_type(column, &preview.sample_data))
        })
    }

    fn build(
        filename: String,
        row_count: u64,
        reported: &[String],
        mut type_of: impl FnMut(&str) -> ColumnType,
    ) -> Self {
        let mut seen = HashSet::with_capacity(reported.len());
        let mut columns = Vec::with_capacity(reported.len());
        let mut column_types = HashMap::with_capacity(reported.len());
        for column in reported {
            if !seen.insert(column.as_str()) {
                log::warn!("service reported column '{}' twice; keeping the first", column);
                continue;
            }
            column_types.insert(column.clone(), type_of(column));
            columns.push(column.clone());
        }
        Self {
            filename,
            row_count,
            columns,
            column_types,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_types(&self) -> &HashMap<String, ColumnType> {
        &self.column_types
    }

    pub fn column_type(&self, column: &str) -> ColumnType {
        self.column_types
            .get(column)
            .copied()
            .unwrap_or(ColumnType::Other)
    }

    pub fn columns_of_type(&self, wanted: ColumnType) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.column_type(c) == wanted)
            .cloned()
            .collect()
    }
}

/// Classifies a column the service did not type from its sampled values.
pub fn infer_column_type(column: &str, rows: &[SampleRow]) -> ColumnType {
    let mut values = rows
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|value| !value.is_null())
        .peekable();
    if values.peek().is_none() {
        return ColumnType::Other;
    }

    let mut numeric = true;
    let mut text = true;
    for value in values {
        numeric &= matches!(value, Value::Number(_));
        text &= matches!(value, Value::String(_));
    }
    match (numeric, text) {
        (true, _) => ColumnType::Numeric,
        (_, true) => ColumnType::Categorical,
        _ => ColumnType::Other,
    }
}

/// Column lists derived from one schema, one per dependent widget.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnDistribution {
    pub missing_values: Vec<String>,
    pub normalize: Vec<String>,
    pub encoding: Vec<String>,
    pub drop_columns: Vec<String>,
    pub axes: Vec<String>,
}

impl ColumnDistribution {
    pub fn of(schema: Option<&DatasetSchema>) -> Self {
        let Some(schema) = schema else {
            return Self::default();
        };
        let all = schema.columns().to_vec();
        Self {
            missing_values: all.clone(),
            normalize: schema.columns_of_type(ColumnType::Numeric),
            encoding: schema.columns_of_type(ColumnType::Categorical),
            drop_columns: all.clone(),
            axes: all,
        }
    }
}

/// Every widget that receives columns on redistribution.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SelectorSet {
    pub missing_values: ColumnSelector,
    pub normalize: ColumnSelector,
    pub encoding: ColumnSelector,
    pub drop_columns: ColumnSelector,
    pub axes: AxisPicker,
}

/// Handle for one in-flight refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The payload became the current schema.
    Installed,
    /// A newer schema was installed while this refresh was in flight.
    Stale,
    /// The refresh failed; the previous schema is untouched.
    Failed(ApiError),
}

#[derive(Debug, Default)]
pub struct SchemaSynchronizer {
    schema: Option<DatasetSchema>,
    issued: u64,
    installed: u64,
}

impl SchemaSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> Option<&DatasetSchema> {
        self.schema.as_ref()
    }

    /// Starts a refresh. The ticket must be handed back to `finish_refresh`
    /// with the preview result.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        log::debug!("refresh #{} issued", self.issued);
        RefreshTicket(self.issued)
    }

    /// Installs the result of the refresh identified by `ticket`.
    ///
    /// The schema is replaced only when the preview succeeded and no schema
    /// newer than this ticket has been installed meanwhile.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<PreviewResponse, ApiError>,
    ) -> RefreshOutcome {
        let preview = match result {
            Ok(preview) => preview,
            Err(e) => {
                log::error!("refresh #{} failed: {}", ticket.0, e);
                return RefreshOutcome::Failed(e);
            }
        };
        if ticket.0 <= self.installed {
            log::warn!(
                "discarding refresh #{}; #{} is already installed",
                ticket.0,
                self.installed
            );
            return RefreshOutcome::Stale;
        }
        let schema = DatasetSchema::from_preview(&preview, self.schema.as_ref());
        log::info!(
            "schema #{} installed: {} columns, {} rows",
            ticket.0,
            schema.columns().len(),
            schema.row_count()
        );
        self.schema = Some(schema);
        self.installed = ticket.0;
        RefreshOutcome::Installed
    }

    /// Installs a schema received outside a refresh (upload). Refreshes issued
    /// before this call become stale.
    pub fn install(&mut self, schema: DatasetSchema) {
        self.issued += 1;
        self.installed = self.issued;
        self.schema = Some(schema);
    }

    /// Drops the schema. Refreshes issued before this call become stale.
    pub fn clear(&mut self) {
        self.issued += 1;
        self.installed = self.issued;
        self.schema = None;
    }

    pub fn distribution(&self) -> ColumnDistribution {
        ColumnDistribution::of(self.schema.as_ref())
    }

    /// Re-renders every selector in `targets` from the current schema.
    pub fn redistribute(&self, targets: &mut SelectorSet) {
        let lists = self.distribution();
        log::debug!(
            "redistributing: {} columns, {} numeric, {} categorical",
            lists.axes.len(),
            lists.normalize.len(),
            lists.encoding.len()
        );
        targets.missing_values.render(lists.missing_values);
        targets.normalize.render(lists.normalize);
        targets.encoding.render(lists.encoding);
        targets.drop_columns.render(lists.drop_columns);
        targets.axes.render(lists.axes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn upload() -> UploadResponse {
        serde_json::from_value(json!({
            "filename": "people.csv",
            "rows": 3,
            "columns": ["name", "age", "income", "joined"],
            "column_types": {
                "name": "categorical",
                "age": "numeric",
                "income": "numeric",
                "joined": "datetime"
            },
            "sample_data": [{"name": "Ana", "age": 31, "income": 10.5, "joined": "2020"}]
        }))
        .unwrap()
    }

    fn row(value: serde_json::Value) -> SampleRow {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn distribution_filters_by_type_in_server_order() {
        let mut sync = SchemaSynchronizer::new();
        sync.install(DatasetSchema::from_upload(&upload()));
        let lists = sync.distribution();
        assert_eq!(lists.missing_values, names(&["name", "age", "income", "joined"]));
        assert_eq!(lists.normalize, names(&["age", "income"]));
        assert_eq!(lists.encoding, names(&["name"]));
        assert_eq!(lists.drop_columns, lists.missing_values);
        assert_eq!(lists.axes, lists.missing_values);
    }

    #[test]
    fn refresh_keeps_known_types_and_infers_new_ones() {
        let mut sync = SchemaSynchronizer::new();
        sync.install(DatasetSchema::from_upload(&upload()));

        let ticket = sync.begin_refresh();
        let preview = PreviewResponse {
            filename: None,
            rows: 3,
            columns: names(&["age", "name_Ana", "name_Bo", "city"]),
            column_types: None,
            missing_values: Default::default(),
            sample_data: vec![row(json!({"age": 31, "name_Ana": true, "name_Bo": false, "city": "Oslo"}))],
        };
        assert_eq!(sync.finish_refresh(ticket, Ok(preview)), RefreshOutcome::Installed);

        let schema = sync.schema().unwrap();
        assert_eq!(schema.filename(), "people.csv");
        assert_eq!(schema.column_type("age"), ColumnType::Numeric);
        assert_eq!(schema.column_type("name_Ana"), ColumnType::Other);
        assert_eq!(schema.column_type("city"), ColumnType::Categorical);
        for column in schema.columns() {
            assert!(schema.column_types().contains_key(column));
        }
    }

    #[test]
    fn failed_refresh_leaves_schema_untouched() {
        let mut sync = SchemaSynchronizer::new();
        sync.install(DatasetSchema::from_upload(&upload()));
        let before = sync.schema().cloned();

        let ticket = sync.begin_refresh();
        let outcome = sync.finish_refresh(ticket, Err(ApiError::Server("No file".into())));
        assert_eq!(outcome, RefreshOutcome::Failed(ApiError::Server("No file".into())));
        assert_eq!(sync.schema().cloned(), before);
    }

    #[test]
    fn older_refresh_cannot_overwrite_newer_one() {
        let mut sync = SchemaSynchronizer::new();
        let slow = sync.begin_refresh();
        let fast = sync.begin_refresh();

        let newer = PreviewResponse {
            columns: names(&["b"]),
            ..Default::default()
        };
        let older = PreviewResponse {
            columns: names(&["a", "b"]),
            ..Default::default()
        };
        assert_eq!(sync.finish_refresh(fast, Ok(newer)), RefreshOutcome::Installed);
        assert_eq!(sync.finish_refresh(slow, Ok(older)), RefreshOutcome::Stale);
        assert_eq!(sync.schema().unwrap().columns(), names(&["b"]).as_slice());
    }

    #[test]
    fn clear_makes_outstanding_refreshes_stale() {
        let mut sync = SchemaSynchronizer::new();
        sync.install(DatasetSchema::from_upload(&upload()));
        let ticket = sync.begin_refresh();
        sync.clear();
        let outcome = sync.finish_refresh(ticket, Ok(PreviewResponse::default()));
        assert_eq!(outcome, RefreshOutcome::Stale);
        assert!(sync.schema().is_none());
    }

    #[test]
    fn duplicate_columns_are_collapsed() {
        let mut response = upload();
        response.columns.push("age".into());
        let schema = DatasetSchema::from_upload(&response);
        assert_eq!(schema.columns(), names(&["name", "age", "income", "joined"]).as_slice());
    }

    #[test]
    fn redistribute_drops_stale_selections() {
        let mut sync = SchemaSynchronizer::new();
        sync.install(DatasetSchema::from_upload(&upload()));
        let mut targets = SelectorSet::default();
        sync.redistribute(&mut targets);
        targets.drop_columns.toggle("income");
        targets.normalize.toggle("income");

        let ticket = sync.begin_refresh();
        let preview = PreviewResponse {
            columns: names(&["name", "age", "joined"]),
            rows: 3,
            ..Default::default()
        };
        sync.finish_refresh(ticket, Ok(preview));
        sync.redistribute(&mut targets);

        assert!(targets.drop_columns.selection().is_empty());
        assert!(targets.normalize.selection().is_empty());
        assert!(!targets.normalize.columns().contains(&"income".to_string()));
    }

    #[test]
    fn inference_rules() {
        let rows = vec![
            row(json!({"n": 1, "s": "x", "m": 1, "z": null})),
            row(json!({"n": 2.5, "s": null, "m": "y"})),
        ];
        assert_eq!(infer_column_type("n", &rows), ColumnType::Numeric);
        assert_eq!(infer_column_type("s", &rows), ColumnType::Categorical);
        assert_eq!(infer_column_type("m", &rows), ColumnType::Other);
        assert_eq!(infer_column_type("z", &rows), ColumnType::Other);
        assert_eq!(infer_column_type("absent", &[]), ColumnType::Other);
    }

    fn column_type_strategy() -> impl Strategy<Value = ColumnType> {
        prop_oneof![
            Just(ColumnType::Numeric),
            Just(ColumnType::Categorical),
            Just(ColumnType::Other),
        ]
    }

    proptest! {
        #[test]
        fn redistributed_lists_are_typed_subsets_of_schema(
            typed in prop::collection::vec(("[a-z]{1,5}", column_type_strategy()), 0..12),
        ) {
            let response = UploadResponse {
                columns: typed.iter().map(|(c, _)| c.clone()).collect(),
                column_types: typed.iter().cloned().collect(),
                ..Default::default()
            };
            let mut sync = SchemaSynchronizer::new();
            sync.install(DatasetSchema::from_upload(&response));
            let mut targets = SelectorSet::default();
            sync.redistribute(&mut targets);

            let schema = sync.schema().unwrap();
            for column in targets.normalize.columns() {
                prop_assert_eq!(schema.column_type(column), ColumnType::Numeric);
            }
            for column in targets.encoding.columns() {
                prop_assert_eq!(schema.column_type(column), ColumnType::Categorical);
            }
            prop_assert_eq!(targets.missing_values.columns(), schema.columns());
            prop_assert_eq!(targets.axes.columns(), schema.columns());
            prop_assert!(!targets.drop_columns.has_selection());
        }
    }
}
