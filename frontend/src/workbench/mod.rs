//! Headless core of the preprocessing client.
//!
//! The `Workbench` holds everything the UI shows: the dataset schema (via
//! `SchemaSynchronizer`), one `ColumnSelector` per column-based operation,
//! the chart axis pickers, scoped feedback, the row preview and the chart
//! gallery. It never performs I/O. A host drives it in three steps per
//! operation:
//!
//! 1. `prepare` validates input and returns the request to send (or an error
//!    that has already been reported to the user);
//! 2. the host sends the request, e.g. with `dispatcher::execute`;
//! 3. `complete` accepts the result and says what to do next (`FollowUp`).
//!
//! Refreshes go through `begin_refresh` / `finish_refresh` the same way.
//! `Session` strings these steps together for hosts that can await in place;
//! the Yew component drives them through messages.

pub mod dispatcher;
pub mod feedback;
pub mod forms;
pub mod preview;
pub mod schema;
pub mod selector;
pub mod session;

use base64::{Engine as _, engine::general_purpose};
use common::error::ApiError;
use common::model::dataset::PreviewResponse;

use crate::api::DatasetFile;
use dispatcher::{
    DownloadedFile, FollowUp, OperationDispatcher, OperationKind, OperationPhase,
    OperationReply, OperationRequest,
};
use feedback::{DismissTicket, Feedback, FeedbackReporter, FeedbackScope};
use forms::FormInputs;
use preview::PreviewTable;
use schema::{DatasetSchema, RefreshOutcome, RefreshTicket, SchemaSynchronizer, SelectorSet};
use selector::{Axis, AxisPicker, ColumnSelector};

pub use session::Session;

const UPLOAD_SUCCESS: &str = "File uploaded successfully!";
const VISUALIZATION_SUCCESS: &str = "Visualization created successfully!";
const REFRESH_ERROR_CONTEXT: &str = "Error updating data preview";
const CSV_MIME: &str = "text/csv";

/// The column selectors a user can toggle tokens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorTarget {
    MissingValues,
    Normalize,
    Encoding,
    DropColumns,
}

impl SelectorTarget {
    pub fn operation(&self) -> OperationKind {
        match self {
            SelectorTarget::MissingValues => OperationKind::HandleMissing,
            SelectorTarget::Normalize => OperationKind::Normalize,
            SelectorTarget::Encoding => OperationKind::Encode,
            SelectorTarget::DropColumns => OperationKind::DropColumns,
        }
    }
}

#[derive(Debug, Default)]
pub struct Workbench {
    synchronizer: SchemaSynchronizer,
    selectors: SelectorSet,
    dispatcher: OperationDispatcher,
    feedback: FeedbackReporter,
    preview: PreviewTable,
    gallery: Vec<String>,
    workspace_open: bool,
    /// Method pickers, chart type and title; owned by the view.
    pub inputs: FormInputs,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> Option<&DatasetSchema> {
        self.synchronizer.schema()
    }

    pub fn selector(&self, target: SelectorTarget) -> &ColumnSelector {
        match target {
            SelectorTarget::MissingValues => &self.selectors.missing_values,
            SelectorTarget::Normalize => &self.selectors.normalize,
            SelectorTarget::Encoding => &self.selectors.encoding,
            SelectorTarget::DropColumns => &self.selectors.drop_columns,
        }
    }

    pub fn axes(&self) -> &AxisPicker {
        &self.selectors.axes
    }

    pub fn preview(&self) -> &PreviewTable {
        &self.preview
    }

    /// Chart images (data URIs) in creation order.
    pub fn gallery(&self) -> &[String] {
        &self.gallery
    }

    pub fn feedback(&self, scope: FeedbackScope) -> Option<&Feedback> {
        self.feedback.current(scope)
    }

    pub fn phase(&self, kind: OperationKind) -> OperationPhase {
        self.dispatcher.phase(kind)
    }

    /// Whether the workspace below the upload form should be shown. Stays
    /// true after a reset so the user can reload or upload again.
    pub fn workspace_open(&self) -> bool {
        self.workspace_open
    }

    pub fn toggle(&mut self, target: SelectorTarget, column: &str) -> bool {
        let selector = match target {
            SelectorTarget::MissingValues => &mut self.selectors.missing_values,
            SelectorTarget::Normalize => &mut self.selectors.normalize,
            SelectorTarget::Encoding => &mut self.selectors.encoding,
            SelectorTarget::DropColumns => &mut self.selectors.drop_columns,
        };
        selector.toggle(column)
    }

    pub fn choose_axis(&mut self, axis: Axis, column: Option<String>) {
        self.selectors.axes.choose(axis, column);
    }

    pub fn take_dismissals(&mut self) -> Vec<DismissTicket> {
        self.feedback.take_dismissals()
    }

    pub fn expire_feedback(&mut self, ticket: DismissTicket) -> bool {
        self.feedback.expire(ticket)
    }

    /// Validates the upload form. `file` is `None` when nothing was picked.
    pub fn prepare_upload(
        &mut self,
        file: Option<DatasetFile>,
    ) -> Result<OperationRequest, ApiError> {
        self.prepare_with(OperationKind::Upload, |_| dispatcher::upload_request(file))
    }

    /// Validates the form of `kind` and marks it as submitting.
    ///
    /// On error nothing is sent and the message is already shown in the
    /// operation's feedback scope.
    pub fn prepare(&mut self, kind: OperationKind) -> Result<OperationRequest, ApiError> {
        self.prepare_with(kind, |workbench| workbench.build_request(kind))
    }

    fn prepare_with(
        &mut self,
        kind: OperationKind,
        build: impl FnOnce(&Self) -> Result<OperationRequest, ApiError>,
    ) -> Result<OperationRequest, ApiError> {
        let request = match self.dispatcher.ensure_idle(kind) {
            Ok(()) => build(self),
            Err(e) => Err(e),
        };
        match request {
            Ok(request) => {
                self.dispatcher.begin(kind);
                Ok(request)
            }
            Err(e) => {
                log::warn!("{} rejected: {}", kind.label(), e);
                self.report(kind, &e);
                Err(e)
            }
        }
    }

    fn build_request(&self, kind: OperationKind) -> Result<OperationRequest, ApiError> {
        let inputs = &self.inputs;
        match kind {
            OperationKind::Upload => dispatcher::upload_request(None),
            OperationKind::HandleMissing => dispatcher::columns_request(
                kind,
                self.selectors.missing_values.selection(),
                &inputs.missing_method,
            ),
            OperationKind::Normalize => dispatcher::columns_request(
                kind,
                self.selectors.normalize.selection(),
                &inputs.normalize_method,
            ),
            OperationKind::Encode => dispatcher::columns_request(
                kind,
                self.selectors.encoding.selection(),
                &inputs.encoding_method,
            ),
            OperationKind::DropColumns => dispatcher::columns_request(
                kind,
                self.selectors.drop_columns.selection(),
                "",
            ),
            OperationKind::Visualize => dispatcher::visualization_request(
                &inputs.chart_type,
                &self.selectors.axes,
                &inputs.chart_title,
            ),
            OperationKind::Download => Ok(OperationRequest::Download),
            OperationKind::Reset => Ok(OperationRequest::Reset),
        }
    }

    /// Accepts the result of a request sent for `kind`.
    ///
    /// Errors are reported and returned; neither the schema nor any selection
    /// changes on an error.
    pub fn complete(
        &mut self,
        kind: OperationKind,
        result: Result<OperationReply, ApiError>,
    ) -> Result<FollowUp, ApiError> {
        self.dispatcher.finish(kind);
        let reply = result.map_err(|e| {
            log::error!("{} failed: {}", kind.label(), e);
            self.report(kind, &e);
            e
        })?;

        let scope = kind.scope();
        match reply {
            OperationReply::Uploaded(upload) => {
                let schema = DatasetSchema::from_upload(&upload);
                self.preview =
                    PreviewTable::build(schema.columns(), &upload.sample_data, &upload.missing_values);
                self.synchronizer.install(schema);
                self.redistribute();
                self.workspace_open = true;
                log::info!("uploaded {} ({} rows)", upload.filename, upload.rows);
                self.feedback.success(scope, UPLOAD_SUCCESS);
                Ok(FollowUp::Refresh)
            }
            OperationReply::Mutated(reply) => {
                log::info!("{} succeeded: {}", kind.label(), reply.message);
                self.feedback.success(scope, reply.message);
                Ok(FollowUp::Refresh)
            }
            OperationReply::Visualized(chart) => {
                self.gallery.push(chart.image);
                self.feedback.success(scope, VISUALIZATION_SUCCESS);
                Ok(FollowUp::Nothing)
            }
            OperationReply::Downloaded(download) => {
                let bytes = general_purpose::STANDARD
                    .decode(download.content.trim())
                    .map_err(|e| {
                        let e = ApiError::Transport(format!("malformed file content: {}", e));
                        self.report(kind, &e);
                        e
                    })?;
                log::info!("downloaded {} ({} bytes)", download.filename, bytes.len());
                Ok(FollowUp::Deliver(DownloadedFile {
                    filename: download.filename,
                    mime: CSV_MIME,
                    bytes,
                }))
            }
            OperationReply::Reset(reply) => {
                log::info!("dataset reset");
                self.synchronizer.clear();
                self.preview = PreviewTable::default();
                self.redistribute();
                self.feedback.success(scope, reply.message);
                // The service restored its original dataset.
                Ok(FollowUp::Refresh)
            }
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.synchronizer.begin_refresh()
    }

    /// Installs a refresh result and redistributes on success. Failures are
    /// shown in the upload scope and leave the current schema in place.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<PreviewResponse, ApiError>,
    ) -> RefreshOutcome {
        let sample = result
            .as_ref()
            .ok()
            .map(|preview| (preview.sample_data.clone(), preview.missing_values.clone()));
        let outcome = self.synchronizer.finish_refresh(ticket, result);
        match &outcome {
            RefreshOutcome::Installed => {
                if let (Some(schema), Some((rows, missing))) = (self.synchronizer.schema(), sample)
                {
                    self.preview = PreviewTable::build(schema.columns(), &rows, &missing);
                }
                self.redistribute();
            }
            RefreshOutcome::Stale => {}
            RefreshOutcome::Failed(e) => {
                self.feedback
                    .danger(FeedbackScope::Upload, e.user_message(REFRESH_ERROR_CONTEXT));
            }
        }
        outcome
    }

    fn redistribute(&mut self) {
        self.synchronizer.redistribute(&mut self.selectors);
    }

    fn report(&mut self, kind: OperationKind, error: &ApiError) {
        self.feedback
            .danger(kind.scope(), error.user_message(kind.error_context()));
    }
}
