//! Operation dispatch: validation, request construction and the per-operation
//! submit state.
//!
//! Every operation follows the same path: validate the user's input, mark the
//! operation as submitting, send one request, then hand the result back to the
//! workbench. Nothing here touches the schema or a selection; those only change
//! once a result has been accepted.

use std::collections::HashSet;

use common::error::ApiError;
use common::model::dataset::{
    DownloadResponse, MessageResponse, UploadResponse, VisualizationResponse,
};
use common::requests::{ColumnsForm, VisualizationForm};

use super::feedback::FeedbackScope;
use super::selector::{AxisPicker, Axis};
use crate::api::{DatasetFile, DatasetService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Upload,
    HandleMissing,
    Normalize,
    Encode,
    DropColumns,
    Visualize,
    Download,
    Reset,
}

impl OperationKind {
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Upload => "Upload",
            OperationKind::HandleMissing => "Missing-value handling",
            OperationKind::Normalize => "Normalization",
            OperationKind::Encode => "Encoding",
            OperationKind::DropColumns => "Column drop",
            OperationKind::Visualize => "Visualization",
            OperationKind::Download => "Download",
            OperationKind::Reset => "Reset",
        }
    }

    /// Region where this operation's feedback is shown.
    pub fn scope(&self) -> FeedbackScope {
        match self {
            OperationKind::Upload | OperationKind::Download | OperationKind::Reset => {
                FeedbackScope::Upload
            }
            OperationKind::HandleMissing => FeedbackScope::MissingValues,
            OperationKind::Normalize => FeedbackScope::Normalize,
            OperationKind::Encode => FeedbackScope::Encoding,
            OperationKind::DropColumns => FeedbackScope::DropColumns,
            OperationKind::Visualize => FeedbackScope::Visualization,
        }
    }

    /// Prefix for transport failures of this operation.
    pub fn error_context(&self) -> &'static str {
        match self {
            OperationKind::Upload => "Error uploading file",
            OperationKind::HandleMissing
            | OperationKind::Normalize
            | OperationKind::Encode
            | OperationKind::DropColumns => "Error processing data",
            OperationKind::Visualize => "Error creating visualization",
            OperationKind::Download => "Error downloading file",
            OperationKind::Reset => "Error resetting data",
        }
    }
}

/// A validated request, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRequest {
    Upload(DatasetFile),
    HandleMissing(ColumnsForm),
    Normalize(ColumnsForm),
    Encode(ColumnsForm),
    DropColumns(ColumnsForm),
    Visualize(VisualizationForm),
    Download,
    Reset,
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Upload(_) => OperationKind::Upload,
            OperationRequest::HandleMissing(_) => OperationKind::HandleMissing,
            OperationRequest::Normalize(_) => OperationKind::Normalize,
            OperationRequest::Encode(_) => OperationKind::Encode,
            OperationRequest::DropColumns(_) => OperationKind::DropColumns,
            OperationRequest::Visualize(_) => OperationKind::Visualize,
            OperationRequest::Download => OperationKind::Download,
            OperationRequest::Reset => OperationKind::Reset,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationReply {
    Uploaded(UploadResponse),
    Mutated(MessageResponse),
    Visualized(VisualizationResponse),
    Downloaded(DownloadResponse),
    Reset(MessageResponse),
}

/// What the host must do after a result was accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum FollowUp {
    Nothing,
    /// Re-fetch the schema from the service.
    Refresh,
    /// Hand the file to the user.
    Deliver(DownloadedFile),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedFile {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationPhase {
    Idle,
    Submitting,
}

/// Tracks which operations have a request in flight.
///
/// A second submit of an operation that is still in flight is refused.
/// Different operations may run at the same time; their effects reach the
/// schema in response order.
#[derive(Debug, Default)]
pub struct OperationDispatcher {
    in_flight: HashSet<OperationKind>,
}

impl OperationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, kind: OperationKind) -> OperationPhase {
        if self.in_flight.contains(&kind) {
            OperationPhase::Submitting
        } else {
            OperationPhase::Idle
        }
    }

    pub fn ensure_idle(&self, kind: OperationKind) -> Result<(), ApiError> {
        match self.phase(kind) {
            OperationPhase::Idle => Ok(()),
            OperationPhase::Submitting => Err(ApiError::Validation(format!(
                "{} is already in progress",
                kind.label()
            ))),
        }
    }

    pub fn begin(&mut self, kind: OperationKind) {
        self.in_flight.insert(kind);
    }

    pub fn finish(&mut self, kind: OperationKind) {
        self.in_flight.remove(&kind);
    }
}

pub const EMPTY_SELECTION: &str = "Please select at least one column";
pub const MISSING_FILE: &str = "Please select a file";
pub const MISSING_X_AXIS: &str = "Please select an X-axis column";

/// Builds the request of a column-based operation from the widget's selection.
pub fn columns_request(
    kind: OperationKind,
    selection: Vec<String>,
    method: &str,
) -> Result<OperationRequest, ApiError> {
    if selection.is_empty() {
        return Err(ApiError::Validation(EMPTY_SELECTION.to_string()));
    }
    let request = match kind {
        OperationKind::HandleMissing => {
            OperationRequest::HandleMissing(ColumnsForm::with_method(selection, method))
        }
        OperationKind::Normalize => {
            OperationRequest::Normalize(ColumnsForm::with_method(selection, method))
        }
        OperationKind::Encode => {
            OperationRequest::Encode(ColumnsForm::with_method(selection, method))
        }
        OperationKind::DropColumns => {
            OperationRequest::DropColumns(ColumnsForm::columns_only(selection))
        }
        other => {
            return Err(ApiError::Validation(format!(
                "{} does not take a column selection",
                other.label()
            )));
        }
    };
    Ok(request)
}

pub fn visualization_request(
    chart_type: &str,
    axes: &AxisPicker,
    title: &str,
) -> Result<OperationRequest, ApiError> {
    let x_column = axes
        .chosen(Axis::X)
        .ok_or_else(|| ApiError::Validation(MISSING_X_AXIS.to_string()))?;
    let title = title.trim();
    Ok(OperationRequest::Visualize(VisualizationForm {
        chart_type: chart_type.to_string(),
        x_column: x_column.to_string(),
        y_column: axes.chosen(Axis::Y).map(str::to_string),
        hue: axes.chosen(Axis::Hue).map(str::to_string),
        title: (!title.is_empty()).then(|| title.to_string()),
    }))
}

pub fn upload_request(file: Option<DatasetFile>) -> Result<OperationRequest, ApiError> {
    file.map(OperationRequest::Upload)
        .ok_or_else(|| ApiError::Validation(MISSING_FILE.to_string()))
}

/// Sends `request` and wraps the typed response.
pub async fn execute<S: DatasetService>(
    service: &S,
    request: &OperationRequest,
) -> Result<OperationReply, ApiError> {
    log::debug!("sending {} request", request.kind().label());
    match request {
        OperationRequest::Upload(file) => service.upload(file).await.map(OperationReply::Uploaded),
        OperationRequest::HandleMissing(form) => service
            .handle_missing(form)
            .await
            .map(OperationReply::Mutated),
        OperationRequest::Normalize(form) => {
            service.normalize(form).await.map(OperationReply::Mutated)
        }
        OperationRequest::Encode(form) => service.encode(form).await.map(OperationReply::Mutated),
        OperationRequest::DropColumns(form) => service
            .drop_columns(form)
            .await
            .map(OperationReply::Mutated),
        OperationRequest::Visualize(form) => {
            service.visualize(form).await.map(OperationReply::Visualized)
        }
        OperationRequest::Download => service.download().await.map(OperationReply::Downloaded),
        OperationRequest::Reset => service.reset().await.map(OperationReply::Reset),
    }
}
