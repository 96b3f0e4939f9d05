use common::error::ApiError;
use common::model::dataset::PreviewResponse;

use crate::api::DatasetFile;
use crate::workbench::dispatcher::{OperationKind, OperationReply};
use crate::workbench::feedback::DismissTicket;
use crate::workbench::schema::RefreshTicket;
use crate::workbench::selector::Axis;
use crate::workbench::SelectorTarget;

pub enum Msg {
    SetTab(String),
    FileChosen(Option<web_sys::File>),
    Upload,
    FileRead(Result<DatasetFile, ApiError>),
    Toggle(SelectorTarget, String),
    SetMethod(SelectorTarget, String),
    SetChartType(String),
    SetChartTitle(String),
    ChooseAxis(Axis, Option<String>),
    Submit(OperationKind),
    Completed(OperationKind, Result<OperationReply, ApiError>),
    Refresh,
    Refreshed(RefreshTicket, Result<PreviewResponse, ApiError>),
    DismissFeedback(DismissTicket),
}
