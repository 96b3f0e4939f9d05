//! Boundary to the dataset service.
//!
//! `DatasetService` is the seam between the workbench and the transport. The
//! browser build talks HTTP through `HttpDatasetService`; `ScriptedService`
//! answers from canned bodies so the whole protocol can run without a browser.
//! Both decode every body with `common::reply::decode_reply`.

mod http;
pub mod scripted;

use common::error::ApiError;
use common::model::dataset::{
    DownloadResponse, MessageResponse, PreviewResponse, UploadResponse, VisualizationResponse,
};
use common::requests::{ColumnsForm, VisualizationForm};

use crate::config;

pub use http::HttpDatasetService;
pub use scripted::ScriptedService;

/// A file picked by the user, already read into memory.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Upload,
    Preview,
    HandleMissing,
    Normalize,
    Encode,
    DropColumns,
    Visualize,
    Download,
    Reset,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Upload => config::UPLOAD_PATH,
            Endpoint::Preview => config::PREVIEW_PATH,
            Endpoint::HandleMissing => config::HANDLE_MISSING_PATH,
            Endpoint::Normalize => config::NORMALIZE_PATH,
            Endpoint::Encode => config::ENCODE_PATH,
            Endpoint::DropColumns => config::DROP_COLUMNS_PATH,
            Endpoint::Visualize => config::VISUALIZE_PATH,
            Endpoint::Download => config::DOWNLOAD_PATH,
            Endpoint::Reset => config::RESET_PATH,
        }
    }
}

/// One request/response exchange per method. No retries, no timeouts.
#[allow(async_fn_in_trait)]
pub trait DatasetService {
    async fn upload(&self, file: &DatasetFile) -> Result<UploadResponse, ApiError>;
    async fn preview(&self) -> Result<PreviewResponse, ApiError>;
    async fn handle_missing(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError>;
    async fn normalize(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError>;
    async fn encode(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError>;
    async fn drop_columns(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError>;
    async fn visualize(&self, form: &VisualizationForm)
        -> Result<VisualizationResponse, ApiError>;
    async fn download(&self) -> Result<DownloadResponse, ApiError>;
    async fn reset(&self) -> Result<MessageResponse, ApiError>;
}
