//! In-memory `DatasetService` that answers from queued response bodies.
//!
//! Bodies go through the same `decode_reply` as real responses, so an
//! `{"error": ...}` body fails exactly as it would over HTTP. Every call is
//! recorded with the form fields it would have sent.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use common::error::ApiError;
use common::model::dataset::{
    DownloadResponse, MessageResponse, PreviewResponse, UploadResponse, VisualizationResponse,
};
use common::reply::decode_reply;
use common::requests::{ColumnsForm, FormFields, VisualizationForm};
use serde::de::DeserializeOwned;

use super::{DatasetFile, DatasetService, Endpoint};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub fields: FormFields,
}

#[derive(Debug, Default)]
pub struct ScriptedService {
    replies: RefCell<HashMap<Endpoint, VecDeque<Result<String, ApiError>>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `body` as the next answer of `endpoint`.
    pub fn reply(&self, endpoint: Endpoint, body: impl Into<String>) -> &Self {
        self.replies
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(Ok(body.into()));
        self
    }

    /// Queues a failure that never produced a body (network error).
    pub fn fail(&self, endpoint: Endpoint, error: ApiError) -> &Self {
        self.replies
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .count()
    }

    fn answer<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        fields: FormFields,
    ) -> Result<T, ApiError> {
        self.calls.borrow_mut().push(RecordedCall { endpoint, fields });
        let next = self
            .replies
            .borrow_mut()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Ok(body)) => decode_reply(&body),
            Some(Err(error)) => Err(error),
            None => Err(ApiError::Transport(format!(
                "no scripted reply for {}",
                endpoint.path()
            ))),
        }
    }
}

impl DatasetService for ScriptedService {
    async fn upload(&self, file: &DatasetFile) -> Result<UploadResponse, ApiError> {
        self.answer(Endpoint::Upload, vec![("file", file.name.clone())])
    }

    async fn preview(&self) -> Result<PreviewResponse, ApiError> {
        self.answer(Endpoint::Preview, Vec::new())
    }

    async fn handle_missing(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError> {
        self.answer(Endpoint::HandleMissing, form.fields()?)
    }

    async fn normalize(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError> {
        self.answer(Endpoint::Normalize, form.fields()?)
    }

    async fn encode(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError> {
        self.answer(Endpoint::Encode, form.fields()?)
    }

    async fn drop_columns(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError> {
        self.answer(Endpoint::DropColumns, form.fields()?)
    }

    async fn visualize(
        &self,
        form: &VisualizationForm,
    ) -> Result<VisualizationResponse, ApiError> {
        self.answer(Endpoint::Visualize, form.fields())
    }

    async fn download(&self) -> Result<DownloadResponse, ApiError> {
        self.answer(Endpoint::Download, Vec::new())
    }

    async fn reset(&self) -> Result<MessageResponse, ApiError> {
        self.answer(Endpoint::Reset, Vec::new())
    }
}
