use common::error::ApiError;
use common::model::dataset::{
    DownloadResponse, MessageResponse, PreviewResponse, UploadResponse, VisualizationResponse,
};
use common::reply::decode_reply;
use common::requests::{ColumnsForm, FormFields, VisualizationForm};
use gloo_file::Blob;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{FormData, UrlSearchParams};

use super::{DatasetFile, DatasetService, Endpoint};
use crate::config::ClientConfig;

/// `DatasetService` over `fetch`, via `gloo-net`.
///
/// Mutating endpoints receive URL-encoded forms, upload receives multipart
/// with the file under `file`, and the two read endpoints are plain GETs.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpDatasetService {
    config: ClientConfig,
}

impl HttpDatasetService {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        self.config.endpoint(endpoint.path())
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let response = Request::get(&self.url(endpoint))
            .send()
            .await
            .map_err(transport)?;
        read_reply(endpoint, response).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        fields: FormFields,
    ) -> Result<T, ApiError> {
        let params = UrlSearchParams::new().map_err(js_transport)?;
        for (name, value) in &fields {
            params.append(name, value);
        }
        let response = Request::post(&self.url(endpoint))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(params)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_reply(endpoint, response).await
    }

    async fn post_columns<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        form: &ColumnsForm,
    ) -> Result<T, ApiError> {
        self.post_form(endpoint, form.fields()?).await
    }
}

impl DatasetService for HttpDatasetService {
    async fn upload(&self, file: &DatasetFile) -> Result<UploadResponse, ApiError> {
        let form = FormData::new().map_err(js_transport)?;
        let blob: web_sys::Blob = Blob::new(file.bytes.as_slice()).into();
        form.append_with_blob_and_filename("file", &blob, &file.name)
            .map_err(js_transport)?;
        let response = Request::post(&self.url(Endpoint::Upload))
            .body(form)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_reply(Endpoint::Upload, response).await
    }

    async fn preview(&self) -> Result<PreviewResponse, ApiError> {
        self.get(Endpoint::Preview).await
    }

    async fn handle_missing(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError> {
        self.post_columns(Endpoint::HandleMissing, form).await
    }

    async fn normalize(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError> {
        self.post_columns(Endpoint::Normalize, form).await
    }

    async fn encode(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError> {
        self.post_columns(Endpoint::Encode, form).await
    }

    async fn drop_columns(&self, form: &ColumnsForm) -> Result<MessageResponse, ApiError> {
        self.post_columns(Endpoint::DropColumns, form).await
    }

    async fn visualize(
        &self,
        form: &VisualizationForm,
    ) -> Result<VisualizationResponse, ApiError> {
        self.post_form(Endpoint::Visualize, form.fields()).await
    }

    async fn download(&self) -> Result<DownloadResponse, ApiError> {
        self.get(Endpoint::Download).await
    }

    async fn reset(&self) -> Result<MessageResponse, ApiError> {
        let response = Request::post(&self.url(Endpoint::Reset))
            .send()
            .await
            .map_err(transport)?;
        read_reply(Endpoint::Reset, response).await
    }
}

async fn read_reply<T: DeserializeOwned>(
    endpoint: Endpoint,
    response: Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    log::debug!("{} answered {} ({} bytes)", endpoint.path(), status, body.len());
    // A JSON `error` body is the service's answer even on a 4xx/5xx status.
    decode_reply(&body).map_err(|e| match e {
        ApiError::Transport(detail) if !(200..300).contains(&status) => {
            ApiError::Transport(format!("HTTP {}: {}", status, detail))
        }
        other => other,
    })
}

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn js_transport(err: JsValue) -> ApiError {
    ApiError::Transport(format!("{:?}", err))
}
