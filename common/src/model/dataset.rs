//! Response payloads of the dataset service.
//!
//! Every struct here is decoded through `crate::reply::decode_reply`, so an
//! `error` field never reaches these types: a response carrying one is turned
//! into `ApiError::Server` first. Fields the service does not always send are
//! `#[serde(default)]` so that older or trimmed responses still decode.

use crate::model::column::ColumnTypes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One sampled row, keyed by column name.
pub type SampleRow = Map<String, Value>;

/// Per-column count of missing values.
pub type MissingCounts = HashMap<String, u64>;

/// Returned by `POST /upload/`.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub rows: u64,
    pub columns: Vec<String>,
    #[serde(default)]
    pub column_types: ColumnTypes,
    #[serde(default)]
    pub missing_values: MissingCounts,
    #[serde(default)]
    pub sample_data: Vec<SampleRow>,
}

/// Returned by `GET /data/preview/`: the service's current dataset.
///
/// `filename` and `column_types` are optional because some service versions
/// omit them; the client then falls back to what it already knows.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct PreviewResponse {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub rows: u64,
    pub columns: Vec<String>,
    #[serde(default)]
    pub column_types: Option<ColumnTypes>,
    #[serde(default)]
    pub missing_values: MissingCounts,
    #[serde(default)]
    pub sample_data: Vec<SampleRow>,
}

/// Returned by the mutating endpoints and by reset.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Returned by `POST /visualization/create/`; `image` is a `data:` URI.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct VisualizationResponse {
    pub image: String,
}

/// Returned by `GET /data/download/`; `content` is the base64-encoded CSV.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DownloadResponse {
    pub content: String,
    pub filename: String,
}
