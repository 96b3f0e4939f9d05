//! Client configuration.
//!
//! Endpoint paths are fixed by the dataset service. `api_base` is prepended to
//! each of them so the client can be hosted on a different origin than the
//! service; the default (empty) targets the page's own origin.

use std::str::FromStr;

use log::LevelFilter;

pub const UPLOAD_PATH: &str = "/upload/";
pub const PREVIEW_PATH: &str = "/data/preview/";
pub const HANDLE_MISSING_PATH: &str = "/preprocess/handle-missing/";
pub const NORMALIZE_PATH: &str = "/preprocess/normalize/";
pub const ENCODE_PATH: &str = "/preprocess/encode-categorical/";
pub const DROP_COLUMNS_PATH: &str = "/preprocess/drop-columns/";
pub const VISUALIZE_PATH: &str = "/visualization/create/";
pub const DOWNLOAD_PATH: &str = "/data/download/";
pub const RESET_PATH: &str = "/preprocess/reset/";

/// How long a feedback message stays visible.
pub const FEEDBACK_DISMISS_MS: u32 = 5_000;

const API_BASE_META: &str = "dataprep-api-base";
const LOG_LEVEL_META: &str = "dataprep-log-level";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub feedback_dismiss_ms: u32,
    pub log_level: LevelFilter,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            feedback_dismiss_ms: FEEDBACK_DISMISS_MS,
            log_level: LevelFilter::Info,
        }
    }
}

impl ClientConfig {
    /// Applies host-page overrides. Unparseable log levels are ignored.
    pub fn with_overrides(api_base: Option<&str>, log_level: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = api_base.map(str::trim).filter(|b| !b.is_empty()) {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(level) = log_level.and_then(|l| LevelFilter::from_str(l.trim()).ok()) {
            config.log_level = level;
        }
        config
    }

    /// Reads overrides from `<meta name="dataprep-...">` tags of the host page.
    pub fn from_document() -> Self {
        let api_base = meta_content(API_BASE_META);
        let log_level = meta_content(LOG_LEVEL_META);
        Self::with_overrides(api_base.as_deref(), log_level.as_deref())
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
}
