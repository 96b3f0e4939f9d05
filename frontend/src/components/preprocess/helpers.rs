//! Browser-side helpers for the preprocessing workspace.
//!
//! - **Download sink**: turns a downloaded file into a `data:` link and clicks it.
//! - **Number formatting**: thousands separators for row counts.

use base64::{engine::general_purpose, Engine as _};
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::workbench::dispatcher::DownloadedFile;

/// Offers `file` to the user as a download under its suggested name.
pub fn deliver_download(file: &DownloadedFile) {
    let href = format!(
        "data:{};base64,{}",
        file.mime,
        general_purpose::STANDARD.encode(&file.bytes)
    );
    let anchor = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.create_element("a").ok())
        .and_then(|e| e.dyn_into::<HtmlAnchorElement>().ok());
    match anchor {
        Some(anchor) => {
            anchor.set_href(&href);
            anchor.set_download(&file.filename);
            anchor.click();
        }
        None => log::error!("cannot create a download link for {}", file.filename),
    }
}

pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}
