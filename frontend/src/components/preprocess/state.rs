use std::rc::Rc;

use yew::prelude::*;

use crate::api::HttpDatasetService;
use crate::config::ClientConfig;
use crate::workbench::Workbench;

pub const TAB_DATA: &str = "data";
pub const TAB_PREPROCESS: &str = "preprocess";
pub const TAB_VISUALIZE: &str = "visualize";

/// State of the `PreprocessComponent`.
///
/// Fields are `pub` because they are accessed by the `view` and `update`
/// modules.
pub struct PreprocessComponent {
    /// Everything the workspace shows. Only mutated from `update`.
    pub workbench: Workbench,

    /// Shared with the futures spawned for in-flight requests.
    pub service: Rc<HttpDatasetService>,

    pub config: ClientConfig,

    /// File currently picked in the upload input, not yet read.
    pub selected_file: Option<web_sys::File>,

    /// One of `TAB_DATA`, `TAB_PREPROCESS`, `TAB_VISUALIZE`.
    pub active_tab: String,

    pub file_input_ref: NodeRef,
}

impl PreprocessComponent {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            workbench: Workbench::new(),
            service: Rc::new(HttpDatasetService::new(config.clone())),
            config,
            selected_file: None,
            active_tab: TAB_DATA.to_string(),
            file_input_ref: NodeRef::default(),
        }
    }
}
