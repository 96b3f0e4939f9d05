use yew::prelude::*;

use crate::config::ClientConfig;

/// Properties for the `PreprocessComponent`.
///
/// `config` is read once when the component is created; later changes are
/// not picked up.
#[derive(Properties, PartialEq, Clone)]
pub struct PreprocessProps {
    pub config: ClientConfig,
}
