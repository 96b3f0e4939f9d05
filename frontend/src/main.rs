use frontend::app::{App, AppProps};
use frontend::config::ClientConfig;

fn main() {
    let config = ClientConfig::from_document();
    frontend::logging::init(config.log_level);
    log::info!("starting client, api base '{}'", config.api_base);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
