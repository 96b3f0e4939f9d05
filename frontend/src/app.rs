use crate::components::preprocess::PreprocessComponent;
use crate::config::ClientConfig;
use yew::{html, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: ClientConfig,
}

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container py-4">
                <h1 class="mb-4">{"Data Preprocessing"}</h1>
                <PreprocessComponent config={ctx.props().config.clone()} />
            </div>
        }
    }
}
