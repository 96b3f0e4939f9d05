//! Preprocessing workspace: root module wiring the Yew `Component`
//! implementation to its submodules.
//!
//! The component is a projection of a headless `Workbench`. `update` feeds
//! user events and request results into it and starts the requests it asks
//! for; `view` renders whatever it currently holds.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::PreprocessProps;
pub use state::PreprocessComponent;

impl Component for PreprocessComponent {
    type Message = Msg;
    type Properties = PreprocessProps;

    fn create(ctx: &Context<Self>) -> Self {
        PreprocessComponent::new(ctx.props().config.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
