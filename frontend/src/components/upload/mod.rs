//! Upload page: pick an image, preview it, send it.
//!
//! Files are validated as soon as they are picked so a bad choice is reported
//! inline without any request. The coordinator handles the upload itself and
//! sends the user back to the gallery once it succeeds.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::UploadProps;
pub use state::UploadComponent;

impl Component for UploadComponent {
    type Message = Msg;
    type Properties = UploadProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
