//! Gallery page: lists the merged cards and forwards favourite/vote intents to
//! the mutation coordinator.
//!
//! The component never edits cards itself. It subscribes to the query cache,
//! re-reads a snapshot whenever the cache reports a change, and triggers a
//! refetch of whatever a mutation invalidated.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::GalleryProps;
pub use state::GalleryComponent;

impl Component for GalleryComponent {
    type Message = Msg;
    type Properties = GalleryProps;

    fn create(ctx: &Context<Self>) -> Self {
        let cache = &ctx.props().services.cache;
        let link = ctx.link().clone();
        let listener = cache.subscribe(move || link.send_message(Msg::CacheChanged));

        let link = ctx.link().clone();
        let focus_listener = Closure::<dyn Fn()>::new(move || link.send_message(Msg::Refocused));
        if let Some(window) = web_sys::window() {
            window
                .add_event_listener_with_callback("focus", focus_listener.as_ref().unchecked_ref())
                .ok();
        }

        Self {
            view: cache.snapshot(),
            listener: Some(listener),
            focus_listener: Some(focus_listener),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let cache = ctx.props().services.cache.clone();
            spawn_local(async move {
                cache.load_all().await;
            });
        }
    }

    fn destroy(&mut self, ctx: &Context<Self>) {
        if let Some(id) = self.listener.take() {
            ctx.props().services.cache.unsubscribe(id);
        }
        if let (Some(window), Some(listener)) = (web_sys::window(), self.focus_listener.take()) {
            window
                .remove_event_listener_with_callback("focus", listener.as_ref().unchecked_ref())
                .ok();
        }
    }
}
