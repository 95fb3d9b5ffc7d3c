//! Message handling for the gallery page.

use common::mutation::MutationKey;
use log::debug;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::GalleryComponent;

/// Returns `true` when the view should re-render.
pub fn update(component: &mut GalleryComponent, ctx: &Context<GalleryComponent>, msg: Msg) -> bool {
    let services = &ctx.props().services;

    match msg {
        Msg::CacheChanged => {
            if !services.cache.pending_invalidations().is_empty() {
                let cache = services.cache.clone();
                spawn_local(async move {
                    cache.refresh_invalidated().await;
                });
            }
            refresh_view(component, ctx)
        }
        Msg::Refocused | Msg::Retry => {
            let cache = services.cache.clone();
            spawn_local(async move {
                cache.load_all().await;
            });
            false
        }
        Msg::ToggleFavourite {
            image_id,
            is_favourited,
            favourite_id,
        } => {
            if services
                .mutations
                .is_pending(&MutationKey::Favourite(image_id.clone()))
            {
                return false;
            }
            // Starting the request marks the key pending before the re-render below.
            let request = services
                .mutations
                .toggle_favourite(&image_id, is_favourited, favourite_id);
            let link = ctx.link().clone();
            spawn_local(async move {
                // Outcome feedback is a toast from the coordinator.
                if let Err(e) = request.await {
                    debug!("Favourite toggle on {} ended with {}", image_id, e);
                }
                link.send_message(Msg::MutationSettled);
            });
            // Re-render so the button shows as pending.
            true
        }
        Msg::Vote { image_id, value } => {
            if services
                .mutations
                .is_pending(&MutationKey::Vote(image_id.clone()))
            {
                return false;
            }
            let request = services.mutations.vote(&image_id, value);
            let link = ctx.link().clone();
            spawn_local(async move {
                if let Err(e) = request.await {
                    debug!("Vote on {} ended with {}", image_id, e);
                }
                link.send_message(Msg::MutationSettled);
            });
            true
        }
        Msg::MutationSettled => true,
    }
}

fn refresh_view(component: &mut GalleryComponent, ctx: &Context<GalleryComponent>) -> bool {
    let view = ctx.props().services.cache.snapshot();
    if view == component.view {
        return false;
    }
    component.view = view;
    true
}
