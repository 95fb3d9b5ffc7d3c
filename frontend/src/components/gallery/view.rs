//! Rendering of the gallery page: skeletons while loading, an error panel,
//! the empty state, or the card grid.

use common::model::card::CatCard;
use common::mutation::MutationKey;
use common::query::GalleryView;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::GalleryComponent;
use crate::components::card::CatCardComponent;
use crate::components::empty_state::EmptyStateComponent;
use crate::components::helpers::cat_count_label;
use crate::components::skeleton::SkeletonGrid;

const LOAD_FAILED: &str = "Failed to load the gallery";

pub fn view(component: &GalleryComponent, ctx: &Context<GalleryComponent>) -> Html {
    let link = ctx.link();
    let gallery = &component.view;

    if gallery.loading {
        return html! {
            <div>
                <h1 class="page-title">{"Cat Gallery"}</h1>
                <SkeletonGrid count={8} />
            </div>
        };
    }

    if gallery.cards.is_empty() {
        let body = match &gallery.error {
            Some(e) => error_panel(&e.user_message(LOAD_FAILED), link),
            None => html! { <EmptyStateComponent on_navigate={ctx.props().on_navigate.clone()} /> },
        };
        return html! {
            <div>
                <h1 class="page-title">{"Cat Gallery"}</h1>
                { body }
            </div>
        };
    }

    html! {
        <div>
            <div class="page-header">
                <h1 class="page-title">{"Cat Gallery"}</h1>
                <p class="page-subtitle">{ cat_count_label(gallery.cards.len()) }</p>
            </div>
            { stale_banner(gallery, link) }
            <div class="card-grid">
                { for gallery.cards.iter().map(|card| build_card(card, ctx)) }
            </div>
        </div>
    }
}

fn build_card(card: &CatCard, ctx: &Context<GalleryComponent>) -> Html {
    let mutations = &ctx.props().services.mutations;
    let link = ctx.link();
    let favourite_pending = mutations.is_pending(&MutationKey::Favourite(card.id().to_string()));
    let vote_pending = mutations.is_pending(&MutationKey::Vote(card.id().to_string()));

    html! {
        <CatCardComponent
            key={card.id().to_string()}
            card={card.clone()}
            {favourite_pending}
            {vote_pending}
            on_toggle_favourite={link.callback(|(image_id, is_favourited, favourite_id)| Msg::ToggleFavourite {
                image_id,
                is_favourited,
                favourite_id,
            })}
            on_vote={link.callback(|(image_id, value)| Msg::Vote { image_id, value })}
        />
    }
}

fn error_panel(message: &str, link: &Scope<GalleryComponent>) -> Html {
    html! {
        <div class="error-panel" role="alert">
            <p>{ message.to_string() }</p>
            <button class="btn btn-primary" onclick={link.callback(|_| Msg::Retry)}>{"Try again"}</button>
        </div>
    }
}

/// Cards are still shown when a background refetch fails; say so above them.
fn stale_banner(gallery: &GalleryView, link: &Scope<GalleryComponent>) -> Html {
    match &gallery.error {
        Some(e) => html! {
            <div class="stale-banner" role="alert">
                <span>{ e.user_message(LOAD_FAILED) }</span>
                <button class="link-btn" onclick={link.callback(|_| Msg::Retry)}>{"Retry"}</button>
            </div>
        },
        None => html! {},
    }
}
