//! One gallery card: the image, its score and the favourite/vote controls.

use common::model::card::CatCard;
use common::model::vote::VoteValue;
use yew::{classes, html, Callback, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct CatCardProps {
    pub card: CatCard,
    #[prop_or_default]
    pub favourite_pending: bool,
    #[prop_or_default]
    pub vote_pending: bool,
    /// `(image_id, is_favourited, favourite_id)`
    pub on_toggle_favourite: Callback<(String, bool, Option<u64>)>,
    pub on_vote: Callback<(String, VoteValue)>,
}

pub enum Msg {
    ImageLoaded,
}

pub struct CatCardComponent {
    image_loaded: bool,
}

impl Component for CatCardComponent {
    type Message = Msg;
    type Properties = CatCardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            image_loaded: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ImageLoaded => {
                self.image_loaded = true;
                true
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().card.image.url != old_props.card.image.url {
            self.image_loaded = false;
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let card = &props.card;

        html! {
            <div class="card">
                <div class="card-image">
                    if !self.image_loaded {
                        <div class="spinner-wrap"><div class="spinner" /></div>
                    }
                    <img
                        src={card.image.url.clone()}
                        alt="Cat"
                        loading="lazy"
                        class={classes!(self.image_loaded.then_some("loaded"))}
                        onload={ctx.link().callback(|_| Msg::ImageLoaded)}
                    />
                </div>
                <div class="card-body">
                    { score_line(card) }
                    <div class="card-actions">
                        { favourite_button(props) }
                        { vote_buttons(props) }
                    </div>
                </div>
            </div>
        }
    }
}

fn score_class(score: i64) -> &'static str {
    match score {
        s if s > 0 => "score-positive",
        s if s < 0 => "score-negative",
        _ => "score-neutral",
    }
}

fn score_line(card: &CatCard) -> Html {
    html! {
        <div class="score-line">
            <span class="score-label">{"Score:"}</span>
            <span class={classes!("score", score_class(card.score))}>{ card.score_label() }</span>
            <span class="tally">{ format!("({} 👍 / {} 👎)", card.upvotes, card.downvotes) }</span>
        </div>
    }
}

fn favourite_button(props: &CatCardProps) -> Html {
    let card = &props.card;
    let args = (card.id().to_string(), card.is_favourited, card.favourite_id);
    let (icon, label, aria) = if card.is_favourited {
        ("❤️", "Favourited", "Remove from favourites")
    } else {
        ("🤍", "Favourite", "Add to favourites")
    };

    html! {
        <button
            class={classes!("fav-btn", card.is_favourited.then_some("active"))}
            aria-label={aria}
            disabled={props.favourite_pending}
            onclick={props.on_toggle_favourite.reform(move |_| args.clone())}
        >
            <span class="fav-icon">{ icon }</span>
            <span class="fav-label">{ label }</span>
        </button>
    }
}

fn vote_buttons(props: &CatCardProps) -> Html {
    let id = props.card.id().to_string();
    let up = id.clone();

    html! {
        <div class="vote-buttons">
            <button
                class="vote-btn up"
                aria-label="Vote up"
                disabled={props.vote_pending}
                onclick={props.on_vote.reform(move |_| (up.clone(), VoteValue::Up))}
            >
                {"▲"}
            </button>
            <button
                class="vote-btn down"
                aria-label="Vote down"
                disabled={props.vote_pending}
                onclick={props.on_vote.reform(move |_| (id.clone(), VoteValue::Down))}
            >
                {"▼"}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_class_follows_sign() {
        assert_eq!(score_class(3), "score-positive");
        assert_eq!(score_class(-3), "score-negative");
        assert_eq!(score_class(0), "score-neutral");
    }
}
