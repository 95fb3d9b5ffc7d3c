use common::mutation::Route;
use yew::{html, Callback, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub on_navigate: Callback<Route>,
}

pub struct EmptyStateComponent;

impl Component for EmptyStateComponent {
    type Message = ();
    type Properties = EmptyStateProps;

    fn create(_ctx: &Context<Self>) -> Self {
        EmptyStateComponent
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="empty-state">
                <div class="empty-icon">{"😿"}</div>
                <h2>{"No cats here yet!"}</h2>
                <p>{"Your gallery is empty. Upload your first cat image to get started."}</p>
                <button
                    class="btn btn-primary"
                    onclick={ctx.props().on_navigate.reform(|_| Route::Upload)}
                >
                    {"Upload Your First Cat"}
                </button>
            </div>
        }
    }
}
