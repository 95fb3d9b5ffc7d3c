use common::mutation::Route;
use yew::{classes, html, Callback, Html};

/// Top navigation bar with the brand and the two routes.
pub fn nav_bar(current: Route, on_navigate: &Callback<Route>) -> Html {
    html! {
        <nav class="nav-bar">
            <div class="nav-inner">
                <button class="brand" onclick={on_navigate.reform(|_| Route::Gallery)}>
                    <span class="brand-icon">{"🐱"}</span>
                    <span class="brand-name">{"Cat App"}</span>
                </button>
                <div class="nav-links">
                    { nav_link("Gallery", Route::Gallery, current, on_navigate) }
                    { nav_link("Upload", Route::Upload, current, on_navigate) }
                </div>
            </div>
        </nav>
    }
}

fn nav_link(label: &'static str, target: Route, current: Route, on_navigate: &Callback<Route>) -> Html {
    html! {
        <button
            class={classes!("nav-link", (target == current).then_some("active"))}
            onclick={on_navigate.reform(move |_| target)}
        >
            { label }
        </button>
    }
}
