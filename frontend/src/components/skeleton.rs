use yew::{html, Component, Context, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct SkeletonGridProps {
    #[prop_or(8)]
    pub count: usize,
}

/// Placeholder cards shown while the gallery loads.
pub struct SkeletonGrid;

impl Component for SkeletonGrid {
    type Message = ();
    type Properties = SkeletonGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        SkeletonGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="card-grid" aria-busy="true">
                { for (0..ctx.props().count).map(|_| skeleton_card()) }
            </div>
        }
    }
}

fn skeleton_card() -> Html {
    html! {
        <div class="card skeleton">
            <div class="skeleton-image" />
            <div class="card-body">
                <div class="skeleton-line short" />
                <div class="card-actions">
                    <div class="skeleton-line medium" />
                    <div class="skeleton-buttons">
                        <div class="skeleton-square" />
                        <div class="skeleton-square" />
                    </div>
                </div>
            </div>
        </div>
    }
}
