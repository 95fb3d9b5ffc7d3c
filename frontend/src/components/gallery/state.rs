use common::query::{GalleryView, ListenerId};
use wasm_bindgen::closure::Closure;

pub struct GalleryComponent {
    /// Last snapshot taken from the query cache.
    pub view: GalleryView,
    /// Cache subscription, dropped in `destroy`.
    pub listener: Option<ListenerId>,
    /// `focus` handler kept alive for as long as the page is mounted.
    pub focus_listener: Option<Closure<dyn Fn()>>,
}
