use crate::app::App;

mod app;
mod components;
mod config;
mod gateway;
mod logger;
mod services;
mod storage;

fn main() {
    logger::init();
    components::fallback::install_panic_fallback();
    yew::Renderer::<App>::new().render();
}
