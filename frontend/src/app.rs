use std::rc::Rc;

use common::mutation::Route;
use log::debug;
use yew::{html, Component, Context, Html};

use crate::components::gallery::GalleryComponent;
use crate::components::layout::nav_bar;
use crate::components::toast::ToastNotifier;
use crate::components::upload::UploadComponent;
use crate::config;
use crate::services::{CallbackNavigator, Services};

pub enum Msg {
    Navigate(Route),
}

/// Root component: owns the services and switches between the two pages.
pub struct App {
    route: Route,
    services: Services,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let navigator = CallbackNavigator(ctx.link().callback(Msg::Navigate));
        let services = Services::build(config::load(), Rc::new(ToastNotifier), Rc::new(navigator));
        Self {
            route: Route::default(),
            services,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(route) => {
                if route == self.route {
                    return false;
                }
                debug!("Navigating to {:?}", route);
                self.route = route;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_navigate = ctx.link().callback(Msg::Navigate);
        let services = self.services.clone();

        html! {
            <div class="app">
                { nav_bar(self.route, &on_navigate) }
                <main class="container">
                    {
                        match self.route {
                            Route::Gallery => html! { <GalleryComponent {services} {on_navigate} /> },
                            Route::Upload => html! { <UploadComponent {services} {on_navigate} /> },
                        }
                    }
                </main>
            </div>
        }
    }
}
