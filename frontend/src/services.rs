//! Wiring of the core services for the browser.
//!
//! Built once by `App` at startup: identity from `localStorage`, the HTTP
//! gateway, the query cache and the mutation coordinator. Components receive
//! them through [`Services`].

use std::rc::Rc;

use common::identity::{ClientIdentity, MemoryStore};
use common::mutation::{MutationCoordinator, Navigator, Notifier, Route};
use common::query::{Clock, QueryCache};
use common::GalleryConfig;
use futures_util::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use log::{info, warn};
use yew::Callback;

use crate::gateway::HttpGateway;
use crate::storage::BrowserStorage;

pub type Cache = QueryCache<HttpGateway, BrowserClock>;
pub type Mutations = MutationCoordinator<HttpGateway, BrowserClock>;

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        TimeoutFuture::new(ms).boxed_local()
    }
}

/// Forwards navigation requests from the core to the `App` component.
pub struct CallbackNavigator(pub Callback<Route>);

impl Navigator for CallbackNavigator {
    fn go_to(&self, route: Route) {
        self.0.emit(route);
    }
}

#[derive(Clone)]
pub struct Services {
    pub cache: Rc<Cache>,
    pub mutations: Rc<Mutations>,
    pub max_upload_bytes: u64,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cache, &other.cache) && Rc::ptr_eq(&self.mutations, &other.mutations)
    }
}

impl Services {
    pub fn build(
        config: GalleryConfig,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let identity = match BrowserStorage::local() {
            Some(storage) => {
                ClientIdentity::load_or_create(&storage, &config.storage_key, &config.sub_id_prefix)
            }
            None => {
                warn!("localStorage unavailable, the client identifier will not survive a reload");
                ClientIdentity::load_or_create(
                    &MemoryStore::default(),
                    &config.storage_key,
                    &config.sub_id_prefix,
                )
            }
        };
        info!("Client identifier: {}", identity.sub_id());

        let max_upload_bytes = config.max_upload_bytes;
        let gateway = Rc::new(HttpGateway::new(config.clone(), &identity));
        let cache = Rc::new(QueryCache::new(gateway, Rc::new(BrowserClock), Rc::new(config)));
        let mutations = Rc::new(MutationCoordinator::new(Rc::clone(&cache), notifier, navigator));

        Self {
            cache,
            mutations,
            max_upload_bytes,
        }
    }
}
