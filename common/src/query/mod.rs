//! Query/cache orchestration for the three remote collections.
//!
//! Each collection lives in its own versioned [`QueryCell`]. Reads are
//! deduplicated while a request is in flight, retried on transient failures
//! and refetched once the data goes stale or is invalidated by a mutation.
//! Listeners registered through [`QueryCache::subscribe`] are told whenever
//! any cell changes, and [`QueryCache::snapshot`] re-derives the gallery view,
//! re-running the merge only when one of the three versions moved.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use futures_util::future::{join3, join_all, LocalBoxFuture};
use log::{debug, info};

use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::gateway::GalleryGateway;
use crate::merge::merge_cat_data;
use crate::model::card::CatCard;
use crate::model::favourite::Favourite;
use crate::model::image::Image;
use crate::model::vote::Vote;

mod cell;

pub use cell::{CellStatus, ListenerId, QueryCell};
use cell::{read, Listeners, ReadContext};

/// Time source and timer, supplied by the platform.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

/// Cache key of a remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Images,
    Favourites,
    Votes,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Images, Collection::Favourites, Collection::Votes];

    pub fn key(self) -> &'static str {
        match self {
            Collection::Images => "images",
            Collection::Favourites => "favourites",
            Collection::Votes => "votes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView {
    /// True while any collection has never produced data.
    pub loading: bool,
    /// True while any request is in flight, including background refetches.
    pub fetching: bool,
    /// First error among images, favourites, votes.
    pub error: Option<GalleryError>,
    /// Empty until all three collections have loaded at least once.
    pub cards: Rc<Vec<CatCard>>,
}

struct Merged {
    versions: [u64; 3],
    cards: Rc<Vec<CatCard>>,
}

pub struct QueryCache<G, C> {
    gateway: Rc<G>,
    ctx: ReadContext<C>,
    images: Rc<RefCell<QueryCell<Vec<Image>>>>,
    favourites: Rc<RefCell<QueryCell<Vec<Favourite>>>>,
    votes: Rc<RefCell<QueryCell<Vec<Vote>>>>,
    merged: RefCell<Option<Merged>>,
}

impl<G, C> QueryCache<G, C>
where
    G: GalleryGateway + 'static,
    C: Clock + 'static,
{
    pub fn new(gateway: Rc<G>, clock: Rc<C>, config: Rc<GalleryConfig>) -> Self {
        Self {
            gateway,
            ctx: ReadContext {
                clock,
                config,
                listeners: Rc::new(Listeners::default()),
            },
            images: Rc::new(RefCell::new(QueryCell::new(Collection::Images))),
            favourites: Rc::new(RefCell::new(QueryCell::new(Collection::Favourites))),
            votes: Rc::new(RefCell::new(QueryCell::new(Collection::Votes))),
            merged: RefCell::new(None),
        }
    }

    pub fn gateway(&self) -> &Rc<G> {
        &self.gateway
    }

    pub fn clock(&self) -> &Rc<C> {
        &self.ctx.clock
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.ctx.config
    }

    pub async fn images(&self) -> Result<Rc<Vec<Image>>, GalleryError> {
        let gateway = Rc::clone(&self.gateway);
        let limit = self.ctx.config.page_size;
        read(Rc::clone(&self.images), self.ctx.clone(), move || {
            let gateway = Rc::clone(&gateway);
            async move { gateway.fetch_images(limit).await }
        })
        .await
    }

    pub async fn favourites(&self) -> Result<Rc<Vec<Favourite>>, GalleryError> {
        let gateway = Rc::clone(&self.gateway);
        read(Rc::clone(&self.favourites), self.ctx.clone(), move || {
            let gateway = Rc::clone(&gateway);
            async move { gateway.fetch_favourites().await }
        })
        .await
    }

    pub async fn votes(&self) -> Result<Rc<Vec<Vote>>, GalleryError> {
        let gateway = Rc::clone(&self.gateway);
        read(Rc::clone(&self.votes), self.ctx.clone(), move || {
            let gateway = Rc::clone(&gateway);
            async move { gateway.fetch_votes().await }
        })
        .await
    }

    /// Reads one collection, discarding the value. Failures stay on the cell.
    pub async fn refresh(&self, collection: Collection) {
        let outcome = match collection {
            Collection::Images => self.images().await.map(|_| ()),
            Collection::Favourites => self.favourites().await.map(|_| ()),
            Collection::Votes => self.votes().await.map(|_| ()),
        };
        if let Err(e) = outcome {
            debug!("Refresh of {} ended with {}", collection, e);
        }
    }

    /// Issues the three reads concurrently and returns the resulting view.
    pub async fn load_all(&self) -> GalleryView {
        join3(
            self.refresh(Collection::Images),
            self.refresh(Collection::Favourites),
            self.refresh(Collection::Votes),
        )
        .await;
        self.snapshot()
    }

    /// Refetches every invalidated collection that has no request in flight.
    pub async fn refresh_invalidated(&self) {
        let pending = self.pending_invalidations();
        join_all(pending.into_iter().map(|collection| self.refresh(collection))).await;
    }

    pub fn invalidate(&self, collection: Collection) {
        info!("Invalidating {}", collection);
        match collection {
            Collection::Images => self.images.borrow_mut().invalidate(),
            Collection::Favourites => self.favourites.borrow_mut().invalidate(),
            Collection::Votes => self.votes.borrow_mut().invalidate(),
        }
        self.ctx.listeners.notify();
    }

    pub fn status(&self, collection: Collection) -> CellStatus {
        match collection {
            Collection::Images => self.images.borrow().status(),
            Collection::Favourites => self.favourites.borrow().status(),
            Collection::Votes => self.votes.borrow().status(),
        }
    }

    pub fn is_invalidated(&self, collection: Collection) -> bool {
        self.status(collection).invalidated
    }

    pub fn pending_invalidations(&self) -> Vec<Collection> {
        Collection::ALL
            .into_iter()
            .filter(|collection| {
                let status = self.status(*collection);
                status.invalidated && !status.fetching
            })
            .collect()
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> ListenerId {
        self.ctx.listeners.add(Rc::new(callback))
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.ctx.listeners.remove(id);
    }

    pub fn snapshot(&self) -> GalleryView {
        let statuses = Collection::ALL.map(|collection| self.status(collection));

        let data = (
            self.images.borrow().data(),
            self.favourites.borrow().data(),
            self.votes.borrow().data(),
        );
        let cards = match data {
            (Some(images), Some(favourites), Some(votes)) => {
                let versions = statuses.each_ref().map(|status| status.version);
                self.merged_cards(versions, &images, &favourites, &votes)
            }
            _ => Rc::new(Vec::new()),
        };

        GalleryView {
            loading: statuses.iter().any(|status| status.loading),
            fetching: statuses.iter().any(|status| status.fetching),
            error: statuses.iter().find_map(|status| status.error.clone()),
            cards,
        }
    }

    fn merged_cards(
        &self,
        versions: [u64; 3],
        images: &[Image],
        favourites: &[Favourite],
        votes: &[Vote],
    ) -> Rc<Vec<CatCard>> {
        let mut merged = self.merged.borrow_mut();
        if let Some(current) = merged.as_ref().filter(|m| m.versions == versions) {
            return Rc::clone(&current.cards);
        }

        let cards = Rc::new(merge_cat_data(images, favourites, votes));
        debug!("Merged {} cards at versions {:?}", cards.len(), versions);
        *merged = Some(Merged {
            versions,
            cards: Rc::clone(&cards),
        });
        cards
    }
}
