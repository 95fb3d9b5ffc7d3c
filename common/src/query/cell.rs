//! A single cached collection and the read path that fills it.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use log::{debug, error, warn};

use super::{Clock, Collection};
use crate::config::GalleryConfig;
use crate::error::GalleryError;

type Request<T> = Shared<LocalBoxFuture<'static, Result<Rc<T>, GalleryError>>>;

/// Cache entry for one collection.
///
/// `data` is replaced wholesale on every successful fetch and `version` bumped,
/// so consumers can tell a new snapshot apart from the old one by version
/// alone. `generation` identifies the latest request: a response carrying an
/// older generation was superseded (by an invalidation) and is dropped.
pub struct QueryCell<T> {
    key: Collection,
    data: Option<Rc<T>>,
    version: u64,
    updated_at: Option<f64>,
    invalidated: bool,
    error: Option<GalleryError>,
    in_flight: Option<Request<T>>,
    generation: u64,
}

/// Type-erased view of a cell, used to combine the three collections.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStatus {
    pub key: Collection,
    pub version: u64,
    pub has_data: bool,
    pub loading: bool,
    pub fetching: bool,
    pub invalidated: bool,
    pub error: Option<GalleryError>,
}

impl<T> QueryCell<T> {
    pub fn new(key: Collection) -> Self {
        Self {
            key,
            data: None,
            version: 0,
            updated_at: None,
            invalidated: false,
            error: None,
            in_flight: None,
            generation: 0,
        }
    }

    pub fn data(&self) -> Option<Rc<T>> {
        self.data.clone()
    }

    pub fn status(&self) -> CellStatus {
        CellStatus {
            key: self.key,
            version: self.version,
            has_data: self.data.is_some(),
            // Never loaded yet, and not parked on an error.
            loading: self.data.is_none() && (self.in_flight.is_some() || self.error.is_none()),
            fetching: self.in_flight.is_some(),
            invalidated: self.invalidated,
            error: self.error.clone(),
        }
    }

    pub fn is_stale(&self, now_ms: f64, stale_time_ms: u64) -> bool {
        self.updated_at
            .is_none_or(|at| now_ms - at >= stale_time_ms as f64)
    }

    fn should_fetch(&self, now_ms: f64, stale_time_ms: u64) -> bool {
        self.data.is_none()
            || self.invalidated
            || self.error.is_some()
            || self.is_stale(now_ms, stale_time_ms)
    }

    /// Forces the next read to refetch and orphans any request in flight.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
        self.generation += 1;
        self.in_flight = None;
    }

    /// Applies a finished request. Returns `false` when the response was superseded.
    fn commit(&mut self, generation: u64, result: &Result<Rc<T>, GalleryError>, now_ms: f64) -> bool {
        if generation != self.generation {
            debug!("Discarding superseded {} response", self.key);
            return false;
        }

        self.in_flight = None;
        self.invalidated = false;
        match result {
            Ok(data) => {
                self.data = Some(Rc::clone(data));
                self.version += 1;
                self.updated_at = Some(now_ms);
                self.error = None;
            }
            Err(e) => {
                error!("Fetching {} failed: {}", self.key, e);
                self.error = Some(e.clone());
            }
        }
        true
    }
}

pub type ListenerId = u64;

/// Callbacks run whenever any cell changes state.
#[derive(Default)]
pub struct Listeners {
    next_id: Cell<ListenerId>,
    entries: RefCell<Vec<(ListenerId, Rc<dyn Fn()>)>>,
}

impl Listeners {
    pub fn add(&self, callback: Rc<dyn Fn()>) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, callback));
        id
    }

    pub fn remove(&self, id: ListenerId) {
        self.entries.borrow_mut().retain(|(entry, _)| *entry != id);
    }

    pub fn notify(&self) {
        // Callbacks may subscribe or unsubscribe.
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

/// Everything a read needs besides the cell and the fetch itself.
pub struct ReadContext<C> {
    pub clock: Rc<C>,
    pub config: Rc<GalleryConfig>,
    pub listeners: Rc<Listeners>,
}

impl<C> Clone for ReadContext<C> {
    fn clone(&self) -> Self {
        Self {
            clock: Rc::clone(&self.clock),
            config: Rc::clone(&self.config),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

/// Serves the cached value when it is fresh, joins the request in flight when
/// there is one, and otherwise starts a new request.
pub async fn read<T, C, F, Fut>(
    cell: Rc<RefCell<QueryCell<T>>>,
    ctx: ReadContext<C>,
    fetch: F,
) -> Result<Rc<T>, GalleryError>
where
    T: 'static,
    C: Clock + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, GalleryError>> + 'static,
{
    let (request, started) = {
        let mut state = cell.borrow_mut();
        if let Some(pending) = state.in_flight.clone() {
            debug!("Joining in-flight {} request", state.key);
            (pending, false)
        } else {
            let now = ctx.clock.now_ms();
            if !state.should_fetch(now, ctx.config.stale_time_ms) {
                if let Some(data) = state.data.clone() {
                    debug!("Serving cached {}", state.key);
                    return Ok(data);
                }
            }

            state.generation += 1;
            let request = fetch_and_commit(
                Rc::clone(&cell),
                state.key,
                state.generation,
                ctx.clone(),
                fetch,
            )
            .boxed_local()
            .shared();
            state.in_flight = Some(request.clone());
            (request, true)
        }
    };

    if started {
        ctx.listeners.notify();
    }
    request.await
}

async fn fetch_and_commit<T, C, F, Fut>(
    cell: Rc<RefCell<QueryCell<T>>>,
    key: Collection,
    generation: u64,
    ctx: ReadContext<C>,
    fetch: F,
) -> Result<Rc<T>, GalleryError>
where
    C: Clock,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, GalleryError>>,
{
    let result = fetch_with_retry(key, &fetch, &*ctx.clock, &ctx.config)
        .await
        .map(Rc::new);

    let changed = cell
        .borrow_mut()
        .commit(generation, &result, ctx.clock.now_ms());
    if changed {
        ctx.listeners.notify();
    }
    result
}

async fn fetch_with_retry<T, C, F, Fut>(
    key: Collection,
    fetch: &F,
    clock: &C,
    config: &GalleryConfig,
) -> Result<T, GalleryError>
where
    C: Clock,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, GalleryError>>,
{
    let mut attempt = 0;
    loop {
        match fetch().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < config.retries => {
                let delay = config.retry_delay_ms(attempt);
                warn!(
                    "Fetching {} failed ({}), retry {}/{} in {} ms",
                    key,
                    e,
                    attempt + 1,
                    config.retries,
                    delay
                );
                clock.sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
