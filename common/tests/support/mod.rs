#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use common::gateway::{GalleryGateway, UploadSource};
use common::model::favourite::Favourite;
use common::model::image::{Image, UploadedImage};
use common::model::vote::{Vote, VoteValue};
use common::mutation::{MutationCoordinator, Navigator, Notice, Notifier, Route};
use common::query::{Clock, QueryCache};
use common::requests::Created;
use common::{GalleryConfig, GalleryError};
use futures_util::future::{FutureExt, LocalBoxFuture};
use tokio::sync::oneshot;

pub const MIB: u64 = 1024 * 1024;
pub const SUB_ID: &str = "cat-app-user-test";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchImages(u32),
    FetchFavourites,
    FetchVotes,
    CreateFavourite(String),
    DeleteFavourite(u64),
    CreateVote(String, i32),
    Upload(String),
}

#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl PickedFile {
    pub fn new(name: &str, mime: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            mime: mime.to_string(),
            size,
        }
    }
}

impl UploadSource for PickedFile {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// In-memory stand-in for the remote API.
///
/// Each call snapshots server state when it starts. Scripted failures and
/// gates are consumed per endpoint in FIFO order; a gated call only returns
/// once its sender fires (or is dropped).
#[derive(Default)]
pub struct FakeGateway {
    pub images: RefCell<Vec<Image>>,
    pub favourites: RefCell<Vec<Favourite>>,
    pub votes: RefCell<Vec<Vote>>,
    pub calls: RefCell<Vec<Call>>,
    failures: RefCell<HashMap<&'static str, VecDeque<GalleryError>>>,
    gates: RefCell<HashMap<&'static str, VecDeque<oneshot::Receiver<()>>>>,
    next_id: Cell<u64>,
}

impl FakeGateway {
    pub fn fail_next(&self, endpoint: &'static str, error: GalleryError) {
        self.failures
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(error);
    }

    pub fn gate_next(&self, endpoint: &'static str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().entry(endpoint).or_default().push_back(rx);
        tx
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get() + 100;
        self.next_id.set(self.next_id.get() + 1);
        id
    }

    async fn respond<T>(
        &self,
        endpoint: &'static str,
        call: Call,
        value: impl FnOnce() -> T,
    ) -> Result<T, GalleryError> {
        self.calls.borrow_mut().push(call);
        let gate = self
            .gates
            .borrow_mut()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);
        let failure = self
            .failures
            .borrow_mut()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);

        let result = match failure {
            Some(e) => Err(e),
            None => Ok(value()),
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }
}

impl GalleryGateway for FakeGateway {
    type Upload = PickedFile;

    async fn fetch_images(&self, limit: u32) -> Result<Vec<Image>, GalleryError> {
        self.respond("images", Call::FetchImages(limit), || {
            self.images.borrow().iter().take(limit as usize).cloned().collect()
        })
        .await
    }

    async fn upload_image(&self, file: &PickedFile) -> Result<UploadedImage, GalleryError> {
        self.respond("upload", Call::Upload(file.name.clone()), || {
            let id = format!("up{}", self.next_id());
            let url = format!("https://cdn.example.com/{id}.jpg");
            self.images.borrow_mut().insert(
                0,
                Image {
                    id: id.clone(),
                    url: url.clone(),
                    sub_id: Some(SUB_ID.to_string()),
                    original_filename: Some(file.name.clone()),
                    ..Default::default()
                },
            );
            UploadedImage {
                id,
                url,
                original_filename: Some(file.name.clone()),
                pending: 0,
                approved: 1,
                ..Default::default()
            }
        })
        .await
    }

    async fn fetch_favourites(&self) -> Result<Vec<Favourite>, GalleryError> {
        self.respond("favourites", Call::FetchFavourites, || {
            self.favourites.borrow().clone()
        })
        .await
    }

    async fn create_favourite(&self, image_id: &str) -> Result<Created, GalleryError> {
        self.respond("create_favourite", Call::CreateFavourite(image_id.to_string()), || {
            let id = self.next_id();
            self.favourites.borrow_mut().push(favourite(id, image_id));
            Created {
                id: Some(id),
                message: Some("SUCCESS".to_string()),
            }
        })
        .await
    }

    async fn delete_favourite(&self, favourite_id: u64) -> Result<(), GalleryError> {
        self.respond("delete_favourite", Call::DeleteFavourite(favourite_id), || {
            self.favourites
                .borrow_mut()
                .retain(|fav| fav.id != Some(favourite_id));
        })
        .await
    }

    async fn fetch_votes(&self) -> Result<Vec<Vote>, GalleryError> {
        self.respond("votes", Call::FetchVotes, || self.votes.borrow().clone())
            .await
    }

    async fn create_vote(&self, image_id: &str, value: VoteValue) -> Result<Created, GalleryError> {
        self.respond(
            "create_vote",
            Call::CreateVote(image_id.to_string(), value.as_i32()),
            || {
                let id = self.next_id();
                self.votes.borrow_mut().push(vote(image_id, value.as_i32()));
                Created {
                    id: Some(id),
                    message: Some("SUCCESS".to_string()),
                }
            },
        )
        .await
    }
}

/// Clock whose sleeps complete immediately, advancing time and recording the delay.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<f64>,
    pub sleeps: RefCell<Vec<u32>>,
}

impl ManualClock {
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms as f64);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(ms);
        self.advance(u64::from(ms));
        async {}.boxed_local()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: RefCell<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: RefCell<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: Route) {
        self.routes.borrow_mut().push(route);
    }
}

pub type Cache = QueryCache<FakeGateway, ManualClock>;

pub struct Harness {
    pub gateway: Rc<FakeGateway>,
    pub clock: Rc<ManualClock>,
    pub cache: Rc<Cache>,
    pub notifier: Rc<RecordingNotifier>,
    pub navigator: Rc<RecordingNavigator>,
    pub mutations: MutationCoordinator<FakeGateway, ManualClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(GalleryConfig::default())
    }

    pub fn with_config(config: GalleryConfig) -> Self {
        let gateway = Rc::new(FakeGateway::default());
        let clock = Rc::new(ManualClock::default());
        let cache = Rc::new(QueryCache::new(
            Rc::clone(&gateway),
            Rc::clone(&clock),
            Rc::new(config),
        ));
        let notifier = Rc::new(RecordingNotifier::default());
        let navigator = Rc::new(RecordingNavigator::default());
        let mutations = MutationCoordinator::new(
            Rc::clone(&cache),
            notifier.clone() as Rc<dyn Notifier>,
            navigator.clone() as Rc<dyn Navigator>,
        );

        Self {
            gateway,
            clock,
            cache,
            notifier,
            navigator,
            mutations,
        }
    }

    /// Seeds the fake server with images `ids`, in listing order.
    pub fn with_images(self, ids: &[&str]) -> Self {
        *self.gateway.images.borrow_mut() = ids.iter().map(|id| image(id)).collect();
        self
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notifier.notices.borrow().clone()
    }
}

pub fn image(id: &str) -> Image {
    Image {
        id: id.to_string(),
        url: format!("https://cdn.example.com/{id}.jpg"),
        width: Some(800),
        height: Some(600),
        sub_id: Some(SUB_ID.to_string()),
        ..Default::default()
    }
}

pub fn favourite(id: u64, image_id: &str) -> Favourite {
    Favourite {
        id: Some(id),
        image_id: image_id.to_string(),
        sub_id: Some(SUB_ID.to_string()),
        created_at: None,
    }
}

pub fn vote(image_id: &str, value: i32) -> Vote {
    Vote {
        image_id: image_id.to_string(),
        sub_id: Some(SUB_ID.to_string()),
        value,
        ..Default::default()
    }
}

pub fn server_error() -> GalleryError {
    GalleryError::Api {
        status: 503,
        message: None,
    }
}
