//! Favourite, vote and upload flows.
//!
//! Every invocation walks `Idle -> Pending -> Succeeded | Failed`, tracked per
//! [`MutationKey`] so that favouriting two different images are independent,
//! while a second click on the same pending action is refused. A settled
//! outcome stays readable until the next mutation begins. Nothing is
//! applied locally ahead of the server: on success the affected collection is
//! invalidated and the refetch brings the new state in; on failure the view
//! is left as it was and the user is told why.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use log::{error, info};

use crate::error::GalleryError;
use crate::gateway::{GalleryGateway, UploadSource};
use crate::model::image::UploadedImage;
use crate::model::vote::VoteValue;
use crate::query::{Clock, Collection, QueryCache};
use crate::requests::Created;

mod upload;

pub use upload::{validate_upload, ACCEPTED_MIME_TYPES};

pub const FAVOURITE_FAILED: &str = "Failed to update favourite";
pub const VOTE_FAILED: &str = "Failed to record vote";
pub const UPLOAD_FAILED: &str = "Failed to upload image";
pub const UPLOAD_SUCCEEDED: &str = "Cat uploaded successfully! 🎉";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationKey {
    Favourite(String),
    Vote(String),
    Upload,
}

impl fmt::Display for MutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKey::Favourite(image_id) => write!(f, "favourite update for {image_id}"),
            MutationKey::Vote(image_id) => write!(f, "vote on {image_id}"),
            MutationKey::Upload => f.write_str("upload"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    /// Terminal failure; carries the message shown to the user.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Gallery,
    Upload,
}

pub trait Navigator {
    fn go_to(&self, route: Route);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavouriteAction {
    Added,
    Removed,
}

impl FavouriteAction {
    pub fn message(self) -> &'static str {
        match self {
            FavouriteAction::Added => "Added to favourites! ❤️",
            FavouriteAction::Removed => "Removed from favourites",
        }
    }
}

pub struct MutationCoordinator<G, C> {
    inner: Rc<Inner<G, C>>,
}

struct Inner<G, C> {
    cache: Rc<QueryCache<G, C>>,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
    /// Pending mutations plus the outcome of those settled since the last
    /// `begin`; older outcomes are pruned there.
    states: RefCell<HashMap<MutationKey, MutationState>>,
}

impl<G, C> MutationCoordinator<G, C>
where
    G: GalleryGateway + 'static,
    C: Clock + 'static,
{
    pub fn new(
        cache: Rc<QueryCache<G, C>>,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                cache,
                notifier,
                navigator,
                states: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn state(&self, key: &MutationKey) -> MutationState {
        self.inner.state(key)
    }

    pub fn is_pending(&self, key: &MutationKey) -> bool {
        self.state(key) == MutationState::Pending
    }

    /// Number of keys currently tracked.
    pub fn tracked(&self) -> usize {
        self.inner.states.borrow().len()
    }

    /// Removes the favourite when the card is favourited and knows the
    /// favourite id, creates one otherwise.
    ///
    /// The key turns `Pending` as soon as this is called, before the returned
    /// future is first polled. Dropping the future before it settles returns
    /// the key to `Idle`.
    pub fn toggle_favourite(
        &self,
        image_id: &str,
        is_favourited: bool,
        favourite_id: Option<u64>,
    ) -> impl Future<Output = Result<FavouriteAction, GalleryError>> + use<G, C> {
        let key = MutationKey::Favourite(image_id.to_string());
        let begun = self.inner.begin(&key).map(|()| self.guard(&key));
        let inner = Rc::clone(&self.inner);
        let image_id = image_id.to_string();

        async move {
            let _pending = begun?;
            let gateway = Rc::clone(inner.cache.gateway());
            let result = match (is_favourited, favourite_id) {
                (true, Some(id)) => {
                    info!("Removing favourite {} from image {}", id, image_id);
                    gateway
                        .delete_favourite(id)
                        .await
                        .map(|_| FavouriteAction::Removed)
                }
                _ => {
                    info!("Adding image {} to favourites", image_id);
                    gateway
                        .create_favourite(&image_id)
                        .await
                        .map(|_| FavouriteAction::Added)
                }
            };

            match result {
                Ok(action) => {
                    inner.succeed(key, Collection::Favourites, action.message());
                    Ok(action)
                }
                Err(e) => Err(inner.fail(key, e, FAVOURITE_FAILED)),
            }
        }
    }

    /// Casts a ballot. Like [`Self::toggle_favourite`], the key is `Pending`
    /// from the moment of the call.
    pub fn vote(
        &self,
        image_id: &str,
        value: VoteValue,
    ) -> impl Future<Output = Result<Created, GalleryError>> + use<G, C> {
        let key = MutationKey::Vote(image_id.to_string());
        let begun = self.inner.begin(&key).map(|()| self.guard(&key));
        let inner = Rc::clone(&self.inner);
        let image_id = image_id.to_string();

        async move {
            let _pending = begun?;
            info!("Voting {} on image {}", value.as_i32(), image_id);
            let gateway = Rc::clone(inner.cache.gateway());
            match gateway.create_vote(&image_id, value).await {
                Ok(created) => {
                    let message = match value {
                        VoteValue::Up => "Upvoted!",
                        VoteValue::Down => "Downvoted",
                    };
                    inner.succeed(key, Collection::Votes, message);
                    Ok(created)
                }
                Err(e) => Err(inner.fail(key, e, VOTE_FAILED)),
            }
        }
    }

    fn guard(&self, key: &MutationKey) -> PendingGuard<G, C> {
        PendingGuard {
            inner: Rc::clone(&self.inner),
            key: key.clone(),
        }
    }

    /// Validates and uploads `file`, then returns to the gallery after the
    /// configured delay.
    ///
    /// A rejected file never reaches the gateway and leaves the upload state
    /// untouched; the caller shows the rejection inline.
    pub async fn upload(&self, file: &G::Upload) -> Result<UploadedImage, GalleryError> {
        let inner = &self.inner;
        let config = inner.cache.config();
        if let Err(rejection) = validate_upload(file, config.max_upload_bytes) {
            info!("Rejected {} before upload: {}", file.file_name(), rejection);
            return Err(rejection.into());
        }
        let redirect_delay = config.redirect_delay_ms;

        let key = MutationKey::Upload;
        inner.begin(&key)?;

        info!("Uploading {} ({} bytes)", file.file_name(), file.size());
        match inner.cache.gateway().upload_image(file).await {
            Ok(uploaded) => {
                inner.succeed(key, Collection::Images, UPLOAD_SUCCEEDED);
                inner.cache.clock().sleep(redirect_delay).await;
                inner.navigator.go_to(Route::Gallery);
                Ok(uploaded)
            }
            Err(e) => Err(inner.fail(key, e, UPLOAD_FAILED)),
        }
    }
}

impl<G, C> Inner<G, C>
where
    G: GalleryGateway + 'static,
    C: Clock + 'static,
{
    fn state(&self, key: &MutationKey) -> MutationState {
        self.states.borrow().get(key).cloned().unwrap_or_default()
    }

    fn begin(&self, key: &MutationKey) -> Result<(), GalleryError> {
        let mut states = self.states.borrow_mut();
        if states.get(key) == Some(&MutationState::Pending) {
            return Err(GalleryError::Busy(key.to_string()));
        }
        states.retain(|_, state| *state == MutationState::Pending);
        states.insert(key.clone(), MutationState::Pending);
        Ok(())
    }

    fn succeed(&self, key: MutationKey, affected: Collection, message: &str) {
        self.states.borrow_mut().insert(key, MutationState::Succeeded);
        self.cache.invalidate(affected);
        self.notifier.notify(Notice::success(message));
    }

    fn fail(&self, key: MutationKey, e: GalleryError, fallback: &str) -> GalleryError {
        let message = e.user_message(fallback);
        error!("{} failed: {}", key, e);
        self.states
            .borrow_mut()
            .insert(key, MutationState::Failed(message.clone()));
        self.notifier.notify(Notice::error(message));
        e
    }
}

/// Clears a key still `Pending` when its mutation future is dropped unsettled.
struct PendingGuard<G, C> {
    inner: Rc<Inner<G, C>>,
    key: MutationKey,
}

impl<G, C> Drop for PendingGuard<G, C> {
    fn drop(&mut self) {
        let mut states = self.inner.states.borrow_mut();
        if states.get(&self.key) == Some(&MutationState::Pending) {
            states.remove(&self.key);
        }
    }
}
