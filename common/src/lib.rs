//! Platform-neutral core of the cat gallery client.
//!
//! The browser frontend supplies the I/O (HTTP, storage, timers, toasts) through
//! the traits defined here; everything that decides *what* the gallery shows
//! lives in this crate so it can be exercised natively:
//!
//! - [`model`]: wire types of the remote cat-image API and the derived `CatCard`.
//! - [`merge`]: folds images, favourites and votes into one ordered view model.
//! - [`identity`]: the persisted per-client `sub_id`.
//! - [`gateway`]: the typed seam over the remote endpoints.
//! - [`query`]: cached, deduplicated, invalidatable collections.
//! - [`mutation`]: favourite/vote/upload flows and their feedback.

pub mod config;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod merge;
pub mod model;
pub mod mutation;
pub mod query;
pub mod requests;

pub use config::GalleryConfig;
pub use error::{GalleryError, UploadRejection};
