//! Typed seam over the remote cat-image API.
//!
//! Implementations bind the client `sub_id` at construction and carry no
//! business logic: one method per endpoint, each mapping transport and HTTP
//! failures into [`GalleryError`].
//!
//! | Method               | Endpoint                                   |
//! |----------------------|--------------------------------------------|
//! | `fetch_images`       | `GET /images?sub_id=&limit=&order=DESC`    |
//! | `upload_image`       | `POST /images/upload` (multipart)          |
//! | `fetch_favourites`   | `GET /favourites?sub_id=`                  |
//! | `create_favourite`   | `POST /favourites`                         |
//! | `delete_favourite`   | `DELETE /favourites/{id}`                  |
//! | `fetch_votes`        | `GET /votes?sub_id=`                       |
//! | `create_vote`        | `POST /votes`                              |

use std::future::Future;

use crate::error::GalleryError;
use crate::model::favourite::Favourite;
use crate::model::image::{Image, UploadedImage};
use crate::model::vote::{Vote, VoteValue};
use crate::requests::Created;

/// A file picked by the user, described by the metadata checked before upload.
pub trait UploadSource {
    fn file_name(&self) -> String;
    /// MIME type as reported by the platform, e.g. `image/png`.
    fn mime_type(&self) -> String;
    fn size(&self) -> u64;
}

pub trait GalleryGateway {
    type Upload: UploadSource;

    fn fetch_images(&self, limit: u32) -> impl Future<Output = Result<Vec<Image>, GalleryError>>;

    fn upload_image(
        &self,
        file: &Self::Upload,
    ) -> impl Future<Output = Result<UploadedImage, GalleryError>>;

    fn fetch_favourites(&self) -> impl Future<Output = Result<Vec<Favourite>, GalleryError>>;

    fn create_favourite(&self, image_id: &str)
        -> impl Future<Output = Result<Created, GalleryError>>;

    fn delete_favourite(&self, favourite_id: u64) -> impl Future<Output = Result<(), GalleryError>>;

    fn fetch_votes(&self) -> impl Future<Output = Result<Vec<Vote>, GalleryError>>;

    fn create_vote(
        &self,
        image_id: &str,
        value: VoteValue,
    ) -> impl Future<Output = Result<Created, GalleryError>>;
}
