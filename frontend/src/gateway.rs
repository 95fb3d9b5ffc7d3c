//! HTTP implementation of the gallery gateway on top of `gloo-net`.
//!
//! Every request carries the `x-api-key` header; reads and writes are scoped
//! to this client's `sub_id`. Non-2xx answers become `GalleryError::Api` with
//! whatever message the body offered.

use common::error::remote_message;
use common::gateway::{GalleryGateway, UploadSource};
use common::identity::ClientIdentity;
use common::model::favourite::Favourite;
use common::model::image::{Image, UploadedImage};
use common::model::vote::{Vote, VoteValue};
use common::requests::{Created, NewFavourite, NewVote};
use common::{GalleryConfig, GalleryError};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use web_sys::FormData;

const API_KEY_HEADER: &str = "x-api-key";

/// A file chosen through the upload form.
#[derive(Clone, PartialEq)]
pub struct SelectedFile(pub web_sys::File);

impl UploadSource for SelectedFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

pub struct HttpGateway {
    config: GalleryConfig,
    sub_id: String,
}

impl HttpGateway {
    pub fn new(config: GalleryConfig, identity: &ClientIdentity) -> Self {
        Self {
            config,
            sub_id: identity.sub_id().to_string(),
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        if self.config.api_key.is_empty() {
            builder
        } else {
            builder.header(API_KEY_HEADER, &self.config.api_key)
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(Request::get(&self.config.endpoint(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(Request::post(&self.config.endpoint(path)))
    }

    async fn send(request: Result<Request, gloo_net::Error>) -> Result<Response, GalleryError> {
        let response = request
            .map_err(|e| GalleryError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| GalleryError::Network(e.to_string()))?;

        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(GalleryError::Api {
                status,
                message: remote_message(&body),
            })
        }
    }

    async fn json<T: DeserializeOwned>(
        request: Result<Request, gloo_net::Error>,
    ) -> Result<T, GalleryError> {
        Self::send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GalleryError::Decode(e.to_string()))
    }
}

impl GalleryGateway for HttpGateway {
    type Upload = SelectedFile;

    async fn fetch_images(&self, limit: u32) -> Result<Vec<Image>, GalleryError> {
        let limit = limit.to_string();
        let request = self
            .get("images")
            .query([
                ("sub_id", self.sub_id.as_str()),
                ("limit", limit.as_str()),
                ("order", "DESC"),
            ])
            .build();
        Self::json(request).await
    }

    async fn upload_image(&self, file: &SelectedFile) -> Result<UploadedImage, GalleryError> {
        let form = FormData::new().map_err(|e| GalleryError::Network(format!("{:?}", e)))?;
        form.append_with_blob_and_filename("file", &file.0, &file.file_name())
            .and_then(|_| form.append_with_str("sub_id", &self.sub_id))
            .map_err(|e| GalleryError::Network(format!("{:?}", e)))?;

        // The browser sets the multipart boundary itself.
        Self::json(self.post("images/upload").body(form)).await
    }

    async fn fetch_favourites(&self) -> Result<Vec<Favourite>, GalleryError> {
        let request = self
            .get("favourites")
            .query([("sub_id", self.sub_id.as_str())])
            .build();
        Self::json(request).await
    }

    async fn create_favourite(&self, image_id: &str) -> Result<Created, GalleryError> {
        let body = NewFavourite {
            image_id: image_id.to_string(),
            sub_id: self.sub_id.clone(),
        };
        Self::json(self.post("favourites").json(&body)).await
    }

    async fn delete_favourite(&self, favourite_id: u64) -> Result<(), GalleryError> {
        let url = self.config.endpoint(&format!("favourites/{}", favourite_id));
        let request = self.authorized(Request::delete(&url)).build();
        Self::send(request).await.map(|_| ())
    }

    async fn fetch_votes(&self) -> Result<Vec<Vote>, GalleryError> {
        let request = self
            .get("votes")
            .query([("sub_id", self.sub_id.as_str())])
            .build();
        Self::json(request).await
    }

    async fn create_vote(&self, image_id: &str, value: VoteValue) -> Result<Created, GalleryError> {
        let body = NewVote {
            image_id: image_id.to_string(),
            sub_id: self.sub_id.clone(),
            value,
        };
        Self::json(self.post("votes").json(&body)).await
    }
}
