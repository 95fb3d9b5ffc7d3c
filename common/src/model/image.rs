use serde::{Deserialize, Serialize};

/// An image uploaded to the remote cat API by this client.
///
/// Images are immutable once created: the gallery only ever lists them and
/// creates new ones through the upload endpoint. Any field may be missing or
/// `null` on the wire; both decode to the default so a single malformed record
/// never fails the whole listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Image {
    /// Identifier assigned by the remote API.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: String,
    /// Public URL of the image file.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// The client identifier (`sub_id`) the image was uploaded with.
    #[serde(default)]
    pub sub_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub original_filename: Option<String>,
}

/// Body returned by `POST /images/upload`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadedImage {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub original_filename: Option<String>,
    /// Moderation flags as reported by the API (`0` or `1`).
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub pending: u8,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub approved: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_do_not_fail_the_listing() {
        let images: Vec<Image> = serde_json::from_str(
            r#"[
                {"id": "a", "url": "https://cdn.example.com/a.jpg", "width": 800},
                {"id": "b", "url": null, "width": null, "original_filename": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[1].id, "b");
        assert_eq!(images[1].url, "");
        assert_eq!(images[1].width, None);
    }

    #[test]
    fn upload_response_tolerates_null_flags() {
        let uploaded: UploadedImage =
            serde_json::from_str(r#"{"id": "x", "url": "u", "pending": null, "approved": 1}"#).unwrap();
        assert_eq!((uploaded.pending, uploaded.approved), (0, 1));
    }
}
