use serde::{Deserialize, Serialize};

/// A favourite marker placed by one client on one image.
///
/// The remote API is expected to hold at most one favourite per
/// `(image_id, sub_id)` pair but the client never relies on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Favourite {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub image_id: String,
    #[serde(default)]
    pub sub_id: Option<String>,
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}
