//! Error taxonomy of the gallery client.
//!
//! Every failure is a tagged variant with an optional human-readable message;
//! nothing downstream inspects nested response bodies.

use serde::Deserialize;
use thiserror::Error;

const MIB: f64 = 1024.0 * 1024.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalleryError {
    /// No response reached the client.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote API answered with a non-2xx status.
    #[error("Remote API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("Malformed response: {0}")]
    Decode(String),

    /// Rejected locally before any request was made.
    #[error(transparent)]
    Validation(#[from] UploadRejection),

    /// The same mutation is still pending.
    #[error("{0} is already in progress")]
    Busy(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl GalleryError {
    /// Whether a read may be retried automatically.
    pub fn is_transient(&self) -> bool {
        match self {
            GalleryError::Network(_) => true,
            GalleryError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Text shown to the user: the remote message when the API sent one, the
    /// validation text for local rejections, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GalleryError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            GalleryError::Validation(rejection) => rejection.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Reasons a selected file is refused before upload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadRejection {
    #[error("The selected file is empty.")]
    Empty,

    #[error("Unsupported file type \"{0}\". Please choose a JPEG, PNG, GIF or WebP image.")]
    UnsupportedType(String),

    #[error("File is too large ({:.1} MiB). Maximum size is {:.0} MiB.", mib(.size), mib(.limit))]
    TooLarge { size: u64, limit: u64 },
}

fn mib(bytes: &u64) -> f64 {
    *bytes as f64 / MIB
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Reduces a non-2xx response body to an optional message.
///
/// Accepts `{"message": "..."}` JSON or a plain-text body; blank bodies and
/// JSON without a message yield `None`.
pub fn remote_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.filter(|m| !m.trim().is_empty()),
        Err(_) if body.starts_with('{') || body.starts_with('[') => None,
        Err(_) => Some(body.to_string()),
    }
}
