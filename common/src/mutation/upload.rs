use crate::error::UploadRejection;
use crate::gateway::UploadSource;

/// MIME types the remote API accepts for uploads.
pub const ACCEPTED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Checks a selected file before anything is sent over the network.
pub fn validate_upload(file: &impl UploadSource, max_bytes: u64) -> Result<(), UploadRejection> {
    let mime = file.mime_type().trim().to_ascii_lowercase();
    if !ACCEPTED_MIME_TYPES.contains(&mime.as_str()) {
        let shown = if mime.is_empty() { "unknown".to_string() } else { mime };
        return Err(UploadRejection::UnsupportedType(shown));
    }

    let size = file.size();
    if size == 0 {
        return Err(UploadRejection::Empty);
    }
    if size > max_bytes {
        return Err(UploadRejection::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    Ok(())
}
