//! Tunables shared by the gateway, the query cache and the mutation flows.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.thecatapi.com/v1";
pub const DEFAULT_STORAGE_KEY: &str = "cat-app-sub-id";
pub const DEFAULT_SUB_ID_PREFIX: &str = "cat-app-user-";
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Root of the remote cat-image API, without a trailing slash.
    pub base_url: String,
    /// Sent as the `x-api-key` header. Empty means anonymous access.
    pub api_key: String,
    /// Number of images requested per listing.
    pub page_size: u32,
    /// Age after which cached collections are refetched on the next read.
    pub stale_time_ms: u64,
    /// Extra attempts for a read that failed transiently.
    pub retries: u32,
    pub retry_base_delay_ms: u32,
    pub retry_max_delay_ms: u32,
    /// Pause between a successful upload and the return to the gallery.
    pub redirect_delay_ms: u32,
    pub max_upload_bytes: u64,
    /// Client-local storage key holding the `sub_id`.
    pub storage_key: String,
    pub sub_id_prefix: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            page_size: 20,
            stale_time_ms: 5 * 60 * 1000,
            retries: 2,
            retry_base_delay_ms: 1000,
            retry_max_delay_ms: 30_000,
            redirect_delay_ms: 1500,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            sub_id_prefix: DEFAULT_SUB_ID_PREFIX.to_string(),
        }
    }
}

impl GalleryConfig {
    /// Backoff before retry number `attempt` (0-based): `base * 2^attempt`, capped.
    pub fn retry_delay_ms(&self, attempt: u32) -> u32 {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.retry_base_delay_ms
            .saturating_mul(factor)
            .min(self.retry_max_delay_ms)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delay_doubles_until_capped() {
        let config = GalleryConfig::default();
        assert_eq!(config.retry_delay_ms(0), 1000);
        assert_eq!(config.retry_delay_ms(1), 2000);
        assert_eq!(config.retry_delay_ms(4), 16_000);
        assert_eq!(config.retry_delay_ms(5), 30_000);
        assert_eq!(config.retry_delay_ms(40), 30_000);
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = GalleryConfig {
            base_url: "https://api.example.com/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.endpoint("/favourites/9"), "https://api.example.com/v1/favourites/9");
    }
}
