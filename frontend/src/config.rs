//! Build-time configuration of the browser client.
//!
//! Values are baked in when the bundle is compiled (`CAT_API_KEY=... trunk build`);
//! anything not provided falls back to `GalleryConfig::default()`.

use common::GalleryConfig;
use log::{info, warn};

pub fn load() -> GalleryConfig {
    let mut config = GalleryConfig::default();

    match option_env!("CAT_API_KEY") {
        Some(key) if !key.trim().is_empty() => config.api_key = key.trim().to_string(),
        _ => warn!("CAT_API_KEY not set at build time, requests will be anonymous"),
    }

    match option_env!("CAT_API_BASE_URL") {
        Some(url) if !url.trim().is_empty() => config.base_url = url.trim().to_string(),
        _ => info!("CAT_API_BASE_URL not set, using default: {}", config.base_url),
    }

    config
}
