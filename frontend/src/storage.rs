//! `localStorage`-backed persistence for the client identity.

use common::identity::KeyValueStore;
use common::GalleryError;
use web_sys::Storage;

pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    /// `None` when the page has no `localStorage` (e.g. blocked by privacy settings).
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GalleryError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| GalleryError::Storage(format!("{:?}", e)))
    }
}
