//! Per-client identity (`sub_id`) that scopes every remote read and write.
//!
//! There is no account: the identifier is generated once per installation,
//! kept in client-local storage and reused forever. It is constructed
//! explicitly at startup and handed to the gateway.

use std::cell::RefCell;
use std::collections::HashMap;

use log::{info, warn};
use uuid::Uuid;

use crate::error::GalleryError;

/// Minimal string key/value persistence, e.g. the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), GalleryError>;
}

/// In-memory store. Used in tests and when the browser refuses storage access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GalleryError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    sub_id: String,
}

impl ClientIdentity {
    /// Reads the identifier stored under `key`; when absent, generates
    /// `prefix` + a random UUID and persists it.
    ///
    /// A failed write still yields a usable identity for this session.
    pub fn load_or_create(store: &impl KeyValueStore, key: &str, prefix: &str) -> Self {
        if let Some(existing) = store.get(key).filter(|id| !id.trim().is_empty()) {
            return Self { sub_id: existing };
        }

        let sub_id = format!("{}{}", prefix, Uuid::new_v4());
        match store.set(key, &sub_id) {
            Ok(()) => info!("Generated client identifier {}", sub_id),
            Err(e) => warn!("Could not persist client identifier, using it for this session only: {}", e),
        }
        Self { sub_id }
    }

    pub fn sub_id(&self) -> &str {
        &self.sub_id
    }
}
