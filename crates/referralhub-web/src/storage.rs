use referralhub_core::session::{SessionStorage, SessionStore};
use web_sys::Storage;

use crate::utils::local_storage;

/// `localStorage` backed session entries. Storage failures (private mode,
/// quota) are logged and behave like a missing entry.
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    pub fn new() -> Self {
        Self {
            storage: local_storage(),
        }
    }
}

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                error!("failed to read {} from storage: {:?}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            error!("failed to write {} to storage: {:?}", key, e);
        }
    }

    fn delete(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            error!("failed to remove {} from storage: {:?}", key, e);
        }
    }
}

pub type Session = SessionStore<BrowserStorage>;
