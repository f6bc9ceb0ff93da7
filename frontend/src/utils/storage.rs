use taurus_funnel::store::{KeyValueStore, MemoryStore};
use taurus_funnel::StoreError;

pub struct LocalStore {
    storage: web_sys::Storage,
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                key: key.to_string(),
                reason: e.as_string().unwrap_or_else(|| format!("{:?}", e)),
            })
    }
}

/// Browser local storage, or an in-memory store when it is blocked.
pub fn local_store() -> Box<dyn KeyValueStore> {
    match web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        Some(storage) => Box::new(LocalStore { storage }),
        None => {
            log::warn!("localStorage unavailable, counter will not persist");
            Box::new(MemoryStore::new())
        }
    }
}
