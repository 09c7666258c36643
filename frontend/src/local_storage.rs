use gloo_console::error;
use gloo_utils::window;
use web_sys::Storage;
use workout_tracker_lib::{storage::KeyValueStore, StorageError};

/// `window.localStorage`, if the browser lets us have it.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = window().local_storage().ok().flatten();
        if storage.is_none() {
            error!("Local storage is not available, workouts will not be kept");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read { key: key.into(), reason: format!("{e:?}") })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write { key: key.into(), reason: format!("{e:?}") })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write { key: key.into(), reason: format!("{e:?}") })
    }
}
