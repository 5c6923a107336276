/// Browser `localStorage` store
use groove_core::{CoreError, KeyValueStore, Result};
use web_sys::Storage;

/// `window.localStorage` wrapper
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Open the window's local storage
    ///
    /// Fails when there is no window (e.g. a worker) or storage is disabled.
    pub fn open() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| CoreError::storage("no window available"))?;
        let storage = window
            .local_storage()
            .map_err(|e| CoreError::storage(format!("localStorage blocked: {:?}", e)))?
            .ok_or_else(|| CoreError::storage("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| CoreError::storage(format!("getItem('{}') failed: {:?}", key, e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CoreError::storage(format!("setItem('{}') failed: {:?}", key, e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| CoreError::storage(format!("removeItem('{}') failed: {:?}", key, e)))
    }
}
