//! [`KeyValueStore`] over the browser's `window.localStorage`.

use anyhow::{anyhow, Result};
use home_budget_backend::KeyValueStore;
use web_sys::Storage;

/// Handle to local storage; the storage object is looked up on every call
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<Storage> {
        web_sys::window()
            .ok_or_else(|| anyhow!("no browser window"))?
            .local_storage()
            .map_err(|e| anyhow!("local storage is not accessible: {:?}", e))?
            .ok_or_else(|| anyhow!("local storage is disabled"))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| anyhow!("reading '{}' failed: {:?}", key, e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| anyhow!("writing '{}' failed: {:?}", key, e))
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        let storage = Self::storage()?;
        let existed = self.get_item(key)?.is_some();
        storage
            .remove_item(key)
            .map_err(|e| anyhow!("removing '{}' failed: {:?}", key, e))?;
        Ok(existed)
    }
}
