use shared::store::{KeyValueStore, StoreError};
use web_sys::{window, Storage};

/// `window.localStorage`, looked up on every call. Private browsing and
/// sandboxed iframes can deny it, which surfaces as `Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Result<Storage, StoreError> {
    window()
        .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
        .local_storage()
        .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
        .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
