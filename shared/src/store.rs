use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;
use thiserror::Error;

use crate::inventory::Inventory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode inventory: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse stored inventory: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("stored inventory is not an object")]
    NotAnObject,
}

/// String key/value storage, shaped after the browser's `localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store for tests and host builds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

/// Persists one inventory snapshot as a JSON object under a single key.
pub struct InventoryStore<S> {
    backend: S,
    key: String,
    baseline: Inventory,
}

impl<S: KeyValueStore> InventoryStore<S> {
    pub fn new(backend: S, key: impl Into<String>, baseline: Inventory) -> Self {
        Self { backend, key: key.into(), baseline }
    }

    /// Baseline with whatever was persisted laid over it.
    pub fn try_load(&self) -> Result<Inventory, StoreError> {
        let mut inventory = self.baseline.clone();
        let Some(raw) = self.backend.get_item(&self.key)? else {
            return Ok(inventory);
        };
        let value: serde_json::Value = serde_json::from_str(&raw).map_err(StoreError::Parse)?;
        let saved = Inventory::from_json_value(&value).ok_or(StoreError::NotAnObject)?;
        inventory.merge(saved);
        Ok(inventory)
    }

    /// Never fails: anything wrong with storage yields the baseline.
    pub fn load(&self) -> Inventory {
        self.try_load().unwrap_or_else(|e| {
            warn!("Falling back to default stock for {}: {}", self.key, e);
            self.baseline.clone()
        })
    }

    pub fn try_save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let json = serde_json::to_string(inventory).map_err(StoreError::Serialize)?;
        self.backend.set_item(&self.key, &json)
    }

    pub fn save(&self, inventory: &Inventory) {
        if let Err(e) = self.try_save(inventory) {
            warn!("Failed to persist stock for {}: {}", self.key, e);
        }
    }

    /// Forgets the persisted snapshot so the next load is pure baseline.
    pub fn reset(&self) {
        if let Err(e) = self.backend.remove_item(&self.key) {
            warn!("Failed to clear stock for {}: {}", self.key, e);
        }
    }
}
