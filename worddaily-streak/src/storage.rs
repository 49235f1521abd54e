//! In-process [`KeyValueStore`] used by tests, simulations and the CLI.

use crate::KeyValueStore;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("store is read-only; refused write to `{key}`")]
    ReadOnly { key: String },
    #[error("store is unreadable; refused read of `{key}`")]
    Unreadable { key: String },
}

/// Map-backed store. Clones share the same map, mirroring how every tab of
/// a browser origin sees one `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    read_only: Rc<Cell<bool>>,
    unreadable: Rc<Cell<bool>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one raw value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.insert_raw(key, value);
        store
    }

    /// Make subsequent writes fail, simulating a full or disabled store.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Make subsequent reads fail, simulating storage blocked by the host.
    pub fn set_unreadable(&self, unreadable: bool) {
        self.unreadable.set(unreadable);
    }

    /// Write bypassing the read-only switch.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.borrow_mut().remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = MemoryStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        if self.unreadable.get() {
            return Err(MemoryStoreError::Unreadable {
                key: key.to_string(),
            });
        }
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.read_only.get() {
            return Err(MemoryStoreError::ReadOnly {
                key: key.to_string(),
            });
        }
        self.insert_raw(key, value);
        Ok(())
    }
}
