//! Typed hand-off of records between independently loaded pages.
//!
//! Each slot has one schema and one key. The gallery is the only writer of
//! [`SELECTED_THEMATIQUE`] and the detail page its only reader; the detail
//! page writes [`IA_CONTEXT`] and the assistant page reads and rewrites it.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crate::errors::AppError;
use crate::models::{AssistantContext, Thematique};

/// The browser's `localStorage`, or anything shaped like it.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str);
}

/// A storage key bound to the type stored under it.
#[derive(Debug)]
pub struct Slot<T> {
    key: &'static str,
    _record: PhantomData<fn() -> T>,
}

/// Selected catalog entry: written on card activation, consumed once.
pub const SELECTED_THEMATIQUE: Slot<Thematique> = Slot::new("selectedThematique");

/// Assistant context: written by the detail page, read (and possibly
/// rewritten after enrichment) by the assistant page.
pub const IA_CONTEXT: Slot<AssistantContext> = Slot::new("iaContext");

impl<T> Slot<T> {
    pub const fn new(key: &'static str) -> Self {
        Self { key, _record: PhantomData }
    }

    pub fn clear(&self, store: &impl KeyValueStore) {
        store.remove(self.key);
    }
}

impl<T: Serialize + DeserializeOwned> Slot<T> {
    pub fn put(&self, store: &impl KeyValueStore, record: &T) -> Result<(), AppError> {
        let json = serde_json::to_string(record)?;
        store.set(self.key, &json)
    }

    /// Reads without clearing. `Ok(None)` when nothing is stored.
    pub fn read(&self, store: &impl KeyValueStore) -> Result<Option<T>, AppError> {
        match store.get(self.key) {
            None => Ok(None),
            Some(json) => serde_json::from_str(&json).map(Some).map_err(|e| {
                error!("Unreadable record under '{}': {e}", self.key);
                AppError::malformed(self.key, e)
            }),
        }
    }

    /// Reads and clears in one step; the slot is empty afterwards even
    /// when the stored record could not be parsed.
    pub fn take(&self, store: &impl KeyValueStore) -> Result<Option<T>, AppError> {
        let record = self.read(store);
        self.clear(store);
        record
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Debug, Default)]
    pub struct MemoryStore {
        entries: RefCell<BTreeMap<String, String>>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn keys(&self) -> Vec<String> {
            self.entries.borrow().keys().cloned().collect()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) {
            self.entries.borrow_mut().remove(key);
        }
    }
}
