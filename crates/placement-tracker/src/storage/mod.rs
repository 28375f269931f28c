//! Storage layer for placement-tracker.
//!
//! A persistence slot is a named location holding one string value that is
//! always read and written whole. [`SlotStore`] abstracts over where slots
//! live: [`SqliteSlotStore`] keeps them in a local database file and
//! [`MemorySlotStore`] keeps them in process memory.

pub mod migrations;
pub mod schema;
mod sqlite;

use std::collections::HashMap;

use crate::error::Result;

pub use sqlite::SqliteSlotStore;

/// A key-value store of whole-value persistence slots.
pub trait SlotStore {
    /// Read the value stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Clear the slot under `key`. Returns `true` if it held a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&mut self, key: &str) -> Result<bool>;
}

impl<S: SlotStore + ?Sized> SlotStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }
}

/// In-memory slot store.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: HashMap<String, String>,
}

impl MemorySlotStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one slot already filled.
    #[must_use]
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.slots.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_read_missing() {
        let store = MemorySlotStore::new();
        assert!(store.read("nothing").unwrap().is_none());
    }

    #[test]
    fn test_memory_write_overwrites() {
        let mut store = MemorySlotStore::new();
        store.write("k", "one").unwrap();
        store.write("k", "two").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_memory_with_slot() {
        let store = MemorySlotStore::with_slot("k", "[]");
        assert_eq!(store.read("k").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn SlotStore> = Box::new(MemorySlotStore::new());
        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
        assert!(store.remove("k").unwrap());
    }

    #[test]
    fn test_memory_remove() {
        let mut store = MemorySlotStore::with_slot("k", "v");
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert!(store.read("k").unwrap().is_none());
    }
}
