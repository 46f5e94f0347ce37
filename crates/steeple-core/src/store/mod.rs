//! Key-value settings storage
//!
//! Every persisted license value goes through [`SettingsStore`], so the
//! license logic never touches ambient global state. Two backends ship:
//! [`MemoryStore`] for tests and embedding, and [`JsonFileStore`] which
//! persists to a single JSON document on disk.

mod file;

pub use file::JsonFileStore;

use crate::error::Result;
use std::collections::BTreeMap;

/// A string key-value settings repository
pub trait SettingsStore {
    /// Read a value; `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Create or overwrite a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing an absent key is not an error
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// In-memory settings store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}
