use super::{CreateOutcome, EntryStore, StoreError};
use crate::title::is_valid_title;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// In-memory entry store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(title, content)` pairs.
    pub fn with_entries<I, T, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, C)>,
        T: Into<String>,
        C: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(t, c)| (t.into(), c.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    fn check(title: &str) -> Result<(), StoreError> {
        if is_valid_title(title) {
            Ok(())
        } else {
            Err(StoreError::InvalidTitle(title.to_string()))
        }
    }
}

impl EntryStore for MemoryEntryStore {
    fn list_titles(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    fn get(&self, title: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(title).cloned())
    }

    fn save(&self, title: &str, content: &str) -> Result<(), StoreError> {
        Self::check(title)?;
        self.entries
            .write()
            .insert(title.to_string(), content.to_string());
        Ok(())
    }

    fn create(&self, title: &str, content: &str) -> Result<CreateOutcome, StoreError> {
        Self::check(title)?;
        let mut entries = self.entries.write();
        if entries.contains_key(title) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        entries.insert(title.to_string(), content.to_string());
        Ok(CreateOutcome::Created)
    }
}
