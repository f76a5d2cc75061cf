//! Entry storage.
//!
//! An [`EntryStore`] maps titles to Markdown content. Two implementations
//! ship with the crate: [`FsEntryStore`], which keeps one `<title>.md` file
//! per entry in a directory, and [`MemoryEntryStore`] for tests and scratch
//! use.

mod fs;
mod memory;

pub use fs::FsEntryStore;
pub use memory::MemoryEntryStore;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid entry title: {0:?}")]
    InvalidTitle(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result of a create-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Durable title → content storage.
///
/// Lookups are exact and case-sensitive. Implementations must be safe to
/// share across request tasks; concurrent writes to one title are
/// last-write-wins.
pub trait EntryStore: Send + Sync {
    /// Every stored title, sorted ascending.
    fn list_titles(&self) -> Result<Vec<String>, StoreError>;

    /// Content for `title`, or `None` if no such entry exists.
    fn get(&self, title: &str) -> Result<Option<String>, StoreError>;

    /// Create or fully replace the entry. Durable once this returns.
    fn save(&self, title: &str, content: &str) -> Result<(), StoreError>;

    /// Create the entry only if no entry with this title exists.
    ///
    /// The default is a plain check-then-save; stores that can do better
    /// override it with an atomic create.
    fn create(&self, title: &str, content: &str) -> Result<CreateOutcome, StoreError> {
        if self.get(title)?.is_some() {
            return Ok(CreateOutcome::AlreadyExists);
        }
        self.save(title, content)?;
        Ok(CreateOutcome::Created)
    }

    fn contains(&self, title: &str) -> Result<bool, StoreError> {
        Ok(self.get(title)?.is_some())
    }
}
