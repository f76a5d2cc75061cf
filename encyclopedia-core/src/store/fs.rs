//! Directory-backed entry store.

use super::{CreateOutcome, EntryStore, StoreError};
use crate::title::{entry_path, is_valid_title, title_from_path};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Stores each entry as `<dir>/<title>.md`.
///
/// Nothing is cached: every call goes to disk, so the store always reflects
/// whatever is in the directory, including files written by other processes.
/// Writes go to a synced temporary file in the same directory which is then
/// renamed over the entry, so readers see either the old or the new content.
#[derive(Debug, Clone)]
pub struct FsEntryStore {
    dir: PathBuf,
}

impl FsEntryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, title: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_title(title) {
            return Err(StoreError::InvalidTitle(title.to_string()));
        }
        Ok(entry_path(&self.dir, title))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))
    }

    /// Write `content` to a synced temp file beside the entry file.
    fn stage(&self, content: &str) -> Result<NamedTempFile, StoreError> {
        self.ensure_dir()?;
        let mut staged =
            NamedTempFile::new_in(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        if let Err(e) = staged.write_all(content.as_bytes()) {
            return Err(StoreError::io(staged.path(), e));
        }
        if let Err(e) = staged.as_file().sync_all() {
            return Err(StoreError::io(staged.path(), e));
        }
        Ok(staged)
    }

    /// Whether the directory holds a file named exactly `<title>.md`.
    ///
    /// Case-insensitive filesystems open "dogs.md" for "Dogs.md"; lookups must
    /// still be exact, so the stored name is compared byte for byte.
    fn has_exact_name(&self, path: &Path) -> Result<bool, StoreError> {
        let Some(name) = path.file_name().map(OsString::from) else {
            return Ok(false);
        };
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.dir, e))?;
            if entry.file_name() == name {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn sync_dir(dir: &Path) {
    // Flushes the rename. Opening a directory fails on some platforms.
    if let Ok(handle) = fs::File::open(dir) {
        let _ = handle.sync_all();
    }
}

impl EntryStore for FsEntryStore {
    fn list_titles(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut titles = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.dir).to_path_buf();
                StoreError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(title) = title_from_path(entry.path()) {
                titles.push(title);
            }
        }
        titles.sort();
        Ok(titles)
    }

    fn get(&self, title: &str) -> Result<Option<String>, StoreError> {
        let Ok(path) = self.path_for(title) else {
            return Ok(None);
        };
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        if !self.has_exact_name(&path)? {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn save(&self, title: &str, content: &str) -> Result<(), StoreError> {
        let path = self.path_for(title)?;
        let staged = self.stage(content)?;
        staged
            .persist(&path)
            .map_err(|e| StoreError::io(&path, e.error))?;
        sync_dir(&self.dir);
        tracing::debug!(%title, path = %path.display(), bytes = content.len(), "saved entry");
        Ok(())
    }

    fn create(&self, title: &str, content: &str) -> Result<CreateOutcome, StoreError> {
        let path = self.path_for(title)?;
        let staged = self.stage(content)?;
        match staged.persist_noclobber(&path) {
            Ok(_) => {}
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                return Ok(CreateOutcome::AlreadyExists)
            }
            Err(e) => return Err(StoreError::io(path, e.error)),
        }
        sync_dir(&self.dir);
        tracing::debug!(%title, path = %path.display(), "created entry");
        Ok(CreateOutcome::Created)
    }
}
