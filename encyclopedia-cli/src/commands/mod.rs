//! CLI command implementations.

pub mod entries;
pub mod init;
pub mod search;
pub mod serve;

pub use entries::{list_entries, random_entry, show_entry};
pub use init::init_project;
pub use search::search_entries;
pub use serve::{serve, ServeOptions};

use anyhow::{Context, Result};
use encyclopedia_core::{Config, FsEntryStore, Wiki};
use std::path::Path;
use std::sync::Arc;

/// Load configuration and open the wiki over its entries directory
pub(crate) fn open_wiki(config_path: &Path) -> Result<(Config, Wiki)> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    let store = FsEntryStore::new(config.entries_dir());
    Ok((config, Wiki::new(Arc::new(store))))
}
