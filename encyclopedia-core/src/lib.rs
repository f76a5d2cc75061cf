//! # encyclopedia-core
//!
//! Core library for the encyclopedia wiki.
//!
//! Entries are Markdown documents keyed by title and kept in an
//! [`EntryStore`]. The [`Wiki`] type layers the user-facing operations on
//! top: listing, viewing, creating, editing, searching, and picking a random
//! entry.

pub mod config;
pub mod forms;
pub mod markdown;
pub mod search;
pub mod slug;
pub mod store;
pub mod title;
pub mod urls;
pub mod wiki;

pub use config::{Config, ConfigError};
pub use forms::{EditForm, NewPageForm, ValidationErrors};
pub use markdown::MarkdownProcessor;
pub use slug::slugify;
pub use store::{CreateOutcome, EntryStore, FsEntryStore, MemoryEntryStore, StoreError};
pub use wiki::{
    CreateResult, EditResult, EditView, EntryView, SearchOutcome, Wiki, WikiError,
};
