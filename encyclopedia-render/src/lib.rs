//! # encyclopedia-render
//!
//! Template rendering library for the encyclopedia wiki.
//!
//! This crate handles HTML template rendering using Askama.

pub mod templates;

pub use templates::{
    EditTemplate, EntryLink, EntryNotFoundTemplate, EntryTemplate, ErrorTemplate, IndexTemplate,
    NewPageTemplate,
};
