//! Request-level wiki operations.
//!
//! Each method turns one user action into an explicit outcome over the
//! injected [`EntryStore`]. Nothing here knows about HTTP or templates; the
//! server maps outcomes onto pages and redirects.

use crate::forms::{EditForm, NewPageForm, ValidationErrors};
use crate::markdown::MarkdownProcessor;
use crate::search::{exact_match, matching_titles};
use crate::store::{CreateOutcome, EntryStore, StoreError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiError {
    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("The encyclopedia has no entries yet")]
    EmptyStore,
}

/// Result of viewing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryView {
    Found { title: String, html: String },
    NotFound { title: String },
}

/// Result of opening the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditView {
    Editing { title: String, form: EditForm },
    NotFound { title: String },
}

/// Result of submitting the new page form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateResult {
    Created { title: String },
    /// Form rejected; show it again with the user's input.
    Invalid {
        form: NewPageForm,
        errors: ValidationErrors,
    },
    /// Refused because `title` already exists.
    Conflict { form: NewPageForm, title: String },
}

/// Result of submitting the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    Saved { title: String },
    Invalid {
        form: EditForm,
        errors: ValidationErrors,
    },
    /// Editing never creates entries.
    NotFound { title: String },
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query names an entry exactly.
    Exact(String),
    Results { query: String, titles: Vec<String> },
}

/// Message shown when a new page would overwrite an existing entry.
pub fn conflict_message(title: &str) -> String {
    format!("Entry for '{title}' already exists. Your new entry will not be saved.")
}

/// The wiki: an entry store plus the rules for reading and writing it.
#[derive(Clone)]
pub struct Wiki {
    store: Arc<dyn EntryStore>,
    markdown: MarkdownProcessor,
}

impl Wiki {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            markdown: MarkdownProcessor::new(),
        }
    }

    pub fn store(&self) -> &dyn EntryStore {
        self.store.as_ref()
    }

    /// All entry titles.
    pub fn index(&self) -> Result<Vec<String>, WikiError> {
        Ok(self.store.list_titles()?)
    }

    /// Raw Markdown for `title`.
    pub fn source(&self, title: &str) -> Result<Option<String>, WikiError> {
        Ok(self.store.get(title)?)
    }

    pub fn view(&self, title: &str) -> Result<EntryView, WikiError> {
        let view = match self.store.get(title)? {
            Some(content) => EntryView::Found {
                title: title.to_string(),
                html: self.markdown.convert(&content),
            },
            None => EntryView::NotFound {
                title: title.to_string(),
            },
        };
        Ok(view)
    }

    pub fn new_page(&self, form: NewPageForm) -> Result<CreateResult, WikiError> {
        let entry = match form.validate() {
            Ok(entry) => entry,
            Err(errors) => return Ok(CreateResult::Invalid { form, errors }),
        };

        match self.store.create(&entry.title, &entry.content)? {
            CreateOutcome::Created => {
                tracing::info!(title = %entry.title, "created entry");
                Ok(CreateResult::Created { title: entry.title })
            }
            CreateOutcome::AlreadyExists => {
                tracing::debug!(title = %entry.title, "refused to overwrite existing entry");
                Ok(CreateResult::Conflict {
                    form,
                    title: entry.title,
                })
            }
        }
    }

    pub fn edit_form(&self, title: &str) -> Result<EditView, WikiError> {
        let view = match self.store.get(title)? {
            Some(content) => EditView::Editing {
                title: title.to_string(),
                form: EditForm { content },
            },
            None => EditView::NotFound {
                title: title.to_string(),
            },
        };
        Ok(view)
    }

    pub fn save_edit(&self, title: &str, form: EditForm) -> Result<EditResult, WikiError> {
        if !self.store.contains(title)? {
            return Ok(EditResult::NotFound {
                title: title.to_string(),
            });
        }

        let content = match form.validate() {
            Ok(content) => content,
            Err(errors) => return Ok(EditResult::Invalid { form, errors }),
        };

        self.store.save(title, &content)?;
        tracing::info!(%title, "updated entry");
        Ok(EditResult::Saved {
            title: title.to_string(),
        })
    }

    pub fn search(&self, query: &str) -> Result<SearchOutcome, WikiError> {
        let titles = self.store.list_titles()?;
        if let Some(title) = exact_match(&titles, query) {
            return Ok(SearchOutcome::Exact(title.clone()));
        }
        Ok(SearchOutcome::Results {
            query: query.to_string(),
            titles: matching_titles(&titles, query),
        })
    }

    /// A uniformly chosen title.
    pub fn random_title(&self) -> Result<String, WikiError> {
        self.random_title_with(&mut rand::thread_rng())
    }

    pub fn random_title_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, WikiError> {
        let titles = self.store.list_titles()?;
        titles.choose(rng).cloned().ok_or(WikiError::EmptyStore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{CONTENT_FIELD, TITLE_FIELD};
    use crate::store::MemoryEntryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wiki_with(entries: &[(&str, &str)]) -> Wiki {
        let store = MemoryEntryStore::with_entries(entries.iter().copied());
        Wiki::new(Arc::new(store))
    }

    #[test]
    fn test_index_lists_titles() {
        let wiki = wiki_with(&[("Dogs", "woof"), ("Cats", "meow")]);
        assert_eq!(wiki.index().unwrap(), vec!["Cats", "Dogs"]);
    }

    #[test]
    fn test_view_renders_markdown() {
        let wiki = wiki_with(&[]);
        wiki.store().save("Dogs", "# Dogs\nFriendly.").unwrap();
        assert_eq!(
            wiki.source("Dogs").unwrap().as_deref(),
            Some("# Dogs\nFriendly.")
        );

        match wiki.view("Dogs").unwrap() {
            EntryView::Found { title, html } => {
                assert_eq!(title, "Dogs");
                assert!(html.contains("<h1"));
                assert!(html.contains("Dogs</h1>"));
            }
            other => panic!("expected entry, got {other:?}"),
        }
    }

    #[test]
    fn test_view_missing_entry_carries_title() {
        let wiki = wiki_with(&[("Dogs", "woof")]);
        assert_eq!(
            wiki.view("dogs").unwrap(),
            EntryView::NotFound {
                title: "dogs".into()
            }
        );
    }

    #[test]
    fn test_new_page_saves_and_reports_title() {
        let wiki = wiki_with(&[]);
        let result = wiki
            .new_page(NewPageForm::new(" Birds ", "Chirp\r\n"))
            .unwrap();
        assert_eq!(
            result,
            CreateResult::Created {
                title: "Birds".into()
            }
        );
        assert_eq!(wiki.source("Birds").unwrap().as_deref(), Some("Chirp"));
    }

    #[test]
    fn test_new_page_conflict_leaves_store_unchanged() {
        let wiki = wiki_with(&[("Cats", "Original"), ("Dogs", "woof")]);
        let form = NewPageForm::new("Cats", "Replacement");

        let result = wiki.new_page(form.clone()).unwrap();
        assert_eq!(
            result,
            CreateResult::Conflict {
                form,
                title: "Cats".into()
            }
        );
        assert_eq!(wiki.source("Cats").unwrap().as_deref(), Some("Original"));
        assert_eq!(wiki.index().unwrap(), vec!["Cats", "Dogs"]);
    }

    #[test]
    fn test_new_page_validation_echoes_input() {
        let wiki = wiki_with(&[]);
        let form = NewPageForm::new("", "some text");

        match wiki.new_page(form.clone()).unwrap() {
            CreateResult::Invalid { form: echoed, errors } => {
                assert_eq!(echoed, form);
                assert!(errors.for_field(TITLE_FIELD).is_some());
                assert!(errors.for_field(CONTENT_FIELD).is_none());
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(wiki.index().unwrap().is_empty());
    }

    #[test]
    fn test_edit_form_prefills_content() {
        let wiki = wiki_with(&[("Git", "# Git")]);
        assert_eq!(
            wiki.edit_form("Git").unwrap(),
            EditView::Editing {
                title: "Git".into(),
                form: EditForm::new("# Git")
            }
        );
        assert_eq!(
            wiki.edit_form("Svn").unwrap(),
            EditView::NotFound {
                title: "Svn".into()
            }
        );
    }

    #[test]
    fn test_save_edit_overwrites() {
        let wiki = wiki_with(&[("Git", "old")]);
        let result = wiki.save_edit("Git", EditForm::new("new")).unwrap();
        assert_eq!(result, EditResult::Saved { title: "Git".into() });
        assert_eq!(wiki.source("Git").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_save_edit_rejects_empty_content() {
        let wiki = wiki_with(&[("Git", "old")]);
        let result = wiki.save_edit("Git", EditForm::new("   ")).unwrap();
        assert!(matches!(result, EditResult::Invalid { .. }));
        assert_eq!(wiki.source("Git").unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn test_save_edit_on_missing_entry_is_not_found() {
        let wiki = wiki_with(&[]);
        let result = wiki.save_edit("Ghost", EditForm::new("boo")).unwrap();
        assert_eq!(
            result,
            EditResult::NotFound {
                title: "Ghost".into()
            }
        );
        assert!(wiki.index().unwrap().is_empty());
    }

    #[test]
    fn test_search_scenarios() {
        let wiki = wiki_with(&[("Cats", "meow"), ("Dogs", "woof")]);

        assert_eq!(
            wiki.search("o").unwrap(),
            SearchOutcome::Results {
                query: "o".into(),
                titles: vec!["Dogs".into()]
            }
        );
        assert_eq!(
            wiki.search("Cats").unwrap(),
            SearchOutcome::Exact("Cats".into())
        );
        // Different case is a substring hit, not an exact match.
        assert_eq!(
            wiki.search("cats").unwrap(),
            SearchOutcome::Results {
                query: "cats".into(),
                titles: vec!["Cats".into()]
            }
        );
        assert_eq!(
            wiki.search("").unwrap(),
            SearchOutcome::Results {
                query: String::new(),
                titles: vec!["Cats".into(), "Dogs".into()]
            }
        );
    }

    #[test]
    fn test_random_title_is_listed() {
        let wiki = wiki_with(&[("CSS", "a"), ("Git", "b"), ("HTML", "c")]);
        let titles = wiki.index().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let title = wiki.random_title_with(&mut rng).unwrap();
            assert!(titles.contains(&title));
        }
        assert!(titles.contains(&wiki.random_title().unwrap()));
    }

    #[test]
    fn test_random_title_covers_every_entry() {
        let wiki = wiki_with(&[("CSS", "a"), ("Git", "b"), ("HTML", "c")]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            seen.insert(wiki.random_title_with(&mut rng).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_random_title_on_empty_store() {
        let wiki = wiki_with(&[]);
        assert!(matches!(wiki.random_title(), Err(WikiError::EmptyStore)));
    }
}
