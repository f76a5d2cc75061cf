//! Askama template definitions.

use askama::Template;
use encyclopedia_core::forms::{CONTENT_FIELD, TITLE_FIELD};
use encyclopedia_core::urls::{edit_url, entry_url};
use encyclopedia_core::{EditForm, NewPageForm, ValidationErrors};

/// A linked title in an entry list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLink {
    pub url: String,
    pub title: String,
}

impl EntryLink {
    pub fn new(title: &str) -> Self {
        Self {
            url: entry_url(title),
            title: title.to_string(),
        }
    }
}

fn links(titles: &[String]) -> Vec<EntryLink> {
    titles.iter().map(|t| EntryLink::new(t)).collect()
}

fn field_error(errors: Option<&ValidationErrors>, field: &str) -> Option<String> {
    errors.and_then(|e| e.for_field(field)).map(str::to_string)
}

/// Index page, also used for search results
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site_title: String,
    pub heading: String,
    /// Set when the list is the result of a search
    pub query: Option<String>,
    pub entries: Vec<EntryLink>,
}

impl IndexTemplate {
    pub fn all_pages(site_title: &str, titles: &[String]) -> Self {
        Self {
            site_title: site_title.to_string(),
            heading: "All Pages".to_string(),
            query: None,
            entries: links(titles),
        }
    }

    pub fn search_results(site_title: &str, query: &str, titles: &[String]) -> Self {
        Self {
            site_title: site_title.to_string(),
            heading: "Search Results".to_string(),
            query: Some(query.to_string()),
            entries: links(titles),
        }
    }
}

/// Rendered entry page
#[derive(Template)]
#[template(path = "entry.html")]
pub struct EntryTemplate {
    pub site_title: String,
    pub title: String,
    /// Already-rendered HTML, emitted unescaped
    pub content_html: String,
    pub edit_url: String,
}

impl EntryTemplate {
    pub fn new(site_title: &str, title: &str, content_html: String) -> Self {
        Self {
            site_title: site_title.to_string(),
            title: title.to_string(),
            content_html,
            edit_url: edit_url(title),
        }
    }
}

/// Shown when a requested entry does not exist
#[derive(Template)]
#[template(path = "entry_not_found.html")]
pub struct EntryNotFoundTemplate {
    pub site_title: String,
    pub title: String,
}

impl EntryNotFoundTemplate {
    pub fn new(site_title: &str, title: &str) -> Self {
        Self {
            site_title: site_title.to_string(),
            title: title.to_string(),
        }
    }
}

/// Create form, optionally with the user's previous input and errors
#[derive(Template)]
#[template(path = "new_page.html")]
pub struct NewPageTemplate {
    pub site_title: String,
    pub title: String,
    pub content: String,
    pub title_error: Option<String>,
    pub content_error: Option<String>,
    /// Page-level message, e.g. a title conflict
    pub flash: Option<String>,
}

impl NewPageTemplate {
    pub fn empty(site_title: &str) -> Self {
        Self::from_form(site_title, &NewPageForm::default(), None, None)
    }

    pub fn from_form(
        site_title: &str,
        form: &NewPageForm,
        errors: Option<&ValidationErrors>,
        flash: Option<String>,
    ) -> Self {
        Self {
            site_title: site_title.to_string(),
            title: form.title.clone(),
            content: form.content.clone(),
            title_error: field_error(errors, TITLE_FIELD),
            content_error: field_error(errors, CONTENT_FIELD),
            flash,
        }
    }
}

/// Edit form for an existing entry
#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate {
    pub site_title: String,
    pub title: String,
    pub action_url: String,
    pub content: String,
    pub content_error: Option<String>,
}

impl EditTemplate {
    pub fn from_form(
        site_title: &str,
        title: &str,
        form: &EditForm,
        errors: Option<&ValidationErrors>,
    ) -> Self {
        Self {
            site_title: site_title.to_string(),
            title: title.to_string(),
            action_url: edit_url(title),
            content: form.content.clone(),
            content_error: field_error(errors, CONTENT_FIELD),
        }
    }
}

/// Generic error page
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub site_title: String,
    pub heading: String,
    pub message: String,
}

impl ErrorTemplate {
    pub fn new(site_title: &str, heading: &str, message: impl Into<String>) -> Self {
        Self {
            site_title: site_title.to_string(),
            heading: heading.to_string(),
            message: message.into(),
        }
    }
}
