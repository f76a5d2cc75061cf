//! Submitted form data and its validation.
//!
//! Forms keep exactly what the user typed so a rejected submission can be
//! shown again unchanged. Validation produces cleaned values (line endings
//! normalised, surrounding whitespace trimmed) or a set of field errors.

use crate::title::check_title;
use serde::{Deserialize, Serialize};

pub const TITLE_FIELD: &str = "title";
pub const CONTENT_FIELD: &str = "content";

const REQUIRED: &str = "This field is required.";

/// One message attached to a named form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field-level validation failures, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

/// Normalise browser line endings and strip surrounding whitespace.
pub fn clean_text(raw: &str) -> String {
    raw.replace("\r\n", "\n").trim().to_string()
}

/// A new-page submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewPageForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Values from a [`NewPageForm`] that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
}

impl NewPageForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<NewEntry, ValidationErrors> {
        let title = clean_text(&self.title);
        let content = clean_text(&self.content);

        let mut errors = ValidationErrors::default();
        if let Err(problem) = check_title(&title) {
            errors.add(TITLE_FIELD, problem.message());
        }
        if content.is_empty() {
            errors.add(CONTENT_FIELD, REQUIRED);
        }

        if errors.is_empty() {
            Ok(NewEntry { title, content })
        } else {
            Err(errors)
        }
    }
}

/// An edit submission. The title comes from the URL, not the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditForm {
    #[serde(default)]
    pub content: String,
}

impl EditForm {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<String, ValidationErrors> {
        let content = clean_text(&self.content);
        if content.is_empty() {
            let mut errors = ValidationErrors::default();
            errors.add(CONTENT_FIELD, REQUIRED);
            return Err(errors);
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_cleans_input() {
        let form = NewPageForm::new("  Cats \r\n", "# Cats\r\nAloof.\r\n\r\n");
        let entry = form.validate().unwrap();
        assert_eq!(entry.title, "Cats");
        assert_eq!(entry.content, "# Cats\nAloof.");
    }

    #[test]
    fn test_new_page_requires_both_fields() {
        let errors = NewPageForm::new("   ", "").validate().unwrap_err();
        assert_eq!(errors.for_field(TITLE_FIELD), Some(REQUIRED));
        assert_eq!(errors.for_field(CONTENT_FIELD), Some(REQUIRED));
        assert_eq!(errors.iter().count(), 2);
    }

    #[test]
    fn test_new_page_rejects_unsafe_title() {
        let errors = NewPageForm::new("a/b", "body").validate().unwrap_err();
        assert!(errors.for_field(TITLE_FIELD).unwrap().contains('/'));
        assert_eq!(errors.for_field(CONTENT_FIELD), None);
    }

    #[test]
    fn test_edit_requires_content() {
        assert!(EditForm::new(" \n ").validate().is_err());
        assert_eq!(EditForm::new("x\r\ny").validate().unwrap(), "x\ny");
    }
}
