//! URL paths for the wiki's routes.

use urlencoding::encode;

/// `/wiki/{title}/`
pub fn entry_url(title: &str) -> String {
    format!("/wiki/{}/", encode(title))
}

/// `/{title}/edit/`
pub fn edit_url(title: &str) -> String {
    format!("/{}/edit/", encode(title))
}
