//! Entry titles and the file names derived from them.

use std::path::{Path, PathBuf};

/// Extension used for entry files on disk.
pub const ENTRY_EXTENSION: &str = "md";

/// Longest title, in UTF-8 bytes, whose file name fits the common 255-byte
/// limit once `.md` is appended.
pub const MAX_TITLE_BYTES: usize = 255 - ENTRY_EXTENSION.len() - 1;

/// Why a title cannot be used as an entry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleProblem {
    Empty,
    LeadingDot,
    PathSeparator,
    ControlCharacter,
    TooLong,
}

impl TitleProblem {
    pub fn message(self) -> &'static str {
        match self {
            TitleProblem::Empty => "This field is required.",
            TitleProblem::LeadingDot => "Titles may not start with '.'.",
            TitleProblem::PathSeparator => "Titles may not contain '/' or '\\'.",
            TitleProblem::ControlCharacter => "Titles may not contain control characters.",
            TitleProblem::TooLong => "Titles may be at most 252 bytes long.",
        }
    }
}

/// Check that `title` can be stored as `<title>.md` inside the entries directory.
pub fn check_title(title: &str) -> Result<(), TitleProblem> {
    if title.trim().is_empty() {
        return Err(TitleProblem::Empty);
    }
    if title.starts_with('.') {
        return Err(TitleProblem::LeadingDot);
    }
    if title.contains(['/', '\\']) {
        return Err(TitleProblem::PathSeparator);
    }
    if title.chars().any(char::is_control) {
        return Err(TitleProblem::ControlCharacter);
    }
    if title.len() > MAX_TITLE_BYTES {
        return Err(TitleProblem::TooLong);
    }
    Ok(())
}

pub fn is_valid_title(title: &str) -> bool {
    check_title(title).is_ok()
}

/// Path of the file backing `title`. The title must already be valid.
pub fn entry_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{title}.{ENTRY_EXTENSION}"))
}

/// Recover a title from an entry file path, if the path names an entry file.
pub fn title_from_path(path: &Path) -> Option<String> {
    if path.extension()? != ENTRY_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    is_valid_title(stem).then(|| stem.to_string())
}
