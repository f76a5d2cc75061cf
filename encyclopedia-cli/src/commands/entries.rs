//! Offline entry commands: list, show, random.

use super::open_wiki;
use anyhow::{bail, Context, Result};
use encyclopedia_core::EntryView;
use std::path::Path;

/// Print every title, one per line
pub fn list_entries(config_path: &Path) -> Result<()> {
    let (config, wiki) = open_wiki(config_path)?;
    let titles = wiki.index().context("Failed to list entries")?;

    if titles.is_empty() {
        eprintln!("No entries in {:?}", config.entries_dir());
        return Ok(());
    }
    for title in titles {
        println!("{title}");
    }
    Ok(())
}

/// Print one entry as Markdown, or as rendered HTML with `html`
pub fn show_entry(config_path: &Path, title: &str, html: bool) -> Result<()> {
    let (_, wiki) = open_wiki(config_path)?;

    if html {
        match wiki.view(title).context("Failed to read entry")? {
            EntryView::Found { html, .. } => print!("{html}"),
            EntryView::NotFound { title } => bail!("No entry titled '{title}'"),
        }
        return Ok(());
    }

    match wiki.source(title).context("Failed to read entry")? {
        Some(content) => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        None => bail!("No entry titled '{title}'"),
    }
}

/// Print one uniformly chosen title
pub fn random_entry(config_path: &Path) -> Result<()> {
    let (_, wiki) = open_wiki(config_path)?;
    let title = wiki.random_title()?;
    println!("{title}");
    Ok(())
}
