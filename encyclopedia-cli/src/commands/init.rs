//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../starter/encyclopedia.yml");

const STARTER_ENTRIES: &[(&str, &str)] = &[
    ("CSS", include_str!("../../starter/CSS.md")),
    ("Git", include_str!("../../starter/Git.md")),
    ("HTML", include_str!("../../starter/HTML.md")),
    ("Python", include_str!("../../starter/Python.md")),
    ("Rust", include_str!("../../starter/Rust.md")),
];

/// Initialize a new encyclopedia
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_entries(root)?;

    println!("✓ encyclopedia initialized in {:?}", root);
    println!("  - Edit encyclopedia.yml to change the site title or port");
    println!("  - Run `encyclopedia serve` and open the printed address");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("encyclopedia.yml");
    if config_path.exists() {
        println!("encyclopedia.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_entries(root: &Path) -> Result<()> {
    let entries = root.join("entries");
    fs::create_dir_all(&entries).with_context(|| format!("Failed to create {:?}", entries))?;

    for (title, content) in STARTER_ENTRIES {
        let path = entries.join(format!("{title}.md"));
        if path.exists() {
            continue;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!(%title, "wrote starter entry");
    }
    Ok(())
}
