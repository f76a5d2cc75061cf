//! Search command implementation

use super::open_wiki;
use anyhow::{Context, Result};
use encyclopedia_core::SearchOutcome;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct SearchReport {
    query: String,
    /// Title named exactly by the query, if any
    exact: Option<String>,
    titles: Vec<String>,
}

impl SearchReport {
    fn from_outcome(query: &str, outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Exact(title) => Self {
                query: query.to_string(),
                exact: Some(title.clone()),
                titles: vec![title],
            },
            SearchOutcome::Results { query, titles } => Self {
                query,
                exact: None,
                titles,
            },
        }
    }
}

/// Search entry titles
pub fn search_entries(config_path: &Path, query: &str, json: bool) -> Result<()> {
    let (_, wiki) = open_wiki(config_path)?;
    let outcome = wiki.search(query).context("Failed to search entries")?;
    let report = SearchReport::from_outcome(query, outcome);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.titles.is_empty() {
        println!("No results found for '{}'", query);
        return Ok(());
    }
    for title in &report.titles {
        println!("{title}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_outcome_reports_single_title() {
        let report = SearchReport::from_outcome("Cats", SearchOutcome::Exact("Cats".into()));
        assert_eq!(report.exact.as_deref(), Some("Cats"));
        assert_eq!(report.titles, vec!["Cats"]);
    }

    #[test]
    fn test_results_outcome_has_no_exact() {
        let report = SearchReport::from_outcome(
            "o",
            SearchOutcome::Results {
                query: "o".into(),
                titles: vec!["Dogs".into()],
            },
        );
        assert_eq!(report.exact, None);
        assert_eq!(report.titles, vec!["Dogs"]);
    }
}
