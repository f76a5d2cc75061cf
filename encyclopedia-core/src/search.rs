//! Title search.

/// Titles containing `query`, compared case-insensitively.
///
/// Order follows `titles`. An empty query is a substring of every title and
/// therefore matches all of them.
pub fn matching_titles<'a, I>(titles: I, query: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let needle = query.to_uppercase();
    titles
        .into_iter()
        .filter(|title| title.to_uppercase().contains(&needle))
        .cloned()
        .collect()
}

/// The title that `query` names exactly, if any. Case-sensitive.
pub fn exact_match<'a>(titles: &'a [String], query: &str) -> Option<&'a String> {
    titles.iter().find(|title| title.as_str() == query)
}
