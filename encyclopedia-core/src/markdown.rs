//! Markdown to HTML conversion for entry pages.

use crate::slug::slugify;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

/// Markdown processor used when viewing entries.
///
/// Output depends only on the input text, so the same entry always renders
/// to the same HTML.
#[derive(Debug, Clone)]
pub struct MarkdownProcessor {
    options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Convert markdown to HTML, giving every heading an anchor id
    pub fn convert(&self, markdown: &str) -> String {
        let events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();

        let ids = heading_ids(&events);
        let events = attach_heading_ids(events, ids);

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Slug ids for each heading in document order, deduplicated with numeric
/// suffixes. Headings that already carry an explicit `{#id}` get `None`.
fn heading_ids(events: &[Event]) -> Vec<Option<String>> {
    let mut ids = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut current: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { id, .. }) => {
                current = id.is_none().then(String::new);
                if id.is_some() {
                    ids.push(None);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(title) = current.as_mut() {
                    title.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(title) = current.take() {
                    let base = match slugify(&title) {
                        s if s.is_empty() => "section".to_string(),
                        s => s,
                    };
                    let count = seen.entry(base.clone()).or_insert(0);
                    let id = if *count == 0 {
                        base
                    } else {
                        format!("{base}-{count}")
                    };
                    *count += 1;
                    ids.push(Some(id));
                }
            }
            _ => {}
        }
    }

    ids
}

fn attach_heading_ids<'a>(events: Vec<Event<'a>>, ids: Vec<Option<String>>) -> Vec<Event<'a>> {
    let mut ids = ids.into_iter();

    events
        .into_iter()
        .map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let generated = ids.next().flatten();
                let id = id.or_else(|| generated.map(|s| CowStr::Boxed(s.into_boxed_str())));
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                })
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_gets_h1_with_id() {
        let processor = MarkdownProcessor::new();
        let html = processor.convert("# Dogs\nFriendly.");
        assert!(html.contains(r#"<h1 id="dogs">Dogs</h1>"#), "{html}");
        assert!(html.contains("<p>Friendly.</p>"));
    }

    #[test]
    fn test_common_subset() {
        let processor = MarkdownProcessor::new();
        let md = "## Intro\n\nSome *emphasis* and **strong** text.\n\n\
                  - one\n- two\n\n1. first\n2. second\n\n\
                  [Python](/wiki/Python/)\n\n```\nprint(1)\n```\n";
        let html = processor.convert(md);
        assert!(html.contains(r#"<h2 id="intro">Intro</h2>"#));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains("<strong>strong</strong>"));
        assert!(html.contains("<ul>\n<li>one</li>"));
        assert!(html.contains("<ol>\n<li>first</li>"));
        assert!(html.contains(r#"<a href="/wiki/Python/">Python</a>"#));
        assert!(html.contains("<pre><code>print(1)\n</code></pre>"));
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let processor = MarkdownProcessor::new();
        let html = processor.convert("## Usage\n\n## Usage\n\n## Usage\n");
        assert!(html.contains(r#"<h2 id="usage">"#));
        assert!(html.contains(r#"<h2 id="usage-1">"#));
        assert!(html.contains(r#"<h2 id="usage-2">"#));
    }

    #[test]
    fn test_explicit_heading_id_is_kept() {
        let processor = MarkdownProcessor::new();
        let html = processor.convert("# Title {#custom}\n\n## Next\n");
        assert!(html.contains(r#"<h1 id="custom">Title</h1>"#), "{html}");
        assert!(html.contains(r#"<h2 id="next">Next</h2>"#), "{html}");
    }

    #[test]
    fn test_tables() {
        let processor = MarkdownProcessor::new();
        let md = "| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | Cell 2   |\n";
        let html = processor.convert(md);
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>Header 1</th>"));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let processor = MarkdownProcessor::new();
        let md = "# A\n\n# A\n\ntext with `code`\n";
        assert_eq!(processor.convert(md), processor.convert(md));
    }
}
