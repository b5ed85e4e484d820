//! Markdown rendering for project detail pages.

pub mod highlight;

use crate::slug::slugify;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

pub use highlight::HighlightTransformer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    pub level: u32,
    pub title: String,
    pub id: String,
}

/// Output of a markdown conversion
#[derive(Debug, Clone)]
pub struct RenderedMarkdown {
    pub html: String,
    pub toc: Vec<TocItem>,
}

impl RenderedMarkdown {
    /// Table of contents as a nav block, `None` when the body has no headings
    pub fn toc_html(&self) -> Option<String> {
        if self.toc.is_empty() {
            return None;
        }

        let mut html = String::from(r#"<nav class="toc"><h3>Contents</h3><ul>"#);
        for item in &self.toc {
            html.push_str(&format!(
                r##"<li class="toc-level-{}"><a href="#{}">{}</a></li>"##,
                item.level,
                html_escape(&item.id),
                html_escape(&item.title)
            ));
        }
        html.push_str("</ul></nav>");
        Some(html)
    }
}

/// Markdown processor with heading anchors and code highlighting
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

    pub fn convert(&self, markdown: &str) -> RenderedMarkdown {
        let events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();

        let toc = collect_headings(&events);
        let events = attach_heading_ids(events, &toc);
        let events = HighlightTransformer::new().transform(events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        RenderedMarkdown {
            html: html_output,
            toc,
        }
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Headings in document order; repeated titles get `-2`, `-3` suffixes
fn collect_headings(events: &[Event]) -> Vec<TocItem> {
    let mut toc = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut current: Option<(u32, Option<String>, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((*level as u32, id.as_ref().map(|s| s.to_string()), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, title)) = current.as_mut() {
                    title.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, explicit, title)) = current.take() {
                    let id = explicit.unwrap_or_else(|| {
                        let base = slugify(&title);
                        let count = seen.entry(base.clone()).or_insert(0);
                        *count += 1;
                        if *count == 1 {
                            base
                        } else {
                            format!("{}-{}", base, count)
                        }
                    });
                    toc.push(TocItem { level, title, id });
                }
            }
            _ => {}
        }
    }

    toc
}

/// Set ids on headings and close each with a self-link
fn attach_heading_ids<'a>(events: Vec<Event<'a>>, headings: &[TocItem]) -> Vec<Event<'a>> {
    let mut heading_iter = headings.iter();
    let mut current_id: Option<String> = None;
    let mut result = Vec::with_capacity(events.len());

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                id: _,
                classes,
                attrs,
            }) => {
                let item = heading_iter.next();
                current_id = item.map(|h| h.id.clone());
                result.push(Event::Start(Tag::Heading {
                    level,
                    id: item.map(|h| CowStr::Boxed(h.id.clone().into_boxed_str())),
                    classes,
                    attrs,
                }));
            }
            Event::End(TagEnd::Heading(level)) => {
                if let Some(id) = current_id.take().filter(|id| !id.is_empty()) {
                    let anchor = format!(
                        "<a class=\"heading-anchor\" href=\"#{}\" aria-label=\"Link to heading\">#</a>",
                        html_escape(&id)
                    );
                    result.push(Event::Html(CowStr::Boxed(anchor.into_boxed_str())));
                }
                result.push(Event::End(TagEnd::Heading(level)));
            }
            other => result.push(other),
        }
    }

    result
}

pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let rendered = MarkdownProcessor::new().convert("## Hello World\n\nThis is a **test**.");
        assert!(rendered.html.contains(r#"<h2 id="hello-world">"#));
        assert!(rendered.html.contains("href=\"#hello-world\""));
        assert!(rendered.html.contains("<strong>test</strong>"));
        assert_eq!(
            rendered.toc,
            vec![TocItem {
                level: 2,
                title: "Hello World".into(),
                id: "hello-world".into(),
            }]
        );
    }

    #[test]
    fn test_duplicate_headings_get_distinct_ids() {
        let rendered = MarkdownProcessor::new().convert("## Usage\n\n## Usage\n");
        let ids: Vec<_> = rendered.toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["usage", "usage-2"]);
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let rendered = MarkdownProcessor::new().convert("## Setup {#install}\n");
        assert_eq!(rendered.toc[0].id, "install");
        assert!(rendered.html.contains(r#"id="install""#));
    }

    #[test]
    fn test_tables() {
        let md = "| Header 1 | Header 2 |\n|----------|----------|\n| Cell 1   | Cell 2   |\n";
        let rendered = MarkdownProcessor::new().convert(md);
        assert!(rendered.html.contains("<table>"));
        assert!(rendered.html.contains("<th>Header 1</th>"));
    }

    #[test]
    fn test_toc_html() {
        let rendered = MarkdownProcessor::new().convert("## A & B\n\ntext\n\n### Deeper\n");
        let toc = rendered.toc_html().unwrap();
        assert!(toc.contains(r##"<li class="toc-level-2"><a href="#a-b">A &amp; B</a></li>"##));
        assert!(toc.contains("toc-level-3"));

        let empty = MarkdownProcessor::new().convert("no headings");
        assert!(empty.toc_html().is_none());
    }
}
