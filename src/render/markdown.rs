//! Markdown to HTML.
//!
//! CommonMark plus tables, strikethrough, task lists, footnotes and
//! `{#id}` heading attributes. Headings without an explicit id get one
//! derived from their text, de-duplicated within the document.

use crate::permalink::slugify;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html::push_html};
use std::collections::HashMap;

/// Render markdown to HTML.
pub fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES;

    let events = with_heading_ids(Parser::new_ext(content, options));

    let mut html = String::with_capacity(content.len() * 3 / 2);
    push_html(&mut html, events.into_iter());
    html
}

/// Flatten markdown to one line of unescaped plain text.
///
/// Used for meta descriptions, where the layout escapes the text once.
pub fn plain_text(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    for event in Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph) => text.push(' '),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fill in missing heading ids from the heading text.
fn with_heading_ids<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events: Vec<Event<'a>> = parser.collect();
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut heading_start: Option<usize> = None;
    let mut heading_text = String::new();

    for i in 0..events.len() {
        match &events[i] {
            Event::Start(Tag::Heading { .. }) => {
                heading_start = Some(i);
                heading_text.clear();
            }
            Event::Text(text) | Event::Code(text) if heading_start.is_some() => {
                heading_text.push_str(text);
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some(start) = heading_start.take() else {
                    continue;
                };
                if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
                    let base = match id {
                        Some(explicit) => explicit.to_string(),
                        None => slugify(&heading_text),
                    };
                    if base.is_empty() {
                        continue;
                    }
                    let unique = unique_id(&mut used, base);
                    *id = Some(CowStr::from(unique));
                }
            }
            _ => {}
        }
    }

    events
}

/// `intro`, `intro-1`, `intro-2`, ...
fn unique_id(used: &mut HashMap<String, usize>, base: String) -> String {
    let count = used.entry(base.clone()).or_insert(0);
    let id = if *count == 0 {
        base
    } else {
        format!("{base}-{count}")
    };
    *count += 1;
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("Some *bold*\nand `code`."), "Some bold and code.");
        assert_eq!(plain_text("Tom & Jerry <3 \"quotes\""), r#"Tom & Jerry <3 "quotes""#);
        assert_eq!(plain_text("One.\n\nTwo."), "One. Two.");
    }

    #[test]
    fn test_render_markdown_basic() {
        let html = render_markdown("Hello *world*");
        assert_eq!(html.trim(), "<p>Hello <em>world</em></p>");
    }

    #[test]
    fn test_heading_ids() {
        let html = render_markdown("## Getting Started\n\ntext");
        assert!(html.contains(r#"<h2 id="getting-started">Getting Started</h2>"#));
    }

    #[test]
    fn test_heading_ids_with_code() {
        let html = render_markdown("### The `Vec` type");
        assert!(html.contains(r#"id="the-vec-type""#));
    }

    #[test]
    fn test_heading_ids_deduplicated() {
        let html = render_markdown("## Notes\n\n## Notes\n\n## Notes");
        assert!(html.contains(r#"id="notes""#));
        assert!(html.contains(r#"id="notes-1""#));
        assert!(html.contains(r#"id="notes-2""#));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let html = render_markdown("## Setup {#install}");
        assert!(html.contains(r#"id="install""#));
        assert!(!html.contains(r#"id="setup""#));
    }

    #[test]
    fn test_tables_and_strikethrough() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let html = render_markdown("<div class=\"note\">hi</div>\n");
        assert!(html.contains("<div class=\"note\">hi</div>"));
    }
}
