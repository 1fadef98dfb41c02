//! URL slugification and permalink expansion.
//!
//! Maps content units to site URLs, and site URLs to output files.
//!
//! | Pattern                        | Post                             | URL                          |
//! |--------------------------------|----------------------------------|------------------------------|
//! | `/:title/`                     | `_posts/2024-03-01-hello.md`     | `/hello/`                    |
//! | `/:year/:month/:day/:title/`   | same                             | `/2024/03/01/hello/`         |
//! | `/:categories/:title.html`     | same, `categories: [rust]`       | `/rust/hello.html`           |
//!
//! | URL             | Output file                 |
//! |-----------------|-----------------------------|
//! | `/`             | `index.html`                |
//! | `/hello/`       | `hello/index.html`          |
//! | `/rust/a.html`  | `rust/a.html`               |

use chrono::{Datelike, NaiveDateTime};
use regex::{Captures, Regex};
use std::{path::PathBuf, sync::LazyLock};

/// Permalink placeholders: `:year`, `:title`, ...
static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":([a-z_]+)").unwrap());

// ============================================================================
// Slugification
// ============================================================================

/// Convert text to a lowercase ASCII slug.
///
/// Non-ASCII text is transliterated first; runs of other characters collapse
/// into a single `-`.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

// ============================================================================
// Permalinks
// ============================================================================

/// Values a post permalink pattern can reference.
#[derive(Debug, Clone, Copy)]
pub struct PermalinkFields<'a> {
    pub slug: &'a str,
    pub date: Option<NaiveDateTime>,
    pub categories: &'a [String],
}

/// Expand a permalink pattern for a post.
///
/// Date placeholders expand to nothing for undated posts (drafts in
/// preview mode); the resulting empty segments are dropped.
pub fn expand(pattern: &str, fields: PermalinkFields<'_>) -> String {
    let expanded = TOKEN.replace_all(pattern, |caps: &Captures| {
        let date = fields.date;
        match &caps[1] {
            "title" | "slug" => fields.slug.to_owned(),
            "year" => date.map(|d| format!("{:04}", d.year())).unwrap_or_default(),
            "short_year" => date.map(|d| format!("{:02}", d.year() % 100)).unwrap_or_default(),
            "month" => date.map(|d| format!("{:02}", d.month())).unwrap_or_default(),
            "i_month" => date.map(|d| d.month().to_string()).unwrap_or_default(),
            "day" => date.map(|d| format!("{:02}", d.day())).unwrap_or_default(),
            "i_day" => date.map(|d| d.day().to_string()).unwrap_or_default(),
            "categories" => fields
                .categories
                .iter()
                .map(|c| slugify(c))
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join("/"),
            _ => caps[0].to_owned(),
        }
    });

    normalize_url(&expanded)
}

/// URL of a page at `relative` (source path without extension).
///
/// `about` → `/about/`, `projects/index` → `/projects/`.
pub fn page_url(relative: &str) -> String {
    let relative = relative
        .strip_suffix("/index")
        .or_else(|| (relative == "index").then_some(""))
        .unwrap_or(relative);

    let segments: Vec<_> = relative
        .split('/')
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

/// URL of index page `number` (1-based).
///
/// Page 1 is the site root; later pages follow `paginate_path`.
pub fn paginate_url(paginate_path: &str, number: usize) -> String {
    if number <= 1 {
        "/".to_owned()
    } else {
        normalize_url(&paginate_path.replace(":num", &number.to_string()))
    }
}

/// URL of the listing page for `tag`.
pub fn tag_url(tag_path: &str, tag: &str) -> String {
    normalize_url(&tag_path.replace(":tag", &slugify(tag)))
}

/// Collapse repeated slashes, drop `.`/`..` segments, ensure a leading `/`.
pub fn normalize_url(url: &str) -> String {
    let trailing = url.ends_with('/');
    let segments: Vec<_> = url
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();

    match (segments.is_empty(), trailing) {
        (true, _) => "/".to_owned(),
        (false, true) => format!("/{}/", segments.join("/")),
        (false, false) => format!("/{}", segments.join("/")),
    }
}

/// Output file (relative to the destination) for a site URL.
pub fn output_file(url: &str) -> PathBuf {
    let url = normalize_url(url);
    let trimmed = url.trim_matches('/');

    let mut path: PathBuf = trimmed.split('/').filter(|s| !s.is_empty()).collect();
    let is_file = !url.ends_with('/')
        && path.extension().is_some_and(|ext| ext == "html" || ext == "htm" || ext == "xml");

    if !is_file {
        path.push("index.html");
    }
    path
}
