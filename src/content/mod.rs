//! Content units: posts, pages and drafts.
//!
//! # Source Layout
//!
//! ```text
//! site/
//! ├── _config.yml
//! ├── _posts/2024-03-07-hello.md   → post
//! ├── _drafts/idea.md              → draft (published with --drafts)
//! ├── index.md                     → home intro (optional)
//! ├── about.md                     → page
//! ├── _layouts/, _includes/, ...   → ignored
//! └── assets/style.css             → copied as-is
//! ```

pub mod front_matter;
mod loader;

pub use loader::{Content, SourceFiles, load_content, scan_source};

use chrono::NaiveDateTime;
use std::{collections::BTreeSet, path::PathBuf};

/// Marker that ends an explicit excerpt in a post body.
pub const EXCERPT_SEPARATOR: &str = "<!--more-->";

/// Where a content unit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Post,
    Page,
    Draft,
}

impl ContentKind {
    /// Layout used when the front-matter names none.
    pub const fn default_layout(self) -> &'static str {
        match self {
            Self::Post | Self::Draft => "post",
            Self::Page => "page",
        }
    }
}

/// A parsed content file. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct ContentUnit {
    /// Unique identifier, also the `:title` permalink value.
    pub slug: String,
    pub title: String,
    /// Publish date; `None` only for drafts and undated pages.
    pub date: Option<NaiveDateTime>,
    pub tags: BTreeSet<String>,
    /// Layout name as written (or defaulted); resolved at render time.
    pub layout: String,
    /// Raw markdown body.
    pub body: String,
    /// Raw markdown excerpt.
    pub excerpt: Option<String>,
    pub description: Option<String>,
    pub kind: ContentKind,
    /// Site-relative URL, without `baseurl`.
    pub url: String,
    /// Source file, relative to the site root.
    pub source: PathBuf,
}

impl ContentUnit {
    pub fn is_draft(&self) -> bool {
        self.kind == ContentKind::Draft
    }

    /// Date as `YYYY-MM-DD`.
    pub fn date_ymd(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Date as shown to readers, e.g. `Mar 7, 2024`.
    pub fn date_display(&self) -> Option<String> {
        self.date.map(|d| d.format("%b %-d, %Y").to_string())
    }
}

/// Derive an excerpt from a markdown body.
///
/// Text before [`EXCERPT_SEPARATOR`] when present, else the first paragraph.
pub fn extract_excerpt(body: &str) -> Option<String> {
    let excerpt = match body.split_once(EXCERPT_SEPARATOR) {
        Some((before, _)) => before.trim().to_owned(),
        None => body
            .trim_start()
            .split("\n\n")
            .next()
            .unwrap_or_default()
            .trim()
            .to_owned(),
    };
    (!excerpt.is_empty()).then_some(excerpt)
}
