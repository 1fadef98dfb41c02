//! Pagination of ordered item lists.
//!
//! ```text
//! 23 posts, per_page = 10
//!
//!   page 1  /          [0..10)   next → /page2/
//!   page 2  /page2/    [10..20)  prev → /   next → /page3/
//!   page 3  /page3/    [20..23)  prev → /page2/
//! ```

use crate::{
    error::{BuildError, Result},
    permalink,
};
use std::path::{Path, PathBuf};

/// Splits item lists into fixed-size pages.
#[derive(Debug, Clone)]
pub struct Paginator {
    per_page: usize,
    /// URL pattern for pages after the first, containing `:num`.
    path_pattern: String,
}

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// 1-based page number.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: &'a [T],
    /// Site-relative URL of this page.
    pub url: String,
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
}

/// Reference to a neighbouring page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: usize,
    pub url: String,
}

impl Paginator {
    /// Create a paginator with `per_page` items per page.
    ///
    /// `source` is the file the size came from, reported on error.
    pub fn new(per_page: i64, path_pattern: &str, source: &Path) -> Result<Self> {
        let per_page = usize::try_from(per_page)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| {
                BuildError::invalid_config(
                    source,
                    format!("page size must be at least 1, got {per_page}"),
                )
            })?;

        Ok(Self {
            per_page,
            path_pattern: path_pattern.to_owned(),
        })
    }

    /// A paginator that puts every item on one page.
    pub fn unbounded(path_pattern: &str) -> Self {
        Self {
            per_page: usize::MAX,
            path_pattern: path_pattern.to_owned(),
        }
    }

    /// Site-relative URL of page `number`.
    pub fn url(&self, number: usize) -> String {
        permalink::paginate_url(&self.path_pattern, number)
    }

    /// Split `items` into pages. No items yields no pages.
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> Vec<Page<'a, T>> {
        let total_items = items.len();
        let total_pages = total_items.div_ceil(self.per_page);
        let link = |number: usize| PageLink {
            number,
            url: self.url(number),
        };

        items
            .chunks(self.per_page)
            .enumerate()
            .map(|(i, chunk)| {
                let number = i + 1;
                Page {
                    number,
                    total_pages,
                    total_items,
                    items: chunk,
                    url: self.url(number),
                    previous: (number > 1).then(|| link(number - 1)),
                    next: (number < total_pages).then(|| link(number + 1)),
                }
            })
            .collect()
    }
}

/// Output file of a page, relative to the destination.
pub fn page_output_file<T>(page: &Page<'_, T>) -> PathBuf {
    permalink::output_file(&page.url)
}
