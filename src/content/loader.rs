//! Content loading: source scanning and front-matter parsing.

use super::{ContentKind, ContentUnit, extract_excerpt, front_matter};
use crate::{
    config::SiteConfig,
    error::{BuildError, Result},
    permalink::{self, PermalinkFields},
};
use regex::Regex;
use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use walkdir::{DirEntry, WalkDir};

/// Jekyll-style post file name: `2024-03-07-hello-world.md`.
static DATED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})-(.+)$").unwrap());

const POSTS_DIR: &str = "_posts";
const DRAFTS_DIR: &str = "_drafts";
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

// ============================================================================
// Source Scanning
// ============================================================================

/// Files found under the site root, sorted by path.
#[derive(Debug, Default)]
pub struct SourceFiles {
    pub posts: Vec<PathBuf>,
    pub drafts: Vec<PathBuf>,
    pub pages: Vec<PathBuf>,
    /// Everything else that is copied verbatim.
    pub assets: Vec<PathBuf>,
}

/// Walk the site root and classify every file.
///
/// Skips hidden entries, `_`-prefixed entries other than `_posts`/`_drafts`,
/// `exclude:` entries and the destination directory.
pub fn scan_source(config: &SiteConfig) -> Result<SourceFiles> {
    let root = config.get_root();
    let mut files = SourceFiles::default();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, root, config));

    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            BuildError::io(path, err.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if path == config.config_path {
            continue;
        }

        let top = path
            .strip_prefix(root)
            .ok()
            .and_then(|rel| rel.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .unwrap_or_default();

        match (top.as_str(), is_markdown(&path)) {
            (POSTS_DIR, true) => files.posts.push(path),
            (DRAFTS_DIR, true) => files.drafts.push(path),
            (POSTS_DIR | DRAFTS_DIR, false) => {}
            (_, true) => files.pages.push(path),
            (_, false) => files.assets.push(path),
        }
    }

    Ok(files)
}

fn keep_entry(entry: &DirEntry, root: &Path, config: &SiteConfig) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if entry.path() == config.destination {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return false;
    }
    if name.starts_with('_') && !(entry.depth() == 1 && (name == POSTS_DIR || name == DRAFTS_DIR)) {
        return false;
    }

    let Ok(rel) = entry.path().strip_prefix(root) else {
        return false;
    };
    let rel = rel.to_string_lossy().replace('\\', "/");
    !config
        .exclude
        .iter()
        .any(|ex| rel == ex.trim_matches('/'))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
}

// ============================================================================
// Content Loading
// ============================================================================

/// All content of a site, loaded and validated.
#[derive(Debug, Default)]
pub struct Content {
    /// Published posts, newest first. Includes drafts in preview mode.
    pub posts: Vec<ContentUnit>,
    /// Published pages in source order.
    pub pages: Vec<ContentUnit>,
    /// Every draft, whether published or not.
    pub drafts: Vec<ContentUnit>,
    /// Root `index.md`, shown above the post list on the first index page.
    pub home: Option<ContentUnit>,
}

impl Content {
    /// Posts and pages that get their own output file.
    pub fn published(&self) -> impl Iterator<Item = &ContentUnit> {
        self.posts.iter().chain(&self.pages)
    }
}

/// Parse every content file found by [`scan_source`].
pub fn load_content(config: &SiteConfig, files: &SourceFiles) -> Result<Content> {
    let mut content = Content::default();

    for path in &files.posts {
        if let Some(unit) = load_unit(path, ContentKind::Post, config)? {
            content.posts.push(unit);
        }
    }

    for path in &files.drafts {
        if let Some(unit) = load_unit(path, ContentKind::Draft, config)? {
            content.drafts.push(unit);
        }
    }

    for path in &files.pages {
        let Some(unit) = load_unit(path, ContentKind::Page, config)? else {
            continue;
        };
        if unit.slug == "index" {
            content.home = Some(unit);
        } else {
            content.pages.push(unit);
        }
    }

    if config.show_drafts {
        content.posts.extend(content.drafts.iter().cloned());
    }

    // Newest first; stable, so equal dates keep source order and undated go last.
    content.posts.sort_by(|a, b| b.date.cmp(&a.date));

    check_unique_slugs(&content)?;
    Ok(content)
}

/// Parse a single content file. `Ok(None)` for `published: false`.
fn load_unit(path: &Path, kind: ContentKind, config: &SiteConfig) -> Result<Option<ContentUnit>> {
    let source = path
        .strip_prefix(config.get_root())
        .unwrap_or(path)
        .to_path_buf();
    let fail = |message: String| BuildError::parse(&source, message);

    let text = fs::read_to_string(path).map_err(|err| BuildError::io(path, err))?;
    let (yaml, body) = front_matter::split(&text).map_err(fail)?;
    let fm = front_matter::parse(yaml).map_err(fail)?;

    if !fm.published {
        return Ok(None);
    }

    let title = fm
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| fail("missing required field `title`".into()))?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (name_date, name) = match DATED_NAME.captures(&stem) {
        Some(caps) => (front_matter::parse_date(&caps[1]), caps[2].to_owned()),
        None => (None, stem.clone()),
    };

    let date = match fm.date.as_deref() {
        Some(raw) => Some(
            front_matter::parse_date(raw).ok_or_else(|| fail(format!("invalid date `{raw}`")))?,
        ),
        None => name_date,
    };
    if kind == ContentKind::Post && date.is_none() {
        return Err(fail("missing required field `date`".into()));
    }

    let relative = source.with_extension("").to_string_lossy().replace('\\', "/");
    let slug = match kind {
        ContentKind::Post | ContentKind::Draft => permalink::slugify(&name),
        ContentKind::Page => page_slug(&relative),
    };
    if slug.is_empty() {
        return Err(fail(format!("cannot derive a slug from `{stem}`")));
    }

    let url = match (&fm.permalink, kind) {
        (Some(explicit), _) => permalink::normalize_url(explicit),
        (None, ContentKind::Page) => permalink::page_url(&relative),
        (None, _) => permalink::expand(
            &config.permalink,
            PermalinkFields {
                slug: &slug,
                date,
                categories: &fm.categories,
            },
        ),
    };

    let excerpt = fm.excerpt.or_else(|| extract_excerpt(body));
    let layout = fm
        .layout
        .unwrap_or_else(|| kind.default_layout().to_owned());

    Ok(Some(ContentUnit {
        slug,
        title,
        date,
        tags: fm.tags.into_iter().collect::<BTreeSet<_>>(),
        layout,
        body: body.to_owned(),
        excerpt,
        description: fm.description,
        kind,
        url,
        source,
    }))
}

/// Slug of a page: its slugified source path, `index` for the root index.
fn page_slug(relative: &str) -> String {
    if relative == "index" {
        return "index".to_owned();
    }
    relative
        .split('/')
        .map(permalink::slugify)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn check_unique_slugs(content: &Content) -> Result<()> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for unit in content.published() {
        if let Some(first) = seen.insert(unit.slug.as_str(), unit.source.as_path()) {
            return Err(BuildError::parse(
                &unit.source,
                format!(
                    "duplicate identifier `{}` (already used by `{}`)",
                    unit.slug,
                    first.display()
                ),
            ));
        }
    }
    Ok(())
}
