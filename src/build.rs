//! Site assembly.
//!
//! # Pipeline
//!
//! ```text
//! build_site()
//!     │
//!     ├── scan_source() + load_content()     ──► posts, pages, drafts, assets
//!     │
//!     ├── TagIndex::build() + Paginator      ──► tag listings, index pages
//!     │
//!     ├── plan_outputs() ──► one Output per generated file
//!     │       └── check_collisions()         ──► ParseError on a shared path
//!     │
//!     ├── render (rayon)                     ──► all HTML/XML in memory
//!     │
//!     └── clear destination, write + copy assets (rayon)
//! ```
//!
//! Everything is rendered before the destination is touched, so a failing
//! build leaves the previous output in place.

use crate::{
    config::{Plugin, SiteConfig},
    content::{Content, ContentUnit, SourceFiles, load_content, scan_source},
    error::{BuildError, Result},
    generator::{UrlEntry, feed_xml, sitemap_xml},
    log,
    minify::{MinifyType, minify},
    paginate::{Page, Paginator, page_output_file},
    permalink,
    render::Renderer,
    taxonomy::TagIndex,
};
use rayon::prelude::*;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Counts of what a build produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub pages: usize,
    pub drafts: usize,
    pub tags: usize,
    pub index_pages: usize,
    pub assets: usize,
}

/// One file written under the destination.
struct Output<'a> {
    /// Path relative to the destination.
    file: PathBuf,
    /// File the output is attributed to in errors.
    source: &'a Path,
    job: Job<'a>,
}

enum Job<'a> {
    Unit {
        unit: &'a ContentUnit,
        newer: Option<&'a ContentUnit>,
        older: Option<&'a ContentUnit>,
    },
    Index(&'a Page<'a, &'a ContentUnit>),
    Tag {
        tag: &'a str,
        units: &'a [&'a ContentUnit],
    },
    Feed,
    Sitemap,
    Asset(&'a Path),
}

impl Job<'_> {
    fn describe(&self) -> String {
        match self {
            Self::Unit { unit, .. } => format!("`{}`", unit.source.display()),
            Self::Index(page) => format!("index page {}", page.number),
            Self::Tag { tag, .. } => format!("tag `{tag}`"),
            Self::Feed => "the feed".to_owned(),
            Self::Sitemap => "the sitemap".to_owned(),
            Self::Asset(path) => format!("asset `{}`", path.display()),
        }
    }
}

/// Build the whole site into `config.destination`.
///
/// The first error aborts the build.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    check_destination(config)?;

    let files = scan_source(config)?;
    let content = load_content(config, &files)?;
    log!(
        "load";
        "{} posts, {} pages, {} drafts{}",
        content.posts.len(),
        content.pages.len(),
        content.drafts.len(),
        if config.show_drafts { " (previewing drafts)" } else { "" }
    );
    if content.posts.is_empty() && content.pages.is_empty() {
        log!("warn"; "no posts or pages found in {}", config.get_root().display());
    }

    let posts: Vec<&ContentUnit> = content.posts.iter().collect();
    let tags = if config.has_plugin(Plugin::Tags) {
        TagIndex::build(posts.iter().copied())
    } else {
        TagIndex::default()
    };
    if !tags.is_empty() {
        let top: Vec<_> = tags
            .counts()
            .into_iter()
            .take(5)
            .map(|(tag, n)| format!("{tag} ({n})"))
            .collect();
        log!("tags"; "{} tags, most used: {}", tags.len(), top.join(", "));
    }
    let index_pages = paginate_index(config, &posts)?;

    let outputs = plan_outputs(config, &content, &files, &index_pages, &tags);
    check_collisions(&outputs)?;

    let renderer = Renderer::new(config, &content.pages);
    log!("render"; "{} files", outputs.len() - files.assets.len());
    let rendered = outputs
        .par_iter()
        .map(|output| render(output, &renderer, &content))
        .collect::<Result<Vec<_>>>()?;

    prepare_destination(config)?;

    outputs
        .par_iter()
        .zip(&rendered)
        .try_for_each(|(output, bytes)| match (bytes, &output.job) {
            (Some(bytes), _) => write_output(config, &output.file, bytes),
            (None, Job::Asset(path)) => copy_asset(config, path, &output.file),
            (None, _) => Ok(()),
        })?;

    let report = BuildReport {
        posts: content.posts.len(),
        pages: content.pages.len(),
        drafts: content.drafts.len(),
        tags: tags.len(),
        index_pages: index_pages.len(),
        assets: files.assets.len(),
    };
    log!(
        "done";
        "{} posts, {} pages, {} tags, {} index pages, {} assets → {}",
        report.posts,
        report.pages,
        report.tags,
        report.index_pages,
        report.assets,
        config.destination.display()
    );
    Ok(report)
}

/// Refuse destinations that would wipe the source tree.
fn check_destination(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let destination = config
        .destination
        .canonicalize()
        .unwrap_or_else(|_| config.destination.clone());
    if root.starts_with(&destination) || root.starts_with(&config.destination) {
        return Err(BuildError::invalid_config(
            &config.config_path,
            format!(
                "destination `{}` contains the source directory",
                config.destination.display()
            ),
        ));
    }
    Ok(())
}

/// Index pages of the post list. There is always at least one page,
/// so an empty blog still gets a home page.
fn paginate_index<'a>(
    config: &SiteConfig,
    posts: &'a [&'a ContentUnit],
) -> Result<Vec<Page<'a, &'a ContentUnit>>> {
    let paginator = match config.page_size() {
        Some(size) => Paginator::new(size, &config.paginate_path, &config.config_path)?,
        None => Paginator::unbounded(&config.paginate_path),
    };

    let mut pages = paginator.paginate(posts);
    if pages.is_empty() {
        pages.push(Page {
            number: 1,
            total_pages: 1,
            total_items: 0,
            items: &[],
            url: paginator.url(1),
            previous: None,
            next: None,
        });
    }
    Ok(pages)
}

/// Every file the build will produce, in a fixed order.
fn plan_outputs<'a>(
    config: &'a SiteConfig,
    content: &'a Content,
    files: &'a SourceFiles,
    index_pages: &'a [Page<'a, &'a ContentUnit>],
    tags: &'a TagIndex<'a>,
) -> Vec<Output<'a>> {
    let mut outputs = Vec::new();
    let config_path = config.config_path.as_path();

    for (i, unit) in content.posts.iter().enumerate() {
        outputs.push(Output {
            file: permalink::output_file(&unit.url),
            source: &unit.source,
            job: Job::Unit {
                unit,
                newer: i.checked_sub(1).and_then(|j| content.posts.get(j)),
                older: content.posts.get(i + 1),
            },
        });
    }

    for unit in &content.pages {
        outputs.push(Output {
            file: permalink::output_file(&unit.url),
            source: &unit.source,
            job: Job::Unit {
                unit,
                newer: None,
                older: None,
            },
        });
    }

    let home_source = content
        .home
        .as_ref()
        .map_or(config_path, |home| home.source.as_path());
    for page in index_pages {
        outputs.push(Output {
            file: page_output_file(page),
            source: home_source,
            job: Job::Index(page),
        });
    }

    for (tag, units) in tags.iter() {
        outputs.push(Output {
            file: permalink::output_file(&permalink::tag_url(&config.tag_path, tag)),
            source: config_path,
            job: Job::Tag { tag, units },
        });
    }

    if config.has_plugin(Plugin::Feed) {
        outputs.push(Output {
            file: config.feed_path.clone(),
            source: config_path,
            job: Job::Feed,
        });
    }
    if config.has_plugin(Plugin::Sitemap) {
        outputs.push(Output {
            file: config.sitemap_path.clone(),
            source: config_path,
            job: Job::Sitemap,
        });
    }

    let root = config.get_root();
    for path in &files.assets {
        let relative = path.strip_prefix(root).unwrap_or(path);
        outputs.push(Output {
            file: relative.to_path_buf(),
            source: relative,
            job: Job::Asset(path),
        });
    }

    outputs
}

/// Two outputs writing the same file is a parse error naming both.
fn check_collisions(outputs: &[Output<'_>]) -> Result<()> {
    let mut seen: HashMap<&Path, &Output<'_>> = HashMap::with_capacity(outputs.len());
    for output in outputs {
        if let Some(first) = seen.insert(output.file.as_path(), output) {
            return Err(BuildError::parse(
                output.source,
                format!(
                    "output `{}` of {} is also produced by {}",
                    output.file.display(),
                    output.job.describe(),
                    first.job.describe()
                ),
            ));
        }
    }
    Ok(())
}

/// Render a generated file. Assets yield `None` and are copied instead.
fn render(output: &Output<'_>, renderer: &Renderer<'_>, content: &Content) -> Result<Option<Vec<u8>>> {
    let config = renderer.config();
    let html = |text: String| minify(MinifyType::Html(text.as_bytes()), config).into_owned();
    let xml = |text: String| minify(MinifyType::Xml(text.as_bytes()), config).into_owned();

    let bytes = match &output.job {
        Job::Unit { unit, newer, older } => html(renderer.render_unit(unit, (*newer, *older))?),
        Job::Index(page) => html(renderer.render_index(page, content.home.as_ref())?),
        Job::Tag { tag, units } => html(renderer.render_tag(tag, units)?),
        Job::Feed => xml(feed_xml(config, &content.posts)?),
        Job::Sitemap => xml(sitemap_xml(config, &sitemap_entries(content))),
        Job::Asset(_) => return Ok(None),
    };
    Ok(Some(bytes))
}

/// Index, posts and pages. Drafts and tag listings stay out of the sitemap.
fn sitemap_entries(content: &Content) -> Vec<UrlEntry> {
    let newest = content
        .posts
        .iter()
        .find(|post| !post.is_draft())
        .and_then(ContentUnit::date_ymd);

    std::iter::once(UrlEntry {
        url: "/".to_owned(),
        lastmod: newest,
    })
    .chain(
        content
            .published()
            .filter(|unit| !unit.is_draft())
            .map(|unit| UrlEntry {
                url: unit.url.clone(),
                lastmod: unit.date_ymd(),
            }),
    )
    .collect()
}

/// Empty the destination, keeping the directory itself.
fn prepare_destination(config: &SiteConfig) -> Result<()> {
    let dest = &config.destination;
    if dest.exists() {
        fs::remove_dir_all(dest).map_err(|err| BuildError::io(dest, err))?;
    }
    fs::create_dir_all(dest).map_err(|err| BuildError::io(dest, err))
}

fn write_output(config: &SiteConfig, file: &Path, bytes: &[u8]) -> Result<()> {
    let path = config.output_path(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| BuildError::io(parent, err))?;
    }
    fs::write(&path, bytes).map_err(|err| BuildError::io(&path, err))
}

fn copy_asset(config: &SiteConfig, source: &Path, file: &Path) -> Result<()> {
    let path = config.output_path(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| BuildError::io(parent, err))?;
    }
    fs::copy(source, &path).map_err(|err| BuildError::io(source, err))?;
    Ok(())
}
