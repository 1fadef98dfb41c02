//! Template rendering.
//!
//! Layout names resolve over a closed set of [`Layout`] kinds; each kind is a
//! pure function in [`layouts`] from its context and the [`SiteConfig`] to
//! HTML.
//!
//! ```text
//! ContentUnit ──► Renderer::render_unit ──┬── Layout::Post     → layouts::post
//!                                         ├── Layout::Page     → layouts::page
//! TagIndex    ──► Renderer::render_tag  ──┼── Layout::Tag      → layouts::tag_listing
//! Page<_>     ──► Renderer::render_index ─┴── Layout::Home     → layouts::home
//! ```

pub mod layouts;
pub mod markdown;

pub use markdown::{plain_text, render_markdown};

use crate::{
    config::{Plugin, SiteConfig},
    content::ContentUnit,
    error::{BuildError, Result},
    paginate::Page,
    permalink,
};
use layouts::{PageHead, Pager};
use std::path::Path;

// ============================================================================
// Layouts
// ============================================================================

/// The closed set of layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Post,
    Page,
    /// Listing of the posts carrying one tag.
    Tag,
    /// A page of the post index.
    Home,
}

impl Layout {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Page => "page",
            Self::Tag => "tag",
            Self::Home => "home",
        }
    }

    /// Resolve a layout name. `default` is accepted for Jekyll themes'
    /// catch-all layout and renders as a page.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "post" => Some(Self::Post),
            "page" | "default" => Some(Self::Page),
            "tag" | "tag-listing" | "tag_page" => Some(Self::Tag),
            "home" | "index" => Some(Self::Home),
            _ => None,
        }
    }

    /// Resolve `name` against the layouts enabled in `config`.
    ///
    /// `source` is the file that referenced the layout, reported on error.
    pub fn resolve(name: &str, config: &SiteConfig, source: &Path) -> Result<Self> {
        Self::from_name(name)
            .filter(|_| config.layout_enabled(name))
            .ok_or_else(|| BuildError::layout_not_found(source, name))
    }
}

// ============================================================================
// Render Context
// ============================================================================

/// Read-only data shared by every layout.
pub struct SiteContext<'a> {
    pub config: &'a SiteConfig,
    /// Header navigation, in source order.
    pub nav: Vec<NavLink>,
}

/// One header navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub title: String,
    /// URL including `baseurl`.
    pub url: String,
}

/// What listings and post headers show about a unit.
#[derive(Debug, Clone)]
pub struct Summary {
    pub title: String,
    /// URL including `baseurl`.
    pub url: String,
    pub date_ymd: Option<String>,
    pub date_display: Option<String>,
    pub excerpt_html: Option<String>,
    /// `(tag, url)` pairs; no URL when tag listings are off.
    pub tags: Vec<(String, Option<String>)>,
    pub is_draft: bool,
}

impl Summary {
    pub fn new(unit: &ContentUnit, config: &SiteConfig) -> Self {
        let listings = config.has_plugin(Plugin::Tags);
        Self {
            title: unit.title.clone(),
            url: config.relative_url(&unit.url),
            date_ymd: unit.date_ymd(),
            date_display: unit.date_display(),
            excerpt_html: unit.excerpt.as_deref().map(render_markdown),
            tags: unit
                .tags
                .iter()
                .map(|tag| {
                    let url = listings
                        .then(|| config.relative_url(&permalink::tag_url(&config.tag_path, tag)));
                    (tag.clone(), url)
                })
                .collect(),
            is_draft: unit.is_draft(),
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Renders content units and generated listings to HTML.
pub struct Renderer<'a> {
    site: SiteContext<'a>,
}

impl<'a> Renderer<'a> {
    /// `pages` become the header navigation, in the given order.
    pub fn new(config: &'a SiteConfig, pages: &[ContentUnit]) -> Self {
        let nav = pages
            .iter()
            .map(|page| NavLink {
                title: page.title.clone(),
                url: config.relative_url(&page.url),
            })
            .collect();

        Self {
            site: SiteContext { config, nav },
        }
    }

    pub fn config(&self) -> &'a SiteConfig {
        self.site.config
    }

    /// Render a post or page through its layout.
    ///
    /// `neighbours` are the (newer, older) posts linked under a post.
    pub fn render_unit(
        &self,
        unit: &ContentUnit,
        neighbours: (Option<&ContentUnit>, Option<&ContentUnit>),
    ) -> Result<String> {
        let config = self.site.config;
        let layout = Layout::resolve(&unit.layout, config, &unit.source)?;
        let body = render_markdown(&unit.body);

        let description = unit
            .description
            .as_deref()
            .or(unit.excerpt.as_deref())
            .map(plain_text)
            .unwrap_or_else(|| config.description.clone());
        let head = PageHead {
            title: Some(&unit.title),
            description: &description,
            url: &unit.url,
        };

        let markup = match layout {
            Layout::Post => {
                let (newer, older) = neighbours;
                let pager = Pager {
                    previous: older.map(|u| (u.title.as_str(), config.relative_url(&u.url))),
                    next: newer.map(|u| (u.title.as_str(), config.relative_url(&u.url))),
                };
                layouts::post(&self.site, &head, &Summary::new(unit, config), &body, &pager)
            }
            Layout::Page => layouts::page(&self.site, &head, &unit.title, &body),
            Layout::Tag => layouts::tag_listing(&self.site, &head, &unit.title, Some(&body), &[]),
            Layout::Home => layouts::home(&self.site, &head, Some(&body), &[], &Pager::default()),
        };

        Ok(markup.into_string())
    }

    /// Render one page of the post index.
    ///
    /// `intro` is the root `index.md`, shown on the first page only.
    pub fn render_index(
        &self,
        page: &Page<'_, &ContentUnit>,
        intro: Option<&ContentUnit>,
    ) -> Result<String> {
        let config = self.site.config;
        let source = intro.map_or(config.config_path.as_path(), |unit| unit.source.as_path());
        if let Some(unit) = intro {
            Layout::resolve(&unit.layout, config, source)?;
        }
        Layout::resolve(Layout::Home.name(), config, source)?;

        let intro_html = intro
            .filter(|_| page.number == 1)
            .map(|unit| render_markdown(&unit.body));
        let items: Vec<_> = page.items.iter().map(|unit| Summary::new(unit, config)).collect();

        let title = (page.number > 1).then(|| format!("Page {} of {}", page.number, page.total_pages));
        let head = PageHead {
            title: title.as_deref(),
            description: &config.description,
            url: &page.url,
        };
        let pager = Pager {
            previous: page
                .previous
                .as_ref()
                .map(|link| ("Newer posts", config.relative_url(&link.url))),
            next: page
                .next
                .as_ref()
                .map(|link| ("Older posts", config.relative_url(&link.url))),
        };

        let markup = layouts::home(&self.site, &head, intro_html.as_deref(), &items, &pager);
        Ok(markup.into_string())
    }

    /// Render the listing page of `tag`.
    pub fn render_tag(&self, tag: &str, units: &[&ContentUnit]) -> Result<String> {
        let config = self.site.config;
        Layout::resolve(Layout::Tag.name(), config, &config.config_path)?;

        let url = permalink::tag_url(&config.tag_path, tag);
        let title = format!("#{tag}");
        let description = format!("Posts tagged {tag}");
        let head = PageHead {
            title: Some(&title),
            description: &description,
            url: &url,
        };
        let items: Vec<_> = units.iter().map(|unit| Summary::new(unit, config)).collect();

        Ok(layouts::tag_listing(&self.site, &head, tag, None, &items).into_string())
    }
}
