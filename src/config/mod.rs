//! Site configuration management for `_config.yml`.
//!
//! The config file is a flat YAML mapping, compatible with the keys a Jekyll
//! blog already carries. Keys quill does not know about are ignored.
//! A `.toml` file with the same keys is accepted too.
//!
//! # Example
//!
//! ```yaml
//! title: My Blog
//! description: A personal blog
//! url: https://example.com
//! author:
//!   name: Alice
//! social_links:
//!   - { icon: github, label: GitHub, link: "https://github.com/alice" }
//! paginate: 10
//! permalink: /:year/:month/:title/
//! plugins: [jekyll-paginate, jekyll-sitemap, jekyll-feed, tags]
//! ```

mod author;
pub mod defaults;
mod plugins;

pub use author::{AuthorConfig, SocialLink};
pub use plugins::Plugin;

use crate::cli::{Cli, Commands};
use crate::error::{BuildError, Result};
use crate::log;
use crate::render::Layout;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Config file names tried, in order, when `--config` is left at its default.
const CONFIG_CANDIDATES: &[&str] = &["_config.yml", "_config.yaml", "_config.toml"];

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing `_config.yml`.
///
/// Loaded once per build and passed by reference through the pipeline.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Absolute site source directory (set after loading)
    #[serde(skip)]
    #[educe(Default = PathBuf::from("./"))]
    pub root: PathBuf,

    /// Site title displayed in headers and the browser tab.
    pub title: String,

    /// Site description for meta tags and the feed.
    #[serde(default)]
    pub description: String,

    /// Scheme and host, e.g. `https://example.com`.
    /// Required by the sitemap and feed plugins.
    #[serde(default)]
    pub url: Option<String>,

    /// Subpath the site is served from, e.g. `/blog`.
    #[serde(default)]
    pub baseurl: String,

    /// BCP 47 language code.
    #[serde(default = "defaults::language")]
    #[educe(Default = defaults::language())]
    pub language: String,

    #[serde(default)]
    pub author: AuthorConfig,

    #[serde(default)]
    pub social_links: Vec<SocialLink>,

    /// Posts per index page. Required when the paginate plugin is enabled.
    #[serde(default)]
    pub paginate: Option<i64>,

    /// URL of index pages after the first; `:num` is the page number.
    #[serde(default = "defaults::paginate_path")]
    #[educe(Default = defaults::paginate_path())]
    pub paginate_path: String,

    /// Permalink pattern for posts.
    #[serde(default = "defaults::permalink")]
    #[educe(Default = defaults::permalink())]
    pub permalink: String,

    /// URL of tag listing pages; `:tag` is the tag slug.
    #[serde(default = "defaults::tag_path")]
    #[educe(Default = defaults::tag_path())]
    pub tag_path: String,

    /// Enabled generator plugins.
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Layout names content may reference.
    #[serde(default = "defaults::layouts")]
    #[educe(Default = defaults::layouts())]
    pub layouts: Vec<String>,

    /// Source entries never copied to the output.
    #[serde(default = "defaults::exclude")]
    #[educe(Default = defaults::exclude())]
    pub exclude: Vec<String>,

    /// Output directory, relative to the source directory.
    #[serde(default = "defaults::destination")]
    #[educe(Default = defaults::destination())]
    pub destination: PathBuf,

    /// Publish drafts as posts (preview mode).
    #[serde(default)]
    pub show_drafts: bool,

    /// Minify generated HTML and XML.
    #[serde(default)]
    pub minify: bool,

    /// Feed output path, relative to the destination.
    #[serde(default = "defaults::feed::path")]
    #[educe(Default = defaults::feed::path())]
    pub feed_path: PathBuf,

    /// Sitemap output path, relative to the destination.
    #[serde(default = "defaults::sitemap::path")]
    #[educe(Default = defaults::sitemap::path())]
    pub sitemap_path: PathBuf,
}

impl SiteConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml_ng::from_str(content)
            .map_err(|err| BuildError::invalid_config("<config>", err.to_string()))
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| BuildError::invalid_config("<config>", err.to_string()))
    }

    /// Load configuration from file path; format is picked by extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| BuildError::io(path, err))?;
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");

        let parsed = if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_yaml(&content)
        };

        let mut config = parsed.map_err(|err| match err {
            BuildError::InvalidConfiguration { message, .. } => {
                BuildError::invalid_config(path, message)
            }
            other => other,
        })?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Locate, load, merge CLI overrides and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.source.as_deref().unwrap_or(Path::new("./"));
        let config_path = Self::locate(root, &cli.config)?;

        let mut config = Self::from_path(&config_path)?;
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn locate(root: &Path, requested: &Path) -> Result<PathBuf> {
        let path = root.join(requested);
        if path.exists() {
            return Ok(path);
        }

        if requested == Path::new(CONFIG_CANDIDATES[0]) {
            let found = CONFIG_CANDIDATES
                .iter()
                .map(|name| root.join(name))
                .find(|p| p.exists());
            if let Some(found) = found {
                return Ok(found);
            }
        }

        Err(BuildError::invalid_config(path, "config file not found"))
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory and resolve the destination against it.
    ///
    /// `.` and `..` in the destination are applied lexically, so
    /// `--destination ..` resolves to the root's parent.
    pub fn set_root(&mut self, root: &Path) {
        self.root = Self::normalize_path(root);
        let destination = if self.destination.is_relative() {
            self.root.join(&self.destination)
        } else {
            self.destination.clone()
        };
        self.destination = Self::resolve_lexically(&destination);
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.destination, cli.destination.as_ref());

        let root = cli.source.clone().unwrap_or_else(|| PathBuf::from("./"));
        self.set_root(&root);
        self.config_path = Self::normalize_path(&self.config_path);

        match &cli.command {
            Commands::Build { build_args } => {
                self.show_drafts |= build_args.drafts;
                Self::update_option(&mut self.minify, build_args.minify.as_ref());
                if let Some(base_url) = &build_args.base_url {
                    self.url = Some(base_url.clone());
                }
            }
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Drop `.` components and apply `..` without touching the filesystem.
    fn resolve_lexically(path: &Path) -> PathBuf {
        let mut resolved = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !resolved.pop() {
                        resolved.push(component);
                    }
                }
                other => resolved.push(other),
            }
        }
        resolved
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Whether a generator plugin is listed in `plugins:`.
    pub fn has_plugin(&self, plugin: Plugin) -> bool {
        self.plugins
            .iter()
            .any(|name| Plugin::from_name(name) == Some(plugin))
    }

    /// Whether content may reference the layout `name` (or one of its aliases).
    pub fn layout_enabled(&self, name: &str) -> bool {
        let Some(layout) = Layout::from_name(name) else {
            return false;
        };
        self.layouts
            .iter()
            .any(|enabled| Layout::from_name(enabled) == Some(layout))
    }

    /// Validated page size for the post index.
    ///
    /// `None` when the paginate plugin is off: the index is a single page.
    pub fn page_size(&self) -> Option<i64> {
        if self.has_plugin(Plugin::Paginate) {
            self.paginate
        } else {
            None
        }
    }

    /// `baseurl` without trailing slash, with a leading one when non-empty.
    pub fn base_path(&self) -> String {
        let trimmed = self.baseurl.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Site-relative URL including `baseurl`.
    pub fn relative_url(&self, path: &str) -> String {
        format!("{}{}", self.base_path(), path)
    }

    /// Absolute URL including scheme and host, when `url` is set.
    pub fn absolute_url(&self, path: &str) -> String {
        let host = self.url.as_deref().unwrap_or_default().trim_end_matches('/');
        format!("{host}{}", self.relative_url(path))
    }

    /// Absolute output path for a file under the destination.
    pub fn output_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.destination.join(relative)
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Validate configuration before the build starts.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(BuildError::invalid_config(&self.config_path, message));

        if self.title.trim().is_empty() {
            return invalid("missing required key `title`".into());
        }

        if let Some(size) = self.paginate
            && size <= 0
        {
            return invalid(format!("`paginate` must be at least 1, got {size}"));
        }

        if self.has_plugin(Plugin::Paginate) && self.paginate.is_none() {
            return invalid("`paginate` is required when the paginate plugin is enabled".into());
        }

        if !self.paginate_path.contains(":num") {
            return invalid("`paginate_path` must contain `:num`".into());
        }

        if !self.tag_path.contains(":tag") {
            return invalid("`tag_path` must contain `:tag`".into());
        }

        if !self.permalink.starts_with('/') {
            return invalid("`permalink` must start with `/`".into());
        }

        if let Some(url) = &self.url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return invalid("`url` must start with http:// or https://".into());
        }

        for plugin in [Plugin::Sitemap, Plugin::Feed] {
            if self.has_plugin(plugin) && self.url.is_none() {
                return invalid(format!(
                    "`url` is required when the {} plugin is enabled",
                    plugin.name()
                ));
            }
        }

        if let Some(unknown) = self.layouts.iter().find(|name| Layout::from_name(name).is_none()) {
            return invalid(format!("unknown layout `{unknown}` in `layouts`"));
        }

        for name in &self.plugins {
            if Plugin::from_name(name).is_none() {
                let known: Vec<_> = Plugin::ALL.iter().map(|p| p.name()).collect();
                log!("warn"; "ignoring unknown plugin `{}` (known: {})", name, known.join(", "));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(yaml: &str) -> SiteConfig {
        SiteConfig::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_from_yaml_minimal() {
        let config = parse("title: My Blog\n");

        assert_eq!(config.title, "My Blog");
        assert_eq!(config.description, "");
        assert_eq!(config.language, "en");
        assert_eq!(config.permalink, "/:title/");
        assert_eq!(config.paginate_path, "/page:num/");
        assert_eq!(config.destination, PathBuf::from("_site"));
        assert_eq!(config.layouts, ["post", "page", "tag", "home"]);
        assert!(config.plugins.is_empty());
        assert!(config.paginate.is_none());
        assert!(!config.show_drafts);
    }

    #[test]
    fn test_from_yaml_full() {
        let config = parse(
            r#"
title: My Blog
description: Notes on systems
url: https://example.com
baseurl: /blog
author:
  name: Alice
social_links:
  - { icon: github, label: GitHub, link: "https://github.com/alice" }
paginate: 5
paginate_path: /posts/page:num/
permalink: /:year/:month/:title/
plugins:
  - jekyll-paginate
  - jekyll-sitemap
theme: minima
"#,
        );

        assert_eq!(config.url.as_deref(), Some("https://example.com"));
        assert_eq!(config.baseurl, "/blog");
        assert_eq!(config.paginate, Some(5));
        assert_eq!(config.social_links.len(), 1);
        assert!(config.has_plugin(Plugin::Paginate));
        assert!(config.has_plugin(Plugin::Sitemap));
        assert!(!config.has_plugin(Plugin::Feed));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_title_is_invalid_configuration() {
        let result = SiteConfig::from_yaml("description: no title\n");
        assert!(matches!(result, Err(BuildError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_empty_title_fails_validation() {
        let config = parse("title: \"  \"\n");
        assert!(matches!(
            config.validate(),
            Err(BuildError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_toml() {
        let config = SiteConfig::from_toml(
            r#"
            title = "Toml Blog"
            paginate = 3
            plugins = ["paginate"]

            [author]
            name = "Bob"
        "#,
        )
        .unwrap();

        assert_eq!(config.title, "Toml Blog");
        assert_eq!(config.author.name, "Bob");
        assert_eq!(config.page_size(), Some(3));
    }

    #[test]
    fn test_validate_paginate_zero() {
        let config = parse("title: T\npaginate: 0\nplugins: [paginate]\n");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, BuildError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_validate_paginate_negative() {
        let config = parse("title: T\npaginate: -2\n");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_paginate_plugin_requires_size() {
        let config = parse("title: T\nplugins: [jekyll-paginate]\n");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("`paginate` is required"));
    }

    #[test]
    fn test_page_size_ignored_without_plugin() {
        let config = parse("title: T\npaginate: 4\n");
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size(), None);
    }

    #[test]
    fn test_validate_feed_requires_url() {
        let config = parse("title: T\nplugins: [feed]\n");
        assert!(config.validate().is_err());

        let config = parse("title: T\nurl: https://x.dev\nplugins: [feed]\n");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_url_scheme() {
        let config = parse("title: T\nurl: example.com\n");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_layout() {
        let config = parse("title: T\nlayouts: [post, gallery]\n");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gallery"));
    }

    #[test]
    fn test_validate_unknown_plugin_is_not_fatal() {
        let config = parse("title: T\nplugins: [jekyll-seo-tag]\n");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_paths() {
        assert!(parse("title: T\npaginate_path: /page/\n").validate().is_err());
        assert!(parse("title: T\ntag_path: /tags/\n").validate().is_err());
        assert!(parse("title: T\npermalink: :title/\n").validate().is_err());
    }

    #[test]
    fn test_urls() {
        let mut config = parse("title: T\nurl: https://example.com/\nbaseurl: blog/\n");
        assert_eq!(config.base_path(), "/blog");
        assert_eq!(config.relative_url("/about/"), "/blog/about/");
        assert_eq!(config.absolute_url("/about/"), "https://example.com/blog/about/");

        config.baseurl = String::new();
        assert_eq!(config.relative_url("/"), "/");
        assert_eq!(config.absolute_url("/"), "https://example.com/");
    }

    #[test]
    fn test_set_root_resolves_destination() {
        let dir = TempDir::new().unwrap();
        let mut config = parse("title: T\n");
        config.set_root(dir.path());

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.destination, root.join("_site"));
        assert_eq!(config.output_path("index.html"), root.join("_site/index.html"));
    }

    #[test]
    fn test_set_root_resolves_parent_destination() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("site")).unwrap();
        let root = dir.path().join("site").canonicalize().unwrap();

        let mut config = parse("title: T\ndestination: ..\n");
        config.set_root(&root);
        assert_eq!(config.destination, dir.path().canonicalize().unwrap());

        let mut config = parse("title: T\ndestination: ./out/../public/.\n");
        config.set_root(&root);
        assert_eq!(config.destination, root.join("public"));
    }

    #[test]
    fn test_from_path_reports_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: [unclosed\n").unwrap();

        let err = SiteConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, BuildError::InvalidConfiguration { .. }));
        assert_eq!(err.path(), path);
    }

    #[test]
    fn test_locate_falls_back_to_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.toml"), "title = \"T\"\n").unwrap();

        let found = SiteConfig::locate(dir.path(), Path::new("_config.yml")).unwrap();
        assert_eq!(found, dir.path().join("_config.toml"));

        let config = SiteConfig::from_path(&found).unwrap();
        assert_eq!(config.title, "T");
    }

    #[test]
    fn test_locate_missing() {
        let dir = TempDir::new().unwrap();
        let err = SiteConfig::locate(dir.path(), Path::new("_config.yml")).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
