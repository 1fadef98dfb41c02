//! Generator plugins toggled by the `plugins:` list.

/// Built-in generators.
///
/// Names are matched with or without the `jekyll-` prefix so existing
/// Jekyll configs keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plugin {
    /// Split the post index into `paginate`-sized pages.
    Paginate,
    /// Write `sitemap.xml`.
    Sitemap,
    /// Write the RSS feed.
    Feed,
    /// Write one listing page per tag.
    Tags,
}

impl Plugin {
    pub const ALL: [Self; 4] = [Self::Paginate, Self::Sitemap, Self::Feed, Self::Tags];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Paginate => "paginate",
            Self::Sitemap => "sitemap",
            Self::Feed => "feed",
            Self::Tags => "tags",
        }
    }

    /// Resolve a configured plugin name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("jekyll-").unwrap_or(name);
        match name {
            "paginate" | "paginate-v2" => Some(Self::Paginate),
            "sitemap" => Some(Self::Sitemap),
            "feed" | "rss" => Some(Self::Feed),
            "tags" | "tagging" | "archives" => Some(Self::Tags),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_from_name() {
        assert_eq!(Plugin::from_name("paginate"), Some(Plugin::Paginate));
        assert_eq!(Plugin::from_name("jekyll-paginate"), Some(Plugin::Paginate));
        assert_eq!(Plugin::from_name("jekyll-sitemap"), Some(Plugin::Sitemap));
        assert_eq!(Plugin::from_name("jekyll-feed"), Some(Plugin::Feed));
        assert_eq!(Plugin::from_name("jekyll-tagging"), Some(Plugin::Tags));
        assert_eq!(Plugin::from_name(" tags "), Some(Plugin::Tags));
    }

    #[test]
    fn test_plugin_unknown() {
        assert_eq!(Plugin::from_name("jekyll-seo-tag"), None);
        assert_eq!(Plugin::from_name(""), None);
    }

    #[test]
    fn test_plugin_names_round_trip() {
        for plugin in Plugin::ALL {
            assert_eq!(Plugin::from_name(plugin.name()), Some(plugin));
        }
    }
}
