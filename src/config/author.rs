//! Author metadata and social links.

use serde::{Deserialize, Serialize};

/// `author:` block - shown in the sidebar and used as the feed author.
///
/// # Example
/// ```yaml
/// author:
///   name: Alice
///   email: alice@example.com
///   bio: Writes about compilers.
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,

    /// Avatar image path or URL.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// One entry of `social_links:`. Rendered in configured order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Icon name, used as a CSS class (`icon-github`).
    pub icon: String,
    pub label: String,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_author_full() {
        let config = SiteConfig::from_yaml(
            r#"
title: Test
author:
  name: Alice
  email: alice@example.com
  bio: Writes about compilers.
  avatar: /assets/me.png
"#,
        )
        .unwrap();

        assert_eq!(config.author.name, "Alice");
        assert_eq!(config.author.email.as_deref(), Some("alice@example.com"));
        assert_eq!(config.author.bio.as_deref(), Some("Writes about compilers."));
        assert_eq!(config.author.avatar.as_deref(), Some("/assets/me.png"));
    }

    #[test]
    fn test_author_ignores_jekyll_keys() {
        let config = SiteConfig::from_yaml(
            r#"
title: Test
author:
  name: Alice
  location: Berlin
  twitter: alice
  links:
    - label: Website
      url: https://alice.dev
social_links:
  - { icon: github, label: GitHub, link: "https://github.com/alice", target: _blank }
"#,
        )
        .unwrap();

        assert_eq!(config.author.name, "Alice");
        assert_eq!(config.social_links[0].link, "https://github.com/alice");
    }

    #[test]
    fn test_social_links_keep_order() {
        let config = SiteConfig::from_yaml(
            r#"
title: Test
social_links:
  - icon: github
    label: GitHub
    link: https://github.com/alice
  - icon: rss
    label: Feed
    link: /feed.xml
  - icon: mastodon
    label: Mastodon
    link: https://hachyderm.io/@alice
"#,
        )
        .unwrap();

        let labels: Vec<_> = config.social_links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["GitHub", "Feed", "Mastodon"]);
        assert_eq!(config.social_links[0].icon, "github");
    }

    #[test]
    fn test_social_link_requires_all_fields() {
        let result = SiteConfig::from_yaml(
            r#"
title: Test
social_links:
  - icon: github
    label: GitHub
"#,
        );
        assert!(result.is_err());
    }
}
