//! RSS feed generation.
//!
//! The feed carries the newest dated, non-draft posts with their excerpts.

use crate::{
    config::SiteConfig,
    content::ContentUnit,
    error::{BuildError, Result},
    render::render_markdown,
};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, Item, ItemBuilder, validation::Validate};

/// Maximum number of posts in the feed.
pub const FEED_LIMIT: usize = 10;

/// Render the feed for `posts` (newest first).
///
/// `lastBuildDate` is the newest post date, so rebuilding unchanged content
/// produces the same bytes.
pub fn feed_xml(config: &SiteConfig, posts: &[ContentUnit]) -> Result<String> {
    let posts: Vec<_> = posts
        .iter()
        .filter(|post| !post.is_draft() && post.date.is_some())
        .take(FEED_LIMIT)
        .collect();

    let items: Vec<_> = posts.iter().map(|post| post_to_item(post, config)).collect();
    let last_build = posts
        .first()
        .and_then(|post| post.date)
        .map(|date| date.and_utc().to_rfc2822());

    let channel = ChannelBuilder::default()
        .title(config.title.clone())
        .link(config.absolute_url("/"))
        .description(config.description.clone())
        .language(Some(config.language.clone()))
        .generator(Some(concat!("quill ", env!("CARGO_PKG_VERSION")).to_owned()))
        .last_build_date(last_build)
        .items(items)
        .build();

    channel.validate().map_err(|err| {
        BuildError::invalid_config(&config.config_path, format!("feed validation failed: {err}"))
    })?;
    Ok(channel.to_string())
}

fn post_to_item(post: &ContentUnit, config: &SiteConfig) -> Item {
    let link = config.absolute_url(&post.url);
    let categories = post
        .tags
        .iter()
        .map(|tag| CategoryBuilder::default().name(tag.clone()).build())
        .collect::<Vec<_>>();

    ItemBuilder::default()
        .title(Some(post.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(post.excerpt.as_deref().map(render_markdown))
        .pub_date(post.date.map(|date| date.and_utc().to_rfc2822()))
        .author(feed_author(config))
        .categories(categories)
        .build()
}

/// Author in RSS form: `email (Name)`. RSS requires the email part.
fn feed_author(config: &SiteConfig) -> Option<String> {
    let author = &config.author;
    let email = author.email.as_deref()?;
    if author.name.is_empty() {
        Some(email.to_owned())
    } else {
        Some(format!("{email} ({})", author.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn config() -> SiteConfig {
        SiteConfig::from_yaml(
            "title: Blog\ndescription: Notes\nurl: https://example.com\nauthor:\n  name: Alice\n  email: alice@example.com\n",
        )
        .unwrap()
    }

    fn post(slug: &str, day: u32, kind: ContentKind) -> ContentUnit {
        ContentUnit {
            slug: slug.into(),
            title: format!("Post {slug}"),
            date: NaiveDate::from_ymd_opt(2024, 1, day).and_then(|d| d.and_hms_opt(0, 0, 0)),
            tags: ["rust".to_string()].into_iter().collect(),
            layout: "post".into(),
            body: String::new(),
            excerpt: Some(format!("About *{slug}*")),
            description: None,
            kind,
            url: format!("/{slug}/"),
            source: PathBuf::from(format!("_posts/{slug}.md")),
        }
    }

    #[test]
    fn test_feed_items() {
        let posts = vec![post("b", 2, ContentKind::Post), post("a", 1, ContentKind::Post)];
        let xml = feed_xml(&config(), &posts).unwrap();

        assert!(xml.contains("<title>Blog</title>"));
        assert!(xml.contains("<link>https://example.com/</link>"));
        assert!(xml.contains("<link>https://example.com/b/</link>"));
        assert!(xml.contains("alice@example.com (Alice)"));
        assert!(xml.contains("Tue, 2 Jan 2024 00:00:00 +0000"));
        assert!(xml.contains("<category>rust</category>"));
        assert!(xml.find("Post b").unwrap() < xml.find("Post a").unwrap());
    }

    #[test]
    fn test_feed_skips_drafts_and_limits() {
        let mut posts: Vec<_> = (1..=12).rev().map(|d| post(&format!("p{d}"), d, ContentKind::Post)).collect();
        posts.insert(0, post("draft", 20, ContentKind::Draft));

        let xml = feed_xml(&config(), &posts).unwrap();
        assert!(!xml.contains("Post draft"));
        assert_eq!(xml.matches("<item>").count(), FEED_LIMIT);
        assert!(xml.contains("Post p12"));
        assert!(!xml.contains("<title>Post p1</title>"));
    }

    #[test]
    fn test_feed_is_deterministic() {
        let posts = vec![post("a", 1, ContentKind::Post)];
        assert_eq!(feed_xml(&config(), &posts).unwrap(), feed_xml(&config(), &posts).unwrap());
    }

    #[test]
    fn test_feed_author_requires_email() {
        let mut config = config();
        assert_eq!(feed_author(&config).as_deref(), Some("alice@example.com (Alice)"));
        config.author.email = None;
        assert_eq!(feed_author(&config), None);
    }
}
