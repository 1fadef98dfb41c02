//! Maud HTML layouts.
//!
//! Each layout is a pure function of its context and the site config:
//! no clock, no environment, no global state.

use super::{NavLink, SiteContext, Summary};
use crate::config::Plugin;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Generator string baked into `<meta name="generator">`.
const GENERATOR: &str = concat!("quill ", env!("CARGO_PKG_VERSION"));

/// Head metadata of one output page.
pub struct PageHead<'a> {
    /// Page title; `None` for the site root.
    pub title: Option<&'a str>,
    pub description: &'a str,
    /// Site-relative URL of the page.
    pub url: &'a str,
}

/// Neighbour links shown under a post or at the bottom of an index page.
#[derive(Default)]
pub struct Pager<'a> {
    pub previous: Option<(&'a str, String)>,
    pub next: Option<(&'a str, String)>,
}

// ============================================================================
// Layouts
// ============================================================================

/// `post`: article with date, tags and links to neighbouring posts.
pub fn post(site: &SiteContext, head: &PageHead, summary: &Summary, body: &str, pager: &Pager) -> Markup {
    shell(
        site,
        head,
        html! {
            article class="post" {
                header {
                    h1 class="post-title" { (summary.title) }
                    (post_meta(summary))
                }
                div class="post-content" { (PreEscaped(body)) }
            }
            (pager_nav(pager))
        },
    )
}

/// `page`: standalone page, title and body only.
pub fn page(site: &SiteContext, head: &PageHead, title: &str, body: &str) -> Markup {
    shell(
        site,
        head,
        html! {
            article class="page" {
                h1 class="page-title" { (title) }
                div class="page-content" { (PreEscaped(body)) }
            }
        },
    )
}

/// `tag`: listing of every post carrying a tag.
pub fn tag_listing(
    site: &SiteContext,
    head: &PageHead,
    tag: &str,
    intro: Option<&str>,
    items: &[Summary],
) -> Markup {
    shell(
        site,
        head,
        html! {
            section class="tag-listing" {
                h1 { "Tagged " span class="tag-name" { "#" (tag) } }
                @if let Some(intro) = intro {
                    div class="intro" { (PreEscaped(intro)) }
                }
                p class="count" {
                    (items.len()) @if items.len() == 1 { " post" } @else { " posts" }
                }
                ul class="post-list" {
                    @for item in items {
                        li {
                            @if let (Some(ymd), Some(shown)) = (&item.date_ymd, &item.date_display) {
                                time datetime=(ymd) { (shown) }
                                " "
                            }
                            a href=(item.url) { (item.title) }
                        }
                    }
                }
            }
        },
    )
}

/// `home`: one page of the post index with excerpts.
pub fn home(
    site: &SiteContext,
    head: &PageHead,
    intro: Option<&str>,
    items: &[Summary],
    pager: &Pager,
) -> Markup {
    shell(
        site,
        head,
        html! {
            @if let Some(intro) = intro {
                section class="intro" { (PreEscaped(intro)) }
            }
            section class="post-index" {
                @if items.is_empty() && intro.is_none() {
                    p class="empty" { "Nothing published yet." }
                }
                @for item in items {
                    article class="post-summary" {
                        h2 { a href=(item.url) { (item.title) } }
                        (post_meta(item))
                        @if let Some(excerpt) = &item.excerpt_html {
                            div class="excerpt" { (PreEscaped(excerpt)) }
                        }
                        a class="read-more" href=(item.url) { "Read more" }
                    }
                }
            }
            (pager_nav(pager))
        },
    )
}

// ============================================================================
// Shared fragments
// ============================================================================

/// Document shell: head, site header with navigation, author block, footer.
fn shell(site: &SiteContext, head: &PageHead, main: Markup) -> Markup {
    let config = site.config;
    let full_title = match head.title {
        Some(title) => format!("{title} | {}", config.title),
        None => config.title.clone(),
    };

    html! {
        (DOCTYPE)
        html lang=(config.language) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="generator" content=(GENERATOR);
                title { (full_title) }
                @if !head.description.is_empty() {
                    meta name="description" content=(head.description);
                }
                @if config.url.is_some() {
                    link rel="canonical" href=(config.absolute_url(head.url));
                }
                @if config.has_plugin(Plugin::Feed) {
                    link rel="alternate" type="application/rss+xml" title=(config.title)
                        href=(config.relative_url(&format!("/{}", config.feed_path.display())));
                }
            }
            body {
                header class="site-header" {
                    a class="site-title" href=(config.relative_url("/")) { (config.title) }
                    @if !config.description.is_empty() {
                        p class="site-description" { (config.description) }
                    }
                    (nav(site.config.relative_url("/"), &site.nav))
                }
                main { (main) }
                (author_block(site))
                footer class="site-footer" {
                    @if !config.social_links.is_empty() {
                        ul class="social-links" {
                            @for link in &config.social_links {
                                li {
                                    a href=(link.link) class=(format!("icon-{}", link.icon)) rel="me" {
                                        (link.label)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn nav(home_url: String, links: &[NavLink]) -> Markup {
    html! {
        nav class="site-nav" {
            a href=(home_url) { "Home" }
            @for link in links {
                " "
                a href=(link.url) { (link.title) }
            }
        }
    }
}

fn author_block(site: &SiteContext) -> Markup {
    let author = &site.config.author;
    html! {
        @if !author.name.is_empty() {
            aside class="author" {
                @if let Some(avatar) = &author.avatar {
                    img class="avatar" src=(avatar) alt=(author.name);
                }
                span class="author-name" { (author.name) }
                @if let Some(bio) = &author.bio {
                    p class="author-bio" { (bio) }
                }
                @if let Some(email) = &author.email {
                    a class="author-email" href=(format!("mailto:{email}")) { (email) }
                }
            }
        }
    }
}

fn post_meta(summary: &Summary) -> Markup {
    html! {
        p class="post-meta" {
            @if summary.is_draft {
                span class="draft" { "Draft" }
                " "
            }
            @if let (Some(ymd), Some(shown)) = (&summary.date_ymd, &summary.date_display) {
                time datetime=(ymd) { (shown) }
            }
            @if !summary.tags.is_empty() {
                span class="tags" {
                    @for (name, url) in &summary.tags {
                        " "
                        @if let Some(url) = url {
                            a class="tag" href=(url) { "#" (name) }
                        } @else {
                            span class="tag" { "#" (name) }
                        }
                    }
                }
            }
        }
    }
}

fn pager_nav(pager: &Pager) -> Markup {
    html! {
        @if pager.previous.is_some() || pager.next.is_some() {
            nav class="pager" {
                @if let Some((label, url)) = &pager.previous {
                    a class="previous" rel="prev" href=(url) { "← " (label) }
                }
                @if let Some((label, url)) = &pager.next {
                    a class="next" rel="next" href=(url) { (label) " →" }
                }
            }
        }
    }
}
