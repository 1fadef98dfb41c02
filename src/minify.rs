//! Minification of generated HTML and XML.
//!
//! Both kinds pass through untouched unless `minify: true` is set, so the
//! default output stays readable.

use crate::config::SiteConfig;
use regex::bytes::Regex;
use std::{borrow::Cow, sync::LazyLock};

/// Whitespace-only runs between two tags.
static INTER_TAG_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());

/// CDATA sections, copied through verbatim.
static CDATA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[.*?\]\]>").unwrap());

/// Content type for minification.
pub enum MinifyType<'a> {
    Html(&'a [u8]),
    Xml(&'a [u8]),
}

/// Minify `content` when enabled in `config`.
///
/// Returns `Cow::Borrowed` when minification is off.
pub fn minify<'a>(content: MinifyType<'a>, config: &SiteConfig) -> Cow<'a, [u8]> {
    match content {
        MinifyType::Html(html) | MinifyType::Xml(html) if !config.minify => Cow::Borrowed(html),
        MinifyType::Html(html) => Cow::Owned(minify_html_inner(html)),
        MinifyType::Xml(xml) => Cow::Owned(minify_xml_inner(xml)),
    }
}

fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

/// Drop indentation between tags. Text nodes and CDATA keep their whitespace.
fn minify_xml_inner(xml: &[u8]) -> Vec<u8> {
    let xml = xml.trim_ascii();
    let collapse = |markup: &[u8], out: &mut Vec<u8>| {
        out.extend_from_slice(&INTER_TAG_SPACE.replace_all(markup, &b"><"[..]));
    };

    let mut out = Vec::with_capacity(xml.len());
    let mut last = 0;
    for cdata in CDATA.find_iter(xml) {
        collapse(&xml[last..cdata.start()], &mut out);
        out.extend_from_slice(cdata.as_bytes());
        last = cdata.end();
    }
    collapse(&xml[last..], &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(minify: bool) -> SiteConfig {
        SiteConfig {
            minify,
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_minify_disabled_borrows() {
        let html = b"<html>\n  <body>\n  </body>\n</html>";
        let result = minify(MinifyType::Html(html), &config(false));
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, html);

        let xml = b"<root>\n  <item/>\n</root>";
        assert_eq!(&*minify(MinifyType::Xml(xml), &config(false)), xml);
    }

    #[test]
    fn test_minify_html() {
        let html = b"<html>\n  <head>\n  </head>\n  <body>\n    <p>Hello World</p>\n  </body>\n</html>";
        let result = minify(MinifyType::Html(html), &config(true));
        let text = String::from_utf8_lossy(&result);

        assert!(result.len() < html.len());
        assert!(!text.contains("\n  "));
        assert!(text.contains("<p>Hello World</p>"));
    }

    #[test]
    fn test_minify_xml() {
        let xml = br#"<?xml version="1.0"?>
<urlset>
  <url>
    <loc>https://example.com/</loc>
  </url>
</urlset>
"#;
        let result = minify(MinifyType::Xml(xml), &config(true));
        assert_eq!(
            &*result,
            br#"<?xml version="1.0"?><urlset><url><loc>https://example.com/</loc></url></urlset>"#
        );
    }

    #[test]
    fn test_minify_xml_keeps_text_whitespace() {
        let xml = b"<item>\n  <description>two\n  lines</description>\n</item>";
        let result = minify(MinifyType::Xml(xml), &config(true));
        assert_eq!(&*result, b"<item><description>two\n  lines</description></item>");
    }

    #[test]
    fn test_minify_xml_keeps_cdata() {
        let xml = b"<item>\n  <description><![CDATA[<p>Use <code>x</code> <em>now</em>.</p>\n]]></description>\n</item>";
        let result = minify(MinifyType::Xml(xml), &config(true));
        assert_eq!(
            &*result,
            b"<item><description><![CDATA[<p>Use <code>x</code> <em>now</em>.</p>\n]]></description></item>"
        );
    }
}
