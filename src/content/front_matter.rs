//! Front-matter splitting and parsing.
//!
//! A content file starts with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-03-07 10:00:00
//! tags: [rust, notes]
//! ---
//! Body in *markdown*.
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Metadata keys recognized in a front-matter block. Others are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub categories: Vec<String>,
    pub layout: Option<String>,
    pub permalink: Option<String>,
    pub excerpt: Option<String>,
    pub description: Option<String>,
    #[serde(default = "published_default")]
    pub published: bool,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            tags: Vec::new(),
            categories: Vec::new(),
            layout: None,
            permalink: None,
            excerpt: None,
            description: None,
            published: true,
        }
    }
}

fn published_default() -> bool {
    true
}

/// Accept `tags: [a, b]` as well as `tags: a b`.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    let value = Option::<StringOrList>::deserialize(deserializer)?;
    let items = match value {
        None => Vec::new(),
        Some(StringOrList::One(s)) => s.split_whitespace().map(String::from).collect(),
        Some(StringOrList::Many(items)) => items
            .into_iter()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect(),
    };
    Ok(items)
}

/// Split a file into its front-matter YAML and its body.
///
/// Returns `Err` with a reason when the file has no block or the block is
/// never closed. A closing fence is `---` or `...`.
pub fn split(text: &str) -> Result<(&str, &str), String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = strip_fence(text) else {
        return Err("missing front-matter block (file must start with `---`)".into());
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((yaml, body));
        }
        offset += line.len();
    }

    Err("unterminated front-matter block".into())
}

/// Strip the opening `---` line, returning what follows it.
fn strip_fence(text: &str) -> Option<&str> {
    let (first, rest) = match text.find('\n') {
        Some(i) => (&text[..i], &text[i + 1..]),
        None => (text, ""),
    };
    (first.trim_end() == "---").then_some(rest)
}

/// Parse the YAML of a front-matter block.
pub fn parse(yaml: &str) -> Result<FrontMatter, String> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml_ng::from_str(yaml).map_err(|err| format!("invalid front-matter: {err}"))
}

/// Parse a front-matter date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` with an optional
/// `+HHMM` offset, and RFC 3339. Offsets are dropped: the wall-clock time
/// the author wrote is kept.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M %z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_split_basic() {
        let (yaml, body) = split("---\ntitle: Hi\n---\nBody\n").unwrap();
        assert_eq!(yaml, "title: Hi\n");
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_split_crlf_and_bom() {
        let (yaml, body) = split("\u{feff}---\r\ntitle: Hi\r\n---\r\nBody").unwrap();
        assert_eq!(yaml.trim(), "title: Hi");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_dot_terminator() {
        let (yaml, body) = split("---\ntitle: Hi\n...\nBody").unwrap();
        assert_eq!(yaml, "title: Hi\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_empty_block() {
        let (yaml, body) = split("---\n---\nBody").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_missing() {
        assert!(split("title: Hi\n").unwrap_err().contains("missing"));
        assert!(split("").is_err());
    }

    #[test]
    fn test_split_unterminated() {
        assert!(split("---\ntitle: Hi\nBody").unwrap_err().contains("unterminated"));
    }

    #[test]
    fn test_parse_fields() {
        let fm = parse(
            "title: Hello\ndate: 2024-03-07\ntags: [rust, notes]\nlayout: post\nexcerpt: Short\n",
        )
        .unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.date.as_deref(), Some("2024-03-07"));
        assert_eq!(fm.tags, ["rust", "notes"]);
        assert_eq!(fm.layout.as_deref(), Some("post"));
        assert_eq!(fm.excerpt.as_deref(), Some("Short"));
        assert!(fm.published);
    }

    #[test]
    fn test_parse_tags_as_string() {
        let fm = parse("title: T\ntags: rust  web\ncategories: notes\n").unwrap();
        assert_eq!(fm.tags, ["rust", "web"]);
        assert_eq!(fm.categories, ["notes"]);
    }

    #[test]
    fn test_parse_unknown_keys_ignored() {
        let fm = parse("title: T\ncomments: true\nimage: /a.png\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_parse_unpublished() {
        let fm = parse("title: T\npublished: false\n").unwrap();
        assert!(!fm.published);
    }

    #[test]
    fn test_parse_empty() {
        let fm = parse("  \n").unwrap();
        assert!(fm.title.is_none());
        assert!(fm.published);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(parse("title: [oops\n").is_err());
    }

    #[test]
    fn test_parse_date_forms() {
        let d = parse_date("2024-03-07").unwrap();
        assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2024, 3, 7, 0));

        let d = parse_date("2024-03-07 10:30").unwrap();
        assert_eq!((d.hour(), d.minute()), (10, 30));

        let d = parse_date("2024-03-07 10:30:15 +0100").unwrap();
        assert_eq!((d.hour(), d.minute(), d.second()), (10, 30, 15));

        let d = parse_date("2024-03-07T23:00:00Z").unwrap();
        assert_eq!((d.day(), d.hour()), (7, 23));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024-02-30").is_none());
        assert!(parse_date("").is_none());
    }
}
