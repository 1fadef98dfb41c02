//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

use std::path::PathBuf;

pub fn language() -> String {
    "en".into()
}

pub fn destination() -> PathBuf {
    "_site".into()
}

pub fn permalink() -> String {
    "/:title/".into()
}

pub fn paginate_path() -> String {
    "/page:num/".into()
}

pub fn tag_path() -> String {
    "/tags/:tag/".into()
}

pub fn layouts() -> Vec<String> {
    ["post", "page", "tag", "home"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn exclude() -> Vec<String> {
    [
        "Gemfile",
        "Gemfile.lock",
        "README.md",
        "LICENSE",
        "node_modules",
        "vendor",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub mod feed {
    use std::path::PathBuf;

    pub fn path() -> PathBuf {
        "feed.xml".into()
    }
}

pub mod sitemap {
    use std::path::PathBuf;

    pub fn path() -> PathBuf {
        "sitemap.xml".into()
    }
}
