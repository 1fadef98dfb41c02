//! Generated XML files: `sitemap.xml` and the RSS feed.

pub mod feed;
pub mod sitemap;

pub use feed::feed_xml;
pub use sitemap::{UrlEntry, sitemap_xml};
