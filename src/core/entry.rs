//! The discoverable-location value object produced by every source.

use std::fmt;

use serde::Serialize;

use super::{ChangeFreq, Priority, UrlPath};
use crate::utils::DateTimeUtc;

/// Stable identifier of a source
///
/// Used for settings keys (`sitemap_<id>_*`), log prefixes and the
/// `source` field of every entry. Declaration order is the default
/// registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    Static,
    Pages,
    Entities,
    Posts,
    Blogging,
    RouterDiscovery,
}

impl SourceId {
    pub const ALL: [Self; 6] = [
        Self::Static,
        Self::Pages,
        Self::Entities,
        Self::Posts,
        Self::Blogging,
        Self::RouterDiscovery,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Pages => "pages",
            Self::Entities => "entities",
            Self::Posts => "posts",
            Self::Blogging => "blogging",
            Self::RouterDiscovery => "router_discovery",
        }
    }

    /// Settings namespace: `sitemap_<id>`.
    pub fn feature(self) -> String {
        format!("sitemap_{}", self.as_str())
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discoverable location
///
/// `loc` is always absolute and is the deduplication key;
/// `canonical_path` is root-relative and never carries a locale prefix,
/// so language variants of the same content share it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlEntry {
    pub loc: String,
    pub canonical_path: UrlPath,
    pub lastmod: Option<DateTimeUtc>,
    pub changefreq: ChangeFreq,
    pub priority: Priority,
    pub title: String,
    pub category: String,
    pub source: SourceId,
}

impl UrlEntry {
    pub fn new(loc: String, canonical_path: UrlPath, source: SourceId) -> Self {
        Self {
            loc,
            canonical_path,
            lastmod: None,
            changefreq: ChangeFreq::default(),
            priority: Priority::default(),
            title: String::new(),
            category: String::new(),
            source,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_lastmod(mut self, lastmod: Option<DateTimeUtc>) -> Self {
        self.lastmod = lastmod;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_changefreq(mut self, changefreq: ChangeFreq) -> Self {
        self.changefreq = changefreq;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id_feature_keys() {
        assert_eq!(SourceId::Entities.feature(), "sitemap_entities");
        assert_eq!(SourceId::RouterDiscovery.feature(), "sitemap_router_discovery");
    }

    #[test]
    fn test_default_order_is_declaration_order() {
        let mut sorted = SourceId::ALL;
        sorted.sort();
        assert_eq!(sorted, SourceId::ALL);
    }

    #[test]
    fn test_builder_and_serialization() {
        let entry = UrlEntry::new(
            "https://example.com/about".into(),
            UrlPath::new("/about"),
            SourceId::Static,
        )
        .with_title("About")
        .with_category("Static")
        .with_priority(Priority::new(0.8))
        .with_changefreq(ChangeFreq::Monthly)
        .with_lastmod(DateTimeUtc::parse("2024-05-01"));

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["loc"], "https://example.com/about");
        assert_eq!(json["canonical_path"], "/about");
        assert_eq!(json["lastmod"], "2024-05-01T00:00:00Z");
        assert_eq!(json["changefreq"], "monthly");
        assert_eq!(json["priority"], 0.8);
        assert_eq!(json["source"], "static");
    }
}
