//! Hand-maintained URLs.
//!
//! `sitemap_static_urls` is a JSON array of paths or objects:
//!
//! ```json
//! ["/about", {"path": "/pricing", "priority": 0.9, "changefreq": "weekly"}]
//! ```
//!
//! These URLs are public by construction: without a router they are kept,
//! with one they are dropped only when the route serving them is protected.

use serde::Deserialize;
use serde_json::Value;

use super::{CollectRun, SeoDefaults, Slot, Source, SourceError, SourceId};
use crate::core::{ChangeFreq, Priority, UrlEntry, UrlPath};
use crate::route::RouteLookup;
use crate::settings::keys;
use crate::utils::DateTimeUtc;
use crate::utils::text::title_from_path;
use crate::{debug, log};

const CATEGORY: &str = "Static";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StaticUrl {
    #[serde(alias = "url", alias = "loc")]
    path: String,
    title: Option<String>,
    priority: Option<f32>,
    changefreq: Option<ChangeFreq>,
    lastmod: Option<String>,
    category: Option<String>,
}

pub struct StaticSource;

impl StaticSource {
    /// Parse one configured item; `None` for unusable items.
    fn parse_item(value: Value) -> Option<StaticUrl> {
        match value {
            Value::String(path) => Some(StaticUrl {
                path,
                ..StaticUrl::default()
            }),
            value @ Value::Object(_) => match serde_json::from_value::<StaticUrl>(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    log!("warning"; "static: skipping malformed url entry: {}", e);
                    None
                }
            },
            other => {
                log!("warning"; "static: skipping url entry {}", other);
                None
            }
        }
    }

    /// Canonical path of a configured location (relative or same-origin).
    fn canonical(run: &CollectRun, raw: &str) -> Option<UrlPath> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.contains("://") {
            let path = run.site.relative_path(raw);
            if path.is_none() {
                debug!("static"; "skipping `{}`: not on {}", raw, run.site);
            }
            return path;
        }
        Some(UrlPath::from_encoded(raw))
    }
}

impl Source for StaticSource {
    fn name(&self) -> SourceId {
        SourceId::Static
    }

    fn try_collect(&self, run: &CollectRun) -> Result<Vec<UrlEntry>, SourceError> {
        let settings = run.settings();
        let feature = self.name().feature();
        let mut entries = Vec::new();

        if settings.bool(&keys::scoped(&feature, "include_home"), true) {
            entries.push(
                run.seo_entry(UrlPath::root(), self.name(), Slot::Home)
                    .with_title(title_from_path("/"))
                    .with_category(CATEGORY),
            );
        }

        let items = settings
            .json_array(&keys::scoped(&feature, "urls"))
            .unwrap_or_default();
        let item_seo = SeoDefaults::resolve(self.name(), Slot::Item, settings);

        for item in items.into_iter().filter_map(Self::parse_item) {
            let Some(path) = Self::canonical(run, &item.path) else {
                continue;
            };
            if let RouteLookup::Protected(route) = run.routes.access(path.as_str()) {
                debug!("static"; "skipping `{}`: route `{}` is protected", path, route.path);
                continue;
            }

            let title = item.title.unwrap_or_else(|| title_from_path(path.as_str()));
            let category = item.category.unwrap_or_else(|| CATEGORY.to_string());
            let lastmod = item.lastmod.as_deref().and_then(DateTimeUtc::parse);
            entries.push(
                run.entry(path, self.name())
                    .with_title(title)
                    .with_category(category)
                    .with_lastmod(lastmod)
                    .with_priority(item.priority.map_or(item_seo.priority, Priority::new))
                    .with_changefreq(item.changefreq.unwrap_or(item_seo.changefreq)),
            );
        }

        Ok(entries)
    }
}
