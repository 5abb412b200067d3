//! In-memory settings store.

use rustc_hash::FxHashMap;
use serde_json::Value as JsonValue;

use super::SettingsReader;
use crate::utils::convert;

/// Settings held in a hash map, all values stored as strings
///
/// Structured values (arrays, tables) are stored as JSON text, which is what
/// `SettingsReader::json_array` expects.
#[derive(Debug, Clone, Default)]
pub struct MapSettings {
    values: FxHashMap<String, String>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build from a TOML table (the `[settings]` section of `canonry.toml`).
    pub fn from_toml(table: toml::Table) -> Self {
        let values = convert::table_to_json(table)
            .into_iter()
            .map(|(k, v)| (k, stringify(v)))
            .collect();
        Self { values }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Insert only when the key is not configured yet.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsReader for MapSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Scalars become their plain text, everything else JSON text.
fn stringify(value: JsonValue) -> String {
    match value {
        JsonValue::String(s) => s,
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_stringifies() {
        let table: toml::Table = toml::from_str(
            r#"
            site_url = "https://example.com"
            sitemap_posts_enabled = false
            sitemap_static_priority = 0.4
            sitemap_static_urls = ["/about", { path = "/contact", priority = 0.9 }]
            "#,
        )
        .unwrap();
        let settings = MapSettings::from_toml(table);

        assert_eq!(settings.get("site_url").as_deref(), Some("https://example.com"));
        assert!(!settings.bool("sitemap_posts_enabled", true));
        assert_eq!(settings.float("sitemap_static_priority"), Some(0.4));

        let urls = settings.json_array("sitemap_static_urls").unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[1]["path"], "/contact");
    }

    #[test]
    fn test_set_default_keeps_existing() {
        let mut settings = MapSettings::from_pairs([("site_url", "https://a.example")]);
        settings.set_default("site_url", "https://b.example");
        settings.set_default("default_language", "en");
        assert_eq!(settings.get("site_url").as_deref(), Some("https://a.example"));
        assert_eq!(settings.get("default_language").as_deref(), Some("en"));
        assert_eq!(settings.len(), 2);
    }
}
