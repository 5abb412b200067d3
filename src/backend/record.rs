//! Record boundary types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::JsonMap;
use crate::core::{ChangeFreq, Priority};
use crate::utils::DateTimeUtc;

/// Record identifier; the backend may send a string or a number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "record id must be a string or number, got {other}"
            ))),
        }
    }
}

/// One published record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Record {
    pub id: RecordId,
    pub slug: String,
    pub title: String,
    #[serde(alias = "updated")]
    pub updated_at: Option<String>,
    pub metadata: JsonMap,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, slug: &str, title: &str) -> Self {
        Self {
            id: id.into(),
            slug: slug.to_string(),
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn with_updated_at(mut self, updated_at: &str) -> Self {
        self.updated_at = Some(updated_at.to_string());
        self
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Slug, or the id when the slug is blank.
    pub fn slug_or_id(&self) -> &str {
        if self.slug.trim().is_empty() {
            self.id.as_str()
        } else {
            self.slug.trim()
        }
    }

    /// Status absent or `published`, visibility absent or `public`, not a draft.
    pub fn is_published(&self) -> bool {
        let status_ok = self
            .meta_str("status")
            .is_none_or(|s| s.eq_ignore_ascii_case("published"));
        let visibility_ok = self
            .meta_str("visibility")
            .is_none_or(|s| s.eq_ignore_ascii_case("public"));
        status_ok && visibility_ok && !self.meta_flag("draft")
    }

    /// Explicitly excluded from discovery.
    pub fn is_excluded(&self) -> bool {
        ["sitemap_exclude", "exclude_from_sitemap", "noindex"]
            .iter()
            .any(|key| self.meta_flag(key))
    }

    /// Record-level URL pattern override.
    pub fn url_pattern(&self) -> Option<&str> {
        self.meta_str("url_pattern").filter(|p| !p.trim().is_empty())
    }

    pub fn lastmod(&self) -> Option<DateTimeUtc> {
        self.updated_at.as_deref().and_then(DateTimeUtc::parse)
    }

    pub fn priority(&self) -> Option<Priority> {
        meta_priority(&self.metadata)
    }

    pub fn changefreq(&self) -> Option<ChangeFreq> {
        self.meta_str("changefreq").and_then(|s| s.parse().ok())
    }

    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    pub fn meta_flag(&self, key: &str) -> bool {
        self.metadata.get(key).is_some_and(is_truthy)
    }

    /// Metadata value rendered as text (`"news"`, `12`).
    pub fn meta_text(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Content kind of the entity subsystem
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EntityKind {
    pub name: String,
    pub display_name: String,
    pub settings: JsonMap,
}

impl EntityKind {
    pub fn new(name: &str, display_name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            settings: JsonMap::new(),
        }
    }

    pub fn with_setting(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.settings.insert(key.to_string(), value.into());
        self
    }

    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    pub fn url_pattern(&self) -> Option<&str> {
        self.setting_str("url_pattern")
    }

    pub fn index_pattern(&self) -> Option<&str> {
        self.setting_str("index_pattern")
    }

    pub fn is_excluded(&self) -> bool {
        ["sitemap_exclude", "exclude_from_sitemap"]
            .iter()
            .any(|key| self.settings.get(*key).is_some_and(is_truthy))
    }

    fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings
            .get(key)
            .and_then(Value::as_str)
            .filter(|p| !p.trim().is_empty())
    }
}

/// `true`, non-zero numbers and `"true"/"yes"/"1"` strings.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1" | "on"
        ),
        _ => false,
    }
}

/// `priority` metadata as number or numeric string.
pub(crate) fn meta_priority(metadata: &JsonMap) -> Option<Priority> {
    let value = match metadata.get("priority")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    Some(Priority::new(value as f32))
}
