//! Front-matter documents.
//!
//! Supports YAML-like (`---`) and TOML (`+++`) headers:
//!
//! ```text
//! ---
//! title: About us
//! status: published
//! updated: 2024-06-01
//! ---
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::record::is_truthy;
use super::{BackendError, JsonMap};
use crate::core::ChangeFreq;
use crate::utils::DateTimeUtc;
use crate::utils::convert::table_to_json;

/// Document metadata
///
/// # Standard Fields
///
/// | Field             | Description                                  |
/// |-------------------|----------------------------------------------|
/// | `title`           | Display title                                |
/// | `status`          | Publication status (`published` to include)  |
/// | `draft`           | Draft flag (default: false)                  |
/// | `slug`            | Path relative to the pages prefix            |
/// | `permalink`       | Absolute path, overrides slug and file name  |
/// | `lang`            | Language tag, alternative to `name.<lang>.md` |
/// | `updated`         | Last update (`update`, `updated_at`, `lastmod`) |
/// | `date`            | Publication date                             |
/// | `sitemap_exclude` | Exclusion flag (also `exclude_from_sitemap`) |
/// | `noindex`         | Exclusion flag                               |
/// | `priority`        | Priority override                            |
/// | `changefreq`      | Change-frequency override                    |
///
/// Any other field lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    pub title: Option<String>,
    pub status: Option<String>,
    pub draft: bool,
    pub slug: Option<String>,
    pub permalink: Option<String>,
    #[serde(alias = "language")]
    pub lang: Option<String>,
    #[serde(alias = "update", alias = "updated_at", alias = "lastmod")]
    pub updated: Option<String>,
    pub date: Option<String>,
    #[serde(alias = "exclude_from_sitemap")]
    pub sitemap_exclude: bool,
    pub noindex: bool,
    pub priority: Option<f32>,
    pub changefreq: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl DocumentMeta {
    /// Explicit `published` status and not a draft.
    pub fn is_published(&self) -> bool {
        !self.draft
            && self
                .status
                .as_deref()
                .is_some_and(|s| s.trim().eq_ignore_ascii_case("published"))
    }

    pub fn is_excluded(&self) -> bool {
        self.sitemap_exclude || self.noindex
    }

    /// `updated`, falling back to `date`.
    pub fn lastmod(&self) -> Option<DateTimeUtc> {
        self.updated
            .as_deref()
            .and_then(DateTimeUtc::parse)
            .or_else(|| self.date.as_deref().and_then(DateTimeUtc::parse))
    }

    pub fn changefreq(&self) -> Option<ChangeFreq> {
        self.changefreq.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn category(&self) -> Option<&str> {
        self.extra.get("category").and_then(Value::as_str)
    }
}

/// Split a document into metadata and body.
///
/// Returns `Ok(None)` when the document has no front matter.
pub fn extract_frontmatter(content: &str) -> Result<Option<(DocumentMeta, &str)>, BackendError> {
    match detect_frontmatter(content) {
        Some((fm, body, true)) => Ok(Some((parse_toml(fm)?, body))),
        Some((fm, body, false)) => Ok(Some((parse_yaml_like(fm), body))),
        None => Ok(None),
    }
}

/// Metadata of a document; empty metadata without front matter.
pub fn parse_document(content: &str) -> Result<DocumentMeta, BackendError> {
    Ok(extract_frontmatter(content)?
        .map(|(meta, _)| meta)
        .unwrap_or_default())
}

fn parse_toml(content: &str) -> Result<DocumentMeta, BackendError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(serde_json::from_value(Value::Object(table_to_json(table)))?)
}

/// Parse simple YAML-like front matter (`key: value` per line).
fn parse_yaml_like(content: &str) -> DocumentMeta {
    let mut meta = DocumentMeta::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = unquote(value.trim());
        let text = || (!value.is_empty()).then(|| value.to_string());

        match key.trim().to_lowercase().as_str() {
            "title" => meta.title = text(),
            "status" => meta.status = text(),
            "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
            "slug" => meta.slug = text(),
            "permalink" => meta.permalink = text(),
            "lang" | "language" => meta.lang = text(),
            "updated" | "update" | "updated_at" | "lastmod" => meta.updated = text(),
            "date" => meta.date = text(),
            "sitemap_exclude" | "exclude_from_sitemap" => {
                meta.sitemap_exclude = is_truthy(&Value::String(value.to_string()))
            }
            "noindex" => meta.noindex = is_truthy(&Value::String(value.to_string())),
            "priority" => meta.priority = value.parse().ok(),
            "changefreq" => meta.changefreq = text(),
            // Custom field, original key case preserved
            _ => {
                meta.extra.insert(key.trim().to_string(), parse_yaml_value(value));
            }
        }
    }

    meta
}

/// Detect front matter, returning `(front_matter, body, is_toml)`.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if trimmed.starts_with(fence)
            && let Some(end) = trimmed[3..].find(&format!("\n{fence}"))
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches(['\r', '\n']);
            return Some((fm, body, is_toml));
        }
    }

    None
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// YAML-like scalar: booleans, null, numbers, comma lists, else string.
fn parse_yaml_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }
    if s.contains(',') {
        return Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        );
    }
    Value::String(s.to_string())
}
