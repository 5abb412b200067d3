//! Setting keys.
//!
//! Keys are namespaced per feature: `<feature>_enabled`,
//! `<feature>_<kind>_pattern`, `<feature>_exclude_patterns`, ...
//! where `feature` is `sitemap_<source>` (see `SourceId::feature`).

/// Absolute base URL used to build every `loc`.
pub const SITE_URL: &str = "site_url";

/// Whether the localization subsystem is on.
pub const LANGUAGES_ENABLED: &str = "languages_enabled";
/// JSON array of enabled locale codes.
pub const LANGUAGES: &str = "languages";
/// Locale code of the default language.
pub const DEFAULT_LANGUAGE: &str = "default_language";
pub const DEFAULT_LANGUAGE_FALLBACK: &str = "en";

/// Custom protected pipeline names, added to the built-in deny-list.
pub const PROTECTED_PIPELINES: &str = "sitemap_protected_pipelines";

pub fn enabled(feature: &str) -> String {
    format!("{feature}_enabled")
}

pub fn priority(feature: &str) -> String {
    format!("{feature}_priority")
}

pub fn changefreq(feature: &str) -> String {
    format!("{feature}_changefreq")
}

/// Global record pattern template (may contain `:kind_name`).
pub fn pattern(feature: &str) -> String {
    format!("{feature}_pattern")
}

/// Global index pattern template (may contain `:kind_name`).
pub fn index_pattern(feature: &str) -> String {
    format!("{feature}_index_pattern")
}

/// Per-kind record pattern.
pub fn kind_pattern(feature: &str, kind: &str) -> String {
    format!("{feature}_{kind}_pattern")
}

/// Per-kind index pattern.
pub fn kind_index_pattern(feature: &str, kind: &str) -> String {
    format!("{feature}_{kind}_index_pattern")
}

/// Feature flag for the `/{kind}/:slug` fallback.
pub fn auto_pattern(feature: &str) -> String {
    format!("{feature}_auto_pattern")
}

/// Feature flag for the `/{kind}` index fallback.
pub fn auto_index(feature: &str) -> String {
    format!("{feature}_auto_index")
}

pub fn exclude_patterns(feature: &str) -> String {
    format!("{feature}_exclude_patterns")
}

pub fn include_only(feature: &str) -> String {
    format!("{feature}_include_only")
}

/// Free-form key under a feature namespace (`<feature>_<name>`).
pub fn scoped(feature: &str, name: &str) -> String {
    format!("{feature}_{name}")
}
