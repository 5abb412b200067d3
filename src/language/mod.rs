//! Language-aware path construction.
//!
//! - Single-language mode never adds a locale segment
//! - Multi-language mode prefixes **every** language, the default included,
//!   with its base locale (`fr-FR` → `/fr/...`)
//! - `canonical_path` is always the unprefixed path

mod alternates;

pub use alternates::{Alternate, AlternateMap, X_DEFAULT, group_alternates};

use crate::core::UrlPath;
use crate::settings::{SettingsReader, keys};

/// Language options for one collection run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageContext {
    pub requested_language: Option<String>,
    pub is_default_language: bool,
    pub single_language_mode: bool,
}

impl LanguageContext {
    /// Single-language install: no locale segment, ever.
    pub fn single() -> Self {
        Self {
            requested_language: None,
            is_default_language: true,
            single_language_mode: true,
        }
    }

    pub fn new(requested: Option<&str>, is_default: bool, single_language_mode: bool) -> Self {
        Self {
            requested_language: requested.map(str::to_string),
            is_default_language: is_default,
            single_language_mode,
        }
    }

    /// Resolve against the install's language settings.
    ///
    /// Multi-language mode needs `languages_enabled` and at least two
    /// configured languages. A missing or disabled requested language falls
    /// back to the default one.
    pub fn resolve(settings: &dyn SettingsReader, requested: Option<&str>) -> Self {
        let languages = enabled_languages(settings);
        let default = default_language(settings);

        if languages.len() < 2 {
            return Self {
                requested_language: requested.map(str::to_string),
                is_default_language: requested
                    .is_none_or(|r| base_locale(r) == base_locale(&default)),
                single_language_mode: true,
            };
        }

        let chosen = requested
            .filter(|r| {
                let base = base_locale(r);
                languages.iter().any(|l| base_locale(l) == base)
            })
            .map_or_else(|| default.clone(), str::to_string);
        let is_default = base_locale(&chosen) == base_locale(&default);

        Self {
            requested_language: Some(chosen),
            is_default_language: is_default,
            single_language_mode: false,
        }
    }

    /// Multi-language context without a requested language: the install's
    /// default language takes its place, so URLs keep their locale segment.
    pub fn or_default(mut self, settings: &dyn SettingsReader) -> Self {
        if !self.single_language_mode && self.requested_language.is_none() {
            self.requested_language = Some(default_language(settings));
            self.is_default_language = true;
        }
        self
    }

    /// Locale segment to prefix, `None` in single-language mode.
    pub fn locale_segment(&self) -> Option<String> {
        if self.single_language_mode {
            return None;
        }
        self.requested_language
            .as_deref()
            .map(base_locale)
            .filter(|b| !b.is_empty())
    }

    /// Localized path for a canonical path.
    pub fn localize(&self, canonical: &UrlPath) -> UrlPath {
        match self.locale_segment() {
            Some(segment) => canonical.with_prefix(&segment),
            None => canonical.clone(),
        }
    }

    /// Base locale of the requested language, if any.
    pub fn base(&self) -> Option<String> {
        self.requested_language.as_deref().map(base_locale)
    }
}

/// Lowercased sub-tag before the first hyphen: `en-US` → `en`.
///
/// Underscore-separated codes (`pt_BR`) are treated the same way.
pub fn base_locale(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Enabled languages, empty when localization is off.
pub fn enabled_languages(settings: &dyn SettingsReader) -> Vec<String> {
    if !settings.bool(keys::LANGUAGES_ENABLED, false) {
        return Vec::new();
    }
    let mut seen = Vec::new();
    for code in settings.string_list(keys::LANGUAGES).unwrap_or_default() {
        let code = code.trim().to_string();
        if !code.is_empty() && !seen.iter().any(|s: &String| base_locale(s) == base_locale(&code)) {
            seen.push(code);
        }
    }
    seen
}

pub fn default_language(settings: &dyn SettingsReader) -> String {
    settings.string(keys::DEFAULT_LANGUAGE, keys::DEFAULT_LANGUAGE_FALLBACK)
}

/// One context per language to collect: every enabled language in
/// multi-language mode, a single context otherwise.
pub fn contexts_for_install(settings: &dyn SettingsReader) -> Vec<LanguageContext> {
    let languages = enabled_languages(settings);
    if languages.len() < 2 {
        return vec![LanguageContext::resolve(settings, None)];
    }
    languages
        .iter()
        .map(|code| LanguageContext::resolve(settings, Some(code)))
        .collect()
}
