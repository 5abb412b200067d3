//! Sources: one pluggable collector per content backend.
//!
//! | Module        | Source                  | Backend                        |
//! |---------------|-------------------------|--------------------------------|
//! | `static_urls` | `StaticSource`          | hand-maintained URL list       |
//! | `page`        | `PageSource`            | front-matter documents on disk |
//! | `entity`      | `EntitySource`          | entity records                 |
//! | `post`        | `PostSource`            | standalone posts               |
//! | `blog`        | `BlogSource`            | blogs and their posts          |
//! | `discovery`   | `RouteDiscoverySource`  | host route table               |
//!
//! Failures never cross the source boundary: implementations return
//! `Result` from `try_collect`, and the provided `collect` turns any error
//! into an empty list plus a logged warning.

mod blog;
mod discovery;
mod entity;
mod filter;
mod page;
mod post;
mod seo;
mod static_urls;

pub use blog::BlogSource;
pub use discovery::{DEFAULT_EXCLUDE_PATTERNS, RouteDiscoverySource};
pub use entity::EntitySource;
pub use filter::RegexList;
pub use page::PageSource;
pub use post::PostSource;
pub use seo::{SeoDefaults, Slot};
pub use static_urls::StaticSource;

pub use crate::core::SourceId;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::backend::BackendError;
use crate::core::{SiteUrl, UrlEntry, UrlPath};
use crate::language::LanguageContext;
use crate::log;
use crate::pattern::PatternError;
use crate::route::{RouteResolver, RouteTable};
use crate::settings::{SettingsReader, keys};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Internal(String),
}

// ============================================================================
// Collection run
// ============================================================================

/// Everything a source needs for one collection request
///
/// Built once per run (and per language), shared read-only by every
/// source of that run.
#[derive(Clone)]
pub struct CollectRun {
    pub settings: Arc<dyn SettingsReader>,
    pub language: LanguageContext,
    pub routes: RouteResolver,
    pub site: SiteUrl,
}

impl CollectRun {
    pub fn new(
        settings: Arc<dyn SettingsReader>,
        language: LanguageContext,
        routes: Option<Arc<RouteTable>>,
    ) -> Self {
        let language = language.or_default(settings.as_ref());
        let routes = RouteResolver::from_settings(routes, settings.as_ref());
        let site = site_url(settings.as_ref());
        Self {
            settings,
            language,
            routes,
            site,
        }
    }

    #[inline]
    pub fn settings(&self) -> &dyn SettingsReader {
        self.settings.as_ref()
    }

    /// Entry for a canonical path: localized, then made absolute.
    pub fn entry(&self, canonical: UrlPath, source: SourceId) -> UrlEntry {
        let localized = self.language.localize(&canonical);
        UrlEntry::new(self.site.absolute(&localized), canonical, source)
    }

    /// Entry with the source's SEO defaults for `slot` applied.
    pub fn seo_entry(&self, canonical: UrlPath, source: SourceId, slot: Slot) -> UrlEntry {
        let seo = SeoDefaults::resolve(source, slot, self.settings());
        self.entry(canonical, source)
            .with_priority(seo.priority)
            .with_changefreq(seo.changefreq)
    }
}

/// `site_url` setting; an invalid value falls back to the default origin.
fn site_url(settings: &dyn SettingsReader) -> SiteUrl {
    let Some(raw) = settings.non_empty(keys::SITE_URL) else {
        return SiteUrl::default();
    };
    SiteUrl::parse(&raw).unwrap_or_else(|e| {
        log!("warning"; "{}, using {}", e, SiteUrl::DEFAULT);
        SiteUrl::default()
    })
}

// ============================================================================
// Source contract
// ============================================================================

/// A pluggable collector for one content backend
pub trait Source: Send + Sync {
    /// Stable identifier, also the settings namespace.
    fn name(&self) -> SourceId;

    /// Feature-flag check: `sitemap_<id>_enabled`, on by default.
    fn enabled(&self, settings: &dyn SettingsReader) -> bool {
        settings.bool(&keys::enabled(&self.name().feature()), true)
    }

    /// The actual enumeration.
    fn try_collect(&self, run: &CollectRun) -> Result<Vec<UrlEntry>, SourceError>;

    /// Enumerate, collapsing any failure into an empty list.
    fn collect(&self, run: &CollectRun) -> Vec<UrlEntry> {
        match self.try_collect(run) {
            Ok(entries) => entries,
            Err(e) => {
                log!("warning"; "{}: {}", self.name(), e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MapSettings;

    struct Failing;

    impl Source for Failing {
        fn name(&self) -> SourceId {
            SourceId::Posts
        }

        fn try_collect(&self, _run: &CollectRun) -> Result<Vec<UrlEntry>, SourceError> {
            Err(SourceError::Internal("boom".to_string()))
        }
    }

    pub(crate) fn run_with(pairs: &[(&str, &str)], language: LanguageContext) -> CollectRun {
        let settings = MapSettings::from_pairs(pairs.iter().copied());
        CollectRun::new(Arc::new(settings), language, None)
    }

    #[test]
    fn test_collect_collapses_errors() {
        crate::logger::set_quiet(true);
        let run = run_with(&[], LanguageContext::single());
        assert!(Failing.collect(&run).is_empty());
    }

    #[test]
    fn test_enabled_flag() {
        let on = MapSettings::new();
        let off = MapSettings::from_pairs([("sitemap_posts_enabled", "false")]);
        assert!(Failing.enabled(&on));
        assert!(!Failing.enabled(&off));
    }

    #[test]
    fn test_entry_localizes_loc_only() {
        let run = run_with(
            &[("site_url", "https://example.com/")],
            LanguageContext::new(Some("fr-FR"), false, false),
        );
        let entry = run.entry(UrlPath::new("/posts/42"), SourceId::Posts);
        assert_eq!(entry.loc, "https://example.com/fr/posts/42");
        assert_eq!(entry.canonical_path.as_str(), "/posts/42");
    }

    #[test]
    fn test_multi_language_run_without_language_is_prefixed() {
        let run = run_with(
            &[("site_url", "https://example.com/")],
            LanguageContext::new(None, false, false),
        );
        let entry = run.entry(UrlPath::new("/posts/42"), SourceId::Posts);
        assert_eq!(entry.loc, "https://example.com/en/posts/42");
        assert_eq!(entry.canonical_path.as_str(), "/posts/42");
        assert!(run.language.is_default_language);
    }

    #[test]
    fn test_invalid_site_url_falls_back() {
        crate::logger::set_quiet(true);
        let run = run_with(&[("site_url", "ftp://example.com")], LanguageContext::single());
        assert_eq!(run.site, SiteUrl::default());
    }
}
