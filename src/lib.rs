//! Canonry - content discovery and URL canonicalization.
//!
//! Aggregates publishable locations from heterogeneous backends (structured
//! records, front-matter documents, the host application's route table and
//! hand-maintained URLs) into one deduplicated, language-aware list of
//! canonical URLs with SEO metadata.
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── core/        # UrlEntry, UrlPath, SiteUrl, Priority, ChangeFreq
//! ├── settings/    # SettingsReader + key builders
//! ├── language/    # LanguageContext, hreflang alternates
//! ├── route/       # RouteTable, ProtectionPolicy, RouteResolver
//! ├── pattern/     # URL pattern fallback chain
//! ├── backend/     # RecordStore, front-matter documents
//! ├── source/      # Source trait + concrete sources
//! ├── collector/   # Orchestration, isolation, dedup
//! ├── generator/   # Sitemap rendering (caller side)
//! ├── config/      # canonry.toml
//! └── cli/         # Command-line front-end
//! ```
//!
//! # Example
//!
//! ```ignore
//! let settings = Arc::new(MapSettings::from_pairs([("site_url", "https://example.com")]));
//! let collector = Collector::new(settings, Some(routes)).with_default_sources(store, None);
//! let entries = collector.collect(&LanguageContext::single());
//! ```

pub mod logger;

pub mod backend;
pub mod cli;
pub mod collector;
pub mod config;
pub mod core;
pub mod generator;
pub mod language;
pub mod pattern;
pub mod route;
pub mod settings;
pub mod source;
pub mod utils;

pub use crate::collector::{Collector, CollectorOptions, LanguageRun};
pub use crate::core::{ChangeFreq, Priority, SiteUrl, UrlEntry, UrlPath};
pub use crate::language::LanguageContext;
pub use crate::route::{RouteInfo, RouteResolver, RouteTable};
pub use crate::settings::{MapSettings, SettingsReader};
pub use crate::source::{CollectRun, Source, SourceError, SourceId};
