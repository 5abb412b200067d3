//! Standalone posts.
//!
//! The record pattern comes from `sitemap_posts_pattern` or from the route
//! whose handler follows the `post` naming convention. Either way a public
//! route must confirm it: without a router, or behind authentication, posts
//! are skipped rather than guessed.

use std::sync::Arc;

use super::{CollectRun, SeoDefaults, Slot, Source, SourceError, SourceId};
use crate::backend::{Collection, Record, RecordStore};
use crate::core::{UrlEntry, UrlPath};
use crate::pattern::{Substitution, substitute};
use crate::route::RouteLookup;
use crate::settings::keys;
use crate::utils::text::humanize;
use crate::{debug, log};

const KIND: &str = "post";
const CATEGORY: &str = "Posts";

pub struct PostSource {
    store: Arc<dyn RecordStore>,
}

impl PostSource {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Confirmed public pattern, configured or introspected.
    fn confirmed_pattern(
        &self,
        run: &CollectRun,
        key: &str,
        introspected: RouteLookup<'_>,
    ) -> Option<String> {
        let lookup = match run.settings().non_empty(key) {
            Some(configured) => match run.routes.lookup(&configured) {
                RouteLookup::Public(_) => return Some(configured),
                other => other,
            },
            None => introspected,
        };
        match lookup {
            RouteLookup::Public(route) => Some(route.path.clone()),
            RouteLookup::Unavailable => {
                debug!("posts"; "`{}`: no router to confirm a public route", key);
                None
            }
            RouteLookup::Missing => {
                debug!("posts"; "`{}`: no matching route", key);
                None
            }
            RouteLookup::Protected(route) => {
                debug!("posts"; "`{}`: route `{}` is protected", key, route.path);
                None
            }
        }
    }

    fn record_entry(
        &self,
        run: &CollectRun,
        record: &Record,
        pattern: &str,
        seo: SeoDefaults,
    ) -> Option<UrlEntry> {
        let values = Substitution::for_record(KIND, record.id.as_str(), &record.slug);
        let path = match substitute(pattern, &values) {
            Ok(path) => UrlPath::new(&path),
            Err(e) => {
                log!("warning"; "{}: skipping post {}: {}", self.name(), record.id, e);
                return None;
            }
        };
        let title = if record.title.trim().is_empty() {
            humanize(record.slug_or_id())
        } else {
            record.title.clone()
        };
        Some(
            run.entry(path, self.name())
                .with_title(title)
                .with_category(CATEGORY)
                .with_lastmod(record.lastmod())
                .with_priority(record.priority().unwrap_or(seo.priority))
                .with_changefreq(record.changefreq().unwrap_or(seo.changefreq)),
        )
    }
}

impl Source for PostSource {
    fn name(&self) -> SourceId {
        SourceId::Posts
    }

    fn try_collect(&self, run: &CollectRun) -> Result<Vec<UrlEntry>, SourceError> {
        let records: Vec<Record> = self
            .store
            .published_records(&Collection::Posts)?
            .into_iter()
            .filter(|r| r.is_published() && !r.is_excluded())
            .collect();

        let feature = self.name().feature();
        let pattern = self.confirmed_pattern(
            run,
            &keys::pattern(&feature),
            run.routes.record_pattern_for(KIND),
        );
        if pattern.is_none() && !records.iter().any(|r| r.url_pattern().is_some()) {
            log!("warning"; "{}: no public post route, skipping", self.name());
            return Ok(Vec::new());
        }

        let seo = SeoDefaults::resolve(self.name(), Slot::Item, run.settings());
        let items: Vec<UrlEntry> = records
            .iter()
            .filter_map(|record| {
                let pattern = record.url_pattern().or(pattern.as_deref())?;
                self.record_entry(run, record, pattern, seo)
            })
            .collect();

        let mut entries = Vec::with_capacity(items.len() + 1);
        if let Some(index) = self.confirmed_pattern(
            run,
            &keys::index_pattern(&feature),
            run.routes.index_pattern_for(KIND),
        ) {
            let lastmod = items.iter().filter_map(|e| e.lastmod).max();
            entries.push(
                run.seo_entry(UrlPath::new(&index), self.name(), Slot::Index)
                    .with_title(CATEGORY)
                    .with_category(CATEGORY)
                    .with_lastmod(lastmod),
            );
        }
        entries.extend(items);
        Ok(entries)
    }
}
