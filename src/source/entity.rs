//! Entity records: one index entry per content kind plus one entry per
//! published record.
//!
//! A backend failure for one kind skips that kind only; failing to list
//! the kinds themselves fails the source.

use std::sync::Arc;

use super::{CollectRun, SeoDefaults, Slot, Source, SourceError, SourceId};
use crate::backend::{Collection, EntityKind, Record, RecordStore};
use crate::core::{UrlEntry, UrlPath};
use crate::pattern::{PathKind, PatternResolver, Resolution, Substitution, substitute};
use crate::utils::text::humanize;
use crate::{debug, log};

pub struct EntitySource {
    store: Arc<dyn RecordStore>,
}

impl EntitySource {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn collect_kind(
        &self,
        run: &CollectRun,
        resolver: &PatternResolver<'_>,
        kind: &EntityKind,
    ) -> Vec<UrlEntry> {
        let records = match self.store.published_records(&Collection::Entity(kind.name.clone())) {
            Ok(records) => records,
            Err(e) => {
                log!("warning"; "{}: skipping kind `{}`: {}", self.name(), kind.name, e);
                return Vec::new();
            }
        };
        let records: Vec<Record> = records
            .into_iter()
            .filter(|r| r.is_published() && !r.is_excluded())
            .collect();

        let resolved = resolver.resolve(&kind.name, kind.url_pattern(), PathKind::Record);
        let record_pattern = match resolved {
            Resolution::Resolved(p) => Some(p.pattern),
            Resolution::Protected => {
                debug!("entities"; "kind `{}` is served by a protected route", kind.name);
                None
            }
            Resolution::Unresolved => None,
        };
        if record_pattern.is_none() && !records.iter().any(|r| r.url_pattern().is_some()) {
            log!("warning"; "{}: no URL pattern for kind `{}`, skipping", self.name(), kind.name);
            return Vec::new();
        }

        let seo = SeoDefaults::resolve(self.name(), Slot::Item, run.settings());
        let mut items = Vec::with_capacity(records.len());
        for record in &records {
            let Some(pattern) = record.url_pattern().or(record_pattern.as_deref()) else {
                continue;
            };
            let values = Substitution::for_record(&kind.name, record.id.as_str(), &record.slug);
            let path = match substitute(pattern, &values) {
                Ok(path) => UrlPath::new(&path),
                Err(e) => {
                    log!(
                        "warning";
                        "{}: skipping record {} of `{}`: {}", self.name(), record.id, kind.name, e
                    );
                    continue;
                }
            };
            let title = if record.title.trim().is_empty() {
                humanize(record.slug_or_id())
            } else {
                record.title.clone()
            };
            items.push(
                run.entry(path, self.name())
                    .with_title(title)
                    .with_category(kind.label())
                    .with_lastmod(record.lastmod())
                    .with_priority(record.priority().unwrap_or(seo.priority))
                    .with_changefreq(record.changefreq().unwrap_or(seo.changefreq)),
            );
        }

        let mut entries = Vec::with_capacity(items.len() + 1);
        if let Some(index) = self.index_entry(run, resolver, kind, &items) {
            entries.push(index);
        }
        entries.extend(items);
        entries
    }

    fn index_entry(
        &self,
        run: &CollectRun,
        resolver: &PatternResolver<'_>,
        kind: &EntityKind,
        items: &[UrlEntry],
    ) -> Option<UrlEntry> {
        let resolution = resolver.resolve(&kind.name, kind.index_pattern(), PathKind::Index);
        let pattern = resolution.pattern()?;
        let path = match substitute(pattern, &Substitution::for_kind(&kind.name)) {
            Ok(path) => UrlPath::new(&path),
            Err(e) => {
                log!("warning"; "{}: no index for `{}`: {}", self.name(), kind.name, e);
                return None;
            }
        };
        let lastmod = items.iter().filter_map(|e| e.lastmod).max();
        Some(
            run.seo_entry(path, self.name(), Slot::Index)
                .with_title(kind.label())
                .with_category(kind.label())
                .with_lastmod(lastmod),
        )
    }
}

impl Source for EntitySource {
    fn name(&self) -> SourceId {
        SourceId::Entities
    }

    fn try_collect(&self, run: &CollectRun) -> Result<Vec<UrlEntry>, SourceError> {
        let kinds = self.store.entity_kinds()?;
        let feature = self.name().feature();
        let resolver = PatternResolver::new(&feature, run.settings(), &run.routes);

        let mut entries = Vec::new();
        for kind in kinds.iter().filter(|k| !k.is_excluded()) {
            entries.extend(self.collect_kind(run, &resolver, kind));
        }
        debug!("entities"; "{} entries from {} kinds", entries.len(), kinds.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryRecordStore;
    use crate::core::{ChangeFreq, Priority};
    use crate::language::LanguageContext;
    use crate::route::{RouteInfo, RouteTable};
    use crate::settings::MapSettings;
    use crate::utils::DateTimeUtc;

    fn store() -> MemoryRecordStore {
        MemoryRecordStore::new()
            .with_kind(
                EntityKind::new("article", "Articles"),
                vec![
                    Record::new(1, "hello-world", "Hello").with_updated_at("2024-03-01"),
                    Record::new(2, "", "No slug").with_updated_at("2024-04-01"),
                    Record::new(3, "hidden", "Hidden").with_meta("sitemap_exclude", true),
                    Record::new(4, "special", "Special")
                        .with_meta("url_pattern", "/featured/:slug")
                        .with_meta("priority", 0.95)
                        .with_meta("changefreq", "daily"),
                ],
            )
            .with_kind(
                EntityKind::new("faq", "FAQ"),
                vec![Record::new(9, "shipping", "Shipping")],
            )
    }

    fn run(pairs: &[(&str, &str)], routes: Option<RouteTable>) -> CollectRun {
        let mut settings = MapSettings::from_pairs(pairs.iter().copied());
        settings.set_default("site_url", "https://example.com");
        CollectRun::new(Arc::new(settings), LanguageContext::single(), routes.map(Arc::new))
    }

    fn paths(entries: &[UrlEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.canonical_path.as_str()).collect()
    }

    #[test]
    fn test_global_template_and_auto_index() {
        crate::logger::set_quiet(true);
        let source = EntitySource::new(Arc::new(store()));
        let entries = source.collect(&run(
            &[
                ("sitemap_entities_pattern", "/:kind_name/:slug"),
                ("sitemap_entities_auto_index", "true"),
            ],
            None,
        ));
        assert_eq!(
            paths(&entries),
            vec![
                "/article",
                "/article/hello-world",
                "/article/2",
                "/featured/special",
                "/faq",
                "/faq/shipping",
            ]
        );

        let index = &entries[0];
        assert_eq!(index.priority.value(), 0.6);
        assert_eq!(index.changefreq, ChangeFreq::Daily);
        assert_eq!(index.lastmod, Some(DateTimeUtc::from_ymd(2024, 4, 1)));
        assert_eq!(index.category, "Articles");

        assert_eq!(entries[1].loc, "https://example.com/article/hello-world");
        assert_eq!(entries[1].priority.value(), 0.7);
        assert_eq!(entries[3].priority, Priority::new(0.95));
        assert_eq!(entries[3].changefreq, ChangeFreq::Daily);
    }

    #[test]
    fn test_excluded_records_never_appear() {
        crate::logger::set_quiet(true);
        let source = EntitySource::new(Arc::new(store()));
        let entries = source.collect(&run(&[("sitemap_entities_auto_pattern", "true")], None));
        assert!(!paths(&entries).iter().any(|p| p.contains("hidden")));
    }

    #[test]
    fn test_unresolved_kind_is_skipped() {
        crate::logger::set_quiet(true);
        let store = MemoryRecordStore::new()
            .with_kind(EntityKind::new("faq", "FAQ"), vec![Record::new(1, "a", "A")])
            .with_kind(
                EntityKind::new("recipe", "Recipes").with_setting("url_pattern", "/cook/:slug"),
                vec![Record::new(2, "soup", "Soup")],
            );
        let entries = EntitySource::new(Arc::new(store)).collect(&run(&[], None));
        assert_eq!(paths(&entries), vec!["/cook/soup"]);
    }

    #[test]
    fn test_route_introspection_and_protection() {
        crate::logger::set_quiet(true);
        let routes = RouteTable::new(vec![
            RouteInfo::get("/articles", "ArticleLive.Index"),
            RouteInfo::get("/articles/:slug", "ArticleLive.Show"),
            RouteInfo::get("/faqs/:id", "FaqLive.Show")
                .with_pipelines(["require_authenticated_user"]),
        ]);
        let source = EntitySource::new(Arc::new(store()));
        let entries =
            source.collect(&run(&[("sitemap_entities_auto_pattern", "true")], Some(routes)));
        assert_eq!(
            paths(&entries),
            vec!["/articles", "/articles/hello-world", "/articles/2", "/featured/special"]
        );
    }

    #[test]
    fn test_failing_kind_does_not_affect_others() {
        crate::logger::set_quiet(true);
        let store = store();
        store.break_collection(Collection::Entity("article".into()));
        let entries = EntitySource::new(Arc::new(store))
            .collect(&run(&[("sitemap_entities_pattern", "/:kind_name/:slug")], None));
        assert_eq!(paths(&entries), vec!["/faq/shipping"]);
    }

    #[test]
    fn test_unreachable_backend_yields_nothing() {
        crate::logger::set_quiet(true);
        let store = store();
        store.set_failing(true);
        let source = EntitySource::new(Arc::new(store));
        let run = run(&[("sitemap_entities_auto_pattern", "true")], None);
        assert!(matches!(source.try_collect(&run), Err(SourceError::Backend(_))));
        assert!(source.collect(&run).is_empty());
    }

    #[test]
    fn test_excluded_kind() {
        let store = MemoryRecordStore::new().with_kind(
            EntityKind::new("internal", "Internal").with_setting("sitemap_exclude", true),
            vec![Record::new(1, "a", "A")],
        );
        let entries = EntitySource::new(Arc::new(store))
            .collect(&run(&[("sitemap_entities_auto_pattern", "true")], None));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_admin_route_declared_first_does_not_hide_kind() {
        crate::logger::set_quiet(true);
        let routes = RouteTable::new(vec![
            RouteInfo::get("/admin/articles/:id", "MyAppWeb.Admin.ArticleLive.Edit")
                .with_pipelines(["browser", "require_admin"]),
            RouteInfo::get("/articles/:slug", "MyAppWeb.ArticleLive.Show"),
        ]);
        let source = EntitySource::new(Arc::new(store()));
        let entries = source.collect(&run(&[], Some(routes)));

        assert!(paths(&entries).contains(&"/articles/hello-world"));
        assert!(!paths(&entries).iter().any(|p| p.starts_with("/admin")));
    }
}
