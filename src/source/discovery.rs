//! Route discovery: every public GET route of the host router.
//!
//! Filters, in order:
//! 1. exclude patterns (`<feature>_exclude_patterns` replaces the defaults)
//! 2. include-only whitelist (empty means no restriction)
//! 3. protected routes
//!
//! Off by default (`sitemap_router_discovery_enabled`).

use super::{CollectRun, RegexList, Slot, Source, SourceError, SourceId};
use crate::core::{UrlEntry, UrlPath};
use crate::settings::{SettingsReader, keys};
use crate::utils::text::title_from_path;
use crate::{debug, log};

/// Administrative, API and tooling prefixes plus parameterized and
/// wildcard segments.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "^/admin",
    "^/api",
    "^/dev",
    "^/phoenix",
    "^/live",
    "^/users/(log_in|register|settings|reset_password|confirm)",
    ":",
    r"\*",
];

const CATEGORY: &str = "Pages";

pub struct RouteDiscoverySource;

impl RouteDiscoverySource {
    fn filters(&self, settings: &dyn SettingsReader) -> (RegexList, RegexList) {
        let feature = self.name().feature();
        let context = self.name().as_str();

        let exclude = match settings.string_list(&keys::exclude_patterns(&feature)) {
            Some(custom) => RegexList::compile(context, custom),
            None => RegexList::compile(context, DEFAULT_EXCLUDE_PATTERNS.iter().copied()),
        };
        let include = RegexList::compile(
            context,
            settings
                .string_list(&keys::include_only(&feature))
                .unwrap_or_default(),
        );
        (exclude, include)
    }
}

impl Source for RouteDiscoverySource {
    fn name(&self) -> SourceId {
        SourceId::RouterDiscovery
    }

    fn enabled(&self, settings: &dyn SettingsReader) -> bool {
        settings.bool(&keys::enabled(&self.name().feature()), false)
    }

    fn try_collect(&self, run: &CollectRun) -> Result<Vec<UrlEntry>, SourceError> {
        if !run.routes.is_available() {
            log!("warning"; "{}: no route table available", self.name());
            return Ok(Vec::new());
        }

        let (exclude, include) = self.filters(run.settings());
        let mut entries = Vec::new();

        for route in run.routes.get_routes() {
            let path = route.path.as_str();
            if exclude.is_match(path) {
                debug!("discovery"; "excluded `{}`", path);
                continue;
            }
            if !include.is_empty() && !include.is_match(path) {
                debug!("discovery"; "not whitelisted `{}`", path);
                continue;
            }
            if run.routes.is_protected(route) {
                debug!("discovery"; "protected `{}`", path);
                continue;
            }

            let canonical = UrlPath::new(path);
            let slot = if canonical.is_root() { Slot::Home } else { Slot::Item };
            let title = title_from_path(canonical.as_str());
            entries.push(
                run.seo_entry(canonical, self.name(), slot)
                    .with_title(title)
                    .with_category(CATEGORY),
            );
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::Priority;
    use crate::language::LanguageContext;
    use crate::route::{RouteInfo, RouteTable};
    use crate::settings::MapSettings;

    fn table() -> RouteTable {
        RouteTable::new(vec![
            RouteInfo::get("/", "PageController.home"),
            RouteInfo::get("/about", "PageController.about"),
            RouteInfo::get("/admin/dashboard", "AdminLive.Dashboard"),
            RouteInfo::get("/posts/:id", "PostController.show"),
            RouteInfo::get("/files/*path", "FileController.show"),
            RouteInfo::get("/users/log_in", "UserSessionController.new"),
            RouteInfo::get("/account", "AccountLive")
                .with_auth_hooks(["{UserAuth, :ensure_authenticated}"]),
            RouteInfo::get("/contact", "ContactController.create").with_verb("POST"),
            RouteInfo::get("/about", "PageController.about_again"),
        ])
    }

    fn run(pairs: &[(&str, &str)], table: Option<RouteTable>) -> CollectRun {
        let settings = MapSettings::from_pairs(pairs.iter().copied());
        CollectRun::new(Arc::new(settings), LanguageContext::single(), table.map(Arc::new))
    }

    fn paths(entries: &[UrlEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.canonical_path.as_str()).collect()
    }

    #[test]
    fn test_disabled_by_default() {
        assert!(!RouteDiscoverySource.enabled(&MapSettings::new()));
        let on = MapSettings::from_pairs([("sitemap_router_discovery_enabled", "true")]);
        assert!(RouteDiscoverySource.enabled(&on));
    }

    #[test]
    fn test_default_filters() {
        let entries = RouteDiscoverySource.collect(&run(&[], Some(table())));
        assert_eq!(paths(&entries), vec!["/", "/about"]);
        assert_eq!(entries[0].priority, Priority::HIGHEST);
        assert_eq!(entries[0].title, "Home");
        assert_eq!(entries[1].title, "About");
    }

    #[test]
    fn test_admin_route_is_dropped() {
        let table = RouteTable::new(vec![RouteInfo::get("/admin/dashboard", "AdminLive")]);
        let entries = RouteDiscoverySource.collect(&run(
            &[("sitemap_router_discovery_exclude_patterns", r#"["^/admin"]"#)],
            Some(table),
        ));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_custom_excludes_replace_defaults() {
        let entries = RouteDiscoverySource.collect(&run(
            &[("sitemap_router_discovery_exclude_patterns", r#"["^/about"]"#)],
            Some(table()),
        ));
        // Protected routes stay out regardless
        assert_eq!(
            paths(&entries),
            vec!["/", "/admin/dashboard", "/posts/:id", "/files/*path", "/users/log_in"]
        );
    }

    #[test]
    fn test_include_only() {
        let entries = RouteDiscoverySource.collect(&run(
            &[("sitemap_router_discovery_include_only", r#"["^/about$"]"#)],
            Some(table()),
        ));
        assert_eq!(paths(&entries), vec!["/about"]);

        let empty = RouteDiscoverySource.collect(&run(
            &[("sitemap_router_discovery_include_only", "[]")],
            Some(table()),
        ));
        assert_eq!(paths(&empty), vec!["/", "/about"]);
    }

    #[test]
    fn test_malformed_patterns_do_not_crash() {
        crate::logger::set_quiet(true);
        let entries = RouteDiscoverySource.collect(&run(
            &[("sitemap_router_discovery_exclude_patterns", r#"["(", "^/admin"]"#)],
            Some(table()),
        ));
        assert!(paths(&entries).contains(&"/about"));
        assert!(!paths(&entries).contains(&"/admin/dashboard"));
    }

    #[test]
    fn test_no_router() {
        crate::logger::set_quiet(true);
        assert!(RouteDiscoverySource.collect(&run(&[], None)).is_empty());
    }
}
