//! Route questions asked by sources.
//!
//! - `record_pattern_for` / `index_pattern_for`: introspect a content kind's
//!   route by handler naming convention
//! - `lookup`: confirm a configured pattern has a public route
//! - `access`: classify a concrete path (static URLs)
//!
//! Every answer distinguishes "no router available" from "no such route",
//! since record-backed sources must skip when they cannot confirm a public
//! route.

use std::sync::Arc;

use super::{
    ProtectionPolicy, RouteInfo, RouteTable, handler_matches, pattern_matches, pattern_shape,
};
use crate::settings::SettingsReader;

/// Placeholders a record can fill (see `Substitution::for_record`).
pub const RECORD_PLACEHOLDERS: [&str; 3] = ["id", "slug", "kind_name"];

/// Whether every placeholder of `path` is one a record can fill.
fn record_fillable(path: &str) -> bool {
    path.split('/').all(|segment| match segment.strip_prefix(':') {
        Some(name) => RECORD_PLACEHOLDERS.contains(&name),
        None => !segment.starts_with('*'),
    })
}

/// Outcome of a route question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteLookup<'a> {
    /// No route table was provided.
    Unavailable,
    /// The table has no matching GET route.
    Missing,
    Protected(&'a RouteInfo),
    Public(&'a RouteInfo),
}

impl<'a> RouteLookup<'a> {
    #[inline]
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public(_))
    }

    #[inline]
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Protected(_))
    }

    /// Path pattern of a public route.
    pub fn public_path(&self) -> Option<&'a str> {
        match self {
            Self::Public(route) => Some(route.path.as_str()),
            _ => None,
        }
    }
}

/// Route table plus the protection policy of one collection run
#[derive(Debug, Clone, Default)]
pub struct RouteResolver {
    table: Option<Arc<RouteTable>>,
    policy: ProtectionPolicy,
}

impl RouteResolver {
    pub fn new(table: Option<Arc<RouteTable>>, policy: ProtectionPolicy) -> Self {
        Self { table, policy }
    }

    /// Resolver whose deny-list includes the custom pipelines in `settings`.
    pub fn from_settings(table: Option<Arc<RouteTable>>, settings: &dyn SettingsReader) -> Self {
        Self::new(table, ProtectionPolicy::from_settings(settings))
    }

    /// Resolver without a host router.
    pub fn unavailable() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.table.is_some()
    }

    pub fn is_protected(&self, route: &RouteInfo) -> bool {
        self.policy.is_protected(route)
    }

    /// Deduplicated GET routes, empty without a router.
    pub fn get_routes(&self) -> Vec<&RouteInfo> {
        self.table.as_deref().map(RouteTable::get_routes).unwrap_or_default()
    }

    /// Record route of a content kind: a GET route whose placeholders a
    /// record can fill and whose handler follows the kind's naming
    /// convention. Public routes are preferred over protected ones.
    pub fn record_pattern_for(&self, kind: &str) -> RouteLookup<'_> {
        self.find(|r| {
            r.has_placeholder() && record_fillable(&r.path) && handler_matches(&r.handler, kind)
        })
    }

    /// Listing route of a content kind (no placeholder).
    pub fn index_pattern_for(&self, kind: &str) -> RouteLookup<'_> {
        self.find(|r| !r.has_placeholder() && handler_matches(&r.handler, kind))
    }

    /// Route with the same shape as `pattern`, placeholder names ignored.
    pub fn lookup(&self, pattern: &str) -> RouteLookup<'_> {
        let shape = pattern_shape(pattern);
        self.find(|r| pattern_shape(&r.path) == shape)
    }

    /// Route serving the concrete `path`. Literal routes win over
    /// parameterized ones.
    pub fn access(&self, path: &str) -> RouteLookup<'_> {
        let Some(table) = self.table.as_deref() else {
            return RouteLookup::Unavailable;
        };
        let literal = pattern_shape(path);
        let route = table
            .get_routes()
            .into_iter()
            .find(|r| !r.has_placeholder() && pattern_shape(&r.path) == literal)
            .or_else(|| {
                table
                    .get_routes()
                    .into_iter()
                    .find(|r| pattern_matches(&r.path, path))
            });
        self.classify(route)
    }

    /// First public match; a protected match only when no public one exists.
    fn find(&self, predicate: impl Fn(&RouteInfo) -> bool) -> RouteLookup<'_> {
        let Some(table) = self.table.as_deref() else {
            return RouteLookup::Unavailable;
        };
        let mut protected = None;
        for route in table.get_routes() {
            if !predicate(route) {
                continue;
            }
            if !self.policy.is_protected(route) {
                return RouteLookup::Public(route);
            }
            protected.get_or_insert(route);
        }
        protected.map_or(RouteLookup::Missing, RouteLookup::Protected)
    }

    fn classify<'a>(&self, route: Option<&'a RouteInfo>) -> RouteLookup<'a> {
        match route {
            None => RouteLookup::Missing,
            Some(route) if self.policy.is_protected(route) => RouteLookup::Protected(route),
            Some(route) => RouteLookup::Public(route),
        }
    }
}
