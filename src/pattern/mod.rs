//! URL pattern resolution for record-backed sources.
//!
//! Fallback chain, first match wins:
//!
//! 1. explicit override (record metadata or the kind's own settings)
//! 2. route introspection by handler naming convention
//! 3. per-kind setting `<feature>_<kind>_pattern`
//! 4. global template `<feature>_pattern`, only when it has `:kind_name`
//! 5. `/{kind}/:slug`, only with `<feature>_auto_pattern` on
//!
//! Index (listing) paths run the same chain against index keys, with
//! `/{kind}` as the auto fallback behind `<feature>_auto_index`.

mod substitute;

pub use substitute::{PatternError, Substitution, placeholders, substitute};

use crate::route::{RouteLookup, RouteResolver};
use crate::settings::{SettingsReader, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// One path per record
    Record,
    /// One listing path per content kind
    Index,
}

/// Which step of the chain produced a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOrigin {
    Override,
    Route,
    KindSetting,
    GlobalTemplate,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPattern {
    pub pattern: String,
    pub origin: PatternOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedPattern),
    /// Introspection found the kind's route behind authentication.
    Protected,
    /// No step produced a pattern.
    Unresolved,
}

impl Resolution {
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Resolved(r) => Some(&r.pattern),
            _ => None,
        }
    }
}

/// Resolves patterns for one feature namespace during one run
pub struct PatternResolver<'a> {
    feature: &'a str,
    settings: &'a dyn SettingsReader,
    routes: &'a RouteResolver,
}

impl<'a> PatternResolver<'a> {
    pub fn new(
        feature: &'a str,
        settings: &'a dyn SettingsReader,
        routes: &'a RouteResolver,
    ) -> Self {
        Self {
            feature,
            settings,
            routes,
        }
    }

    pub fn resolve(
        &self,
        kind: &str,
        override_pattern: Option<&str>,
        path_kind: PathKind,
    ) -> Resolution {
        if let Some(pattern) = override_pattern.map(str::trim).filter(|p| !p.is_empty()) {
            return resolved(pattern, PatternOrigin::Override);
        }

        let introspected = match path_kind {
            PathKind::Record => self.routes.record_pattern_for(kind),
            PathKind::Index => self.routes.index_pattern_for(kind),
        };
        match introspected {
            RouteLookup::Public(route) => return resolved(&route.path, PatternOrigin::Route),
            RouteLookup::Protected(_) => return Resolution::Protected,
            RouteLookup::Unavailable | RouteLookup::Missing => {}
        }

        let kind_key = match path_kind {
            PathKind::Record => keys::kind_pattern(self.feature, kind),
            PathKind::Index => keys::kind_index_pattern(self.feature, kind),
        };
        if let Some(pattern) = self.settings.non_empty(&kind_key) {
            return resolved(&pattern, PatternOrigin::KindSetting);
        }

        let global_key = match path_kind {
            PathKind::Record => keys::pattern(self.feature),
            PathKind::Index => keys::index_pattern(self.feature),
        };
        if let Some(template) = self.settings.non_empty(&global_key)
            && placeholders(&template).contains(&"kind_name")
        {
            return resolved(&template, PatternOrigin::GlobalTemplate);
        }

        match path_kind {
            PathKind::Record if self.settings.bool(&keys::auto_pattern(self.feature), false) => {
                resolved(&format!("/{kind}/:slug"), PatternOrigin::Auto)
            }
            PathKind::Index if self.settings.bool(&keys::auto_index(self.feature), false) => {
                resolved(&format!("/{kind}"), PatternOrigin::Auto)
            }
            _ => Resolution::Unresolved,
        }
    }
}

fn resolved(pattern: &str, origin: PatternOrigin) -> Resolution {
    Resolution::Resolved(ResolvedPattern {
        pattern: pattern.to_string(),
        origin,
    })
}
