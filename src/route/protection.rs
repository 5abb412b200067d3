//! Protected-route detection.
//!
//! A route is protected when one of its pipelines is on the pipeline
//! deny-list (built-ins plus `sitemap_protected_pipelines`) or one of its
//! mount hooks is a known authentication hook. The union is computed once
//! per collection run.

use rustc_hash::FxHashSet;

use super::RouteInfo;
use crate::settings::{SettingsReader, keys};

pub const DEFAULT_PROTECTED_PIPELINES: &[&str] = &[
    "require_authenticated_user",
    "require_authenticated",
    "require_admin",
    "admin",
    "authenticated",
    "api_auth",
];

pub const DEFAULT_AUTH_HOOKS: &[&str] = &[
    "require_authenticated_user",
    "ensure_authenticated",
    "require_authenticated",
    "require_admin",
    "ensure_admin",
    "require_sudo_mode",
];

#[derive(Debug, Clone)]
pub struct ProtectionPolicy {
    pipelines: FxHashSet<String>,
    hooks: FxHashSet<String>,
}

impl Default for ProtectionPolicy {
    fn default() -> Self {
        Self::with_custom(std::iter::empty::<String>())
    }
}

impl ProtectionPolicy {
    /// Built-in deny-lists plus custom pipeline names.
    pub fn with_custom<I, S>(custom_pipelines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pipelines: FxHashSet<String> = DEFAULT_PROTECTED_PIPELINES
            .iter()
            .map(|p| p.to_string())
            .collect();
        pipelines.extend(
            custom_pipelines
                .into_iter()
                .map(|p| normalize_name(p.as_ref()))
                .filter(|p| !p.is_empty()),
        );
        let hooks = DEFAULT_AUTH_HOOKS.iter().map(|h| h.to_string()).collect();
        Self { pipelines, hooks }
    }

    /// Policy for one run; malformed custom lists fall back to the built-ins.
    pub fn from_settings(settings: &dyn SettingsReader) -> Self {
        Self::with_custom(settings.string_list(keys::PROTECTED_PIPELINES).unwrap_or_default())
    }

    pub fn is_protected(&self, route: &RouteInfo) -> bool {
        route
            .pipelines
            .iter()
            .any(|p| self.pipelines.contains(&normalize_name(p)))
            || route
                .auth_hooks
                .iter()
                .any(|h| self.hooks.contains(hook_name(h)))
    }
}

/// Pipeline names may be written as atoms (`:admin`).
fn normalize_name(name: &str) -> String {
    name.trim().trim_start_matches(':').to_string()
}

/// Hook references come in many shapes (`{UserAuth, :ensure_authenticated}`,
/// `UserAuth.require_admin`); the hook is the last token.
fn hook_name(raw: &str) -> &str {
    raw.split([':', '.', ',', '{', '}', ' '])
        .filter(|s| !s.is_empty())
        .last()
        .unwrap_or_default()
}
