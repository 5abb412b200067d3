//! hreflang alternates across per-language runs.
//!
//! Variants of the same content share a `canonical_path`; grouping the
//! entries of every language run by that path yields the `xhtml:link`
//! alternates of each URL. The default language doubles as `x-default`.

use rustc_hash::FxHashMap;

use super::LanguageContext;
use crate::core::{UrlEntry, UrlPath};

pub const X_DEFAULT: &str = "x-default";

/// One `<xhtml:link rel="alternate">` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

/// Alternates keyed by canonical path, in run order.
pub type AlternateMap = FxHashMap<UrlPath, Vec<Alternate>>;

/// Group entries of several language runs by canonical path.
///
/// Paths present in a single language only get no alternates.
pub fn group_alternates<'a, I>(runs: I) -> AlternateMap
where
    I: IntoIterator<Item = (&'a LanguageContext, &'a [UrlEntry])>,
{
    let mut map: AlternateMap = FxHashMap::default();

    for (language, entries) in runs {
        if language.single_language_mode {
            continue;
        }
        let Some(code) = language.requested_language.as_deref() else {
            continue;
        };

        for entry in entries {
            let group = map.entry(entry.canonical_path.clone()).or_default();
            if group.iter().any(|a| a.hreflang == code) {
                continue;
            }
            group.push(Alternate {
                hreflang: code.to_string(),
                href: entry.loc.clone(),
            });
            if language.is_default_language {
                group.push(Alternate {
                    hreflang: X_DEFAULT.to_string(),
                    href: entry.loc.clone(),
                });
            }
        }
    }

    map.retain(|_, group| group.iter().filter(|a| a.hreflang != X_DEFAULT).count() > 1);
    map
}
