//! Per-source priority and change-frequency defaults.
//!
//! | source             | item            | index        |
//! |--------------------|-----------------|--------------|
//! | `static`           | 0.5 monthly     | -            |
//! | `pages`            | 0.6 monthly     | -            |
//! | `entities`         | 0.7 weekly      | 0.6 daily    |
//! | `posts`            | 0.7 weekly      | 0.8 daily    |
//! | `blogging`         | 0.7 weekly      | 0.8 daily    |
//! | `router_discovery` | 0.5 weekly      | -            |
//!
//! The home page (static `/`, discovered `/`) is always 1.0 daily.
//! `<feature>_priority` / `<feature>_changefreq` override item values,
//! `<feature>_index_priority` / `<feature>_index_changefreq` index values.

use crate::core::{ChangeFreq, Priority, SourceId};
use crate::debug;
use crate::settings::{SettingsReader, keys};

/// What kind of location an entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Item,
    Index,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeoDefaults {
    pub priority: Priority,
    pub changefreq: ChangeFreq,
}

impl SeoDefaults {
    fn new(priority: f32, changefreq: ChangeFreq) -> Self {
        Self {
            priority: Priority::new(priority),
            changefreq,
        }
    }

    /// Built-in defaults, settings not consulted.
    pub fn builtin(source: SourceId, slot: Slot) -> Self {
        use ChangeFreq::*;
        match (slot, source) {
            (Slot::Home, _) => Self::new(1.0, Daily),
            (Slot::Index, SourceId::Entities) => Self::new(0.6, Daily),
            (Slot::Index, SourceId::Posts | SourceId::Blogging) => Self::new(0.8, Daily),
            (_, SourceId::Static) => Self::new(0.5, Monthly),
            (_, SourceId::Pages) => Self::new(0.6, Monthly),
            (_, SourceId::Entities | SourceId::Posts | SourceId::Blogging) => {
                Self::new(0.7, Weekly)
            }
            (_, SourceId::RouterDiscovery) => Self::new(0.5, Weekly),
        }
    }

    /// Defaults with the source's settings overrides applied.
    pub fn resolve(source: SourceId, slot: Slot, settings: &dyn SettingsReader) -> Self {
        let mut seo = Self::builtin(source, slot);
        let feature = source.feature();
        let (priority_key, freq_key) = match slot {
            Slot::Home => return seo,
            Slot::Item => (keys::priority(&feature), keys::changefreq(&feature)),
            Slot::Index => (
                keys::scoped(&feature, "index_priority"),
                keys::scoped(&feature, "index_changefreq"),
            ),
        };

        if let Some(p) = settings.float(&priority_key) {
            seo.priority = Priority::new(p);
        }
        if let Some(raw) = settings.non_empty(&freq_key) {
            match raw.parse() {
                Ok(freq) => seo.changefreq = freq,
                Err(e) => debug!("settings"; "`{}`: {}", freq_key, e),
            }
        }
        seo
    }
}
