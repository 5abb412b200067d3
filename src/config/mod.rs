//! Configuration management for `canonry.toml`.
//!
//! The file wires a standalone run: where the backends live and which
//! settings the host would normally provide.
//!
//! # Sections
//!
//! | Section       | Purpose                                              |
//! |---------------|------------------------------------------------------|
//! | `[site]`      | Absolute base URL (seeds `site_url`)                 |
//! | `[backend]`   | Record store, route table and pages directory        |
//! | `[collector]` | Parallel execution and per-source timeout            |
//! | `[settings]`  | Free-form host settings read through `SettingsReader` |
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://example.com"
//!
//! [backend]
//! records = "data/records.json"
//! routes = "routes.json"
//! pages = "content/pages"
//!
//! [collector]
//! parallel = true
//! timeout_ms = 30000
//!
//! [settings]
//! languages_enabled = true
//! languages = ["en-US", "fr-FR"]
//! sitemap_posts_priority = 0.8
//! ```

mod error;
mod util;

pub use error::ConfigError;
pub use util::{find_config_file, find_config_from};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::collector::CollectorOptions;
use crate::core::SiteUrl;
use crate::debug;
use crate::settings::{MapSettings, keys};

/// Default config file name
pub const CONFIG_FILE: &str = "canonry.toml";

// ============================================================================
// sections
// ============================================================================

/// `[site]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Absolute base URL, e.g. `https://example.com/blog`
    pub url: Option<String>,
}

/// `[backend]` section, paths relative to the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendSection {
    /// JSON record store
    pub records: Option<PathBuf>,
    /// JSON route table of the host application
    pub routes: Option<PathBuf>,
    /// Directory of front-matter documents
    pub pages: Option<PathBuf>,
}

/// `[collector]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorSection {
    pub parallel: bool,
    /// Per-source deadline in milliseconds, `0` disables it
    pub timeout_ms: u64,
}

impl Default for CollectorSection {
    fn default() -> Self {
        let defaults = CollectorOptions::default();
        Self {
            parallel: defaults.parallel,
            timeout_ms: defaults
                .source_timeout
                .map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing canonry.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanonryConfig {
    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub backend: BackendSection,

    #[serde(default)]
    pub collector: CollectorSection,

    /// Host settings, flattened into `MapSettings`
    #[serde(default)]
    pub settings: toml::Table,
}

impl CanonryConfig {
    /// Load and validate a config file.
    ///
    /// Relative backend paths resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let mut config = Self::from_str(&content)?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!("config"; "loaded {}", path.display());
        Ok(config)
    }

    /// Parse and validate config content.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.site.url {
            SiteUrl::parse(url)
                .map_err(|e| ConfigError::Validation(format!("[site] url: {e}")))?;
        }
        if self.site.url.is_some() && self.settings.contains_key(keys::SITE_URL) {
            return Err(ConfigError::Validation(format!(
                "`{}` is set in both [site] and [settings]",
                keys::SITE_URL
            )));
        }
        Ok(())
    }

    /// Settings for the run; `[site] url` seeds `site_url`.
    pub fn settings(&self) -> MapSettings {
        let mut settings = MapSettings::from_toml(self.settings.clone());
        if let Some(url) = &self.site.url {
            settings.set_default(keys::SITE_URL, url.trim());
        }
        settings
    }

    pub fn collector_options(&self) -> CollectorOptions {
        CollectorOptions {
            parallel: self.collector.parallel,
            source_timeout: (self.collector.timeout_ms > 0)
                .then(|| Duration::from_millis(self.collector.timeout_ms)),
        }
    }

    pub fn records_path(&self) -> Option<PathBuf> {
        self.backend.records.as_ref().map(|p| self.root_join(p))
    }

    pub fn routes_path(&self) -> Option<PathBuf> {
        self.backend.routes.as_ref().map(|p| self.root_join(p))
    }

    pub fn pages_dir(&self) -> Option<PathBuf> {
        self.backend.pages.as_ref().map(|p| self.root_join(p))
    }

    /// Join a path with the config directory (absolute paths pass through)
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }
}

/// Parse a config for tests, panicking on error.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> CanonryConfig {
    CanonryConfig::from_str(content).unwrap()
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsReader;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = CanonryConfig::from_str("[site\nurl = \"https://x.org\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = test_parse_config("");
        assert!(config.site.url.is_none());
        assert!(config.records_path().is_none());

        let options = config.collector_options();
        assert!(options.parallel);
        assert_eq!(
            options.source_timeout,
            CollectorOptions::default().source_timeout
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(CanonryConfig::from_str("[site]\ntitle = \"x\"").is_err());
        assert!(CanonryConfig::from_str("[output]\nminify = true").is_err());
    }

    #[test]
    fn test_invalid_site_url_rejected() {
        let result = CanonryConfig::from_str("[site]\nurl = \"ftp://x.org\"");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_site_url_conflict_rejected() {
        let result = CanonryConfig::from_str(
            "[site]\nurl = \"https://a.org\"\n[settings]\nsite_url = \"https://b.org\"",
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_settings_section() {
        let config = test_parse_config(
            r#"
[site]
url = "https://example.com/"

[settings]
languages_enabled = true
languages = ["en-US", "fr-FR"]
sitemap_posts_priority = 0.8
"#,
        );
        let settings = config.settings();

        assert_eq!(settings.string(keys::SITE_URL, ""), "https://example.com/");
        assert!(settings.bool(keys::LANGUAGES_ENABLED, false));
        assert_eq!(
            settings.string_list(keys::LANGUAGES),
            Some(vec!["en-US".to_string(), "fr-FR".to_string()])
        );
        assert_eq!(settings.float("sitemap_posts_priority"), Some(0.8));
    }

    #[test]
    fn test_collector_section() {
        let config = test_parse_config("[collector]\nparallel = false\ntimeout_ms = 0");
        let options = config.collector_options();
        assert!(!options.parallel);
        assert_eq!(options.source_timeout, None);

        let config = test_parse_config("[collector]\ntimeout_ms = 250");
        assert_eq!(
            config.collector_options().source_timeout,
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_load_resolves_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[backend]\nrecords = \"data/records.json\"\npages = \"/abs/pages\"",
        )
        .unwrap();

        let config = CanonryConfig::load(&path).unwrap();
        assert_eq!(
            config.records_path(),
            Some(dir.path().join("data/records.json"))
        );
        assert_eq!(config.pages_dir(), Some(PathBuf::from("/abs/pages")));
        assert_eq!(config.routes_path(), None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = CanonryConfig::load(&dir.path().join(CONFIG_FILE));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }
}
