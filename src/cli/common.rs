//! Shared setup for CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::backend::{JsonRecordStore, RecordStore};
use crate::cli::Cli;
use crate::collector::{Collector, CollectorOptions};
use crate::config::{CanonryConfig, find_config_file};
use crate::route::RouteTable;
use crate::settings::MapSettings;
use crate::{debug, log};

/// Everything a command needs, loaded from `canonry.toml`.
pub struct Workspace {
    pub config: CanonryConfig,
    pub settings: Arc<MapSettings>,
    pub routes: Option<Arc<RouteTable>>,
}

impl Workspace {
    /// Locate the config (searching upward from cwd) and load its backends.
    pub fn open(cli: &Cli) -> Result<Self> {
        let Some(path) = find_config_file(&cli.config) else {
            bail!(
                "Config file '{}' not found in this directory or any parent",
                cli.config.display()
            );
        };
        let config = CanonryConfig::load(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: CanonryConfig) -> Self {
        let settings = Arc::new(config.settings());
        let routes = load_routes(&config);
        Self {
            config,
            settings,
            routes,
        }
    }

    /// Collector with every built-in source wired to the configured backends.
    pub fn collector(&self, options: CollectorOptions) -> Collector {
        let store = self.config.records_path().map(|path| {
            debug!("backend"; "records from {}", path.display());
            Arc::new(JsonRecordStore::new(path)) as Arc<dyn RecordStore>
        });

        Collector::new(self.settings.clone(), self.routes.clone())
            .with_options(options)
            .with_default_sources(store, self.config.pages_dir())
    }
}

/// A broken route table degrades to "no router", it never aborts the run.
fn load_routes(config: &CanonryConfig) -> Option<Arc<RouteTable>> {
    let path = config.routes_path()?;
    match RouteTable::load(&path) {
        Ok(table) => {
            debug!("route"; "{} routes loaded from {}", table.len(), path.display());
            Some(Arc::new(table))
        }
        Err(e) => {
            log!("warning"; "route table unavailable: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_broken_route_table_degrades() {
        crate::logger::set_quiet(true);
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("routes.json"), "{ not json").unwrap();

        let mut config = test_parse_config("[backend]\nroutes = \"routes.json\"");
        config.root = dir.path().to_path_buf();

        let ws = Workspace::from_config(config);
        assert!(ws.routes.is_none());
    }

    #[test]
    fn test_route_table_loaded() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("routes.json"),
            r#"[{"path": "/posts/:id", "handler": "PostController.show"}]"#,
        )
        .unwrap();

        let mut config = test_parse_config("[backend]\nroutes = \"routes.json\"");
        config.root = dir.path().to_path_buf();

        let ws = Workspace::from_config(config);
        assert_eq!(ws.routes.map(|t| t.len()), Some(1));
    }
}
