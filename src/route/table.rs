//! Route rows and JSON loading.
//!
//! Accepted file shapes:
//!
//! ```json
//! [{ "path": "/posts/:id", "verb": "GET", "handler": "PostController.show",
//!    "pipelines": ["browser"], "auth_hooks": [] }]
//! ```
//!
//! or the same array under a top-level `"routes"` key.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::debug;

#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("failed to read route table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid route table: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_verb() -> String {
    "GET".to_string()
}

/// One row of the host routing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub path: String,
    #[serde(default = "default_verb", alias = "method")]
    pub verb: String,
    /// Opaque handler reference, used only for naming
    #[serde(default, alias = "plug")]
    pub handler: String,
    #[serde(default)]
    pub pipelines: Vec<String>,
    /// Mount-time guards (`on_mount` hooks)
    #[serde(default, alias = "on_mount")]
    pub auth_hooks: Vec<String>,
}

impl RouteInfo {
    pub fn get(path: &str, handler: &str) -> Self {
        Self {
            path: path.to_string(),
            verb: default_verb(),
            handler: handler.to_string(),
            pipelines: Vec::new(),
            auth_hooks: Vec::new(),
        }
    }

    pub fn with_pipelines<I, S>(mut self, pipelines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pipelines = pipelines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_auth_hooks<I, S>(mut self, hooks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auth_hooks = hooks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_verb(mut self, verb: &str) -> Self {
        self.verb = verb.to_string();
        self
    }

    #[inline]
    pub fn is_get(&self) -> bool {
        self.verb.eq_ignore_ascii_case("GET")
    }

    /// Whether the path has a `:param` or `*glob` segment.
    pub fn has_placeholder(&self) -> bool {
        self.path
            .split('/')
            .any(|s| s.starts_with(':') || s.starts_with('*'))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RouteFile {
    List(Vec<RouteInfo>),
    Wrapped { routes: Vec<RouteInfo> },
}

/// Immutable route table, in the host router's declaration order
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteInfo>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteInfo>) -> Self {
        Self { routes }
    }

    pub fn from_json(content: &str) -> Result<Self, RouteTableError> {
        let routes = match serde_json::from_str(content)? {
            RouteFile::List(routes) | RouteFile::Wrapped { routes } => routes,
        };
        Ok(Self::new(routes))
    }

    pub fn load(path: &Path) -> Result<Self, RouteTableError> {
        let content = std::fs::read_to_string(path).map_err(|source| RouteTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&content)?;
        debug!("route"; "{} routes loaded from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// GET routes, first declaration of each path only.
    pub fn get_routes(&self) -> Vec<&RouteInfo> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.routes
            .iter()
            .filter(|r| r.is_get())
            .filter(|r| seen.insert(r.path.as_str()))
            .collect()
    }
}
