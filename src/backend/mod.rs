//! Content backends consumed by record- and document-backed sources.
//!
//! | Module     | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `record`   | `Record` / `EntityKind` boundary types           |
//! | `json`     | `JsonRecordStore` over a JSON export file        |
//! | `memory`   | `MemoryRecordStore` for embedding and tests      |
//! | `document` | Front-matter documents (`---` YAML-like, `+++` TOML) |

mod document;
mod json;
mod memory;
mod record;

pub use document::{DocumentMeta, extract_frontmatter, parse_document};
pub use json::JsonRecordStore;
pub use memory::MemoryRecordStore;
pub use record::{EntityKind, Record, RecordId};

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Collections a store can list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Records of one entity kind
    Entity(String),
    Posts,
    Blogs,
    BlogPosts,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(kind) => write!(f, "entity `{kind}`"),
            Self::Posts => f.write_str("posts"),
            Self::Blogs => f.write_str("blogs"),
            Self::BlogPosts => f.write_str("blog posts"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed backend data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid TOML front matter: {0}")]
    Frontmatter(#[from] toml::de::Error),

    #[error("unknown collection: {0}")]
    UnknownCollection(Collection),
}

/// Record-listing query of the host application
///
/// Implementations return only published, publicly visible records;
/// sources still re-check `Record::is_published` and the exclusion flag.
pub trait RecordStore: Send + Sync {
    /// Content kinds with their per-kind settings.
    fn entity_kinds(&self) -> Result<Vec<EntityKind>, BackendError>;

    fn published_records(&self, collection: &Collection) -> Result<Vec<Record>, BackendError>;
}
