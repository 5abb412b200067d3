//! Record store over a JSON export of the host database.
//!
//! ```json
//! {
//!   "entities": [{ "name": "article", "display_name": "Articles", "settings": {} }],
//!   "records": { "article": [{ "id": 1, "slug": "hello", "title": "Hello" }] },
//!   "posts": [], "blogs": [], "blog_posts": []
//! }
//! ```
//!
//! The file is re-read on every query so that a long-lived process always
//! sees the latest export.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::{BackendError, Collection, EntityKind, Record, RecordStore};
use crate::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Export {
    entities: Vec<EntityKind>,
    records: FxHashMap<String, Vec<Record>>,
    posts: Vec<Record>,
    blogs: Vec<Record>,
    blog_posts: Vec<Record>,
}

#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Export, BackendError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| BackendError::Io {
            path: self.path.clone(),
            source,
        })?;
        let export: Export = serde_json::from_str(&content)?;
        debug!("backend"; "{} entity kinds in {}", export.entities.len(), self.path.display());
        Ok(export)
    }
}

impl RecordStore for JsonRecordStore {
    fn entity_kinds(&self) -> Result<Vec<EntityKind>, BackendError> {
        Ok(self.read()?.entities)
    }

    fn published_records(&self, collection: &Collection) -> Result<Vec<Record>, BackendError> {
        let mut export = self.read()?;
        let records = match collection {
            Collection::Entity(kind) => {
                if !export.entities.iter().any(|k| &k.name == kind) {
                    return Err(BackendError::UnknownCollection(collection.clone()));
                }
                export.records.remove(kind).unwrap_or_default()
            }
            Collection::Posts => export.posts,
            Collection::Blogs => export.blogs,
            Collection::BlogPosts => export.blog_posts,
        };
        Ok(records.into_iter().filter(Record::is_published).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EXPORT: &str = r#"{
        "entities": [{"name": "article", "display_name": "Articles"}, {"name": "faq"}],
        "records": {
            "article": [
                {"id": 1, "slug": "hello", "title": "Hello", "updated_at": "2024-01-02"},
                {"id": 2, "slug": "wip", "title": "WIP", "metadata": {"status": "draft"}}
            ]
        },
        "posts": [{"id": "p1", "slug": "first", "title": "First"}]
    }"#;

    fn store(dir: &TempDir, content: &str) -> JsonRecordStore {
        let path = dir.path().join("records.json");
        fs::write(&path, content).unwrap();
        JsonRecordStore::new(path)
    }

    #[test]
    fn test_entity_kinds() {
        let dir = TempDir::new().unwrap();
        let kinds = store(&dir, EXPORT).entity_kinds().unwrap();
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[0].label(), "Articles");
    }

    #[test]
    fn test_published_records_filters_drafts() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, EXPORT);
        let records = store.published_records(&Collection::Entity("article".into())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slug, "hello");
        assert!(store.published_records(&Collection::Entity("faq".into())).unwrap().is_empty());
        assert_eq!(store.published_records(&Collection::Posts).unwrap().len(), 1);
        assert!(store.published_records(&Collection::Blogs).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_kind() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir, EXPORT)
            .published_records(&Collection::Entity("recipe".into()))
            .unwrap_err();
        assert!(matches!(err, BackendError::UnknownCollection(_)));
    }

    #[test]
    fn test_missing_and_malformed_file() {
        let dir = TempDir::new().unwrap();
        let missing = JsonRecordStore::new(dir.path().join("nope.json"));
        assert!(matches!(missing.entity_kinds(), Err(BackendError::Io { .. })));

        let broken = store(&dir, "{ not json");
        assert!(matches!(broken.entity_kinds(), Err(BackendError::Parse(_))));
    }

    #[test]
    fn test_rereads_on_every_query() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir, r#"{"posts": []}"#);
        assert!(store.published_records(&Collection::Posts).unwrap().is_empty());
        fs::write(store.path(), r#"{"posts": [{"id": 1, "slug": "new"}]}"#).unwrap();
        assert_eq!(store.published_records(&Collection::Posts).unwrap().len(), 1);
    }
}
