//! In-memory record store.
//!
//! Lets an embedding host hand records over directly, and lets tests
//! simulate an unreachable backend with `set_failing`.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{BackendError, Collection, EntityKind, Record, RecordStore};

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    kinds: RwLock<Vec<EntityKind>>,
    records: RwLock<FxHashMap<Collection, Vec<Record>>>,
    failing: AtomicBool,
    /// Collections whose queries fail even when the store is up
    broken: RwLock<Vec<Collection>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity kind with its records.
    pub fn with_kind(self, kind: EntityKind, records: Vec<Record>) -> Self {
        self.records
            .write()
            .insert(Collection::Entity(kind.name.clone()), records);
        self.kinds.write().push(kind);
        self
    }

    pub fn with_records(self, collection: Collection, records: Vec<Record>) -> Self {
        self.records.write().insert(collection, records);
        self
    }

    /// Make every query fail as if the backend were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make queries for one collection fail.
    pub fn break_collection(&self, collection: Collection) {
        self.broken.write().push(collection);
    }

    fn check(&self, collection: Option<&Collection>) -> Result<(), BackendError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("memory store is offline".to_string()));
        }
        if let Some(collection) = collection
            && self.broken.read().contains(collection)
        {
            return Err(BackendError::Unavailable(format!("{collection} query failed")));
        }
        Ok(())
    }
}

impl RecordStore for MemoryRecordStore {
    fn entity_kinds(&self) -> Result<Vec<EntityKind>, BackendError> {
        self.check(None)?;
        Ok(self.kinds.read().clone())
    }

    fn published_records(&self, collection: &Collection) -> Result<Vec<Record>, BackendError> {
        self.check(Some(collection))?;
        let records = self.records.read();
        match records.get(collection) {
            Some(list) => Ok(list.iter().filter(|r| r.is_published()).cloned().collect()),
            None if matches!(collection, Collection::Entity(_)) => {
                Err(BackendError::UnknownCollection(collection.clone()))
            }
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryRecordStore {
        MemoryRecordStore::new()
            .with_kind(
                EntityKind::new("article", "Articles"),
                vec![
                    Record::new(1, "a", "A"),
                    Record::new(2, "b", "B").with_meta("status", "archived"),
                ],
            )
            .with_records(Collection::Posts, vec![Record::new(3, "p", "P")])
    }

    #[test]
    fn test_queries() {
        let store = store();
        assert_eq!(store.entity_kinds().unwrap().len(), 1);
        let articles = Collection::Entity("article".into());
        assert_eq!(store.published_records(&articles).unwrap().len(), 1);
        assert_eq!(store.published_records(&Collection::Posts).unwrap().len(), 1);
        assert!(store.published_records(&Collection::Blogs).unwrap().is_empty());
        assert!(store.published_records(&Collection::Entity("x".into())).is_err());
    }

    #[test]
    fn test_failing_switch() {
        let store = store();
        store.set_failing(true);
        assert!(matches!(store.entity_kinds(), Err(BackendError::Unavailable(_))));
        assert!(store.published_records(&Collection::Posts).is_err());
        store.set_failing(false);
        assert!(store.entity_kinds().is_ok());
    }

    #[test]
    fn test_broken_collection() {
        let store = store();
        store.break_collection(Collection::Posts);
        assert!(store.published_records(&Collection::Posts).is_err());
        assert!(store.published_records(&Collection::Entity("article".into())).is_ok());
    }
}
