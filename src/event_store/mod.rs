//! Event Store - canonical owner of events
//!
//! This module validates, persists and retrieves events against an
//! abstract [`EventBackend`]. Callers always receive snapshot copies.
//!
//! # Operations
//!
//! - `create` / `get` / `update` / `delete` (crud.rs)
//! - `list` / `search` / `aggregate` (query.rs)
//!
//! Mutations of a single id are serialized through striped record locks
//! (locks.rs); reads never take them.

mod crud;
mod locks;
mod query;

use std::path::Path;
use std::sync::Arc;

use crate::error::ArchiveResult;
use crate::storage::{EventBackend, JsonlBackend, MemoryBackend};
use crate::types::{Event, EventCategory, EventStats, EventUpdate, NewEvent};

use locks::RecordLocks;

/// Thread-safe event store; share it behind an `Arc`
pub struct EventStore {
    pub(crate) backend: Arc<dyn EventBackend>,
    pub(crate) locks: RecordLocks,
}

impl EventStore {
    /// Create a store over any backend
    pub fn new(backend: Arc<dyn EventBackend>) -> Self {
        Self {
            backend,
            locks: RecordLocks::new(),
        }
    }

    /// Store with process-local storage
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Store backed by a JSON-lines file
    pub fn open_file<P: AsRef<Path>>(path: P) -> ArchiveResult<Self> {
        Ok(Self::new(Arc::new(JsonlBackend::open(path)?)))
    }

    /// Backend kind and location, for logs
    pub fn backend_description(&self) -> String {
        self.backend.describe()
    }

    /// Number of stored events
    pub fn count(&self) -> ArchiveResult<usize> {
        self.backend.count()
    }
}

impl EventStore {
    // Write operations (from crud.rs)
    pub fn create(&self, new: NewEvent) -> ArchiveResult<Event> {
        crud::create(self, new)
    }

    pub fn get(&self, id: u64) -> ArchiveResult<Event> {
        crud::get(self, id)
    }

    pub fn update(&self, id: u64, changes: EventUpdate) -> ArchiveResult<Event> {
        crud::update(self, id, changes)
    }

    pub fn delete(&self, id: u64) -> ArchiveResult<()> {
        crud::delete(self, id)
    }

    // Read operations (from query.rs)
    pub fn list(&self, limit: usize, category: Option<EventCategory>) -> ArchiveResult<Vec<Event>> {
        query::list(self, limit, category)
    }

    pub fn search(&self, query: &str, limit: Option<usize>) -> ArchiveResult<Vec<Event>> {
        query::search(self, query, limit)
    }

    pub fn aggregate(&self) -> ArchiveResult<EventStats> {
        query::aggregate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArchiveError;
    use crate::types::EventImportance;
    use chrono::{Duration, TimeZone, Utc};

    fn dated(title: &str, category: EventCategory, day: u32) -> NewEvent {
        NewEvent::new(title, category)
            .event_date(Utc.with_ymd_and_hms(2025, 11, day, 12, 0, 0).unwrap())
    }

    /// Backend whose every call fails, to check error propagation
    struct UnavailableBackend;

    impl EventBackend for UnavailableBackend {
        fn describe(&self) -> String {
            "unavailable".to_string()
        }
        fn allocate_id(&self) -> ArchiveResult<u64> {
            Err(ArchiveError::storage("backend offline"))
        }
        fn insert(&self, _event: &Event) -> ArchiveResult<()> {
            Err(ArchiveError::storage("backend offline"))
        }
        fn fetch(&self, _id: u64) -> ArchiveResult<Option<Event>> {
            Err(ArchiveError::storage("backend offline"))
        }
        fn replace(&self, _event: &Event) -> ArchiveResult<bool> {
            Err(ArchiveError::storage("backend offline"))
        }
        fn remove(&self, _id: u64) -> ArchiveResult<bool> {
            Err(ArchiveError::storage("backend offline"))
        }
        fn scan(&self) -> ArchiveResult<Vec<Event>> {
            Err(ArchiveError::storage("backend offline"))
        }
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let store = EventStore::in_memory();
        let a = store.create(NewEvent::new("First", EventCategory::Virtue)).unwrap();
        let b = store.create(NewEvent::new("Second", EventCategory::Trial)).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.event_date, a.created_at);
        assert_eq!(a.importance, EventImportance::Medium);
        assert!(a.tags.is_empty());
    }

    #[test]
    fn test_create_rejects_blank_title_and_persists_nothing() {
        let store = EventStore::in_memory();
        let err = store.create(NewEvent::new("  ", EventCategory::Mortal)).unwrap_err();
        assert_eq!(err.field(), Some("title"));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_create_rejects_delimiter_in_tag() {
        let store = EventStore::in_memory();
        let err = store
            .create(NewEvent::new("Tagged", EventCategory::Mortal).tags(["ok", "not,ok"]))
            .unwrap_err();
        assert_eq!(err.field(), Some("tags"));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_update_refreshes_updated_at_only() {
        let store = EventStore::in_memory();
        let created = store.create(NewEvent::new("Draft", EventCategory::Trial)).unwrap();

        let updated = store
            .update(
                created.id,
                EventUpdate {
                    title: Some("Final".to_string()),
                    importance: Some(EventImportance::Critical),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.importance, EventImportance::Critical);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(store.get(created.id).unwrap(), updated);
    }

    #[test]
    fn test_update_clears_optional_field() {
        let store = EventStore::in_memory();
        let created = store
            .create(NewEvent::new("Trip", EventCategory::Mortal).location("Mount Tonglu"))
            .unwrap();

        let updated = store
            .update(
                created.id,
                EventUpdate {
                    location: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.location, None);
    }

    #[test]
    fn test_update_errors() {
        let store = EventStore::in_memory();
        let created = store.create(NewEvent::new("Draft", EventCategory::Trial)).unwrap();

        let missing = store.update(
            999,
            EventUpdate {
                title: Some("x".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(missing, Err(ArchiveError::NotFound(999))));

        let invalid = store
            .update(
                created.id,
                EventUpdate {
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(invalid.field(), Some("title"));
        assert_eq!(store.get(created.id).unwrap(), created);

        let empty = store.update(created.id, EventUpdate::default()).unwrap_err();
        assert!(matches!(empty, ArchiveError::Validation { .. }));
    }

    #[test]
    fn test_delete_twice_reports_not_found() {
        let store = EventStore::in_memory();
        let created = store.create(NewEvent::new("Gone", EventCategory::Mortal)).unwrap();

        store.delete(created.id).unwrap();
        assert!(matches!(store.get(created.id), Err(ArchiveError::NotFound(_))));
        assert!(matches!(store.delete(created.id), Err(ArchiveError::NotFound(_))));
    }

    #[test]
    fn test_list_orders_filters_then_limits() {
        let store = EventStore::in_memory();
        store.create(dated("Old victory", EventCategory::Victory, 10)).unwrap();
        store.create(dated("New trial", EventCategory::Trial, 18)).unwrap();
        store.create(dated("Mid victory", EventCategory::Victory, 14)).unwrap();
        store.create(dated("Newest victory", EventCategory::Victory, 20)).unwrap();

        let all = store.list(10, None).unwrap();
        let titles: Vec<_> = all.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest victory", "New trial", "Mid victory", "Old victory"]);

        let victories = store.list(2, Some(EventCategory::Victory)).unwrap();
        let titles: Vec<_> = victories.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest victory", "Mid victory"]);

        assert!(store.list(5, Some(EventCategory::Divine)).unwrap().is_empty());
        assert!(matches!(store.list(0, None), Err(ArchiveError::Validation { .. })));
    }

    #[test]
    fn test_list_ties_prefer_newer_id() {
        let store = EventStore::in_memory();
        let a = store.create(dated("A", EventCategory::Mortal, 5)).unwrap();
        let b = store.create(dated("B", EventCategory::Mortal, 5)).unwrap();
        let listed = store.list(10, None).unwrap();
        assert_eq!(listed[0].id, b.id);
        assert_eq!(listed[1].id, a.id);
    }

    #[test]
    fn test_search_semantics() {
        let store = EventStore::in_memory();
        store
            .create(NewEvent::new("Completed First Project", EventCategory::Victory))
            .unwrap();
        store
            .create(
                NewEvent::new("Quiet day", EventCategory::Mortal)
                    .description("Finished the PROJECT notes"),
            )
            .unwrap();
        store.create(NewEvent::new("Rest", EventCategory::Mortal)).unwrap();

        assert!(store.search("", None).unwrap().is_empty());
        assert!(store.search("   ", None).unwrap().is_empty());
        assert_eq!(store.search("project", None).unwrap().len(), 2);
        assert_eq!(store.search("project", Some(1)).unwrap().len(), 1);
        assert_eq!(store.search("COMPLETED", None).unwrap().len(), 1);
        assert!(store.search("nothing", None).unwrap().is_empty());
        assert!(store.search("x", Some(0)).is_err());
    }

    #[test]
    fn test_aggregate_counts_every_category() {
        let store = EventStore::in_memory();
        store.create(NewEvent::new("a", EventCategory::Virtue)).unwrap();
        store.create(NewEvent::new("b", EventCategory::Virtue)).unwrap();
        store
            .create(NewEvent::new("c", EventCategory::Victory).importance(EventImportance::High))
            .unwrap();

        let stats = store.aggregate().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_category.len(), 6);
        assert_eq!(stats.category_count(EventCategory::Virtue), 2);
        assert_eq!(stats.category_count(EventCategory::Divine), 0);
        assert_eq!(stats.importance_count(EventImportance::High), 1);
        assert_eq!(stats.by_category.values().sum::<usize>(), stats.total);
    }

    #[test]
    fn test_aggregate_parallel_path_matches_total() {
        let store = EventStore::in_memory();
        let base = Utc::now();
        for i in 0..1200u32 {
            let category = EventCategory::ALL[(i % 6) as usize];
            store
                .create(
                    NewEvent::new(format!("event {}", i), category)
                        .event_date(base - Duration::minutes(i as i64)),
                )
                .unwrap();
        }
        let stats = store.aggregate().unwrap();
        assert_eq!(stats.total, 1200);
        assert_eq!(stats.by_category.values().sum::<usize>(), 1200);
        assert_eq!(stats.category_count(EventCategory::Mortal), 200);

        let found = store.search("event 11", None).unwrap();
        // "event 11" plus "event 110".."event 119" and "event 1100".."event 1199"
        assert_eq!(found.len(), 1 + 10 + 100);
    }

    #[test]
    fn test_storage_errors_propagate() {
        let store = EventStore::new(Arc::new(UnavailableBackend));
        assert!(matches!(
            store.create(NewEvent::new("x", EventCategory::Virtue)),
            Err(ArchiveError::Storage(_))
        ));
        assert!(matches!(store.get(1), Err(ArchiveError::Storage(_))));
        assert!(matches!(store.list(10, None), Err(ArchiveError::Storage(_))));
        assert!(matches!(store.aggregate(), Err(ArchiveError::Storage(_))));
        assert!(matches!(store.delete(1), Err(ArchiveError::Storage(_))));
    }
}
