//! Query Façade - adapts external requests to the event store
//!
//! The façade owns no state. It parses loosely typed input, forwards to
//! [`EventStore`], and returns results unchanged in shape. Error kinds pass
//! through untouched so each binding can map them (HTTP status, exit code).

mod input;
mod view;

use std::sync::Arc;

use crate::error::ArchiveResult;
use crate::event_store::EventStore;
use crate::types::{Event, EventStats};
use crate::validation::validate_limit;

pub use input::{
    parse_category_filter, parse_date, split_tags, AddEventInput, UpdateEventInput,
};
pub use view::{EventView, StatsView};

/// Default number of events returned by `list`
pub const DEFAULT_LIST_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct QueryFacade {
    store: Arc<EventStore>,
}

impl QueryFacade {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }

    pub fn add(&self, input: AddEventInput) -> ArchiveResult<Event> {
        self.store.create(input.into_new_event()?)
    }

    pub fn get(&self, id: u64) -> ArchiveResult<Event> {
        self.store.get(id)
    }

    /// `limit` defaults to [`DEFAULT_LIST_LIMIT`]; the category is filtered
    /// before the limit applies
    pub fn list(&self, limit: Option<i64>, category: Option<&str>) -> ArchiveResult<Vec<Event>> {
        let limit = validate_limit(limit.unwrap_or(DEFAULT_LIST_LIMIT))?;
        let category = parse_category_filter(category)?;
        self.store.list(limit, category)
    }

    pub fn search(&self, query: &str, limit: Option<i64>) -> ArchiveResult<Vec<Event>> {
        let limit = limit.map(validate_limit).transpose()?;
        self.store.search(query, limit)
    }

    pub fn stats(&self) -> ArchiveResult<EventStats> {
        self.store.aggregate()
    }

    pub fn update(&self, id: u64, input: UpdateEventInput) -> ArchiveResult<Event> {
        self.store.update(id, input.into_update()?)
    }

    pub fn delete(&self, id: u64) -> ArchiveResult<()> {
        self.store.delete(id)
    }
}
