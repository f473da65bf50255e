//! Read operations: list, search, aggregate
//!
//! Every read works on snapshot copies from the backend. Large archives
//! are filtered and tallied with rayon.

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{ArchiveError, ArchiveResult};
use crate::types::{Event, EventCategory, EventStats};

use super::EventStore;

/// Threshold for using parallel scans (event count)
const PARALLEL_SCAN_THRESHOLD: usize = 1000;

/// Newest `event_date` first; ties broken by the higher id
pub(crate) fn newest_first(a: &Event, b: &Event) -> Ordering {
    b.event_date
        .cmp(&a.event_date)
        .then_with(|| b.id.cmp(&a.id))
}

/// Filter by category, sort newest first, then cap at `limit`
pub fn list(
    store: &EventStore,
    limit: usize,
    category: Option<EventCategory>,
) -> ArchiveResult<Vec<Event>> {
    if limit == 0 {
        return Err(ArchiveError::validation("limit", "must be a positive number"));
    }

    let mut events = store.backend.scan()?;
    if let Some(category) = category {
        events.retain(|e| e.category == category);
    }
    events.sort_by(newest_first);
    events.truncate(limit);

    debug!(limit, ?category, returned = events.len(), "Listed events");
    Ok(events)
}

/// Case-insensitive substring search over title and description.
/// A blank query matches nothing.
pub fn search(store: &EventStore, query: &str, limit: Option<usize>) -> ArchiveResult<Vec<Event>> {
    if limit == Some(0) {
        return Err(ArchiveError::validation("limit", "must be a positive number"));
    }
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let needle = query.to_lowercase();
    let events = store.backend.scan()?;

    let mut matching: Vec<Event> = if events.len() > PARALLEL_SCAN_THRESHOLD {
        events
            .into_par_iter()
            .filter(|e| e.matches_text(&needle))
            .collect()
    } else {
        events
            .into_iter()
            .filter(|e| e.matches_text(&needle))
            .collect()
    };

    matching.sort_by(newest_first);
    if let Some(lim) = limit {
        matching.truncate(lim);
    }

    debug!(query, returned = matching.len(), "Searched events");
    Ok(matching)
}

/// One pass over every stored event
pub fn aggregate(store: &EventStore) -> ArchiveResult<EventStats> {
    let events = store.backend.scan()?;

    let stats = if events.len() > PARALLEL_SCAN_THRESHOLD {
        events
            .par_iter()
            .fold(EventStats::default, |mut acc, e| {
                acc.record(e);
                acc
            })
            .reduce(EventStats::default, EventStats::merge)
    } else {
        events.iter().fold(EventStats::default(), |mut acc, e| {
            acc.record(e);
            acc
        })
    };

    Ok(stats)
}
