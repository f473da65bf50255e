//! Write operations: create, get, update, delete

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::error::{ArchiveError, ArchiveResult};
use crate::types::{Event, EventUpdate, NewEvent};
use crate::validation::{
    normalize_optional, validate_tags, validate_title, MAX_LOCATION_LEN, MAX_URL_LEN,
};

use super::EventStore;

/// Validate and persist a new event. Nothing is written when validation fails.
pub fn create(store: &EventStore, new: NewEvent) -> ArchiveResult<Event> {
    let title = validate_title(&new.title)?;
    let description = normalize_optional("description", new.description, None)?;
    let tags = validate_tags(new.tags)?;
    let location = normalize_optional("location", new.location, Some(MAX_LOCATION_LEN))?;
    let related_url = normalize_optional("related_url", new.related_url, Some(MAX_URL_LEN))?;

    let id = store.backend.allocate_id()?;
    let now = Utc::now();
    let event = Event {
        id,
        title,
        description,
        category: new.category,
        importance: new.importance.unwrap_or_default(),
        tags,
        location,
        related_url,
        event_date: new.event_date.unwrap_or(now),
        created_at: now,
        updated_at: now,
    };

    store.backend.insert(&event)?;
    info!(id, category = %event.category, importance = %event.importance, "Created event");
    Ok(event)
}

pub fn get(store: &EventStore, id: u64) -> ArchiveResult<Event> {
    store
        .backend
        .fetch(id)?
        .ok_or(ArchiveError::NotFound(id))
}

/// Apply a partial update under the record's lock
pub fn update(store: &EventStore, id: u64, changes: EventUpdate) -> ArchiveResult<Event> {
    if changes.is_empty() {
        return Err(ArchiveError::validation("update", "no fields to update"));
    }

    // Validate everything before touching the record
    let title = changes.title.as_deref().map(validate_title).transpose()?;
    let description = changes
        .description
        .map(|d| normalize_optional("description", d, None))
        .transpose()?;
    let tags = changes.tags.map(validate_tags).transpose()?;
    let location = changes
        .location
        .map(|l| normalize_optional("location", l, Some(MAX_LOCATION_LEN)))
        .transpose()?;
    let related_url = changes
        .related_url
        .map(|u| normalize_optional("related_url", u, Some(MAX_URL_LEN)))
        .transpose()?;

    let _guard = store.locks.lock(id);
    let mut event = get(store, id)?;

    if let Some(title) = title {
        event.title = title;
    }
    if let Some(description) = description {
        event.description = description;
    }
    if let Some(category) = changes.category {
        event.category = category;
    }
    if let Some(importance) = changes.importance {
        event.importance = importance;
    }
    if let Some(tags) = tags {
        event.tags = tags;
    }
    if let Some(location) = location {
        event.location = location;
    }
    if let Some(related_url) = related_url {
        event.related_url = related_url;
    }
    if let Some(event_date) = changes.event_date {
        event.event_date = event_date;
    }
    event.updated_at = next_update_time(event.updated_at);

    if !store.backend.replace(&event)? {
        return Err(ArchiveError::NotFound(id));
    }
    info!(id, "Updated event");
    Ok(event)
}

pub fn delete(store: &EventStore, id: u64) -> ArchiveResult<()> {
    let _guard = store.locks.lock(id);
    if !store.backend.remove(id)? {
        debug!(id, "Delete of missing event");
        return Err(ArchiveError::NotFound(id));
    }
    info!(id, "Deleted event");
    Ok(())
}

/// Current time, nudged past `previous` when the clock has not advanced
fn next_update_time(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
