//! Presentation shapes for text output

use serde::Serialize;

use crate::types::{Event, EventCategory, EventStats};

/// Date format used in tables
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One event flattened into display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub importance: String,
    pub tags: String,
    pub location: String,
    pub related_url: String,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Event> for EventView {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            category: event.category.as_str().to_string(),
            importance: event.importance.as_str().to_string(),
            tags: event.tags.join(", "),
            location: event.location.clone().unwrap_or_default(),
            related_url: event.related_url.clone().unwrap_or_default(),
            date: event.event_date.format(DATE_FORMAT).to_string(),
            created_at: event.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: event.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl EventView {
    /// Label/value pairs for a single-event detail table
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Id", self.id.as_str()),
            ("Title", self.title.as_str()),
            ("Category", self.category.as_str()),
            ("Importance", self.importance.as_str()),
            ("Description", or_dash(&self.description)),
            ("Tags", or_dash(&self.tags)),
            ("Location", or_dash(&self.location)),
            ("Related Url", or_dash(&self.related_url)),
            ("Event Date", self.date.as_str()),
            ("Created At", self.created_at.as_str()),
            ("Updated At", self.updated_at.as_str()),
        ]
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Labelled statistics rows: total first, then every category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub rows: Vec<(String, usize)>,
}

impl From<&EventStats> for StatsView {
    fn from(stats: &EventStats) -> Self {
        let mut rows = vec![("Total Events".to_string(), stats.total)];
        rows.extend(
            EventCategory::ALL
                .iter()
                .map(|c| (c.label().to_string(), stats.category_count(*c))),
        );
        Self { rows }
    }
}
