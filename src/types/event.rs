//! The Event record and its write inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EventCategory, EventImportance};

/// A single recorded occurrence
///
/// Values of this type handed out by the store are snapshots: mutating
/// them has no effect on the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub category: EventCategory,
    pub importance: EventImportance,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub related_url: Option<String>,
    pub event_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Case-insensitive substring match on title or description.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}

/// Fields accepted when creating an event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: EventCategory,
    #[serde(default)]
    pub importance: Option<EventImportance>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub related_url: Option<String>,
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, category: EventCategory) -> Self {
        Self {
            title: title.into(),
            category,
            ..Default::default()
        }
    }

    pub fn importance(mut self, importance: EventImportance) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn related_url(mut self, url: impl Into<String>) -> Self {
        self.related_url = Some(url.into());
        self
    }

    pub fn event_date(mut self, date: DateTime<Utc>) -> Self {
        self.event_date = Some(date);
        self
    }
}

/// Partial update. `None` leaves a field untouched; for the optional text
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub importance: Option<EventImportance>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub related_url: Option<Option<String>>,
    #[serde(default)]
    pub event_date: Option<DateTime<Utc>>,
}

impl EventUpdate {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.importance.is_none()
            && self.tags.is_none()
            && self.location.is_none()
            && self.related_url.is_none()
            && self.event_date.is_none()
    }
}

/// Distinguishes an absent JSON key from an explicit `null`
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Option<String>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}
