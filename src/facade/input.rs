//! Raw request shapes and their conversion into typed store inputs
//!
//! Both bindings hand the façade loosely typed values (strings from the
//! command line, JSON from HTTP). Anything that does not parse becomes a
//! validation error naming the field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::{ArchiveError, ArchiveResult};
use crate::types::{EventCategory, EventImportance, EventUpdate, NewEvent};
use crate::validation::TAG_DELIMITER;

/// Fields for adding an event, before parsing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddEventInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub importance: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub related_url: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
}

impl AddEventInput {
    pub fn into_new_event(self) -> ArchiveResult<NewEvent> {
        let category = match self.category.as_deref() {
            Some(raw) => raw.parse::<EventCategory>()?,
            None => return Err(ArchiveError::validation("category", "is required")),
        };
        let importance = self
            .importance
            .as_deref()
            .map(str::parse::<EventImportance>)
            .transpose()?;
        let event_date = self
            .event_date
            .as_deref()
            .map(|raw| parse_date("event_date", raw))
            .transpose()?;

        Ok(NewEvent {
            title: self.title,
            description: self.description,
            category,
            importance,
            tags: self.tags,
            location: self.location,
            related_url: self.related_url,
            event_date,
        })
    }
}

/// Partial update, before parsing. Explicit `null` clears optional text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, with = "crate::types::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub importance: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, with = "crate::types::double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, with = "crate::types::double_option")]
    pub related_url: Option<Option<String>>,
    #[serde(default)]
    pub event_date: Option<String>,
}

impl UpdateEventInput {
    pub fn into_update(self) -> ArchiveResult<EventUpdate> {
        Ok(EventUpdate {
            title: self.title,
            description: self.description,
            category: self
                .category
                .as_deref()
                .map(str::parse::<EventCategory>)
                .transpose()?,
            importance: self
                .importance
                .as_deref()
                .map(str::parse::<EventImportance>)
                .transpose()?,
            tags: self.tags,
            location: self.location,
            related_url: self.related_url,
            event_date: self
                .event_date
                .as_deref()
                .map(|raw| parse_date("event_date", raw))
                .transpose()?,
        })
    }
}

/// Split a comma-joined tag string, dropping blanks
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or `YYYY-MM-DD` (midnight UTC)
pub fn parse_date(field: &str, raw: &str) -> ArchiveResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(ArchiveError::validation(
        field,
        format!("'{}' is not a date (use YYYY-MM-DD or RFC 3339)", raw),
    ))
}

/// Parse an optional category filter
pub fn parse_category_filter(raw: Option<&str>) -> ArchiveResult<Option<EventCategory>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_add_input_parses_enums() {
        let input = AddEventInput {
            title: "Completed First Project".to_string(),
            category: Some("victory".to_string()),
            importance: Some("HIGH".to_string()),
            ..Default::default()
        };
        let new = input.into_new_event().unwrap();
        assert_eq!(new.category, EventCategory::Victory);
        assert_eq!(new.importance, Some(EventImportance::High));
    }

    #[test]
    fn test_add_input_rejects_unknown_category() {
        let input = AddEventInput {
            title: "x".to_string(),
            category: Some("mystic".to_string()),
            ..Default::default()
        };
        let err = input.into_new_event().unwrap_err();
        assert_eq!(err.field(), Some("category"));
    }

    #[test]
    fn test_add_input_requires_category() {
        let err = AddEventInput {
            title: "x".to_string(),
            ..Default::default()
        }
        .into_new_event()
        .unwrap_err();
        assert_eq!(err.field(), Some("category"));
    }

    #[test]
    fn test_update_input_from_json() {
        let input: UpdateEventInput =
            serde_json::from_str(r#"{"category": "divine", "location": null}"#).unwrap();
        let update = input.into_update().unwrap();
        assert_eq!(update.category, Some(EventCategory::Divine));
        assert_eq!(update.location, Some(None));
        assert_eq!(update.description, None);

        let bad: UpdateEventInput = serde_json::from_str(r#"{"importance": "huge"}"#).unwrap();
        assert_eq!(bad.into_update().unwrap_err().field(), Some("importance"));
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("a, b ,,c"), vec!["a", "b", "c"]);
        assert!(split_tags(" , ").is_empty());
    }

    #[test]
    fn test_parse_date_formats() {
        let d = parse_date("event_date", "2025-11-18").unwrap();
        assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2025, 11, 18, 0));

        let d = parse_date("event_date", "2025-11-18 09:30:00").unwrap();
        assert_eq!(d.hour(), 9);

        let d = parse_date("event_date", "2025-11-18T10:00:00+02:00").unwrap();
        assert_eq!(d.hour(), 8);

        assert_eq!(
            parse_date("event_date", "yesterday").unwrap_err().field(),
            Some("event_date")
        );
    }

    #[test]
    fn test_parse_category_filter() {
        assert_eq!(parse_category_filter(None).unwrap(), None);
        assert_eq!(parse_category_filter(Some("")).unwrap(), None);
        assert_eq!(
            parse_category_filter(Some("trial")).unwrap(),
            Some(EventCategory::Trial)
        );
        assert!(parse_category_filter(Some("mystic")).is_err());
    }
}
