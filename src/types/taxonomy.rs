//! Closed taxonomy for events: category and importance

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArchiveError;

/// Classification of an event's nature
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// Good deeds and accomplishments
    #[default]
    Virtue,
    /// Challenges and difficulties
    Trial,
    /// Major wins and successes
    Victory,
    /// Epic achievements
    Legendary,
    /// Extraordinary milestones
    Divine,
    /// Daily activities
    Mortal,
}

impl EventCategory {
    /// Every category, in declaration order
    pub const ALL: [EventCategory; 6] = [
        EventCategory::Virtue,
        EventCategory::Trial,
        EventCategory::Victory,
        EventCategory::Legendary,
        EventCategory::Divine,
        EventCategory::Mortal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Virtue => "virtue",
            EventCategory::Trial => "trial",
            EventCategory::Victory => "victory",
            EventCategory::Legendary => "legendary",
            EventCategory::Divine => "divine",
            EventCategory::Mortal => "mortal",
        }
    }

    /// Human-facing label, used by the statistics view
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Virtue => "Virtues",
            EventCategory::Trial => "Trials",
            EventCategory::Victory => "Victories",
            EventCategory::Legendary => "Legendary",
            EventCategory::Divine => "Divine",
            EventCategory::Mortal => "Mortal",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EventCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ArchiveError::validation(
                    "category",
                    format!(
                        "unknown category '{}', expected one of: {}",
                        s,
                        join_names(EventCategory::ALL.iter().map(|c| c.as_str()))
                    ),
                )
            })
    }
}

/// Ranking of an event's significance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EventImportance {
    Low,
    #[default]
    Medium,
    High,
    Critical,
    Legendary,
}

impl EventImportance {
    pub const ALL: [EventImportance; 5] = [
        EventImportance::Low,
        EventImportance::Medium,
        EventImportance::High,
        EventImportance::Critical,
        EventImportance::Legendary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventImportance::Low => "low",
            EventImportance::Medium => "medium",
            EventImportance::High => "high",
            EventImportance::Critical => "critical",
            EventImportance::Legendary => "legendary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventImportance::Low => "Low",
            EventImportance::Medium => "Medium",
            EventImportance::High => "High",
            EventImportance::Critical => "Critical",
            EventImportance::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for EventImportance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventImportance {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EventImportance::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ArchiveError::validation(
                    "importance",
                    format!(
                        "unknown importance '{}', expected one of: {}",
                        s,
                        join_names(EventImportance::ALL.iter().map(|i| i.as_str()))
                    ),
                )
            })
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("Victory".parse::<EventCategory>().unwrap(), EventCategory::Victory);
        assert_eq!(" mortal ".parse::<EventCategory>().unwrap(), EventCategory::Mortal);
    }

    #[test]
    fn test_unknown_category_names_field() {
        let err = "mystic".parse::<EventCategory>().unwrap_err();
        assert!(matches!(err, ArchiveError::Validation { ref field, .. } if field == "category"));
        assert!(err.to_string().contains("mystic"));
    }

    #[test]
    fn test_importance_defaults_to_medium() {
        assert_eq!(EventImportance::default(), EventImportance::Medium);
        assert!("urgent".parse::<EventImportance>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_values() {
        let json = serde_json::to_string(&EventCategory::Divine).unwrap();
        assert_eq!(json, "\"divine\"");
        let parsed: EventImportance = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(parsed, EventImportance::Critical);
        assert!(serde_json::from_str::<EventCategory>("\"mystic\"").is_err());
    }
}
