//! Aggregate counts over stored events

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Event, EventCategory, EventImportance};

/// Totals per category and importance, zero-filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    pub total: usize,
    pub by_category: BTreeMap<EventCategory, usize>,
    pub by_importance: BTreeMap<EventImportance, usize>,
}

impl Default for EventStats {
    fn default() -> Self {
        Self {
            total: 0,
            by_category: EventCategory::ALL.into_iter().map(|c| (c, 0)).collect(),
            by_importance: EventImportance::ALL.into_iter().map(|i| (i, 0)).collect(),
        }
    }
}

impl EventStats {
    /// Count a single event
    pub fn record(&mut self, event: &Event) {
        self.total += 1;
        *self.by_category.entry(event.category).or_insert(0) += 1;
        *self.by_importance.entry(event.importance).or_insert(0) += 1;
    }

    /// Combine two partial tallies (used by parallel folds)
    pub fn merge(mut self, other: EventStats) -> Self {
        self.total += other.total;
        for (category, count) in other.by_category {
            *self.by_category.entry(category).or_insert(0) += count;
        }
        for (importance, count) in other.by_importance {
            *self.by_importance.entry(importance).or_insert(0) += count;
        }
        self
    }

    pub fn category_count(&self, category: EventCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    pub fn importance_count(&self, importance: EventImportance) -> usize {
        self.by_importance.get(&importance).copied().unwrap_or(0)
    }
}
