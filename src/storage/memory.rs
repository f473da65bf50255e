//! In-memory backend

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::EventBackend;
use crate::error::ArchiveResult;
use crate::types::Event;

/// Process-local storage; contents vanish when the process exits
pub struct MemoryBackend {
    events: RwLock<BTreeMap<u64, Event>>,
    next_id: AtomicU64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBackend for MemoryBackend {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn allocate_id(&self) -> ArchiveResult<u64> {
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn insert(&self, event: &Event) -> ArchiveResult<()> {
        self.events.write().insert(event.id, event.clone());
        Ok(())
    }

    fn fetch(&self, id: u64) -> ArchiveResult<Option<Event>> {
        Ok(self.events.read().get(&id).cloned())
    }

    fn replace(&self, event: &Event) -> ArchiveResult<bool> {
        let mut events = self.events.write();
        match events.get_mut(&event.id) {
            Some(slot) => {
                *slot = event.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, id: u64) -> ArchiveResult<bool> {
        Ok(self.events.write().remove(&id).is_some())
    }

    fn scan(&self) -> ArchiveResult<Vec<Event>> {
        Ok(self.events.read().values().cloned().collect())
    }

    fn count(&self) -> ArchiveResult<usize> {
        Ok(self.events.read().len())
    }
}
