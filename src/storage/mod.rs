//! Persistence backends for the event store
//!
//! The store talks to storage only through [`EventBackend`]. Two backends
//! ship with the crate:
//!
//! - [`MemoryBackend`]: process-local, used by tests and ephemeral runs
//! - [`JsonlBackend`]: a JSON-lines file rewritten atomically on each write
//!
//! Backends own their internal locking. Each record is replaced whole, so a
//! reader never observes a half-applied update.

mod file;
mod memory;
mod tags;

pub use file::{JsonlBackend, FILE_FORMAT_VERSION};
pub use memory::MemoryBackend;
pub use tags::{decode_tags, encode_tags};

use crate::error::ArchiveResult;
use crate::types::Event;

/// Abstract persistence contract, keyed by event id
pub trait EventBackend: Send + Sync {
    /// Short description for logs (backend kind and location)
    fn describe(&self) -> String;

    /// Reserve a fresh id. Ids are never handed out twice, even after the
    /// event that used one is deleted.
    fn allocate_id(&self) -> ArchiveResult<u64>;

    /// Store a new record
    fn insert(&self, event: &Event) -> ArchiveResult<()>;

    /// Look up a record by id
    fn fetch(&self, id: u64) -> ArchiveResult<Option<Event>>;

    /// Overwrite an existing record. Returns `false` when the id is absent.
    fn replace(&self, event: &Event) -> ArchiveResult<bool>;

    /// Delete a record. Returns `false` when the id is absent.
    fn remove(&self, id: u64) -> ArchiveResult<bool>;

    /// Copy of every stored record, in id order
    fn scan(&self) -> ArchiveResult<Vec<Event>>;

    /// Number of stored records
    fn count(&self) -> ArchiveResult<usize> {
        Ok(self.scan()?.len())
    }
}
