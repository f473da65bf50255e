//! Heavenly Archive
//!
//! An event logging and achievement tracking service: a persisted `Event`
//! record with a fixed taxonomy, served over an HTTP API and a CLI.
//!
//! # Features
//!
//! - **Closed taxonomy**: six categories, five importance levels
//! - **Thread-Safe**: per-record write locks, snapshot reads
//! - **Pluggable storage**: in-memory or atomic JSON-lines file
//! - **Queries**: newest-first listing, category filter, text search, stats
//!
//! # Modules
//!
//! - `types`: Core data structures (Event, NewEvent, EventUpdate, EventStats)
//! - `validation`: Field rules and column limits
//! - `storage`: Persistence backends behind the `EventBackend` trait
//! - `event_store`: The store enforcing invariants over a backend
//! - `facade`: Parsing and presentation for the HTTP and CLI bindings
//! - `api`: Axum router and handlers
//! - `cli`: Command-line parsing and text output
//! - `config`: Environment-driven settings
//!
//! # Example
//!
//! ```no_run
//! use heavenly_archive::{EventCategory, EventStore, NewEvent};
//!
//! let store = EventStore::open_file("archive.jsonl").unwrap();
//! let event = store
//!     .create(NewEvent::new("Completed First Project", EventCategory::Victory))
//!     .unwrap();
//! assert_eq!(store.get(event.id).unwrap().title, "Completed First Project");
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod event_store;
pub mod facade;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use config::ArchiveConfig;
pub use error::{ArchiveError, ArchiveResult};
pub use event_store::EventStore;
pub use facade::QueryFacade;
pub use storage::{EventBackend, JsonlBackend, MemoryBackend};
pub use types::{Event, EventCategory, EventImportance, EventStats, EventUpdate, NewEvent};

/// Application display name
pub const APP_NAME: &str = "Heavenly Archive";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
