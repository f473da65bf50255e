//! Data types for the Heavenly Archive
//!
//! This module contains the event record, its closed taxonomy and the
//! aggregate statistics type.

mod event;
mod stats;
mod taxonomy;

pub(crate) use event::double_option;
pub use event::{Event, EventUpdate, NewEvent};
pub use stats::EventStats;
pub use taxonomy::{EventCategory, EventImportance};
