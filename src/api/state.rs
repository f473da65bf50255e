//! Shared application state for request handlers

use std::sync::Arc;

use crate::event_store::EventStore;
use crate::facade::QueryFacade;

/// State handed to every handler
pub struct AppState {
    pub facade: QueryFacade,
}

impl AppState {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self {
            facade: QueryFacade::new(store),
        }
    }
}
