//! Context types for dependency injection in REST API handlers

use std::sync::Arc;

use racelab_core::Dispatcher;

/// Application context shared by all handlers.
///
/// Holds the process-wide dispatcher; created once at startup and cloned
/// (cheaply, via `Arc`) into each handler invocation.
#[derive(Clone)]
pub struct AppContext {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppContext {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}
