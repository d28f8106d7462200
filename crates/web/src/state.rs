use std::sync::Arc;

use storage::Store;
use storage::alerts::AlertSink;
use storage::clock::Clock;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    alerts: Arc<dyn AlertSink>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: Store, alerts: Arc<dyn AlertSink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            alerts,
            clock,
        }
    }

    pub fn alerts(&self) -> &dyn AlertSink {
        self.alerts.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
