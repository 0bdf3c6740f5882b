use std::sync::Arc;

use foster_directory_core::events::EventBus;
use foster_directory_core::DirectoryStore;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: Arc<dyn DirectoryStore>,
    event_bus: EventBus,
}

impl AppState {
    pub fn new(store: Arc<dyn DirectoryStore>, event_bus: EventBus) -> Self {
        Self {
            inner: Arc::new(InnerState { store, event_bus }),
        }
    }

    pub fn store(&self) -> &dyn DirectoryStore {
        self.inner.store.as_ref()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }
}
