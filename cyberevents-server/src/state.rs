use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use cyberevents_core::EventStore;

/// Shared application state.
///
/// The store sits behind a mutex only because axum handlers require
/// `Send + Sync` state; within a request cycle there is exactly one logical
/// reader and no writer.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<EventStore>>,
}

impl AppState {
    pub fn new(data_file: &Path) -> Self {
        AppState {
            store: Arc::new(Mutex::new(EventStore::new(data_file))),
        }
    }

    pub async fn store(&self) -> MutexGuard<'_, EventStore> {
        self.store.lock().await
    }
}
