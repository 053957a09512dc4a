//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::StockroomConfig;
use crate::db::{FileStore, KeyValueStore, StoreError};
use crate::services::Workbench;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The [`Workbench`] sits behind
/// one async mutex, so requests are handled one at a time.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StockroomConfig,
    workbench: Arc<Mutex<Workbench>>,
}

impl AppState {
    /// Create a new application state over `store`.
    #[must_use]
    pub fn new(config: StockroomConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                workbench: Arc::new(Mutex::new(Workbench::open(store))),
            }),
        }
    }

    /// Create application state backed by the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the data directory cannot be created.
    pub fn open(config: StockroomConfig) -> Result<Self, StoreError> {
        let store = FileStore::open(&config.data_dir)?;
        tracing::info!(data_dir = %store.root().display(), "Opened data directory");
        Ok(Self::new(config, Arc::new(store)))
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StockroomConfig {
        &self.inner.config
    }

    /// Get the guarded workbench.
    #[must_use]
    pub fn workbench(&self) -> &Arc<Mutex<Workbench>> {
        &self.inner.workbench
    }
}
