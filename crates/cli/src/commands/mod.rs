//! CLI command implementations.
//!
//! Commands work directly on the data directory, bypassing the dashboard
//! session. Run them while the dashboard is stopped: the dashboard only
//! reads the data directory at startup and would overwrite changes made
//! underneath it.

pub mod inventory;
pub mod user;

use std::path::PathBuf;
use std::sync::Arc;

use stockroom_admin::config::{ConfigError, StockroomConfig};
use stockroom_admin::db::{FileStore, KeyValueStore, RepositoryError, StoreError};
use stockroom_admin::services::{AuthError, InventoryError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data directory cannot be opened.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Stored data cannot be read.
    #[error("Data error: {0}")]
    Repository(#[from] RepositoryError),

    /// Account operation was rejected.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Inventory operation was rejected.
    #[error("{0}")]
    Inventory(#[from] InventoryError),
}

/// Open the key-value store at `data_dir`, or at `STOCKROOM_DATA_DIR` when
/// no directory is given.
///
/// # Errors
///
/// Returns `CommandError` if the configuration is invalid or the directory
/// cannot be created.
pub fn open_store(data_dir: Option<PathBuf>) -> Result<Arc<dyn KeyValueStore>, CommandError> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => StockroomConfig::from_env()?.data_dir,
    };
    tracing::debug!(data_dir = %data_dir.display(), "Opening data directory");
    Ok(Arc::new(FileStore::open(data_dir)?))
}
