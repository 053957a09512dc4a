//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `auth` - Account directory: registration and password login
//! - `inventory` - Product list, totals, and the removal prompt
//! - `workbench` - Both of the above behind one lock

pub mod auth;
pub mod inventory;
pub mod workbench;

pub use auth::{AccountDirectory, AuthError};
pub use inventory::{InventoryEntry, InventoryError, InventoryStore};
pub use workbench::Workbench;
