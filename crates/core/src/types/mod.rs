//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for the inventory domain.

pub mod credential;
pub mod id;
pub mod price;
pub mod product;
pub mod stats;
pub mod user;

pub use credential::PasswordDigest;
pub use id::*;
pub use price::{Price, PriceError, format_amount};
pub use product::{Product, ProductDraft, QuantityError, ValidationError};
pub use stats::InventoryStats;
pub use user::{UserRecord, Username, UsernameError};
