//! Stockroom Core - Shared types library.
//!
//! This crate provides common types used across all Stockroom components:
//! - `admin` - Inventory dashboard served over HTTP
//! - `cli` - Command-line tools for managing users and inventory offline
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, usernames, prices and
//!   password digests, plus the product record and its validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
