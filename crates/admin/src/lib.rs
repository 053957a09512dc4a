//! Stockroom dashboard library.
//!
//! This crate provides the dashboard functionality as a library,
//! allowing it to be tested and reused by the management CLI.
//!
//! # Layers
//!
//! - `db` - Key-value persistence and collection repositories
//! - `services` - Account directory, inventory store, and the workbench
//!   that ties them to the session
//! - `routes` - Axum handlers and Askama views

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
