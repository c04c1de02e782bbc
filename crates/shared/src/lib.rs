//! Shared types and configuration for Daftar.
//!
//! This crate holds everything the other crates agree on: typed IDs
//! and configuration loading. Domain errors live next to the rules
//! they guard, in `daftar-core`.

pub mod config;
pub mod types;

pub use config::{AppConfig, ServerConfig};
