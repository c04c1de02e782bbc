//! Core business logic for Daftar.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `coding` - Hierarchical chart-of-accounts coding scheme
//! - `document` - Double-entry journal document balancing
//! - `reports` - Financial report aggregation

pub mod coding;
pub mod document;
pub mod reports;
