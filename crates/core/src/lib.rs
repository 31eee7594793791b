//! Shoplytics Core - Shared domain types.
//!
//! This crate provides the types used across all Shoplytics components:
//! - `db` - Schema migrations, repositories, reports and the data generator
//! - `cli` - Command-line tools for migrations, seeding and reporting
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access.
//! Every table invariant that the database enforces with a constraint has a
//! checked constructor here, so invalid rows are rejected before they are sent.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, ratings, quantities and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
