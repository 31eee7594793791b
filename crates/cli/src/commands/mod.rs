//! Subcommand implementations.
//!
//! Each command takes the shared pool and, when it prints anything, an
//! output writer so tests can capture what it writes.

pub mod counts;
pub mod migrate;
pub mod report;
pub mod seed;
