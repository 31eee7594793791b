//! Shoplytics DB - Schema, repositories, reports and data generation.
//!
//! # Database
//!
//! ## Tables
//!
//! - `Customers` - Shoppers, unique by email
//! - `Products` - Catalog items with a category and a unit price
//! - `Orders` - Order headers referencing a customer
//! - `Order_Items` - Order lines, keyed by `(order_id, product_id)`
//! - `Reviews` - Product ratings (1-5) with an optional comment
//! - `Shipments` - Carrier and delivery tracking for shipped orders
//!
//! # Modules
//!
//! - [`schema`] - Embedded migrations and per-table row counts
//! - [`repo`] - Inserts and ID lookups, one module per table
//! - [`reports`] - The analytics queries and their typed rows
//! - [`generator`] - Synthetic data and the transactional seeding run
//! - [`config`] - Connection settings from the environment

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod repo;
pub mod reports;
pub mod schema;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use config::{ConfigError, ConnectionTarget, DatabaseConfig};
pub use error::{ConstraintKind, RepositoryError};
pub use schema::{MIGRATOR, Table, run_migrations, table_counts};

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connect options are invalid or the
/// connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = config.max_connections,
        "Connecting to database"
    );
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(config.connect_options()?)
        .await
}
