//! Schema migrations and table metadata.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/db/migrations/` and embedded at compile
//! time. Run them via:
//! ```bash
//! cargo run -p shoplytics-cli -- migrate
//! ```
//!
//! 1. `create_tables` - the six tables with their keys and check constraints
//! 2. `create_indexes` - join/group-by indexes on `Orders(customer_id)`,
//!    `Order_Items(order_id)`, `Order_Items(product_id)`, `Products(category)`

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{info, instrument};

use crate::RepositoryError;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply all pending migrations.
///
/// Already-applied migrations are skipped, so this is safe to run repeatedly.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails or the applied
/// history diverges from the embedded one.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    info!(migrations = MIGRATOR.iter().count(), "Running schema migrations");
    MIGRATOR.run(pool).await?;
    info!("Schema migrations complete");
    Ok(())
}

/// The tables created by the schema, parents before children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Customers,
    Products,
    Orders,
    OrderItems,
    Reviews,
    Shipments,
}

impl Table {
    /// All tables in dependency order.
    pub const ALL: [Self; 6] = [
        Self::Customers,
        Self::Products,
        Self::Orders,
        Self::OrderItems,
        Self::Reviews,
        Self::Shipments,
    ];

    /// Table name as written in the DDL.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Customers => "Customers",
            Self::Products => "Products",
            Self::Orders => "Orders",
            Self::OrderItems => "Order_Items",
            Self::Reviews => "Reviews",
            Self::Shipments => "Shipments",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Count the rows in `table`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn count_rows<'e, E>(executor: E, table: Table) -> Result<i64, RepositoryError>
where
    E: sqlx::PgExecutor<'e>,
{
    // Table names come from a closed enum, never from input
    let sql = format!("SELECT COUNT(*) FROM {}", table.name());
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(executor).await?;
    Ok(count)
}

/// Row counts for every table.
///
/// A table whose count fails is reported as `None` instead of aborting the
/// whole summary.
pub async fn table_counts(pool: &PgPool) -> Vec<(Table, Option<i64>)> {
    let mut counts = Vec::with_capacity(Table::ALL.len());
    for table in Table::ALL {
        let count = match count_rows(pool, table).await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!(%table, error = %e, "Failed to count rows");
                None
            }
        };
        counts.push((table, count));
    }
    counts
}
