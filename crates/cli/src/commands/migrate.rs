//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shop-cli migrate
//! ```
//!
//! Applies `crates/db/migrations/` (tables, then indexes). Already-applied
//! migrations are skipped.

use sqlx::PgPool;

use shoplytics_db::RepositoryError;

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails.
pub async fn run(pool: &PgPool) -> Result<(), RepositoryError> {
    tracing::info!("Running migrations...");
    shoplytics_db::run_migrations(pool).await?;
    tracing::info!("Migrations complete!");
    Ok(())
}
