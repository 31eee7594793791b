//! Row-count summary.

use std::io::Write;

use sqlx::PgPool;

use crate::formatter;

/// Print the row count of every table. Tables that cannot be counted show
/// `N/A`.
///
/// # Errors
///
/// Returns `std::io::Error` if writing to `out` fails.
pub async fn run<W: Write>(pool: &PgPool, out: &mut W) -> std::io::Result<()> {
    let counts = shoplytics_db::table_counts(pool).await;
    writeln!(out, "{}", formatter::format_counts(&counts))
}
