//! `Customers` table operations.

use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use shoplytics_core::CustomerId;

use super::INSERT_CHUNK_ROWS;
use crate::RepositoryError;
use crate::models::NewCustomer;

/// Insert one customer and return its ID.
///
/// # Errors
///
/// Returns `RepositoryError::Constraint` with `ConstraintKind::Unique` if the
/// email is already taken.
#[instrument(skip(conn, customer), fields(email = %customer.email))]
pub async fn insert_customer(
    conn: &mut PgConnection,
    customer: &NewCustomer,
) -> Result<CustomerId, RepositoryError> {
    let id = sqlx::query_scalar(
        r"
        INSERT INTO Customers (first_name, last_name, email, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING customer_id
        ",
    )
    .bind(&customer.first_name)
    .bind(&customer.last_name)
    .bind(&customer.email)
    .bind(customer.created_at)
    .fetch_one(conn)
    .await?;

    Ok(id)
}

/// Insert customers in batches, skipping any whose email already exists.
///
/// Returns the number of rows actually inserted.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a batch fails.
#[instrument(skip(conn, customers), fields(count = customers.len()))]
pub async fn insert_customers(
    conn: &mut PgConnection,
    customers: &[NewCustomer],
) -> Result<u64, RepositoryError> {
    let mut inserted = 0u64;

    for chunk in customers.chunks(INSERT_CHUNK_ROWS) {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO Customers (first_name, last_name, email, created_at) ");
        builder.push_values(chunk, |mut row, customer| {
            row.push_bind(&customer.first_name)
                .push_bind(&customer.last_name)
                .push_bind(&customer.email)
                .push_bind(customer.created_at);
        });
        builder.push(" ON CONFLICT (email) DO NOTHING");

        let result = builder.build().execute(&mut *conn).await?;
        inserted += result.rows_affected();
    }

    let skipped = customers.len() as u64 - inserted;
    if skipped > 0 {
        debug!(skipped, "Skipped customers with existing emails");
    }
    Ok(inserted)
}

/// All customer IDs, ascending.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn customer_ids(conn: &mut PgConnection) -> Result<Vec<CustomerId>, RepositoryError> {
    let ids = sqlx::query_scalar("SELECT customer_id FROM Customers ORDER BY customer_id")
        .fetch_all(conn)
        .await?;
    Ok(ids)
}
