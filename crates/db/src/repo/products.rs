//! `Products` table operations.

use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;

use shoplytics_core::ProductId;

use super::INSERT_CHUNK_ROWS;
use crate::RepositoryError;
use crate::models::NewProduct;

/// Insert one product and return its ID.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
#[instrument(skip(conn, product), fields(name = %product.name))]
pub async fn insert_product(
    conn: &mut PgConnection,
    product: &NewProduct,
) -> Result<ProductId, RepositoryError> {
    let id = sqlx::query_scalar(
        r"
        INSERT INTO Products (name, category, price, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING product_id
        ",
    )
    .bind(&product.name)
    .bind(product.category)
    .bind(product.price)
    .bind(product.created_at)
    .fetch_one(conn)
    .await?;

    Ok(id)
}

/// Insert products in batches.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a batch fails.
#[instrument(skip(conn, products), fields(count = products.len()))]
pub async fn insert_products(
    conn: &mut PgConnection,
    products: &[NewProduct],
) -> Result<u64, RepositoryError> {
    let mut inserted = 0u64;

    for chunk in products.chunks(INSERT_CHUNK_ROWS) {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO Products (name, category, price, created_at) ");
        builder.push_values(chunk, |mut row, product| {
            row.push_bind(&product.name)
                .push_bind(product.category)
                .push_bind(product.price)
                .push_bind(product.created_at);
        });

        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
    }

    Ok(inserted)
}

/// All product IDs, ascending.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn product_ids(conn: &mut PgConnection) -> Result<Vec<ProductId>, RepositoryError> {
    let ids = sqlx::query_scalar("SELECT product_id FROM Products ORDER BY product_id")
        .fetch_all(conn)
        .await?;
    Ok(ids)
}
