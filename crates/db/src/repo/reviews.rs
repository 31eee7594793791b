//! `Reviews` table operations.

use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;

use shoplytics_core::ReviewId;

use super::INSERT_CHUNK_ROWS;
use crate::RepositoryError;
use crate::models::NewReview;

/// Insert one review and return its ID.
///
/// # Errors
///
/// Returns `RepositoryError::Constraint` if the customer or product does
/// not exist.
#[instrument(skip(conn, review), fields(product_id = %review.product_id))]
pub async fn insert_review(
    conn: &mut PgConnection,
    review: &NewReview,
) -> Result<ReviewId, RepositoryError> {
    let id = sqlx::query_scalar(
        r"
        INSERT INTO Reviews (customer_id, product_id, rating, comment, review_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING review_id
        ",
    )
    .bind(review.customer_id)
    .bind(review.product_id)
    .bind(review.rating)
    .bind(&review.comment)
    .bind(review.review_date)
    .fetch_one(conn)
    .await?;

    Ok(id)
}

/// Insert reviews in batches.
///
/// # Errors
///
/// Returns `RepositoryError::Constraint` if a reference is dangling.
#[instrument(skip(conn, reviews), fields(count = reviews.len()))]
pub async fn insert_reviews(
    conn: &mut PgConnection,
    reviews: &[NewReview],
) -> Result<u64, RepositoryError> {
    let mut inserted = 0u64;

    for chunk in reviews.chunks(INSERT_CHUNK_ROWS) {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "INSERT INTO Reviews (customer_id, product_id, rating, comment, review_date) ",
        );
        builder.push_values(chunk, |mut row, review| {
            row.push_bind(review.customer_id)
                .push_bind(review.product_id)
                .push_bind(review.rating)
                .push_bind(&review.comment)
                .push_bind(review.review_date);
        });

        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
    }

    Ok(inserted)
}
