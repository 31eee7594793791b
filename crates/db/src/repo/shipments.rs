//! `Shipments` table operations.

use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;

use shoplytics_core::ShipmentId;

use super::INSERT_CHUNK_ROWS;
use crate::RepositoryError;
use crate::models::NewShipment;

/// Insert one shipment and return its ID.
///
/// # Errors
///
/// Returns `RepositoryError::Constraint` if the order does not exist.
#[instrument(skip(conn, shipment), fields(order_id = %shipment.order_id))]
pub async fn insert_shipment(
    conn: &mut PgConnection,
    shipment: &NewShipment,
) -> Result<ShipmentId, RepositoryError> {
    let id = sqlx::query_scalar(
        r"
        INSERT INTO Shipments (order_id, shipped_date, delivery_date, shipping_method, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING shipment_id
        ",
    )
    .bind(shipment.order_id)
    .bind(shipment.shipped_date)
    .bind(shipment.delivery_date)
    .bind(shipment.shipping_method)
    .bind(shipment.status)
    .fetch_one(conn)
    .await?;

    Ok(id)
}

/// Insert shipments in batches.
///
/// # Errors
///
/// Returns `RepositoryError::Constraint` if an order reference is dangling.
#[instrument(skip(conn, shipments), fields(count = shipments.len()))]
pub async fn insert_shipments(
    conn: &mut PgConnection,
    shipments: &[NewShipment],
) -> Result<u64, RepositoryError> {
    let mut inserted = 0u64;

    for chunk in shipments.chunks(INSERT_CHUNK_ROWS) {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "INSERT INTO Shipments (order_id, shipped_date, delivery_date, shipping_method, status) ",
        );
        builder.push_values(chunk, |mut row, shipment| {
            row.push_bind(shipment.order_id)
                .push_bind(shipment.shipped_date)
                .push_bind(shipment.delivery_date)
                .push_bind(shipment.shipping_method)
                .push_bind(shipment.status);
        });

        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
    }

    Ok(inserted)
}
