//! `Orders` and `Order_Items` table operations.

use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use shoplytics_core::OrderId;

use super::INSERT_CHUNK_ROWS;
use crate::RepositoryError;
use crate::models::{NewOrder, NewOrderItem, OrderInfo};

/// Insert one order header and return its ID.
///
/// # Errors
///
/// Returns `RepositoryError::Constraint` with `ConstraintKind::ForeignKey`
/// if the customer does not exist.
#[instrument(skip(conn, order), fields(customer_id = %order.customer_id))]
pub async fn insert_order(
    conn: &mut PgConnection,
    order: &NewOrder,
) -> Result<OrderId, RepositoryError> {
    let id = sqlx::query_scalar(
        r"
        INSERT INTO Orders (customer_id, order_date, status)
        VALUES ($1, $2, $3)
        RETURNING order_id
        ",
    )
    .bind(order.customer_id)
    .bind(order.order_date)
    .bind(order.status)
    .fetch_one(conn)
    .await?;

    Ok(id)
}

/// Insert order headers in batches.
///
/// Returns the generated IDs in the same order as `orders`.
///
/// # Errors
///
/// Returns `RepositoryError::Constraint` if a customer reference is dangling.
#[instrument(skip(conn, orders), fields(count = orders.len()))]
pub async fn insert_orders(
    conn: &mut PgConnection,
    orders: &[NewOrder],
) -> Result<Vec<OrderId>, RepositoryError> {
    let mut ids = Vec::with_capacity(orders.len());

    for chunk in orders.chunks(INSERT_CHUNK_ROWS) {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO Orders (customer_id, order_date, status) ");
        builder.push_values(chunk, |mut row, order| {
            row.push_bind(order.customer_id)
                .push_bind(order.order_date)
                .push_bind(order.status);
        });
        builder.push(" RETURNING order_id");

        let chunk_ids: Vec<OrderId> = builder
            .build_query_scalar()
            .fetch_all(&mut *conn)
            .await?;
        ids.extend(chunk_ids);
    }

    debug!(inserted = ids.len(), "Inserted orders");
    Ok(ids)
}

/// Insert order lines in batches.
///
/// # Errors
///
/// Returns `RepositoryError::Constraint` for a non-positive quantity, a
/// repeated `(order_id, product_id)` pair, or a dangling reference.
#[instrument(skip(conn, items), fields(count = items.len()))]
pub async fn insert_order_items(
    conn: &mut PgConnection,
    items: &[NewOrderItem],
) -> Result<u64, RepositoryError> {
    let mut inserted = 0u64;

    for chunk in items.chunks(INSERT_CHUNK_ROWS) {
        let mut builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("INSERT INTO Order_Items (order_id, product_id, quantity) ");
        builder.push_values(chunk, |mut row, item| {
            row.push_bind(item.order_id)
                .push_bind(item.product_id)
                .push_bind(item.quantity);
        });

        inserted += builder.build().execute(&mut *conn).await?.rows_affected();
    }

    Ok(inserted)
}

/// All order IDs, ascending.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn order_ids(conn: &mut PgConnection) -> Result<Vec<OrderId>, RepositoryError> {
    let ids = sqlx::query_scalar("SELECT order_id FROM Orders ORDER BY order_id")
        .fetch_all(conn)
        .await?;
    Ok(ids)
}

/// Order ID, date and status, for all orders or only the given IDs.
///
/// An empty `filter` slice is treated the same as `None`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn orders_info(
    conn: &mut PgConnection,
    filter: Option<&[OrderId]>,
) -> Result<Vec<OrderInfo>, RepositoryError> {
    let rows = match filter {
        Some(ids) if !ids.is_empty() => {
            let raw: Vec<i32> = ids.iter().map(OrderId::as_i32).collect();
            sqlx::query_as::<_, OrderInfo>(
                r"
                SELECT order_id, order_date, status
                FROM Orders
                WHERE order_id = ANY($1)
                ORDER BY order_id
                ",
            )
            .bind(raw)
            .fetch_all(conn)
            .await?
        }
        _ => {
            sqlx::query_as::<_, OrderInfo>(
                "SELECT order_id, order_date, status FROM Orders ORDER BY order_id",
            )
            .fetch_all(conn)
            .await?
        }
    };

    Ok(rows)
}
