//! Writing generated rows to the database.
//!
//! The `generate_*` functions each fill one table (orders also fill
//! `Order_Items`). [`seed`] runs a whole [`SeedPlan`] inside a single
//! transaction, so a failure part-way leaves the database untouched.

use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use tracing::{info, instrument};

use shoplytics_core::{CustomerId, EmailError, OrderId, ProductId};

use super::DataGenerator;
use crate::RepositoryError;
use crate::models::OrderInfo;
use crate::repo;
use crate::schema::{Table, count_rows};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A child table was requested before its parent has any rows.
    #[error("no {0} found; generate {0} first")]
    MissingParent(&'static str),

    /// The generator assembled an address that fails validation.
    #[error("generated an invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

impl From<sqlx::Error> for SeedError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(err.into())
    }
}

/// Existing parent keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityIds {
    pub customers: Vec<CustomerId>,
    pub products: Vec<ProductId>,
    pub orders: Vec<OrderId>,
}

/// Collect customer, product and order IDs.
///
/// # Errors
///
/// Returns `SeedError::MissingParent` if there are no customers or no
/// products. Orders may be empty.
pub async fn curate_ids(conn: &mut PgConnection) -> Result<EntityIds, SeedError> {
    let customers = repo::customer_ids(conn).await?;
    if customers.is_empty() {
        return Err(SeedError::MissingParent("customers"));
    }

    let products = repo::product_ids(conn).await?;
    if products.is_empty() {
        return Err(SeedError::MissingParent("products"));
    }

    let orders = repo::order_ids(conn).await?;

    Ok(EntityIds {
        customers,
        products,
        orders,
    })
}

/// Generate and insert `n` customers. Returns the number inserted, which
/// is lower than `n` when an email already exists.
///
/// # Errors
///
/// Returns `SeedError` if generation or the insert fails.
#[instrument(skip(conn, generator))]
pub async fn generate_customers(
    conn: &mut PgConnection,
    generator: &mut DataGenerator,
    n: usize,
) -> Result<u64, SeedError> {
    let customers = generator.make_customers(n)?;
    Ok(repo::insert_customers(conn, &customers).await?)
}

/// Generate and insert `n` products.
///
/// # Errors
///
/// Returns `SeedError::Repository` if the insert fails.
#[instrument(skip(conn, generator))]
pub async fn generate_products(
    conn: &mut PgConnection,
    generator: &mut DataGenerator,
    n: usize,
) -> Result<u64, SeedError> {
    let products = generator.make_products(n);
    Ok(repo::insert_products(conn, &products).await?)
}

/// Orders written by [`generate_orders`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeededOrders {
    pub order_ids: Vec<OrderId>,
    pub items: u64,
}

/// Generate and insert `n` orders, then their line items.
///
/// # Errors
///
/// Returns `SeedError::MissingParent` if either ID list is empty.
#[instrument(skip(conn, generator, customer_ids, product_ids))]
pub async fn generate_orders(
    conn: &mut PgConnection,
    generator: &mut DataGenerator,
    customer_ids: &[CustomerId],
    product_ids: &[ProductId],
    n: usize,
) -> Result<SeededOrders, SeedError> {
    if customer_ids.is_empty() {
        return Err(SeedError::MissingParent("customers"));
    }
    if product_ids.is_empty() {
        return Err(SeedError::MissingParent("products"));
    }

    let orders = generator.make_orders(customer_ids, n);
    let order_ids = repo::insert_orders(conn, &orders).await?;
    let items = if order_ids.is_empty() {
        0
    } else {
        let items = generator.make_order_items(&order_ids, product_ids);
        repo::insert_order_items(conn, &items).await?
    };

    Ok(SeededOrders { order_ids, items })
}

/// Generate and insert `n` reviews.
///
/// # Errors
///
/// Returns `SeedError::MissingParent` if either ID list is empty.
#[instrument(skip(conn, generator, customer_ids, product_ids))]
pub async fn generate_reviews(
    conn: &mut PgConnection,
    generator: &mut DataGenerator,
    customer_ids: &[CustomerId],
    product_ids: &[ProductId],
    n: usize,
) -> Result<u64, SeedError> {
    if customer_ids.is_empty() {
        return Err(SeedError::MissingParent("customers"));
    }
    if product_ids.is_empty() {
        return Err(SeedError::MissingParent("products"));
    }

    let reviews = generator.make_reviews(customer_ids, product_ids, n);
    Ok(repo::insert_reviews(conn, &reviews).await?)
}

/// Generate and insert shipments for shipped and delivered orders.
///
/// `orders` defaults to every order in the table. `limit` caps the number
/// of shipments written; `None` writes one per eligible order.
///
/// # Errors
///
/// Returns `SeedError::MissingParent` if there are no orders.
#[instrument(skip(conn, generator, orders))]
pub async fn generate_shipments(
    conn: &mut PgConnection,
    generator: &mut DataGenerator,
    orders: Option<Vec<OrderInfo>>,
    limit: Option<usize>,
) -> Result<u64, SeedError> {
    let orders = match orders {
        Some(orders) => orders,
        None => repo::orders_info(conn, None).await?,
    };
    if orders.is_empty() {
        return Err(SeedError::MissingParent("orders"));
    }

    let mut shipments = generator.make_shipments(&orders);
    if let Some(limit) = limit {
        shipments.truncate(limit);
    }
    Ok(repo::insert_shipments(conn, &shipments).await?)
}

/// How many shipments a seeding run should write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShipmentPlan {
    #[default]
    Skip,
    /// At most this many.
    UpTo(usize),
    /// One per shipped or delivered order.
    All,
}

/// Row counts to generate per table. Zero skips a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedPlan {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    pub reviews: usize,
    pub shipments: ShipmentPlan,
}

impl SeedPlan {
    /// Whether the plan would write nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customers == 0
            && self.products == 0
            && self.orders == 0
            && self.reviews == 0
            && matches!(self.shipments, ShipmentPlan::Skip | ShipmentPlan::UpTo(0))
    }
}

/// Rows inserted by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub customers: u64,
    pub products: u64,
    pub orders: u64,
    pub order_items: u64,
    pub reviews: u64,
    pub shipments: u64,
}

async fn log_total(conn: &mut PgConnection, table: Table) -> Result<(), SeedError> {
    let total = count_rows(conn, table).await?;
    info!(%table, total, "Table total");
    Ok(())
}

/// Execute `plan` in one transaction: customers, products, orders and
/// items, reviews, then shipments.
///
/// # Errors
///
/// Returns the first `SeedError`; nothing is committed in that case.
#[instrument(skip(pool, generator))]
pub async fn seed(
    pool: &PgPool,
    plan: SeedPlan,
    generator: &mut DataGenerator,
) -> Result<SeedSummary, SeedError> {
    let mut summary = SeedSummary::default();
    let mut tx = pool.begin().await?;

    if plan.customers > 0 {
        summary.customers = generate_customers(&mut *tx, generator, plan.customers).await?;
        info!(inserted = summary.customers, "Customers generated");
        log_total(&mut *tx, Table::Customers).await?;
    }

    if plan.products > 0 {
        summary.products = generate_products(&mut *tx, generator, plan.products).await?;
        info!(inserted = summary.products, "Products generated");
        log_total(&mut *tx, Table::Products).await?;
    }

    if plan.orders > 0 {
        let ids = curate_ids(&mut *tx).await?;
        let seeded =
            generate_orders(&mut *tx, generator, &ids.customers, &ids.products, plan.orders).await?;
        summary.orders = seeded.order_ids.len() as u64;
        summary.order_items = seeded.items;
        info!(
            orders = summary.orders,
            items = summary.order_items,
            "Orders generated"
        );
        log_total(&mut *tx, Table::Orders).await?;
        log_total(&mut *tx, Table::OrderItems).await?;
    }

    if plan.reviews > 0 {
        let ids = curate_ids(&mut *tx).await?;
        summary.reviews =
            generate_reviews(&mut *tx, generator, &ids.customers, &ids.products, plan.reviews)
                .await?;
        info!(inserted = summary.reviews, "Reviews generated");
        log_total(&mut *tx, Table::Reviews).await?;
    }

    let limit = match plan.shipments {
        ShipmentPlan::Skip | ShipmentPlan::UpTo(0) => None,
        ShipmentPlan::UpTo(n) => Some(Some(n)),
        ShipmentPlan::All => Some(None),
    };
    if let Some(limit) = limit {
        summary.shipments = generate_shipments(&mut *tx, generator, None, limit).await?;
        info!(inserted = summary.shipments, "Shipments generated");
        log_total(&mut *tx, Table::Shipments).await?;
    }

    tx.commit().await?;
    info!(?summary, "Seeding committed");
    Ok(summary)
}
