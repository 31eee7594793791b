//! Insert and lookup operations, one module per table.
//!
//! Single-row inserts (`insert_customer`, ...) surface constraint
//! violations as [`RepositoryError::Constraint`](crate::RepositoryError).
//! Batch inserts (`insert_customers`, ...) write multi-row `INSERT ... VALUES`
//! statements in chunks of [`INSERT_CHUNK_ROWS`] and are what the generator
//! uses.
//!
//! Every function takes `&mut PgConnection` so callers can run a sequence of
//! inserts inside one transaction (`&mut *tx`).

pub mod customers;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod shipments;

pub use customers::{customer_ids, insert_customer, insert_customers};
pub use orders::{insert_order, insert_order_items, insert_orders, order_ids, orders_info};
pub use products::{insert_product, insert_products, product_ids};
pub use reviews::{insert_review, insert_reviews};
pub use shipments::{insert_shipment, insert_shipments};

/// Maximum rows per multi-row `INSERT`.
///
/// Keeps the bind count (rows x columns) well under the `PostgreSQL`
/// protocol limit of 65535 parameters.
pub const INSERT_CHUNK_ROWS: usize = 1000;
