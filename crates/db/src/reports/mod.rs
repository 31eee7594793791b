//! Analytical reports over the e-commerce schema.
//!
//! Each report is one parameterless `SELECT` kept in `crates/db/queries/`
//! and embedded with `include_str!`, so the SQL text has a single home. The
//! engine does all joining and aggregation; this module only names the
//! queries and decodes their rows.
//!
//! | name | columns |
//! |---|---|
//! | `monthly-revenue` | month, total_revenue |
//! | `top-customers` | customer_id, first_name, last_name, total_spent |
//! | `average-order-value` | avg_order_value |
//! | `best-sellers` | product_id, name, total_units_sold |
//! | `category-revenue` | category, total_revenue |
//! | `repeat-customers` | customer_id, first_name, last_name, orders_count |
//! | `product-ratings` | product_id, name, avg_rating, review_count |
//! | `lifetime-value` | customer_id, first_name, last_name, lifetime_value |
//! | `recent-reviews` | review_id, customer_name, product_name, rating, comment, review_date |

mod rows;

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgRow;
use tracing::{debug, instrument};

use crate::RepositoryError;

pub use rows::{
    AverageOrderValue, BestSeller, CategoryRevenue, CustomerLifetimeValue, MonthlyRevenue,
    ProductRating, RecentReview, RepeatCustomer, TabularRow, TopCustomer,
};

/// The available reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    MonthlyRevenue,
    TopCustomers,
    AverageOrderValue,
    BestSellers,
    CategoryRevenue,
    RepeatCustomers,
    ProductRatings,
    LifetimeValue,
    RecentReviews,
}

impl ReportKind {
    /// Every report, in presentation order.
    pub const ALL: [Self; 9] = [
        Self::MonthlyRevenue,
        Self::TopCustomers,
        Self::AverageOrderValue,
        Self::BestSellers,
        Self::CategoryRevenue,
        Self::RepeatCustomers,
        Self::ProductRatings,
        Self::LifetimeValue,
        Self::RecentReviews,
    ];

    /// Command-line name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MonthlyRevenue => "monthly-revenue",
            Self::TopCustomers => "top-customers",
            Self::AverageOrderValue => "average-order-value",
            Self::BestSellers => "best-sellers",
            Self::CategoryRevenue => "category-revenue",
            Self::RepeatCustomers => "repeat-customers",
            Self::ProductRatings => "product-ratings",
            Self::LifetimeValue => "lifetime-value",
            Self::RecentReviews => "recent-reviews",
        }
    }

    /// Heading shown above the report output.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::MonthlyRevenue => "Monthly revenue trend",
            Self::TopCustomers => "Top customers by total spend",
            Self::AverageOrderValue => "Average order value",
            Self::BestSellers => "Best-selling products",
            Self::CategoryRevenue => "Revenue by category",
            Self::RepeatCustomers => "Repeat customers",
            Self::ProductRatings => "Average product ratings",
            Self::LifetimeValue => "Customer lifetime value",
            Self::RecentReviews => "Recent reviews",
        }
    }

    /// The report's SQL.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::MonthlyRevenue => include_str!("../../queries/monthly_revenue.sql"),
            Self::TopCustomers => include_str!("../../queries/top_customers.sql"),
            Self::AverageOrderValue => include_str!("../../queries/average_order_value.sql"),
            Self::BestSellers => include_str!("../../queries/best_sellers.sql"),
            Self::CategoryRevenue => include_str!("../../queries/category_revenue.sql"),
            Self::RepeatCustomers => include_str!("../../queries/repeat_customers.sql"),
            Self::ProductRatings => include_str!("../../queries/product_ratings.sql"),
            Self::LifetimeValue => include_str!("../../queries/lifetime_value.sql"),
            Self::RecentReviews => include_str!("../../queries/recent_reviews.sql"),
        }
    }

    /// Result column names, in order.
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::MonthlyRevenue => &["month", "total_revenue"],
            Self::TopCustomers => &["customer_id", "first_name", "last_name", "total_spent"],
            Self::AverageOrderValue => &["avg_order_value"],
            Self::BestSellers => &["product_id", "name", "total_units_sold"],
            Self::CategoryRevenue => &["category", "total_revenue"],
            Self::RepeatCustomers => &["customer_id", "first_name", "last_name", "orders_count"],
            Self::ProductRatings => &["product_id", "name", "avg_rating", "review_count"],
            Self::LifetimeValue => &["customer_id", "first_name", "last_name", "lifetime_value"],
            Self::RecentReviews => &[
                "review_id",
                "customer_name",
                "product_name",
                "rating",
                "comment",
                "review_date",
            ],
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|k| k.name()).collect();
                format!("unknown report: {s} (expected one of: {})", names.join(", "))
            })
    }
}

async fn fetch_rows<T>(pool: &PgPool, kind: ReportKind) -> Result<Vec<T>, RepositoryError>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    let rows = sqlx::query_as::<_, T>(kind.sql()).fetch_all(pool).await?;
    debug!(report = %kind, rows = rows.len(), "Report fetched");
    Ok(rows)
}

/// Revenue per calendar month, oldest month first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn monthly_revenue(pool: &PgPool) -> Result<Vec<MonthlyRevenue>, RepositoryError> {
    fetch_rows(pool, ReportKind::MonthlyRevenue).await
}

/// The ten customers with the highest total spend.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn top_customers(pool: &PgPool) -> Result<Vec<TopCustomer>, RepositoryError> {
    fetch_rows(pool, ReportKind::TopCustomers).await
}

/// Mean order total rounded to cents, or `None` without any order lines.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn average_order_value(pool: &PgPool) -> Result<Option<Decimal>, RepositoryError> {
    let row: AverageOrderValue = sqlx::query_as(ReportKind::AverageOrderValue.sql())
        .fetch_one(pool)
        .await?;
    Ok(row.avg_order_value)
}

/// The ten products with the most units sold.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn best_sellers(pool: &PgPool) -> Result<Vec<BestSeller>, RepositoryError> {
    fetch_rows(pool, ReportKind::BestSellers).await
}

/// Revenue per product category, highest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn category_revenue(pool: &PgPool) -> Result<Vec<CategoryRevenue>, RepositoryError> {
    fetch_rows(pool, ReportKind::CategoryRevenue).await
}

/// Customers with more than one order.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn repeat_customers(pool: &PgPool) -> Result<Vec<RepeatCustomer>, RepositoryError> {
    fetch_rows(pool, ReportKind::RepeatCustomers).await
}

/// Average rating and review count for every reviewed product.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn product_ratings(pool: &PgPool) -> Result<Vec<ProductRating>, RepositoryError> {
    fetch_rows(pool, ReportKind::ProductRatings).await
}

/// Cumulative spend for every customer, zero for customers without orders.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn lifetime_value(
    pool: &PgPool,
) -> Result<Vec<CustomerLifetimeValue>, RepositoryError> {
    fetch_rows(pool, ReportKind::LifetimeValue).await
}

/// The ten most recent reviews.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn recent_reviews(pool: &PgPool) -> Result<Vec<RecentReview>, RepositoryError> {
    fetch_rows(pool, ReportKind::RecentReviews).await
}

/// Result of running any report.
///
/// Serializes as a JSON array of row objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportData {
    MonthlyRevenue(Vec<MonthlyRevenue>),
    TopCustomers(Vec<TopCustomer>),
    AverageOrderValue(Vec<AverageOrderValue>),
    BestSellers(Vec<BestSeller>),
    CategoryRevenue(Vec<CategoryRevenue>),
    RepeatCustomers(Vec<RepeatCustomer>),
    ProductRatings(Vec<ProductRating>),
    LifetimeValue(Vec<CustomerLifetimeValue>),
    RecentReviews(Vec<RecentReview>),
}

impl ReportData {
    /// Which report produced this data.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        match self {
            Self::MonthlyRevenue(_) => ReportKind::MonthlyRevenue,
            Self::TopCustomers(_) => ReportKind::TopCustomers,
            Self::AverageOrderValue(_) => ReportKind::AverageOrderValue,
            Self::BestSellers(_) => ReportKind::BestSellers,
            Self::CategoryRevenue(_) => ReportKind::CategoryRevenue,
            Self::RepeatCustomers(_) => ReportKind::RepeatCustomers,
            Self::ProductRatings(_) => ReportKind::ProductRatings,
            Self::LifetimeValue(_) => ReportKind::LifetimeValue,
            Self::RecentReviews(_) => ReportKind::RecentReviews,
        }
    }

    /// Column names, in order.
    #[must_use]
    pub const fn columns(&self) -> &'static [&'static str] {
        self.kind().columns()
    }

    /// Every row rendered as text cells.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        fn cells<T: TabularRow>(rows: &[T]) -> Vec<Vec<String>> {
            rows.iter().map(TabularRow::cells).collect()
        }

        match self {
            Self::MonthlyRevenue(rows) => cells(rows),
            Self::TopCustomers(rows) => cells(rows),
            Self::AverageOrderValue(rows) => cells(rows),
            Self::BestSellers(rows) => cells(rows),
            Self::CategoryRevenue(rows) => cells(rows),
            Self::RepeatCustomers(rows) => cells(rows),
            Self::ProductRatings(rows) => cells(rows),
            Self::LifetimeValue(rows) => cells(rows),
            Self::RecentReviews(rows) => cells(rows),
        }
    }

    /// Number of result rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::MonthlyRevenue(rows) => rows.len(),
            Self::TopCustomers(rows) => rows.len(),
            Self::AverageOrderValue(rows) => rows.len(),
            Self::BestSellers(rows) => rows.len(),
            Self::CategoryRevenue(rows) => rows.len(),
            Self::RepeatCustomers(rows) => rows.len(),
            Self::ProductRatings(rows) => rows.len(),
            Self::LifetimeValue(rows) => rows.len(),
            Self::RecentReviews(rows) => rows.len(),
        }
    }

    /// Whether the report returned no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run the report named by `kind`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
#[instrument(skip(pool), fields(report = %kind))]
pub async fn run(pool: &PgPool, kind: ReportKind) -> Result<ReportData, RepositoryError> {
    Ok(match kind {
        ReportKind::MonthlyRevenue => ReportData::MonthlyRevenue(monthly_revenue(pool).await?),
        ReportKind::TopCustomers => ReportData::TopCustomers(top_customers(pool).await?),
        ReportKind::AverageOrderValue => {
            let avg_order_value = average_order_value(pool).await?;
            ReportData::AverageOrderValue(vec![AverageOrderValue { avg_order_value }])
        }
        ReportKind::BestSellers => ReportData::BestSellers(best_sellers(pool).await?),
        ReportKind::CategoryRevenue => ReportData::CategoryRevenue(category_revenue(pool).await?),
        ReportKind::RepeatCustomers => ReportData::RepeatCustomers(repeat_customers(pool).await?),
        ReportKind::ProductRatings => ReportData::ProductRatings(product_ratings(pool).await?),
        ReportKind::LifetimeValue => ReportData::LifetimeValue(lifetime_value(pool).await?),
        ReportKind::RecentReviews => ReportData::RecentReviews(recent_reviews(pool).await?),
    })
}
