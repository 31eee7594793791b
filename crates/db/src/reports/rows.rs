//! Typed result rows, one struct per report.
//!
//! Field names match the column aliases in the report SQL.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use shoplytics_core::{CustomerId, ProductId, Rating, ReviewId};

/// A row that can be rendered as text cells, in column order.
pub trait TabularRow {
    /// Cell values, one per column of the owning report.
    fn cells(&self) -> Vec<String>;
}

/// `monthly-revenue`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MonthlyRevenue {
    /// First day of the month.
    pub month: NaiveDate,
    pub total_revenue: Decimal,
}

/// `top-customers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TopCustomer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub total_spent: Decimal,
}

/// `average-order-value`
///
/// `None` when there are no orders with line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AverageOrderValue {
    pub avg_order_value: Option<Decimal>,
}

/// `best-sellers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BestSeller {
    pub product_id: ProductId,
    pub name: String,
    pub total_units_sold: i64,
}

/// `category-revenue`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CategoryRevenue {
    pub category: String,
    pub total_revenue: Decimal,
}

/// `repeat-customers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RepeatCustomer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub orders_count: i64,
}

/// `product-ratings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ProductRating {
    pub product_id: ProductId,
    pub name: String,
    pub avg_rating: Decimal,
    pub review_count: i64,
}

/// `lifetime-value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CustomerLifetimeValue {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub lifetime_value: Decimal,
}

/// `recent-reviews`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RecentReview {
    pub review_id: ReviewId,
    pub customer_name: String,
    pub product_name: String,
    pub rating: Rating,
    pub comment: Option<String>,
    pub review_date: NaiveDateTime,
}

impl TabularRow for MonthlyRevenue {
    fn cells(&self) -> Vec<String> {
        vec![self.month.format("%Y-%m").to_string(), self.total_revenue.to_string()]
    }
}

impl TabularRow for TopCustomer {
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.total_spent.to_string(),
        ]
    }
}

impl TabularRow for AverageOrderValue {
    fn cells(&self) -> Vec<String> {
        vec![self.avg_order_value.map(|v| v.to_string()).unwrap_or_default()]
    }
}

impl TabularRow for BestSeller {
    fn cells(&self) -> Vec<String> {
        vec![
            self.product_id.to_string(),
            self.name.clone(),
            self.total_units_sold.to_string(),
        ]
    }
}

impl TabularRow for CategoryRevenue {
    fn cells(&self) -> Vec<String> {
        vec![self.category.clone(), self.total_revenue.to_string()]
    }
}

impl TabularRow for RepeatCustomer {
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.orders_count.to_string(),
        ]
    }
}

impl TabularRow for ProductRating {
    fn cells(&self) -> Vec<String> {
        vec![
            self.product_id.to_string(),
            self.name.clone(),
            self.avg_rating.to_string(),
            self.review_count.to_string(),
        ]
    }
}

impl TabularRow for CustomerLifetimeValue {
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.lifetime_value.to_string(),
        ]
    }
}

impl TabularRow for RecentReview {
    fn cells(&self) -> Vec<String> {
        vec![
            self.review_id.to_string(),
            self.customer_name.clone(),
            self.product_name.clone(),
            self.rating.to_string(),
            self.comment.clone().unwrap_or_default(),
            self.review_date.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}
