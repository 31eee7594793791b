//! Row types for inserts and the few reads the generator needs.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shoplytics_core::{
    Carrier, Category, CustomerId, Email, OrderId, OrderStatus, ProductId, Quantity, Rating,
    ShipmentStatus,
};

/// Input for inserting a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub created_at: NaiveDateTime,
}

/// Input for inserting a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    /// Unit price, two decimal places.
    pub price: Decimal,
    pub created_at: NaiveDateTime,
}

/// Input for inserting an order header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub order_date: NaiveDateTime,
    pub status: OrderStatus,
}

/// Input for inserting an order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// Input for inserting a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub review_date: NaiveDateTime,
}

/// Input for inserting a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShipment {
    pub order_id: OrderId,
    pub shipped_date: NaiveDateTime,
    pub delivery_date: NaiveDateTime,
    pub shipping_method: Carrier,
    pub status: ShipmentStatus,
}

/// Order metadata used to derive shipments.
///
/// `status` is kept as stored: the column is free text, so rows written
/// outside the generator may hold values no [`OrderStatus`] matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderInfo {
    pub order_id: OrderId,
    pub order_date: NaiveDateTime,
    pub status: String,
}

impl OrderInfo {
    /// The stored status, if it names a known [`OrderStatus`] (any case).
    #[must_use]
    pub fn order_status(&self) -> Option<OrderStatus> {
        self.status.trim().parse().ok()
    }
}
