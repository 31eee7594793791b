//! Status values for orders and shipments.

text_enum! {
    /// Order lifecycle status (`Orders.status`, default `pending`).
    OrderStatus, "order status" {
        /// Placed, not yet processed. Column default.
        Pending => "pending",
        Processing => "processing",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
        Returned => "returned",
    }
}

impl OrderStatus {
    /// Whether an order in this status has left the warehouse and so
    /// should have a shipment row.
    #[must_use]
    pub const fn has_shipped(self) -> bool {
        matches!(self, Self::Shipped | Self::Delivered)
    }

    /// The shipment status implied by this order status, if it shipped.
    #[must_use]
    pub const fn shipment_status(self) -> Option<ShipmentStatus> {
        match self {
            Self::Delivered => Some(ShipmentStatus::Delivered),
            Self::Shipped => Some(ShipmentStatus::InTransit),
            _ => None,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

text_enum! {
    /// Shipment tracking status (`Shipments.status`, default `in_transit`).
    ShipmentStatus, "shipment status" {
        InTransit => "in_transit",
        Delivered => "delivered",
    }
}

impl Default for ShipmentStatus {
    fn default() -> Self {
        Self::InTransit
    }
}
