//! Product categories and shipping carriers.

use rust_decimal::Decimal;

text_enum! {
    /// Product category (`Products.category`).
    Category, "category" {
        Electronics => "Electronics",
        Home => "Home",
        Clothing => "Clothing",
        Books => "Books",
        Toys => "Toys",
        Sports => "Sports",
        Beauty => "Beauty",
    }
}

impl Category {
    /// Inclusive price band, in whole currency units, that products in
    /// this category are listed at.
    #[must_use]
    pub const fn price_range(self) -> (i64, i64) {
        match self {
            Self::Electronics => (50, 2000),
            Self::Home => (10, 500),
            Self::Clothing => (5, 150),
            Self::Books => (5, 50),
            Self::Toys | Self::Beauty => (5, 100),
            Self::Sports => (10, 300),
        }
    }

    /// Whether `price` falls inside [`Self::price_range`].
    #[must_use]
    pub fn contains_price(self, price: Decimal) -> bool {
        let (min, max) = self.price_range();
        price >= Decimal::from(min) && price <= Decimal::from(max)
    }
}

text_enum! {
    /// Carrier recorded in `Shipments.shipping_method`.
    Carrier, "carrier" {
        Ups => "UPS",
        FedEx => "FedEx",
        Usps => "USPS",
        Dhl => "DHL",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_ranges_are_ordered() {
        for category in Category::ALL {
            let (min, max) = category.price_range();
            assert!(min > 0 && min < max, "{category}");
        }
    }

    #[test]
    fn test_contains_price() {
        assert!(Category::Books.contains_price(Decimal::new(5000, 2)));
        assert!(!Category::Books.contains_price(Decimal::new(5001, 2)));
        assert!(Category::Electronics.contains_price(Decimal::from(50)));
    }

    #[test]
    fn test_carrier_text() {
        assert_eq!(Carrier::FedEx.as_str(), "FedEx");
        assert_eq!("usps".parse::<Carrier>().unwrap(), Carrier::Usps);
    }
}
