//! Synthetic data generation.
//!
//! [`DataGenerator`] builds insert rows from a random source and a fixed
//! "now". With [`DataGenerator::seeded`] the output is fully reproducible,
//! which the unit tests below rely on. The functions in [`seed`] write the
//! generated rows to the database.
//!
//! Every generated row satisfies the table constraints by construction:
//! quantities and ratings go through their checked constructors, emails are
//! unique within a batch, and child rows only reference IDs passed in.

pub mod seed;
mod words;

use std::collections::HashSet;

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use shoplytics_core::{
    Carrier, Category, CustomerId, Email, EmailError, OrderId, OrderStatus, ProductId, Quantity,
    Rating,
};

use crate::models::{
    NewCustomer, NewOrder, NewOrderItem, NewProduct, NewReview, NewShipment, OrderInfo,
};
use words::{
    COMPANIES, FIRST_NAMES, FREE_EMAIL_DOMAINS, LAST_NAMES, PRODUCT_WORDS, REVIEW_ADJECTIVES,
    SENTENCE_WORDS,
};

/// How far back customer and product `created_at` values reach.
const ACCOUNT_HISTORY_DAYS: i64 = 730;
/// How far back order and review dates reach.
const ACTIVITY_HISTORY_DAYS: i64 = 365;
/// Upper bound on distinct products per order.
const MAX_ITEMS_PER_ORDER: usize = 4;
/// Upper bound on units per order line.
const MAX_UNITS_PER_ITEM: i32 = 5;
const REVIEW_SENTENCE_WORDS: usize = 8;

/// Random row factory.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    rng: StdRng,
    now: NaiveDateTime,
}

impl DataGenerator {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            now: truncate_to_seconds(now),
        }
    }

    /// Reproducible generator.
    #[must_use]
    pub fn seeded(seed: u64, now: NaiveDateTime) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now: truncate_to_seconds(now),
        }
    }

    /// The reference time every generated timestamp is relative to.
    #[must_use]
    pub const fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.rng).copied()
    }

    fn pick_word(&mut self, words: &[&'static str]) -> &'static str {
        self.pick(words).unwrap_or_default()
    }

    /// A whole-second timestamp in `[now - days, now]`.
    fn datetime_within_days(&mut self, days: i64) -> NaiveDateTime {
        let window = TimeDelta::days(days);
        let offset = self.rng.random_range(0..=window.num_seconds());
        self.now - window + TimeDelta::seconds(offset)
    }

    fn sentence(&mut self, words: usize) -> String {
        let mut sentence = String::new();
        for i in 0..words {
            let word = self.pick_word(SENTENCE_WORDS);
            if i == 0 {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    sentence.extend(first.to_uppercase());
                    sentence.push_str(chars.as_str());
                }
            } else {
                sentence.push(' ');
                sentence.push_str(word);
            }
        }
        sentence.push('.');
        sentence
    }

    /// `n` customers with batch-unique emails of the form
    /// `first.last@domain`, numbered on collision.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if an assembled address fails validation.
    pub fn make_customers(&mut self, n: usize) -> Result<Vec<NewCustomer>, EmailError> {
        let mut seen = HashSet::with_capacity(n);
        let mut customers = Vec::with_capacity(n);

        for _ in 0..n {
            let first = self.pick_word(FIRST_NAMES);
            let last = self.pick_word(LAST_NAMES);
            let domain = self.pick_word(FREE_EMAIL_DOMAINS);
            let local = format!("{}.{}", first.to_lowercase(), last.to_lowercase());

            let mut candidate = format!("{local}@{domain}");
            let mut suffix = 2u32;
            while seen.contains(&candidate) {
                candidate = format!("{local}{suffix}@{domain}");
                suffix += 1;
            }
            let email = Email::parse(&candidate)?;
            seen.insert(candidate);

            customers.push(NewCustomer {
                first_name: first.to_owned(),
                last_name: last.to_owned(),
                email,
                created_at: self.datetime_within_days(ACCOUNT_HISTORY_DAYS),
            });
        }

        Ok(customers)
    }

    /// `n` products priced in their category's band, at cent precision.
    pub fn make_products(&mut self, n: usize) -> Vec<NewProduct> {
        (0..n)
            .map(|_| {
                let category = self.pick(Category::ALL).unwrap_or(Category::Home);
                let (min, max) = category.price_range();
                let cents = self.rng.random_range(min * 100..=max * 100);
                let name = format!(
                    "{} {}",
                    self.pick_word(COMPANIES),
                    self.pick_word(PRODUCT_WORDS)
                );
                NewProduct {
                    name,
                    category,
                    price: Decimal::new(cents, 2),
                    created_at: self.datetime_within_days(ACCOUNT_HISTORY_DAYS),
                }
            })
            .collect()
    }

    /// `n` order headers for random customers. Empty if `customer_ids` is.
    pub fn make_orders(&mut self, customer_ids: &[CustomerId], n: usize) -> Vec<NewOrder> {
        let mut orders = Vec::with_capacity(n);
        for _ in 0..n {
            let Some(customer_id) = self.pick(customer_ids) else {
                break;
            };
            orders.push(NewOrder {
                customer_id,
                order_date: self.datetime_within_days(ACTIVITY_HISTORY_DAYS),
                status: self.pick(OrderStatus::ALL).unwrap_or_default(),
            });
        }
        orders
    }

    /// One to four distinct products per order, one to five units each.
    pub fn make_order_items(
        &mut self,
        order_ids: &[OrderId],
        product_ids: &[ProductId],
    ) -> Vec<NewOrderItem> {
        let max_items = MAX_ITEMS_PER_ORDER.min(product_ids.len());
        if max_items == 0 {
            return Vec::new();
        }

        let mut items = Vec::new();
        for &order_id in order_ids {
            let k = self.rng.random_range(1..=max_items);
            let chosen: Vec<ProductId> = product_ids
                .choose_multiple(&mut self.rng, k)
                .copied()
                .collect();
            for product_id in chosen {
                let units = self.rng.random_range(1..=MAX_UNITS_PER_ITEM);
                if let Ok(quantity) = Quantity::new(units) {
                    items.push(NewOrderItem {
                        order_id,
                        product_id,
                        quantity,
                    });
                }
            }
        }
        items
    }

    /// `n` reviews by random customers of random products.
    pub fn make_reviews(
        &mut self,
        customer_ids: &[CustomerId],
        product_ids: &[ProductId],
        n: usize,
    ) -> Vec<NewReview> {
        let mut reviews = Vec::with_capacity(n);
        for _ in 0..n {
            let (Some(customer_id), Some(product_id)) =
                (self.pick(customer_ids), self.pick(product_ids))
            else {
                break;
            };
            let Ok(rating) = Rating::new(self.rng.random_range(Rating::MIN..=Rating::MAX)) else {
                continue;
            };
            let adjective = self.pick_word(REVIEW_ADJECTIVES);
            let comment = format!(
                "This product is {adjective}. {}",
                self.sentence(REVIEW_SENTENCE_WORDS)
            );
            reviews.push(NewReview {
                customer_id,
                product_id,
                rating,
                comment: Some(comment),
                review_date: self.datetime_within_days(ACTIVITY_HISTORY_DAYS),
            });
        }
        reviews
    }

    /// Shipments for the orders that have left the warehouse.
    ///
    /// Shipped one to three days after the order, delivered one to seven
    /// days after shipping. Orders in any other status are skipped.
    pub fn make_shipments(&mut self, orders: &[OrderInfo]) -> Vec<NewShipment> {
        let mut shipments = Vec::new();
        for order in orders {
            let Some(status) = order.order_status().and_then(OrderStatus::shipment_status) else {
                continue;
            };
            let shipped_date = order.order_date + TimeDelta::days(self.rng.random_range(1..=3));
            let delivery_date = shipped_date + TimeDelta::days(self.rng.random_range(1..=7));
            shipments.push(NewShipment {
                order_id: order.order_id,
                shipped_date,
                delivery_date,
                shipping_method: self.pick(Carrier::ALL).unwrap_or(Carrier::Ups),
                status,
            });
        }
        shipments
    }
}

/// `PostgreSQL` stores microseconds; whole seconds keep generated values
/// identical after a round trip.
fn truncate_to_seconds(now: NaiveDateTime) -> NaiveDateTime {
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use shoplytics_core::ShipmentStatus;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_milli_opt(12, 30, 45, 250)
            .unwrap()
    }

    fn generator(seed: u64) -> DataGenerator {
        DataGenerator::seeded(seed, now())
    }

    fn customer_ids(n: i32) -> Vec<CustomerId> {
        (1..=n).map(CustomerId::new).collect()
    }

    fn product_ids(n: i32) -> Vec<ProductId> {
        (1..=n).map(ProductId::new).collect()
    }

    #[test]
    fn test_now_is_truncated_to_seconds() {
        assert_eq!(generator(1).now().nanosecond(), 0);
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let a = generator(42).make_customers(20).unwrap();
        let b = generator(42).make_customers(20).unwrap();
        assert_eq!(a, b);

        let c = generator(43).make_customers(20).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_customer_emails_unique_within_batch() {
        // Far more customers than distinct name/domain combinations.
        let customers = generator(7).make_customers(12_000).unwrap();
        let emails: HashSet<_> = customers.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(emails.len(), customers.len());
    }

    #[test]
    fn test_customer_shape() {
        let gen_now = generator(3).now();
        for customer in generator(3).make_customers(50).unwrap() {
            let expected_prefix = format!(
                "{}.{}",
                customer.first_name.to_lowercase(),
                customer.last_name.to_lowercase()
            );
            assert!(customer.email.local_part().starts_with(&expected_prefix));
            assert!(FREE_EMAIL_DOMAINS.contains(&customer.email.domain()));
            assert!(customer.created_at <= gen_now);
            assert!(customer.created_at >= gen_now - TimeDelta::days(ACCOUNT_HISTORY_DAYS));
        }
    }

    #[test]
    fn test_product_prices_within_category_band() {
        for product in generator(5).make_products(500) {
            assert!(
                product.category.contains_price(product.price),
                "{} priced {} outside band",
                product.category,
                product.price
            );
            assert!(product.price.scale() <= 2);
            assert!(product.name.contains(' '));
        }
    }

    #[test]
    fn test_orders_reference_given_customers() {
        let customers = customer_ids(3);
        let orders = generator(9).make_orders(&customers, 100);
        assert_eq!(orders.len(), 100);
        let gen_now = generator(9).now();
        for order in &orders {
            assert!(customers.contains(&order.customer_id));
            assert!(order.order_date >= gen_now - TimeDelta::days(ACTIVITY_HISTORY_DAYS));
        }
    }

    #[test]
    fn test_orders_without_customers_is_empty() {
        assert!(generator(1).make_orders(&[], 10).is_empty());
    }

    #[test]
    fn test_order_items_distinct_products_and_positive_quantity() {
        let orders: Vec<OrderId> = (1..=200).map(OrderId::new).collect();
        let products = product_ids(10);
        let items = generator(11).make_order_items(&orders, &products);

        for order_id in &orders {
            let lines: Vec<_> = items.iter().filter(|i| i.order_id == *order_id).collect();
            assert!((1..=MAX_ITEMS_PER_ORDER).contains(&lines.len()));
            let distinct: HashSet<_> = lines.iter().map(|i| i.product_id).collect();
            assert_eq!(distinct.len(), lines.len());
        }
        for item in &items {
            assert!((1..=MAX_UNITS_PER_ITEM).contains(&item.quantity.get()));
        }
    }

    #[test]
    fn test_order_items_capped_by_catalog_size() {
        let orders: Vec<OrderId> = (1..=50).map(OrderId::new).collect();
        let items = generator(2).make_order_items(&orders, &product_ids(1));
        assert_eq!(items.len(), 50);
        assert!(generator(2).make_order_items(&orders, &[]).is_empty());
    }

    #[test]
    fn test_reviews_in_range() {
        let reviews = generator(13).make_reviews(&customer_ids(5), &product_ids(5), 300);
        assert_eq!(reviews.len(), 300);
        for review in &reviews {
            assert!((1..=5).contains(&review.rating.get()));
            let comment = review.comment.as_deref().unwrap();
            assert!(comment.starts_with("This product is "));
            assert!(comment.ends_with('.'));
        }
        assert!(generator(13).make_reviews(&[], &product_ids(5), 3).is_empty());
    }

    #[test]
    fn test_shipments_only_for_shipped_orders() {
        let order_date = now() - TimeDelta::days(30);
        let orders: Vec<OrderInfo> = OrderStatus::ALL
            .iter()
            .zip(1..)
            .map(|(status, id)| OrderInfo {
                order_id: OrderId::new(id),
                order_date,
                status: status.to_string(),
            })
            .collect();

        let shipments = generator(17).make_shipments(&orders);
        assert_eq!(shipments.len(), 2);

        for shipment in &shipments {
            let order = orders.iter().find(|o| o.order_id == shipment.order_id).unwrap();
            assert!(order.order_status().unwrap().has_shipped());
            let lag = shipment.shipped_date - order.order_date;
            assert!(lag >= TimeDelta::days(1) && lag <= TimeDelta::days(3));
            let transit = shipment.delivery_date - shipment.shipped_date;
            assert!(transit >= TimeDelta::days(1) && transit <= TimeDelta::days(7));
            let expected = if order.order_status() == Some(OrderStatus::Delivered) {
                ShipmentStatus::Delivered
            } else {
                ShipmentStatus::InTransit
            };
            assert_eq!(shipment.status, expected);
        }
    }

    #[test]
    fn test_shipments_skip_unknown_statuses() {
        let order_date = now() - TimeDelta::days(10);
        let orders: Vec<OrderInfo> = ["on_hold", "SHIPPED", "", "Delivered", "refunded"]
            .iter()
            .zip(1..)
            .map(|(status, id)| OrderInfo {
                order_id: OrderId::new(id),
                order_date,
                status: (*status).to_string(),
            })
            .collect();

        let shipments = generator(19).make_shipments(&orders);
        let written: Vec<(i32, ShipmentStatus)> = shipments
            .iter()
            .map(|s| (s.order_id.as_i32(), s.status))
            .collect();
        assert_eq!(
            written,
            [(2, ShipmentStatus::InTransit), (4, ShipmentStatus::Delivered)]
        );
    }
}
