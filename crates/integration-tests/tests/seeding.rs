//! Integration tests for transactional seeding.
//!
//! These tests require a `PostgreSQL` server reachable through
//! `DATABASE_URL`. Run with: cargo test -p shoplytics-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use sqlx::PgPool;

use shoplytics_db::generator::DataGenerator;
use shoplytics_core::OrderId;
use shoplytics_db::generator::seed::{self, SeedError, SeedPlan, ShipmentPlan};
use shoplytics_db::schema::count_rows;
use shoplytics_db::{Table, repo, table_counts};
use shoplytics_integration_tests::{add_customer, add_order_with_status, at};

fn generator(seed: u64) -> DataGenerator {
    DataGenerator::seeded(seed, at(2025, 6, 30))
}

async fn scalar(pool: &PgPool, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
}

const FULL_PLAN: SeedPlan = SeedPlan {
    customers: 40,
    products: 25,
    orders: 120,
    reviews: 80,
    shipments: ShipmentPlan::All,
};

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_seed_summary_matches_table_counts(pool: PgPool) {
    let summary = seed::seed(&pool, FULL_PLAN, &mut generator(11)).await.unwrap();

    assert_eq!(summary.customers, 40);
    assert_eq!(summary.products, 25);
    assert_eq!(summary.orders, 120);
    assert_eq!(summary.reviews, 80);
    assert!(summary.order_items >= summary.orders);

    let counts = table_counts(&pool).await;
    let count = |table: Table| {
        counts
            .iter()
            .find(|(t, _)| *t == table)
            .and_then(|(_, c)| *c)
            .unwrap()
    };
    assert_eq!(count(Table::Customers), 40);
    assert_eq!(count(Table::OrderItems), i64::try_from(summary.order_items).unwrap());
    assert_eq!(count(Table::Shipments), i64::try_from(summary.shipments).unwrap());
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_seeded_data_keeps_invariants(pool: PgPool) {
    seed::seed(&pool, FULL_PLAN, &mut generator(12)).await.unwrap();

    assert_eq!(scalar(&pool, "SELECT COUNT(*) FROM Order_Items WHERE quantity <= 0").await, 0);
    assert_eq!(
        scalar(&pool, "SELECT COUNT(*) FROM Reviews WHERE rating NOT BETWEEN 1 AND 5").await,
        0
    );
    assert_eq!(
        scalar(&pool, "SELECT COUNT(*) - COUNT(DISTINCT email) FROM Customers").await,
        0
    );
    assert_eq!(
        scalar(&pool, "SELECT COUNT(*) FROM Orders WHERE order_id NOT IN (SELECT order_id FROM Order_Items)").await,
        0,
        "every order has at least one line"
    );

    let orphans = [
        "SELECT COUNT(*) FROM Orders o LEFT JOIN Customers c ON c.customer_id = o.customer_id WHERE c.customer_id IS NULL",
        "SELECT COUNT(*) FROM Order_Items oi LEFT JOIN Products p ON p.product_id = oi.product_id WHERE p.product_id IS NULL",
        "SELECT COUNT(*) FROM Reviews r LEFT JOIN Customers c ON c.customer_id = r.customer_id WHERE c.customer_id IS NULL",
        "SELECT COUNT(*) FROM Shipments s LEFT JOIN Orders o ON o.order_id = s.order_id WHERE o.order_id IS NULL",
    ];
    for sql in orphans {
        assert_eq!(scalar(&pool, sql).await, 0, "{sql}");
    }
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_shipments_follow_their_orders(pool: PgPool) {
    seed::seed(&pool, FULL_PLAN, &mut generator(13)).await.unwrap();

    let misplaced = scalar(
        &pool,
        r"
        SELECT COUNT(*)
        FROM Shipments s
        JOIN Orders o ON o.order_id = s.order_id
        WHERE o.status NOT IN ('shipped', 'delivered')
           OR s.shipped_date <= o.order_date
           OR s.delivery_date < s.shipped_date
        ",
    )
    .await;
    assert_eq!(misplaced, 0);

    let eligible = scalar(
        &pool,
        "SELECT COUNT(*) FROM Orders WHERE status IN ('shipped', 'delivered')",
    )
    .await;
    let mut conn = pool.acquire().await.unwrap();
    assert_eq!(count_rows(&mut *conn, Table::Shipments).await.unwrap(), eligible);
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_shipment_limit_is_respected(pool: PgPool) {
    let plan = SeedPlan {
        shipments: ShipmentPlan::UpTo(5),
        ..FULL_PLAN
    };
    let summary = seed::seed(&pool, plan, &mut generator(14)).await.unwrap();
    assert!(summary.shipments <= 5);
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_failed_seed_commits_nothing(pool: PgPool) {
    let plan = SeedPlan {
        customers: 10,
        orders: 5,
        ..SeedPlan::default()
    };

    let err = seed::seed(&pool, plan, &mut generator(15)).await.unwrap_err();
    assert!(matches!(err, SeedError::MissingParent("products")));
    assert_eq!(scalar(&pool, "SELECT COUNT(*) FROM Customers").await, 0);
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_shipments_without_orders_fail(pool: PgPool) {
    let plan = SeedPlan {
        shipments: ShipmentPlan::All,
        ..SeedPlan::default()
    };
    let err = seed::seed(&pool, plan, &mut generator(16)).await.unwrap_err();
    assert!(matches!(err, SeedError::MissingParent("orders")));
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_seeding_twice_appends(pool: PgPool) {
    let plan = SeedPlan {
        customers: 15,
        products: 10,
        orders: 20,
        ..SeedPlan::default()
    };
    seed::seed(&pool, plan, &mut generator(17)).await.unwrap();
    seed::seed(&pool, plan, &mut generator(18)).await.unwrap();

    assert_eq!(scalar(&pool, "SELECT COUNT(*) FROM Orders").await, 40);
    assert_eq!(scalar(&pool, "SELECT COUNT(*) FROM Products").await, 20);
    // Second batch may collide on email and skip those rows
    assert!(scalar(&pool, "SELECT COUNT(*) FROM Customers").await <= 30);
}

async fn shipped_order_ids(pool: &PgPool) -> Vec<OrderId> {
    sqlx::query_scalar("SELECT order_id FROM Shipments ORDER BY order_id")
        .fetch_all(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_shipments_skip_unrecognized_order_status(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let customer = add_customer(&mut conn, "Ada", "Lovelace").await;
    let shipped = add_order_with_status(&mut conn, customer, at(2025, 5, 1), "shipped").await;
    let _on_hold = add_order_with_status(&mut conn, customer, at(2025, 5, 2), "on_hold").await;
    let delivered = add_order_with_status(&mut conn, customer, at(2025, 5, 3), "Delivered").await;
    drop(conn);

    let plan = SeedPlan {
        shipments: ShipmentPlan::All,
        ..SeedPlan::default()
    };
    let summary = seed::seed(&pool, plan, &mut generator(19)).await.unwrap();

    assert_eq!(summary.shipments, 2);
    assert_eq!(shipped_order_ids(&pool).await, [shipped, delivered]);
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_orders_info_filters_by_id(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let customer = add_customer(&mut conn, "Ada", "Lovelace").await;
    let first = add_order_with_status(&mut conn, customer, at(2025, 5, 1), "shipped").await;
    let second = add_order_with_status(&mut conn, customer, at(2025, 5, 2), "pending").await;
    let third = add_order_with_status(&mut conn, customer, at(2025, 5, 3), "delivered").await;

    let filtered = repo::orders_info(&mut conn, Some(&[third, first])).await.unwrap();
    let ids: Vec<OrderId> = filtered.iter().map(|o| o.order_id).collect();
    assert_eq!(ids, [first, third]);
    assert!(filtered.iter().all(|o| o.order_id != second));

    let everything = repo::orders_info(&mut conn, Some(&[])).await.unwrap();
    assert_eq!(everything.len(), 3);
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_generate_shipments_for_given_orders(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let customer = add_customer(&mut conn, "Ada", "Lovelace").await;
    let chosen = add_order_with_status(&mut conn, customer, at(2025, 5, 1), "shipped").await;
    let _other = add_order_with_status(&mut conn, customer, at(2025, 5, 2), "delivered").await;

    let orders = repo::orders_info(&mut conn, Some(&[chosen])).await.unwrap();
    let written = seed::generate_shipments(&mut conn, &mut generator(20), Some(orders), None)
        .await
        .unwrap();
    drop(conn);

    assert_eq!(written, 1);
    assert_eq!(shipped_order_ids(&pool).await, [chosen]);
}

#[sqlx::test(migrator = "shoplytics_db::MIGRATOR")]
#[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
async fn test_generate_shipments_rejects_empty_order_list(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let err = seed::generate_shipments(&mut conn, &mut generator(21), Some(Vec::new()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::MissingParent("orders")));
}
