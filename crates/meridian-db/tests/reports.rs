//! Integration tests for the five reports against an in-memory store.
//!
//! Fixtures are inserted through the raw pool (parents before children;
//! foreign keys are enforced), then each report's contract is checked:
//! inclusive date boundaries, derived-column math, exclusion rules,
//! ordering, and the error taxonomy.

use chrono::NaiveDate;
use meridian_core::{DateRange, ReportError};
use meridian_db::{Database, DbConfig};
use sqlx::SqlitePool;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn range(from: &str, to: &str) -> DateRange {
    DateRange::new(date(from), date(to)).unwrap()
}

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

// =============================================================================
// Fixture helpers
// =============================================================================

async fn category(pool: &SqlitePool, id: i64, name: &str) {
    sqlx::query("INSERT INTO categories (category_id, category_name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
}

async fn supplier(
    pool: &SqlitePool,
    id: i64,
    company: &str,
    contact: Option<&str>,
    title: Option<&str>,
    phone: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO suppliers (supplier_id, company_name, contact_name, contact_title, phone) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(company)
    .bind(contact)
    .bind(title)
    .bind(phone)
    .execute(pool)
    .await
    .unwrap();
}

#[allow(clippy::too_many_arguments)]
async fn product(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    category_id: i64,
    supplier_id: i64,
    in_stock: i64,
    on_order: i64,
    reorder_level: i64,
    discontinued: i64,
) {
    sqlx::query(
        "INSERT INTO products (product_id, product_name, category_id, supplier_id, unit_price, \
         units_in_stock, units_on_order, reorder_level, discontinued) \
         VALUES (?, ?, ?, ?, 10.0, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(name)
    .bind(category_id)
    .bind(supplier_id)
    .bind(in_stock)
    .bind(on_order)
    .bind(reorder_level)
    .bind(discontinued)
    .execute(pool)
    .await
    .unwrap();
}

async fn customer(pool: &SqlitePool, id: &str, company: &str) {
    sqlx::query("INSERT INTO customers (customer_id, company_name) VALUES (?, ?)")
        .bind(id)
        .bind(company)
        .execute(pool)
        .await
        .unwrap();
}

async fn employee(pool: &SqlitePool, id: i64, first: &str, last: &str) {
    sqlx::query(
        "INSERT INTO employees (employee_id, first_name, last_name) VALUES (?, ?, ?)",
    )
    .bind(id)
    .bind(first)
    .bind(last)
    .execute(pool)
    .await
    .unwrap();
}

async fn order(
    pool: &SqlitePool,
    id: i64,
    customer_id: &str,
    employee_id: i64,
    order_date: &str,
    shipped_date: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO orders (order_id, customer_id, employee_id, order_date, shipped_date) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(employee_id)
    .bind(order_date)
    .bind(shipped_date)
    .execute(pool)
    .await
    .unwrap();
}

async fn detail(
    pool: &SqlitePool,
    order_id: i64,
    product_id: i64,
    price: f64,
    quantity: i64,
    discount: f64,
) {
    sqlx::query(
        "INSERT INTO order_details (order_id, product_id, unit_price, quantity, discount) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(price)
    .bind(quantity)
    .bind(discount)
    .execute(pool)
    .await
    .unwrap();
}

/// A small fixture shared by the order-driven reports: one category, one
/// supplier, two products, two customers, two employees.
async fn base_catalog(pool: &SqlitePool) {
    category(pool, 1, "Beverages").await;
    supplier(pool, 1, "Exotic Liquids", Some("Charlotte Cooper"), Some("Manager"), Some("555-1"))
        .await;
    product(pool, 1, "Chai", 1, 1, 39, 0, 10, 0).await;
    product(pool, 2, "Chang", 1, 1, 17, 0, 25, 0).await;
    customer(pool, "ALFKI", "Alfreds Futterkiste").await;
    customer(pool, "ANATR", "Ana Trujillo Emparedados y helados").await;
    employee(pool, 1, "Nancy", "Davolio").await;
    employee(pool, 2, "Andrew", "Fuller").await;
}

// =============================================================================
// Popularity report
// =============================================================================

#[tokio::test]
async fn popularity_sums_quantities_within_inclusive_range() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;

    // The worked scenario: P1 sells 10 in January, 5 more on Feb 1
    order(pool, 1, "ALFKI", 1, "2024-01-05", None).await;
    detail(pool, 1, 1, 2.0, 10, 0.0).await;
    order(pool, 2, "ALFKI", 1, "2024-02-01", None).await;
    detail(pool, 2, 1, 2.0, 5, 0.0).await;

    let january = db.reports().product_popularity(&range("2024-01-01", "2024-01-31")).await.unwrap();
    assert_eq!(january.len(), 1);
    assert_eq!(january[0].product_id, 1);
    assert_eq!(january[0].product_name, "Chai");
    assert_eq!(january[0].category_name, "Beverages");
    assert_eq!(january[0].sold, 10);

    // Widening the range can only grow the sum
    let both = db.reports().product_popularity(&range("2024-01-01", "2024-02-28")).await.unwrap();
    assert_eq!(both[0].sold, 15);
}

#[tokio::test]
async fn popularity_range_boundaries_are_inclusive_on_both_ends() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;

    order(pool, 1, "ALFKI", 1, "2024-01-01", None).await;
    detail(pool, 1, 1, 2.0, 3, 0.0).await;
    order(pool, 2, "ALFKI", 1, "2024-01-31", None).await;
    detail(pool, 2, 1, 2.0, 4, 0.0).await;
    // One day outside either edge
    order(pool, 3, "ALFKI", 1, "2023-12-31", None).await;
    detail(pool, 3, 1, 2.0, 100, 0.0).await;
    order(pool, 4, "ALFKI", 1, "2024-02-01", None).await;
    detail(pool, 4, 1, 2.0, 100, 0.0).await;

    let rows = db.reports().product_popularity(&range("2024-01-01", "2024-01-31")).await.unwrap();
    assert_eq!(rows[0].sold, 7);
}

#[tokio::test]
async fn popularity_orders_by_sold_then_product_id() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;
    product(pool, 3, "Aniseed Syrup", 1, 1, 10, 0, 5, 0).await;

    order(pool, 1, "ALFKI", 1, "2024-01-10", None).await;
    detail(pool, 1, 1, 2.0, 5, 0.0).await; // P1 sold 5
    detail(pool, 1, 2, 2.0, 9, 0.0).await; // P2 sold 9
    detail(pool, 1, 3, 2.0, 5, 0.0).await; // P3 sold 5, ties with P1

    let rows = db.reports().product_popularity(&range("2024-01-01", "2024-01-31")).await.unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[tokio::test]
async fn popularity_with_no_matching_orders_is_empty_not_an_error() {
    let db = test_db().await;
    base_catalog(db.pool()).await;

    let rows = db.reports().product_popularity(&range("2024-01-01", "2024-01-31")).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn reversed_range_is_rejected_before_any_query() {
    let db = test_db().await;

    let bad = DateRange {
        from_date: date("2024-02-01"),
        to_date: date("2024-01-01"),
    };
    for err in [
        db.reports().product_popularity(&bad).await.unwrap_err(),
        db.reports().customer_profit(&bad).await.unwrap_err(),
        db.reports().employee_activity(&bad).await.unwrap_err(),
        db.reports().employee_delays(&bad).await.unwrap_err(),
    ] {
        assert!(matches!(err, ReportError::InvalidParameter(_)));
    }
}

// =============================================================================
// Reorder report
// =============================================================================

#[tokio::test]
async fn reorder_includes_only_active_products_at_or_below_threshold() {
    let db = test_db().await;
    let pool = db.pool();
    category(pool, 1, "Beverages").await;
    supplier(pool, 1, "Exotic Liquids", Some("Charlotte Cooper"), Some("Manager"), Some("555-1"))
        .await;

    // The worked scenario: available 5, level 10 → to_reorder -5 → included
    product(pool, 2, "Chang", 1, 1, 5, 0, 10, 0).await;
    // Identical stock but discontinued → excluded
    product(pool, 3, "Gumbo Mix", 1, 1, 5, 0, 10, 1).await;
    // Comfortably stocked → excluded
    product(pool, 4, "Chai", 1, 1, 50, 0, 10, 0).await;
    // Exactly at threshold → included (to_reorder == 0)
    product(pool, 5, "Konbu", 1, 1, 10, 0, 10, 0).await;
    // Incoming stock counts against availability
    product(pool, 6, "Tofu", 1, 1, 30, 25, 10, 0).await;

    let rows = db.reports().products_to_reorder().await.unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.product_id).collect();
    // Ordered by to_reorder ascending: P2 (-5), P6 (-5), P5 (0) - tie on id
    assert_eq!(ids, vec![2, 6, 5]);

    for row in &rows {
        assert_eq!(row.units_available, row.units_in_stock - row.units_on_order);
        assert!(row.units_available - row.reorder_level <= 0);
    }
    assert_eq!(rows[0].supplier, "Exotic Liquids");
    assert_eq!(rows[0].contact, "Manager: Charlotte Cooper via 555-1");
}

#[tokio::test]
async fn reorder_contact_renders_empty_segments_for_missing_fields() {
    let db = test_db().await;
    let pool = db.pool();
    category(pool, 1, "Seafood").await;
    supplier(pool, 1, "Tokyo Traders", Some("Yoshi Nagase"), None, Some("(03) 3555-5011")).await;
    product(pool, 1, "Ikura", 1, 1, 0, 0, 5, 0).await;

    let rows = db.reports().products_to_reorder().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].contact, ": Yoshi Nagase via (03) 3555-5011");
    // Zero stock, nothing inbound
    assert_eq!(rows[0].units_available, 0);
}

// =============================================================================
// Customer profit report
// =============================================================================

#[tokio::test]
async fn profit_applies_discount_per_line_item() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;

    order(pool, 1, "ALFKI", 1, "2024-03-10", None).await;
    detail(pool, 1, 1, 2.0, 10, 0.25).await; // 10 * 2.00 * 0.75 = 15.00
    detail(pool, 1, 2, 4.0, 5, 0.0).await; // 5 * 4.00 = 20.00
    order(pool, 2, "ANATR", 2, "2024-03-12", None).await;
    detail(pool, 2, 1, 2.0, 1, 0.0).await; // 2.00

    let rows = db.reports().customer_profit(&range("2024-03-01", "2024-03-31")).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].customer_id, "ALFKI");
    assert!((rows[0].profit - 35.0).abs() < 1e-9);
    assert_eq!(rows[1].customer_id, "ANATR");
    assert!((rows[1].profit - 2.0).abs() < 1e-9);
}

#[tokio::test]
async fn profit_ignores_orders_outside_the_window() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;

    order(pool, 1, "ALFKI", 1, "2024-03-10", None).await;
    detail(pool, 1, 1, 2.0, 10, 0.0).await;
    order(pool, 2, "ALFKI", 1, "2024-05-01", None).await;
    detail(pool, 2, 1, 2.0, 10, 0.0).await;

    let rows = db.reports().customer_profit(&range("2024-03-01", "2024-03-31")).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!((rows[0].profit - 20.0).abs() < 1e-9);
}

// =============================================================================
// Employee activity report
// =============================================================================

#[tokio::test]
async fn activity_counts_orders_per_employee_busiest_first() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;

    order(pool, 1, "ALFKI", 1, "2024-04-01", None).await;
    order(pool, 2, "ALFKI", 2, "2024-04-02", None).await;
    order(pool, 3, "ANATR", 2, "2024-04-03", None).await;
    // Outside the window
    order(pool, 4, "ANATR", 1, "2024-06-01", None).await;

    let rows = db.reports().employee_activity(&range("2024-04-01", "2024-04-30")).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].employee_id, 2);
    assert_eq!(rows[0].employee_name, "Andrew Fuller");
    assert_eq!(rows[0].order_count, 2);
    assert_eq!(rows[1].employee_id, 1);
    assert_eq!(rows[1].order_count, 1);
}

// =============================================================================
// Employee delay report
// =============================================================================

#[tokio::test]
async fn delays_average_shipped_minus_ordered_in_days() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;

    // Nancy: delays of 2 and 4 days → average 3.0
    order(pool, 1, "ALFKI", 1, "2024-01-01", Some("2024-01-03")).await;
    order(pool, 2, "ALFKI", 1, "2024-01-10", Some("2024-01-14")).await;
    // Andrew: one order shipped same day, one not shipped at all
    order(pool, 3, "ANATR", 2, "2024-01-05", Some("2024-01-05")).await;
    order(pool, 4, "ANATR", 2, "2024-01-06", None).await;

    let rows = db.reports().employee_delays(&range("2024-01-01", "2024-01-31")).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].employee_id, 1);
    assert!((rows[0].avg_delay - 3.0).abs() < 1e-9);
    assert_eq!(rows[1].employee_id, 2);
    assert!(rows[1].avg_delay.abs() < 1e-9);
}

#[tokio::test]
async fn delays_omit_employees_with_no_shipped_orders() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;

    order(pool, 1, "ALFKI", 1, "2024-01-01", Some("2024-01-02")).await;
    order(pool, 2, "ANATR", 2, "2024-01-01", None).await;

    let rows = db.reports().employee_delays(&range("2024-01-01", "2024-01-31")).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].employee_id, 1);
}

// =============================================================================
// Determinism & snapshots
// =============================================================================

#[tokio::test]
async fn repeated_runs_return_identical_row_order() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;

    for n in 0..10i64 {
        order(pool, n + 1, "ALFKI", 1 + n % 2, "2024-01-15", None).await;
        detail(pool, n + 1, 1 + n % 2, 2.0, 5, 0.0).await;
    }

    let window = range("2024-01-01", "2024-01-31");
    let first = db.reports().product_popularity(&window).await.unwrap();
    let second = db.reports().product_popularity(&window).await.unwrap();
    assert_eq!(first, second);

    let first = db.reports().employee_activity(&window).await.unwrap();
    let second = db.reports().employee_activity(&window).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn snapshot_serves_all_reports_from_one_view() {
    let db = test_db().await;
    let pool = db.pool();
    base_catalog(pool).await;

    order(pool, 1, "ALFKI", 1, "2024-01-05", Some("2024-01-07")).await;
    detail(pool, 1, 1, 2.0, 10, 0.0).await;

    let window = range("2024-01-01", "2024-01-31");
    let mut snapshot = db.reports().snapshot().await.unwrap();

    let popularity = snapshot.product_popularity(&window).await.unwrap();
    let profit = snapshot.customer_profit(&window).await.unwrap();
    let activity = snapshot.employee_activity(&window).await.unwrap();
    let delays = snapshot.employee_delays(&window).await.unwrap();
    let reorder = snapshot.products_to_reorder().await.unwrap();

    assert_eq!(popularity[0].sold, 10);
    assert!((profit[0].profit - 20.0).abs() < 1e-9);
    assert_eq!(activity[0].order_count, 1);
    assert!((delays[0].avg_delay - 2.0).abs() < 1e-9);
    // Chang (17 in stock, level 25) is below threshold in the base catalog
    assert_eq!(reorder.len(), 1);
    assert_eq!(reorder[0].product_id, 2);

    snapshot.release().await.unwrap();

    // The pooled connection is back: the store works as before
    let again = db.reports().product_popularity(&window).await.unwrap();
    assert_eq!(again, popularity);
}
