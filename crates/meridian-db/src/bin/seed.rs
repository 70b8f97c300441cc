//! # Seed Data Generator
//!
//! Populates the database with demo sales data for development, so the five
//! reports have something to chew on.
//!
//! ## Usage
//! ```bash
//! # Generate 500 orders (default)
//! cargo run -p meridian-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p meridian-db --bin seed -- --orders 2000
//!
//! # Specify database path
//! cargo run -p meridian-db --bin seed -- --db ./data/sales.db
//! ```
//!
//! ## Generated Data
//! - a fixed catalog of categories, suppliers, products, customers and
//!   employees (a couple of products discontinued, a couple of suppliers
//!   without a contact title, so the reorder report's edge cases show up)
//! - orders spread deterministically over calendar year 2024, each with
//!   1-3 line items; some orders unshipped, the rest shipped 1-10 days
//!   after the order date
//!
//! Generation is index-arithmetic, not random: the same arguments produce
//! the same database every time.

use chrono::{Days, NaiveDate};
use std::env;

use meridian_db::{Database, DbConfig};

/// (category_id, name)
const CATEGORIES: &[(i64, &str)] = &[
    (1, "Beverages"),
    (2, "Condiments"),
    (3, "Seafood"),
    (4, "Produce"),
];

/// (supplier_id, company, contact_name, contact_title, phone)
const SUPPLIERS: &[(i64, &str, Option<&str>, Option<&str>, &str)] = &[
    (1, "Exotic Liquids", Some("Charlotte Cooper"), Some("Purchasing Manager"), "(171) 555-2222"),
    (2, "New Orleans Cajun Delights", Some("Shelley Burke"), Some("Order Administrator"), "(100) 555-4822"),
    // No contact title: exercises the empty-segment rendering in the report
    (3, "Tokyo Traders", Some("Yoshi Nagase"), None, "(03) 3555-5011"),
];

/// (product_id, name, category_id, supplier_id, price, in_stock, on_order, reorder_level, discontinued)
const PRODUCTS: &[(i64, &str, i64, i64, f64, i64, i64, i64, i64)] = &[
    (1, "Chai", 1, 1, 18.00, 39, 0, 10, 0),
    (2, "Chang", 1, 1, 19.00, 17, 40, 25, 0),
    (3, "Aniseed Syrup", 2, 1, 10.00, 13, 70, 25, 0),
    (4, "Chef Anton's Cajun Seasoning", 2, 2, 22.00, 53, 0, 0, 0),
    (5, "Chef Anton's Gumbo Mix", 2, 2, 21.35, 0, 0, 0, 1),
    (6, "Grandma's Boysenberry Spread", 2, 2, 25.00, 120, 0, 25, 0),
    (7, "Ikura", 3, 3, 31.00, 31, 0, 0, 0),
    (8, "Konbu", 3, 3, 6.00, 24, 0, 5, 0),
    (9, "Tofu", 4, 3, 23.25, 35, 0, 0, 0),
    (10, "Longlife Tofu", 4, 3, 10.00, 4, 20, 5, 0),
    (11, "Mishi Kobe Niku", 3, 3, 97.00, 29, 0, 0, 1),
    (12, "Genen Shouyu", 2, 3, 15.50, 39, 0, 5, 0),
];

/// (customer_id, company)
const CUSTOMERS: &[(&str, &str)] = &[
    ("ALFKI", "Alfreds Futterkiste"),
    ("ANATR", "Ana Trujillo Emparedados y helados"),
    ("ANTON", "Antonio Moreno Taqueria"),
    ("BERGS", "Berglunds snabbkop"),
    ("BLAUS", "Blauer See Delikatessen"),
];

/// (employee_id, first, last, title, reports_to)
const EMPLOYEES: &[(i64, &str, &str, &str, Option<i64>)] = &[
    (1, "Nancy", "Davolio", "Sales Representative", Some(2)),
    (2, "Andrew", "Fuller", "Vice President, Sales", None),
    (3, "Janet", "Leverling", "Sales Representative", Some(2)),
    (4, "Margaret", "Peacock", "Sales Representative", Some(2)),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut orders: i64 = 500;
    let mut db_path = String::from("./sales_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--orders" | "-n" => {
                if i + 1 < args.len() {
                    orders = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Meridian Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --orders <N>   Number of orders to generate (default: 500)");
                println!("  -d, --db <PATH>    Database file path (default: ./sales_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Meridian Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Orders:   {}", orders);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("Connected, migrations applied");

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        println!("Database already has {} orders", existing);
        println!("Skipping seed to avoid duplicates; delete the file to regenerate.");
        return Ok(());
    }

    seed_catalog(&db).await?;
    println!("Catalog seeded: {} products, {} customers, {} employees",
        PRODUCTS.len(), CUSTOMERS.len(), EMPLOYEES.len());

    let start = std::time::Instant::now();
    seed_orders(&db, orders).await?;
    println!("Generated {} orders in {:?}", orders, start.elapsed());

    // Smoke-test one report against the fresh data
    let reorder = db.reports().products_to_reorder().await?;
    println!("Reorder report: {} products below threshold", reorder.len());

    println!();
    println!("Seed complete");
    Ok(())
}

async fn seed_catalog(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    for &(id, name) in CATEGORIES {
        sqlx::query("INSERT INTO categories (category_id, category_name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(db.pool())
            .await?;
    }

    for &(id, company, contact, title, phone) in SUPPLIERS {
        sqlx::query(
            "INSERT INTO suppliers (supplier_id, company_name, contact_name, contact_title, phone) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(company)
        .bind(contact)
        .bind(title)
        .bind(phone)
        .execute(db.pool())
        .await?;
    }

    for &(id, name, category, supplier, price, in_stock, on_order, level, discontinued) in PRODUCTS {
        sqlx::query(
            "INSERT INTO products (product_id, product_name, category_id, supplier_id, unit_price, \
             units_in_stock, units_on_order, reorder_level, discontinued) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(supplier)
        .bind(price)
        .bind(in_stock)
        .bind(on_order)
        .bind(level)
        .bind(discontinued)
        .execute(db.pool())
        .await?;
    }

    for &(id, company) in CUSTOMERS {
        sqlx::query("INSERT INTO customers (customer_id, company_name) VALUES (?, ?)")
            .bind(id)
            .bind(company)
            .execute(db.pool())
            .await?;
    }

    for &(id, first, last, title, reports_to) in EMPLOYEES {
        sqlx::query(
            "INSERT INTO employees (employee_id, first_name, last_name, title, reports_to) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(first)
        .bind(last)
        .bind(title)
        .bind(reports_to)
        .execute(db.pool())
        .await?;
    }

    Ok(())
}

async fn seed_orders(db: &Database, count: i64) -> Result<(), Box<dyn std::error::Error>> {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();

    for n in 0..count {
        let order_id = n + 1;
        // Spread orders across the year; 7919 is coprime with 365 so the
        // sequence visits every day
        let day_offset = (n * 7919) % 365;
        let order_date = base + Days::new(day_offset as u64);

        // Every 7th order is still unshipped
        let shipped_date = if n % 7 == 0 {
            None
        } else {
            Some(order_date + Days::new(1 + (n % 10) as u64))
        };

        let customer = CUSTOMERS[(n % CUSTOMERS.len() as i64) as usize].0;
        let employee = EMPLOYEES[((n * 13) % EMPLOYEES.len() as i64) as usize].0;

        sqlx::query(
            "INSERT INTO orders (order_id, customer_id, employee_id, order_date, shipped_date) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(customer)
        .bind(employee)
        .bind(order_date)
        .bind(shipped_date)
        .execute(db.pool())
        .await?;

        // 1-3 distinct line items per order
        let line_items = 1 + (n % 3);
        for item in 0..line_items {
            let (product_id, _, _, _, price, ..) =
                PRODUCTS[(((n + item) * 5) % PRODUCTS.len() as i64) as usize];
            let quantity = 1 + ((n + item) * 11) % 20;
            let discount = match (n + item) % 4 {
                0 => 0.05,
                1 => 0.10,
                _ => 0.0,
            };

            sqlx::query(
                "INSERT INTO order_details (order_id, product_id, unit_price, quantity, discount) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(product_id)
            .bind(price)
            .bind(quantity)
            .bind(discount)
            .execute(db.pool())
            .await?;
        }

        if (n + 1) % 100 == 0 {
            println!("  Generated {} orders...", n + 1);
        }
    }

    Ok(())
}
