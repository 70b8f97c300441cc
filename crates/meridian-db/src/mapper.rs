//! # Result Mapper
//!
//! Converts raw rows into the report record types.
//!
//! Decode failures are [`ReportError::QueryError`]: a column with the wrong
//! name or type is a defect in the plan or the mapper, never caller input.
//!
//! ## Formatting Lives Here
//! The supplier contact line and the employee display name are assembled in
//! this module, not in SQL. SQLite's `||` propagates NULL, so a supplier
//! with no contact title would lose the whole contact string; here a missing
//! part renders as an empty segment instead.

use meridian_core::{
    CustomerProfit, EmployeeActivity, EmployeeDelay, ProductPopularity, ProductReorder,
    ReportError, ReportResult,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> ReportResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|e| ReportError::query(format!("column {column}: {e}")))
}

/// `"{title}: {name} via {phone}"`, with absent parts as empty segments.
fn contact_line(title: Option<&str>, name: Option<&str>, phone: Option<&str>) -> String {
    format!(
        "{}: {} via {}",
        title.unwrap_or(""),
        name.unwrap_or(""),
        phone.unwrap_or("")
    )
}

fn employee_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
}

pub fn product_popularity(row: &SqliteRow) -> ReportResult<ProductPopularity> {
    Ok(ProductPopularity {
        product_id: get(row, "product_id")?,
        product_name: get(row, "product_name")?,
        category_name: get(row, "category_name")?,
        sold: get(row, "sold")?,
    })
}

pub fn product_reorder(row: &SqliteRow) -> ReportResult<ProductReorder> {
    let contact_title: Option<String> = get(row, "contact_title")?;
    let contact_name: Option<String> = get(row, "contact_name")?;
    let phone: Option<String> = get(row, "phone")?;

    Ok(ProductReorder {
        product_id: get(row, "product_id")?,
        product_name: get(row, "product_name")?,
        category_name: get(row, "category_name")?,
        units_in_stock: get(row, "units_in_stock")?,
        units_on_order: get(row, "units_on_order")?,
        units_available: get(row, "units_available")?,
        reorder_level: get(row, "reorder_level")?,
        supplier: get(row, "supplier")?,
        contact: contact_line(
            contact_title.as_deref(),
            contact_name.as_deref(),
            phone.as_deref(),
        ),
    })
}

pub fn customer_profit(row: &SqliteRow) -> ReportResult<CustomerProfit> {
    Ok(CustomerProfit {
        customer_id: get(row, "customer_id")?,
        customer_name: get(row, "customer_name")?,
        profit: get(row, "profit")?,
    })
}

pub fn employee_activity(row: &SqliteRow) -> ReportResult<EmployeeActivity> {
    let first: String = get(row, "first_name")?;
    let last: String = get(row, "last_name")?;
    Ok(EmployeeActivity {
        employee_id: get(row, "employee_id")?,
        employee_name: employee_name(&first, &last),
        order_count: get(row, "order_count")?,
    })
}

pub fn employee_delay(row: &SqliteRow) -> ReportResult<EmployeeDelay> {
    let first: String = get(row, "first_name")?;
    let last: String = get(row, "last_name")?;
    Ok(EmployeeDelay {
        employee_id: get(row, "employee_id")?,
        employee_name: employee_name(&first, &last),
        avg_delay: get(row, "avg_delay")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
