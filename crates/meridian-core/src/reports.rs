//! # Report Definitions
//!
//! The five reports, each a pure function from typed parameters to a
//! [`SelectPlan`], plus the typed records each report emits.
//!
//! ## The Reports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  popularity        orders→order_details→products→categories        │
//! │                    SUM(quantity) per product, in a date range       │
//! │                                                                     │
//! │  reorder           products→suppliers, products→categories          │
//! │                    current snapshot, stock at/below reorder level   │
//! │                                                                     │
//! │  customer_profit   orders→order_details, orders→customers           │
//! │                    SUM(qty * price * (1 - discount)) per customer   │
//! │                                                                     │
//! │  employee_activity orders→employees                                 │
//! │                    COUNT(orders) per employee, in a date range      │
//! │                                                                     │
//! │  employee_delays   orders→employees, shipped orders only            │
//! │                    AVG(shipped_date - order_date) per employee      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Values
//! Numeric derivations (`units_available`, the reorder delta, the shipment
//! delay) live in the plan because filters and ordering consume them.
//! String formatting (supplier contact, employee display name) lives in the
//! meridian-db result mapper, which is NULL-tolerant. Each derived value has
//! exactly one home so report output cannot drift from the underlying data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::plan::{PlanBuilder, SelectPlan};
use crate::schema::sales_schema;

// =============================================================================
// Parameters
// =============================================================================

/// Inclusive date window for the four range-parameterized reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl DateRange {
    /// Creates a validated range. Bounds are inclusive on both ends.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> ReportResult<Self> {
        let range = DateRange { from_date, to_date };
        range.validate()?;
        Ok(range)
    }

    /// Rejects a reversed range.
    ///
    /// Called by every range-parameterized report builder before any plan
    /// is assembled, so a transport layer that constructs the struct
    /// directly (e.g. via serde) still cannot smuggle bad bounds through.
    pub fn validate(&self) -> ReportResult<()> {
        if self.to_date < self.from_date {
            return Err(ReportError::invalid(format!(
                "to_date {} is before from_date {}",
                self.to_date, self.from_date
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Output Records
// =============================================================================

/// One row of the popularity report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPopularity {
    pub product_id: i64,
    pub product_name: String,
    pub category_name: String,
    /// Total units sold in the requested window.
    pub sold: i64,
}

/// One row of the reorder report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReorder {
    pub product_id: i64,
    pub product_name: String,
    pub category_name: String,
    pub units_in_stock: i64,
    pub units_on_order: i64,
    /// Derived: `units_in_stock - units_on_order`. Never persisted.
    pub units_available: i64,
    pub reorder_level: i64,
    /// Supplier company name.
    pub supplier: String,
    /// Formatted `"{title}: {name} via {phone}"`; absent parts render empty.
    pub contact: String,
}

/// One row of the customer profit report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfit {
    pub customer_id: String,
    pub customer_name: String,
    /// `Σ quantity * unit_price * (1 - discount)` over the window.
    pub profit: f64,
}

/// One row of the employee activity report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeActivity {
    pub employee_id: i64,
    pub employee_name: String,
    pub order_count: i64,
}

/// One row of the employee shipment-delay report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDelay {
    pub employee_id: i64,
    pub employee_name: String,
    /// Mean `shipped_date - order_date` in days over the window's shipped
    /// orders.
    pub avg_delay: f64,
}

// =============================================================================
// Plan Builders
// =============================================================================

/// Schema-derived join predicate; a missing relationship is a defect in the
/// report definition, not caller input.
fn join_on(from: &str, to: &str) -> ReportResult<String> {
    sales_schema()
        .join_on(from, to)
        .ok_or_else(|| ReportError::query(format!("no foreign key between {from} and {to}")))
}

fn order_date_window(builder: PlanBuilder, range: &DateRange) -> PlanBuilder {
    builder
        .filter_bind("orders.order_date >= ?", range.from_date)
        .filter_bind("orders.order_date <= ?", range.to_date)
}

/// Products by units sold in the window, best sellers first.
///
/// An empty window yields an empty sequence, not an error.
pub fn product_popularity(range: &DateRange) -> ReportResult<SelectPlan> {
    range.validate()?;
    let builder = PlanBuilder::from("orders")
        .inner_join("order_details", join_on("orders", "order_details")?)
        .inner_join("products", join_on("order_details", "products")?)
        .inner_join("categories", join_on("products", "categories")?)
        .column("order_details.product_id", "product_id")
        .column("products.product_name", "product_name")
        .column("categories.category_name", "category_name")
        .aggregate("SUM(order_details.quantity)", "sold");
    order_date_window(builder, range)
        .order_desc("sold")
        .order_asc("order_details.product_id")
        .build()
}

/// Active products whose available stock sits at or below the reorder
/// level, most urgent first.
///
/// `to_reorder = units_in_stock - units_on_order - reorder_level`; rows
/// with `to_reorder <= 0` qualify. Discontinued products never appear.
pub fn products_to_reorder() -> ReportResult<SelectPlan> {
    PlanBuilder::from("products")
        .inner_join("suppliers", join_on("products", "suppliers")?)
        .inner_join("categories", join_on("products", "categories")?)
        .column("products.product_id", "product_id")
        .column("products.product_name", "product_name")
        .column("categories.category_name", "category_name")
        .column("products.units_in_stock", "units_in_stock")
        .column("products.units_on_order", "units_on_order")
        .column("products.units_in_stock - products.units_on_order", "units_available")
        .column("products.reorder_level", "reorder_level")
        .column("suppliers.company_name", "supplier")
        .column("suppliers.contact_title", "contact_title")
        .column("suppliers.contact_name", "contact_name")
        .column("suppliers.phone", "phone")
        .filter("products.discontinued = 0")
        .filter("products.units_in_stock - products.units_on_order - products.reorder_level <= 0")
        .order_asc("products.units_in_stock - products.units_on_order - products.reorder_level")
        .order_asc("products.product_id")
        .build()
}

/// Total discounted revenue per customer over the window, most profitable
/// first.
pub fn customer_profit(range: &DateRange) -> ReportResult<SelectPlan> {
    range.validate()?;
    let builder = PlanBuilder::from("orders")
        .inner_join("order_details", join_on("orders", "order_details")?)
        .inner_join("customers", join_on("orders", "customers")?)
        .column("customers.customer_id", "customer_id")
        .column("customers.company_name", "customer_name")
        .aggregate(
            "SUM(order_details.quantity * order_details.unit_price * (1 - order_details.discount))",
            "profit",
        );
    order_date_window(builder, range)
        .order_desc("profit")
        .order_asc("customers.customer_id")
        .build()
}

/// Orders placed per employee over the window, busiest first.
pub fn employee_activity(range: &DateRange) -> ReportResult<SelectPlan> {
    range.validate()?;
    let builder = PlanBuilder::from("orders")
        .inner_join("employees", join_on("orders", "employees")?)
        .column("employees.employee_id", "employee_id")
        .column("employees.first_name", "first_name")
        .column("employees.last_name", "last_name")
        .aggregate("COUNT(orders.order_id)", "order_count");
    order_date_window(builder, range)
        .order_desc("order_count")
        .order_asc("employees.employee_id")
        .build()
}

/// Mean shipment delay per employee over the window, slowest first.
///
/// Delay per order is `julianday(shipped_date) - julianday(order_date)` in
/// days; unshipped orders are excluded rather than treated as zero delay.
pub fn employee_delays(range: &DateRange) -> ReportResult<SelectPlan> {
    range.validate()?;
    let builder = PlanBuilder::from("orders")
        .inner_join("employees", join_on("orders", "employees")?)
        .column("employees.employee_id", "employee_id")
        .column("employees.first_name", "first_name")
        .column("employees.last_name", "last_name")
        .aggregate(
            "AVG(julianday(orders.shipped_date) - julianday(orders.order_date))",
            "avg_delay",
        )
        .filter("orders.shipped_date IS NOT NULL");
    order_date_window(builder, range)
        .order_desc("avg_delay")
        .order_asc("employees.employee_id")
        .build()
}

// =============================================================================
// Unit Tests
// =============================================================================
