//! # Query Assembler
//!
//! Builds an executable plan for one report: joins, filters, aggregation,
//! and a deterministic ordering. The assembler never executes anything -
//! it produces a [`SelectPlan`] value that meridian-db runs.
//!
//! ## Plan Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          SelectPlan                                 │
//! │                                                                     │
//! │  PlanBuilder::from("orders")                                        │
//! │      .inner_join("order_details", on)    ← schema-derived predicate │
//! │      .column("order_details.product_id", "product_id")              │
//! │      .aggregate("SUM(order_details.quantity)", "sold")              │
//! │      .filter_bind("orders.order_date >= ?", from_date)              │
//! │      .order_desc("sold")                                            │
//! │      .order_asc("order_details.product_id")  ← tie-break            │
//! │      .build()?                                                      │
//! │          │                                                          │
//! │          ├── derives GROUP BY = the non-aggregated columns          │
//! │          ├── rejects grouping mismatches (QueryError)               │
//! │          └── rejects plans without an ORDER BY (QueryError)         │
//! │                                                                     │
//! │  plan.sql()   → "SELECT ... FROM ... WHERE ... ORDER BY ..."        │
//! │  plan.binds() → values for each `?`, in placeholder order           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! Ordering is always explicit, and every report supplies a secondary
//! tie-break key (the entity primary key), so two runs against an unchanged
//! store return rows in identical order.

use chrono::NaiveDate;

use crate::error::{ReportError, ReportResult};

/// A value bound to one `?` placeholder, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Real(f64),
    Text(String),
    Date(NaiveDate),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::Int(v)
    }
}

impl From<NaiveDate> for BindValue {
    fn from(v: NaiveDate) -> Self {
        BindValue::Date(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

/// Sort direction for an ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One projected column: an SQL expression and its output alias.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Projection {
    expr: String,
    alias: String,
    aggregate: bool,
}

/// One inner join: target table plus its equi-join predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Join {
    table: &'static str,
    on: String,
}

/// One WHERE predicate; `binds` supplies its `?` placeholders in order.
#[derive(Debug, Clone, PartialEq)]
struct Filter {
    sql: String,
    binds: Vec<BindValue>,
}

/// One ORDER BY key.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OrderKey {
    expr: String,
    direction: Direction,
}

/// A validated, not-yet-executed query plan.
///
/// Produced by [`PlanBuilder::build`]; consumed by the execution adapter in
/// meridian-db. The plan is inert data: rendering it has no side effects and
/// executing it is someone else's job.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectPlan {
    from: &'static str,
    projections: Vec<Projection>,
    joins: Vec<Join>,
    filters: Vec<Filter>,
    group_by: Vec<String>,
    order_by: Vec<OrderKey>,
}

impl SelectPlan {
    /// Renders the plan as SQLite SQL with `?` placeholders.
    pub fn sql(&self) -> String {
        let mut sql = String::from("SELECT ");
        for (i, p) in self.projections.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&p.expr);
            if p.expr != p.alias {
                sql.push_str(" AS ");
                sql.push_str(&p.alias);
            }
        }
        sql.push_str(" FROM ");
        sql.push_str(self.from);
        for join in &self.joins {
            sql.push_str(" INNER JOIN ");
            sql.push_str(join.table);
            sql.push_str(" ON ");
            sql.push_str(&join.on);
        }
        if !self.filters.is_empty() {
            sql.push_str(" WHERE ");
            for (i, f) in self.filters.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" AND ");
                }
                sql.push_str(&f.sql);
            }
        }
        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }
        sql.push_str(" ORDER BY ");
        for (i, key) in self.order_by.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&key.expr);
            sql.push(' ');
            sql.push_str(key.direction.keyword());
        }
        sql
    }

    /// Returns the bind values, one per `?` placeholder, in order.
    pub fn binds(&self) -> Vec<&BindValue> {
        self.filters.iter().flat_map(|f| f.binds.iter()).collect()
    }

    /// Output aliases, in projection order.
    pub fn output_columns(&self) -> Vec<&str> {
        self.projections.iter().map(|p| p.alias.as_str()).collect()
    }
}

/// Builder for a [`SelectPlan`].
///
/// Follows the same consuming-builder shape as the rest of the workspace
/// configuration types.
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    from: &'static str,
    projections: Vec<Projection>,
    joins: Vec<Join>,
    filters: Vec<Filter>,
    explicit_group_by: Vec<String>,
    order_by: Vec<OrderKey>,
}

impl PlanBuilder {
    /// Starts a plan reading from `table`.
    pub fn from(table: &'static str) -> Self {
        PlanBuilder {
            from: table,
            projections: Vec::new(),
            joins: Vec::new(),
            filters: Vec::new(),
            explicit_group_by: Vec::new(),
            order_by: Vec::new(),
        }
    }

    /// Projects a plain (non-aggregated) expression under `alias`.
    pub fn column(mut self, expr: impl Into<String>, alias: impl Into<String>) -> Self {
        self.projections.push(Projection {
            expr: expr.into(),
            alias: alias.into(),
            aggregate: false,
        });
        self
    }

    /// Projects an aggregate expression under `alias`.
    pub fn aggregate(mut self, expr: impl Into<String>, alias: impl Into<String>) -> Self {
        self.projections.push(Projection {
            expr: expr.into(),
            alias: alias.into(),
            aggregate: true,
        });
        self
    }

    /// Adds an inner join. All reports use inner semantics.
    pub fn inner_join(mut self, table: &'static str, on: impl Into<String>) -> Self {
        self.joins.push(Join { table, on: on.into() });
        self
    }

    /// Adds a WHERE predicate with no placeholders.
    pub fn filter(mut self, sql: impl Into<String>) -> Self {
        self.filters.push(Filter { sql: sql.into(), binds: Vec::new() });
        self
    }

    /// Adds a WHERE predicate containing exactly one `?`, bound to `value`.
    pub fn filter_bind(mut self, sql: impl Into<String>, value: impl Into<BindValue>) -> Self {
        self.filters.push(Filter {
            sql: sql.into(),
            binds: vec![value.into()],
        });
        self
    }

    /// Supplies an explicit GROUP BY list.
    ///
    /// Normally unnecessary: `build` derives the grouping from the plain
    /// projections. An explicit list that disagrees with the derivation is
    /// rejected - an ambiguous aggregation is a programming defect.
    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        self.explicit_group_by.push(expr.into());
        self
    }

    /// Appends an ascending ordering key.
    pub fn order_asc(self, expr: impl Into<String>) -> Self {
        self.order(expr, Direction::Asc)
    }

    /// Appends a descending ordering key.
    pub fn order_desc(self, expr: impl Into<String>) -> Self {
        self.order(expr, Direction::Desc)
    }

    fn order(mut self, expr: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push(OrderKey { expr: expr.into(), direction });
        self
    }

    /// Validates and finishes the plan.
    ///
    /// ## Validation Rules
    /// - at least one projection
    /// - when any projection aggregates, GROUP BY is exactly the set of
    ///   non-aggregated projected expressions (derived automatically; an
    ///   explicit list must match)
    /// - GROUP BY without an aggregate is rejected
    /// - ORDER BY must be non-empty; report output order is part of the
    ///   contract
    pub fn build(self) -> ReportResult<SelectPlan> {
        if self.projections.is_empty() {
            return Err(ReportError::query("plan projects no columns"));
        }

        let has_aggregate = self.projections.iter().any(|p| p.aggregate);
        let derived: Vec<String> = self
            .projections
            .iter()
            .filter(|p| !p.aggregate)
            .map(|p| p.expr.clone())
            .collect();

        let group_by = if has_aggregate {
            if !self.explicit_group_by.is_empty() && self.explicit_group_by != derived {
                return Err(ReportError::query(format!(
                    "grouping mismatch: explicit [{}] vs projected [{}]",
                    self.explicit_group_by.join(", "),
                    derived.join(", ")
                )));
            }
            derived
        } else {
            if !self.explicit_group_by.is_empty() {
                return Err(ReportError::query("GROUP BY without an aggregate projection"));
            }
            Vec::new()
        };

        if self.order_by.is_empty() {
            return Err(ReportError::query("plan has no ORDER BY; report order must be deterministic"));
        }

        Ok(SelectPlan {
            from: self.from,
            projections: self.projections,
            joins: self.joins,
            filters: self.filters,
            group_by,
            order_by: self.order_by,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn renders_joins_filters_grouping_and_order() {
        let plan = PlanBuilder::from("orders")
            .inner_join("order_details", "order_details.order_id = orders.order_id")
            .column("order_details.product_id", "product_id")
            .aggregate("SUM(order_details.quantity)", "sold")
            .filter_bind("orders.order_date >= ?", date("2024-01-01"))
            .filter_bind("orders.order_date <= ?", date("2024-01-31"))
            .order_desc("sold")
            .order_asc("order_details.product_id")
            .build()
            .unwrap();

        assert_eq!(
            plan.sql(),
            "SELECT order_details.product_id AS product_id, \
             SUM(order_details.quantity) AS sold \
             FROM orders \
             INNER JOIN order_details ON order_details.order_id = orders.order_id \
             WHERE orders.order_date >= ? AND orders.order_date <= ? \
             GROUP BY order_details.product_id \
             ORDER BY sold DESC, order_details.product_id ASC"
        );
        assert_eq!(
            plan.binds(),
            vec![
                &BindValue::Date(date("2024-01-01")),
                &BindValue::Date(date("2024-01-31")),
            ]
        );
    }

    #[test]
    fn group_by_is_derived_from_plain_projections() {
        let plan = PlanBuilder::from("orders")
            .column("orders.customer_id", "customer_id")
            .aggregate("COUNT(orders.order_id)", "order_count")
            .order_desc("order_count")
            .order_asc("orders.customer_id")
            .build()
            .unwrap();

        assert!(plan.sql().contains("GROUP BY orders.customer_id"));
    }

    #[test]
    fn mismatched_explicit_grouping_is_rejected() {
        let err = PlanBuilder::from("orders")
            .column("orders.customer_id", "customer_id")
            .aggregate("COUNT(orders.order_id)", "order_count")
            .group_by("orders.employee_id")
            .order_desc("order_count")
            .build()
            .unwrap_err();

        assert!(matches!(err, ReportError::QueryError(_)));
    }

    #[test]
    fn grouping_without_aggregate_is_rejected() {
        let err = PlanBuilder::from("products")
            .column("products.product_id", "product_id")
            .group_by("products.product_id")
            .order_asc("products.product_id")
            .build()
            .unwrap_err();

        assert!(matches!(err, ReportError::QueryError(_)));
    }

    #[test]
    fn missing_order_by_is_rejected() {
        let err = PlanBuilder::from("products")
            .column("products.product_id", "product_id")
            .build()
            .unwrap_err();

        assert!(matches!(err, ReportError::QueryError(_)));
    }

    #[test]
    fn no_grouping_clause_without_aggregates() {
        let plan = PlanBuilder::from("products")
            .column("products.product_id", "product_id")
            .order_asc("products.product_id")
            .build()
            .unwrap();

        assert!(!plan.sql().contains("GROUP BY"));
        assert!(plan.binds().is_empty());
    }

    #[test]
    fn expression_equal_to_alias_is_not_aliased_twice() {
        let plan = PlanBuilder::from("products")
            .column("product_id", "product_id")
            .order_asc("product_id")
            .build()
            .unwrap();

        assert_eq!(plan.sql(), "SELECT product_id FROM products ORDER BY product_id ASC");
    }
}
