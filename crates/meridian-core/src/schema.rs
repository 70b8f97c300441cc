//! # Schema Model
//!
//! Static description of the sales schema: tables, columns, and the
//! foreign-key relationships the report builders use to derive joins.
//!
//! ## Entity Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Sales Schema                                 │
//! │                                                                     │
//! │   customers ◄──┐                  ┌──► categories                   │
//! │                │                  │                                 │
//! │   employees ◄──┤ orders 1──* order_details *──1 products            │
//! │     │  ▲       │                                  │                 │
//! │     └──┘       │                                  └──► suppliers    │
//! │  (reports_to)  │                                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure data: no behavior beyond lookup by name. The descriptors are
//! `&'static` and mirror the DDL in `migrations/sqlite/`.

/// Column storage type, as SQLite sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    /// ISO `YYYY-MM-DD` stored as TEXT.
    Date,
}

/// A single column descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
}

/// A foreign-key relationship from one table to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyDef {
    /// Referencing column on the owning table.
    pub column: &'static str,
    /// Referenced table name.
    pub references_table: &'static str,
    /// Referenced column name.
    pub references_column: &'static str,
}

/// A table descriptor: columns, primary key, outgoing foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    /// Primary key columns (composite for `order_details`).
    pub primary_key: &'static [&'static str],
    pub columns: &'static [ColumnDef],
    pub foreign_keys: &'static [ForeignKeyDef],
}

impl TableDef {
    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Looks up the foreign key referencing `table`, if any.
    pub fn foreign_key_to(&self, table: &str) -> Option<&'static ForeignKeyDef> {
        self.foreign_keys.iter().find(|fk| fk.references_table == table)
    }

    /// Returns `table.column` for use in rendered SQL.
    pub fn qualified(&self, column: &str) -> String {
        format!("{}.{}", self.name, column)
    }
}

/// The whole schema: a fixed set of table descriptors.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub tables: &'static [TableDef],
}

impl Schema {
    /// Looks up a table by name.
    pub fn table(&self, name: &str) -> Option<&'static TableDef> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Renders the equi-join predicate between `from` and `to`, following
    /// the foreign key in either direction.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::schema::sales_schema;
    ///
    /// let on = sales_schema().join_on("order_details", "orders").unwrap();
    /// assert_eq!(on, "order_details.order_id = orders.order_id");
    /// ```
    pub fn join_on(&self, from: &str, to: &str) -> Option<String> {
        let (owner, fk) = self
            .table(from)
            .and_then(|t| t.foreign_key_to(to).map(|fk| (from, fk)))
            .or_else(|| self.table(to).and_then(|t| t.foreign_key_to(from).map(|fk| (to, fk))))?;
        Some(format!(
            "{}.{} = {}.{}",
            owner, fk.column, fk.references_table, fk.references_column
        ))
    }
}

// =============================================================================
// The sales schema
// =============================================================================

use ColumnType::{Date, Integer, Real, Text};

const fn col(name: &'static str, ty: ColumnType) -> ColumnDef {
    ColumnDef { name, ty, nullable: false }
}

const fn col_null(name: &'static str, ty: ColumnType) -> ColumnDef {
    ColumnDef { name, ty, nullable: true }
}

const fn fk(
    column: &'static str,
    references_table: &'static str,
    references_column: &'static str,
) -> ForeignKeyDef {
    ForeignKeyDef { column, references_table, references_column }
}

static SALES_TABLES: &[TableDef] = &[
    TableDef {
        name: "categories",
        primary_key: &["category_id"],
        columns: &[col("category_id", Integer), col("category_name", Text)],
        foreign_keys: &[],
    },
    TableDef {
        name: "suppliers",
        primary_key: &["supplier_id"],
        columns: &[
            col("supplier_id", Integer),
            col("company_name", Text),
            col_null("contact_name", Text),
            col_null("contact_title", Text),
            col_null("phone", Text),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "products",
        primary_key: &["product_id"],
        columns: &[
            col("product_id", Integer),
            col("product_name", Text),
            col_null("category_id", Integer),
            col_null("supplier_id", Integer),
            col("unit_price", Real),
            col("units_in_stock", Integer),
            col("units_on_order", Integer),
            col("reorder_level", Integer),
            col("discontinued", Integer),
        ],
        foreign_keys: &[
            fk("category_id", "categories", "category_id"),
            fk("supplier_id", "suppliers", "supplier_id"),
        ],
    },
    TableDef {
        name: "customers",
        primary_key: &["customer_id"],
        columns: &[
            col("customer_id", Text),
            col("company_name", Text),
            col_null("contact_name", Text),
            col_null("contact_title", Text),
            col_null("city", Text),
            col_null("country", Text),
            col_null("phone", Text),
        ],
        foreign_keys: &[],
    },
    TableDef {
        name: "employees",
        primary_key: &["employee_id"],
        columns: &[
            col("employee_id", Integer),
            col("first_name", Text),
            col("last_name", Text),
            col_null("title", Text),
            col_null("reports_to", Integer),
        ],
        foreign_keys: &[fk("reports_to", "employees", "employee_id")],
    },
    TableDef {
        name: "orders",
        primary_key: &["order_id"],
        columns: &[
            col("order_id", Integer),
            col_null("customer_id", Text),
            col_null("employee_id", Integer),
            col("order_date", Date),
            col_null("shipped_date", Date),
        ],
        foreign_keys: &[
            fk("customer_id", "customers", "customer_id"),
            fk("employee_id", "employees", "employee_id"),
        ],
    },
    TableDef {
        name: "order_details",
        primary_key: &["order_id", "product_id"],
        columns: &[
            col("order_id", Integer),
            col("product_id", Integer),
            col("unit_price", Real),
            col("quantity", Integer),
            col("discount", Real),
        ],
        foreign_keys: &[
            fk("order_id", "orders", "order_id"),
            fk("product_id", "products", "product_id"),
        ],
    },
];

static SALES_SCHEMA: Schema = Schema { tables: SALES_TABLES };

/// Returns the static sales schema.
pub fn sales_schema() -> &'static Schema {
    &SALES_SCHEMA
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_foreign_key_resolves() {
        let schema = sales_schema();
        for table in schema.tables {
            for fk in table.foreign_keys {
                assert!(
                    table.column(fk.column).is_some(),
                    "{}.{} missing",
                    table.name,
                    fk.column
                );
                let target = schema
                    .table(fk.references_table)
                    .unwrap_or_else(|| panic!("{} references unknown table", table.name));
                assert!(target.column(fk.references_column).is_some());
            }
        }
    }

    #[test]
    fn join_on_follows_fk_in_either_direction() {
        let schema = sales_schema();
        assert_eq!(
            schema.join_on("orders", "order_details").as_deref(),
            Some("order_details.order_id = orders.order_id")
        );
        assert_eq!(
            schema.join_on("products", "categories").as_deref(),
            Some("products.category_id = categories.category_id")
        );
        assert!(schema.join_on("customers", "suppliers").is_none());
    }

    #[test]
    fn composite_primary_key_on_order_details() {
        let table = sales_schema().table("order_details").unwrap();
        assert_eq!(table.primary_key, &["order_id", "product_id"]);
    }

    #[test]
    fn qualified_column_rendering() {
        let products = sales_schema().table("products").unwrap();
        assert_eq!(products.qualified("product_id"), "products.product_id");
    }
}
