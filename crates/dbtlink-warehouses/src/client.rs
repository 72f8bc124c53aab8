//! Warehouse client trait

use dbtlink_core::{Credentials, WarehouseType};

/// A configured client for one warehouse
pub trait WarehouseClient: Send + Sync + std::fmt::Debug {
    /// Warehouse the client talks to
    fn warehouse_type(&self) -> WarehouseType;

    /// Get the client name (e.g., "BigQuery", "Snowflake")
    fn name(&self) -> &'static str {
        self.warehouse_type().display_name()
    }

    /// Credentials the client was built from
    fn credentials(&self) -> Credentials;

    /// Where the client connects, without secrets
    fn endpoint(&self) -> String;

    /// Schema (or dataset) dbt builds into
    fn default_schema(&self) -> &str;

    /// One-line summary, safe to print
    fn describe(&self) -> String {
        format!("{} client for {} (schema '{}')", self.name(), self.endpoint(), self.default_schema())
    }
}
