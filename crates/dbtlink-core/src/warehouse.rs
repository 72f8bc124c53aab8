//! Warehouse type registry
//!
//! IMPORTANT: tags are the `type` values users write in profiles.yml.
//! NEVER rename or remove a tag - add new variants only.

use serde::{Deserialize, Serialize};

/// Supported warehouse types (v1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseType {
    /// PostgreSQL
    Postgres,

    /// Amazon Redshift
    Redshift,

    /// RisingWave (Postgres wire protocol)
    RisingWave,

    /// Snowflake
    Snowflake,

    /// Google BigQuery
    BigQuery,

    /// Databricks SQL warehouses
    Databricks,

    /// Trino
    Trino,
}

impl WarehouseType {
    /// Every supported warehouse, in registration order
    pub const ALL: [WarehouseType; 7] = [
        Self::Postgres,
        Self::Redshift,
        Self::RisingWave,
        Self::Snowflake,
        Self::BigQuery,
        Self::Databricks,
        Self::Trino,
    ];

    /// The stable profiles.yml tag for this warehouse
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Redshift => "redshift",
            Self::RisingWave => "risingwave",
            Self::Snowflake => "snowflake",
            Self::BigQuery => "bigquery",
            Self::Databricks => "databricks",
            Self::Trino => "trino",
        }
    }

    /// Human-facing product name, used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Postgres => "PostgreSQL",
            Self::Redshift => "Redshift",
            Self::RisingWave => "RisingWave",
            Self::Snowflake => "Snowflake",
            Self::BigQuery => "BigQuery",
            Self::Databricks => "Databricks",
            Self::Trino => "Trino",
        }
    }

    /// Look up a warehouse by its profiles.yml tag (exact match)
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|warehouse| warehouse.as_str() == tag)
    }
}

impl std::fmt::Display for WarehouseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
