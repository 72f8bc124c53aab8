//! Test fixtures for warehouse client integration tests
//!
//! One valid raw target per supported warehouse.

use dbtlink_core::WarehouseType;
use serde_json::{json, Value};

/// A valid profiles.yml target for `warehouse`
pub fn target_for(warehouse: WarehouseType) -> Value {
    match warehouse {
        WarehouseType::Postgres => json!({
            "type": "postgres", "host": "localhost", "user": "alice", "port": 5432,
            "schema": "dbt_alice", "pass": "pw", "dbname": "analytics"
        }),
        WarehouseType::Redshift => json!({
            "type": "redshift", "host": "cluster.redshift.amazonaws.com", "user": "etl",
            "port": 5439, "schema": "analytics", "password": "pw", "database": "dev"
        }),
        WarehouseType::RisingWave => json!({
            "type": "risingwave", "host": "h", "user": "u", "port": 5432,
            "schema": "public", "password": "secret", "database": "db"
        }),
        WarehouseType::Snowflake => json!({
            "type": "snowflake", "account": "xy12345", "user": "loader", "password": "pw",
            "database": "RAW", "warehouse": "LOADING", "schema": "PUBLIC"
        }),
        WarehouseType::BigQuery => json!({
            "type": "bigquery", "method": "oauth", "project": "my-project", "dataset": "dbt"
        }),
        WarehouseType::Databricks => json!({
            "type": "databricks", "host": "adb-1.azuredatabricks.net",
            "http_path": "/sql/1.0/warehouses/abc", "token": "dapi123", "schema": "dbt"
        }),
        WarehouseType::Trino => json!({
            "type": "trino", "host": "trino.internal", "user": "analyst", "port": 8080,
            "schema": "sales", "database": "hive", "method": "none"
        }),
    }
}

/// profiles.yml with a single `prod` profile targeting RisingWave
pub const RISINGWAVE_PROFILES: &str = r#"
prod:
  target: warehouse
  outputs:
    warehouse:
      type: risingwave
      host: h
      user: u
      port: 5432
      schema: public
      password: secret
      database: db
"#;
