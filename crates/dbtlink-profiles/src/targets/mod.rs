//! Per-warehouse target definitions
//!
//! Each module pairs a static field table (`SCHEMA`) with a `normalize`
//! function turning a target that passed `SCHEMA` into `Credentials`.

pub mod postgres;
pub mod redshift;
pub mod risingwave;
pub mod snowflake;
pub mod bigquery;
pub mod databricks;
pub mod trino;

#[cfg(test)]
pub(crate) fn raw(value: serde_json::Value) -> crate::store::RawTarget {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("test target must be a mapping, got {}", other),
    }
}
