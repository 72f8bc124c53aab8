//! Warehouse type dispatch
//!
//! Maps a target's `type` tag to the field table and normalizer of that
//! warehouse. The mapping is an exhaustive match over `WarehouseType`, so a
//! new warehouse cannot be added without a converter.

use dbtlink_core::{Credentials, CredentialsError, WarehouseType};
use serde_json::Value;
use crate::schema::TargetSchema;
use crate::store::RawTarget;
use crate::targets::{bigquery, databricks, postgres, redshift, risingwave, snowflake, trino};

type Normalizer = fn(&RawTarget) -> Result<Credentials, CredentialsError>;

/// Validation and normalization for one warehouse type
#[derive(Clone, Copy)]
pub struct TargetConverter {
    pub warehouse: WarehouseType,
    pub schema: &'static TargetSchema,
    normalizer: Normalizer,
}

impl std::fmt::Debug for TargetConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetConverter")
            .field("warehouse", &self.warehouse)
            .finish_non_exhaustive()
    }
}

impl TargetConverter {
    pub fn for_warehouse(warehouse: WarehouseType) -> Self {
        let (schema, normalizer): (&'static TargetSchema, Normalizer) = match warehouse {
            WarehouseType::Postgres => (&postgres::SCHEMA, postgres::normalize),
            WarehouseType::Redshift => (&redshift::SCHEMA, redshift::normalize),
            WarehouseType::RisingWave => (&risingwave::SCHEMA, risingwave::normalize),
            WarehouseType::Snowflake => (&snowflake::SCHEMA, snowflake::normalize),
            WarehouseType::BigQuery => (&bigquery::SCHEMA, bigquery::normalize),
            WarehouseType::Databricks => (&databricks::SCHEMA, databricks::normalize),
            WarehouseType::Trino => (&trino::SCHEMA, trino::normalize),
        };

        Self {
            warehouse,
            schema,
            normalizer,
        }
    }

    /// Converter for a raw `type` tag
    pub fn for_tag(tag: &str) -> Result<Self, CredentialsError> {
        WarehouseType::from_tag(tag)
            .map(Self::for_warehouse)
            .ok_or_else(|| CredentialsError::UnsupportedWarehouseType {
                type_tag: tag.to_string(),
            })
    }

    /// Structural check only
    pub fn validate(&self, target: &RawTarget) -> Result<(), CredentialsError> {
        self.schema
            .validate(target)
            .map_err(|violations| CredentialsError::InvalidCredentialsSchema {
                type_tag: self.warehouse.as_str().to_string(),
                violations,
            })
    }

    /// Normalize a target that already passed `validate`
    pub fn normalize(&self, target: &RawTarget) -> Result<Credentials, CredentialsError> {
        (self.normalizer)(target)
    }

    /// Validate then normalize
    pub fn convert(&self, target: &RawTarget) -> Result<Credentials, CredentialsError> {
        self.validate(target)?;
        let credentials = self.normalize(target)?;
        tracing::debug!(warehouse = %self.warehouse, "normalized target");
        Ok(credentials)
    }
}

/// Convert a raw target into canonical credentials
///
/// A missing or non-string `type` is reported as an unsupported warehouse
/// type with an empty tag.
pub fn resolve_credentials(target: &RawTarget) -> Result<Credentials, CredentialsError> {
    let tag = match target.get("type") {
        Some(Value::String(tag)) => tag.as_str(),
        _ => "",
    };

    tracing::debug!(type_tag = tag, "dispatching target");
    TargetConverter::for_tag(tag)?.convert(target)
}
