//! dbtlink Core
//!
//! Core domain model shared by every dbtlink crate: the closed set of
//! supported warehouses, canonical credentials, and the error taxonomy.
//! Never rename error codes or warehouse tags - they are part of the public API.

pub mod warehouse;
pub mod credentials;
pub mod violation;
pub mod error;
pub mod report;
pub mod config;

pub use warehouse::WarehouseType;
pub use credentials::{
    BigQueryAuth, BigQueryCredentials, BigQueryPriority, Credentials, DatabricksCredentials,
    HttpScheme, PostgresCredentials, RedshiftCredentials, SnowflakeAuth, SnowflakeCredentials,
    SslMode, TrinoAuth, TrinoCredentials,
};
pub use violation::{SchemaViolation, ViolationKind, ViolationReport};
pub use error::{CredentialsError, ErrorCode, TargetError};
pub use report::{ValidationReport, ReportSummary, ReportVersion, TargetOutcome, TargetStatus};
pub use config::{Config, ConfigError};
