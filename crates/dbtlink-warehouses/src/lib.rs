//! Warehouse clients built from canonical credentials
//!
//! Every supported warehouse has a client type. Clients are configured, not
//! connected: building one performs no network I/O.
//!
//! ## Features
//!
//! - `postgres` - build `tokio_postgres::Config` for Postgres, Redshift and RisingWave
//!
//! ## Example
//!
//! ```rust,ignore
//! use dbtlink_warehouses::warehouse_client_from_credentials;
//!
//! let resolved = resolve_profile_credentials(&store, "prod", None)?;
//! let client = warehouse_client_from_credentials(resolved.credentials)?;
//! println!("{}", client.describe());
//! ```

pub mod client;
pub mod postgres;
pub mod snowflake;
pub mod bigquery;
pub mod databricks;
pub mod trino;
pub mod factory;

pub use client::WarehouseClient;
pub use postgres::{PostgresClient, RedshiftClient, RisingWaveClient};
pub use snowflake::SnowflakeClient;
pub use bigquery::BigQueryClient;
pub use databricks::DatabricksClient;
pub use trino::TrinoClient;
pub use factory::{warehouse_client_for_target, warehouse_client_from_credentials};
