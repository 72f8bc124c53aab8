//! Postgres wire-protocol clients
//!
//! Covers PostgreSQL, Amazon Redshift and RisingWave. With the `postgres`
//! feature each client can produce a `tokio_postgres::Config`; connecting is
//! left to the caller.

use dbtlink_core::{Credentials, PostgresCredentials, RedshiftCredentials, SslMode, WarehouseType};
use crate::client::WarehouseClient;

#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use tokio_postgres::{config::SslMode as PgSslMode, Config as PgConfig};

/// PostgreSQL client
#[derive(Debug, Clone)]
pub struct PostgresClient {
    credentials: PostgresCredentials,
}

impl PostgresClient {
    pub fn new(credentials: PostgresCredentials) -> Self {
        Self { credentials }
    }

    /// Driver configuration
    #[cfg(feature = "postgres")]
    pub fn pg_config(&self) -> PgConfig {
        wire_protocol_config(&self.credentials)
    }
}

impl WarehouseClient for PostgresClient {
    fn warehouse_type(&self) -> WarehouseType {
        WarehouseType::Postgres
    }

    fn credentials(&self) -> Credentials {
        Credentials::Postgres(self.credentials.clone())
    }

    fn endpoint(&self) -> String {
        endpoint(&self.credentials.host, self.credentials.port, &self.credentials.dbname)
    }

    fn default_schema(&self) -> &str {
        &self.credentials.schema
    }
}

/// RisingWave client
///
/// RisingWave speaks the Postgres protocol; only the warehouse tag differs.
#[derive(Debug, Clone)]
pub struct RisingWaveClient {
    credentials: PostgresCredentials,
}

impl RisingWaveClient {
    pub fn new(credentials: PostgresCredentials) -> Self {
        Self { credentials }
    }

    #[cfg(feature = "postgres")]
    pub fn pg_config(&self) -> PgConfig {
        wire_protocol_config(&self.credentials)
    }
}

impl WarehouseClient for RisingWaveClient {
    fn warehouse_type(&self) -> WarehouseType {
        WarehouseType::RisingWave
    }

    fn credentials(&self) -> Credentials {
        Credentials::RisingWave(self.credentials.clone())
    }

    fn endpoint(&self) -> String {
        endpoint(&self.credentials.host, self.credentials.port, &self.credentials.dbname)
    }

    fn default_schema(&self) -> &str {
        &self.credentials.schema
    }
}

/// Amazon Redshift client
#[derive(Debug, Clone)]
pub struct RedshiftClient {
    credentials: RedshiftCredentials,
}

impl RedshiftClient {
    pub fn new(credentials: RedshiftCredentials) -> Self {
        Self { credentials }
    }

    /// RA3 nodes support cross-database references
    pub fn is_ra3(&self) -> bool {
        self.credentials.ra3_node.unwrap_or(false)
    }

    #[cfg(feature = "postgres")]
    pub fn pg_config(&self) -> PgConfig {
        let c = &self.credentials;
        let mut config = base_config(&c.host, c.port, &c.user, &c.password, &c.dbname);
        apply_timeouts(&mut config, c.connect_timeout, c.keepalives_idle);
        if let Some(mode) = c.sslmode {
            config.ssl_mode(driver_ssl_mode(mode));
        }
        config
    }
}

impl WarehouseClient for RedshiftClient {
    fn warehouse_type(&self) -> WarehouseType {
        WarehouseType::Redshift
    }

    fn credentials(&self) -> Credentials {
        Credentials::Redshift(self.credentials.clone())
    }

    fn endpoint(&self) -> String {
        endpoint(&self.credentials.host, self.credentials.port, &self.credentials.dbname)
    }

    fn default_schema(&self) -> &str {
        &self.credentials.schema
    }
}

fn endpoint(host: &str, port: u16, dbname: &str) -> String {
    format!("{}:{}/{}", host, port, dbname)
}

/// Whether a mode needs a TLS connector
pub fn requires_tls(mode: Option<SslMode>) -> bool {
    matches!(
        mode,
        Some(SslMode::Require | SslMode::VerifyCa | SslMode::VerifyFull)
    )
}

#[cfg(feature = "postgres")]
fn base_config(host: &str, port: u16, user: &str, password: &str, dbname: &str) -> PgConfig {
    let mut config = PgConfig::new();
    config
        .host(host)
        .port(port)
        .user(user)
        .password(password)
        .dbname(dbname)
        .application_name("dbtlink");
    config
}

#[cfg(feature = "postgres")]
fn apply_timeouts(config: &mut PgConfig, connect_timeout: Option<u64>, keepalives_idle: Option<u64>) {
    if let Some(secs) = connect_timeout {
        config.connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = keepalives_idle {
        config.keepalives(true).keepalives_idle(Duration::from_secs(secs));
    }
}

#[cfg(feature = "postgres")]
fn wire_protocol_config(c: &PostgresCredentials) -> PgConfig {
    let mut config = base_config(&c.host, c.port, &c.user, &c.password, &c.dbname);
    apply_timeouts(&mut config, c.connect_timeout, c.keepalives_idle);
    if let Some(mode) = c.sslmode {
        config.ssl_mode(driver_ssl_mode(mode));
    }
    if let Some(search_path) = &c.search_path {
        config.options(&format!("-c search_path={}", search_path));
    }
    config
}

/// tokio-postgres only distinguishes disable/prefer/require; certificate
/// verification is configured on the TLS connector.
#[cfg(feature = "postgres")]
fn driver_ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Allow | SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require | SslMode::VerifyCa | SslMode::VerifyFull => PgSslMode::Require,
    }
}
