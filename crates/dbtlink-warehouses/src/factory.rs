//! Client factory
//!
//! One client per credentials variant. The match is exhaustive, so adding a
//! warehouse without a client does not compile.

use dbtlink_core::{Credentials, CredentialsError, TargetError, WarehouseType};
use dbtlink_profiles::{resolve_profile_credentials, ProfileStore};
use crate::bigquery::BigQueryClient;
use crate::client::WarehouseClient;
use crate::databricks::DatabricksClient;
use crate::postgres::{PostgresClient, RedshiftClient, RisingWaveClient};
use crate::snowflake::SnowflakeClient;
use crate::trino::TrinoClient;

/// Build the client for a set of credentials
///
/// No network I/O happens here. The only failure is a client whose
/// warehouse type disagrees with the credentials, which is a bug.
pub fn warehouse_client_from_credentials(
    credentials: Credentials,
) -> Result<Box<dyn WarehouseClient>, CredentialsError> {
    let expected = credentials.warehouse_type();

    let client: Box<dyn WarehouseClient> = match credentials {
        Credentials::Postgres(c) => Box::new(PostgresClient::new(c)),
        Credentials::Redshift(c) => Box::new(RedshiftClient::new(c)),
        Credentials::RisingWave(c) => Box::new(RisingWaveClient::new(c)),
        Credentials::Snowflake(c) => Box::new(SnowflakeClient::new(c)),
        Credentials::BigQuery(c) => Box::new(BigQueryClient::new(c)),
        Credentials::Databricks(c) => Box::new(DatabricksClient::new(c)),
        Credentials::Trino(c) => Box::new(TrinoClient::new(c)),
    };

    ensure_client_type(expected, client)
}

fn ensure_client_type(
    expected: WarehouseType,
    client: Box<dyn WarehouseClient>,
) -> Result<Box<dyn WarehouseClient>, CredentialsError> {
    let actual = client.warehouse_type();
    if actual != expected {
        tracing::error!(credentials = %expected, client = %actual, "client type mismatch");
        return Err(CredentialsError::UnexpectedCredentialsType {
            credentials: expected,
            client: actual,
        });
    }

    tracing::debug!(warehouse = %actual, endpoint = %client.endpoint(), "built warehouse client");
    Ok(client)
}

/// Resolve a profile/target and build its client
pub fn warehouse_client_for_target(
    store: &ProfileStore,
    profile: &str,
    target: Option<&str>,
) -> Result<Box<dyn WarehouseClient>, TargetError> {
    let resolved = resolve_profile_credentials(store, profile, target)?;

    warehouse_client_from_credentials(resolved.credentials).map_err(|source| {
        TargetError::new(profile, resolved.target_name.as_str(), store.path(), source)
    })
}
