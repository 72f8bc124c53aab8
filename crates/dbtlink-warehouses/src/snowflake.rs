//! Snowflake client

use dbtlink_core::{Credentials, SnowflakeAuth, SnowflakeCredentials, WarehouseType};
use crate::client::WarehouseClient;

/// Snowflake client
#[derive(Debug, Clone)]
pub struct SnowflakeClient {
    credentials: SnowflakeCredentials,
}

impl SnowflakeClient {
    pub fn new(credentials: SnowflakeCredentials) -> Self {
        Self { credentials }
    }

    /// Account URL, e.g. `https://xy12345.eu-west-1.snowflakecomputing.com`
    pub fn account_url(&self) -> String {
        format!("https://{}.snowflakecomputing.com", self.credentials.account)
    }

    /// Virtual warehouse queries run on
    pub fn warehouse(&self) -> &str {
        &self.credentials.warehouse
    }

    pub fn uses_key_pair(&self) -> bool {
        matches!(self.credentials.auth, SnowflakeAuth::KeyPair { .. })
    }
}

impl WarehouseClient for SnowflakeClient {
    fn warehouse_type(&self) -> WarehouseType {
        WarehouseType::Snowflake
    }

    fn credentials(&self) -> Credentials {
        Credentials::Snowflake(self.credentials.clone())
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.account_url(), self.credentials.database)
    }

    fn default_schema(&self) -> &str {
        &self.credentials.schema
    }
}
