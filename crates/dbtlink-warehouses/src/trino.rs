//! Trino client

use dbtlink_core::{Credentials, HttpScheme, TrinoAuth, TrinoCredentials, WarehouseType};
use crate::client::WarehouseClient;

#[derive(Debug, Clone)]
pub struct TrinoClient {
    credentials: TrinoCredentials,
}

impl TrinoClient {
    pub fn new(credentials: TrinoCredentials) -> Self {
        Self { credentials }
    }

    /// `http` unless configured otherwise, as dbt-trino does
    pub fn http_scheme(&self) -> HttpScheme {
        self.credentials.http_scheme.unwrap_or(HttpScheme::Http)
    }

    pub fn uses_ldap(&self) -> bool {
        matches!(self.credentials.auth, TrinoAuth::Ldap { .. })
    }
}

impl WarehouseClient for TrinoClient {
    fn warehouse_type(&self) -> WarehouseType {
        WarehouseType::Trino
    }

    fn credentials(&self) -> Credentials {
        Credentials::Trino(self.credentials.clone())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.http_scheme().as_str(),
            self.credentials.host,
            self.credentials.port,
            self.credentials.dbname
        )
    }

    fn default_schema(&self) -> &str {
        &self.credentials.schema
    }
}
