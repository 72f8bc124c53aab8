//! Databricks SQL warehouse client

use dbtlink_core::{Credentials, DatabricksCredentials, WarehouseType};
use crate::client::WarehouseClient;

#[derive(Debug, Clone)]
pub struct DatabricksClient {
    credentials: DatabricksCredentials,
}

impl DatabricksClient {
    pub fn new(credentials: DatabricksCredentials) -> Self {
        Self { credentials }
    }

    /// Unity Catalog catalog, `hive_metastore` when unset
    pub fn catalog(&self) -> &str {
        self.credentials.catalog.as_deref().unwrap_or("hive_metastore")
    }
}

impl WarehouseClient for DatabricksClient {
    fn warehouse_type(&self) -> WarehouseType {
        WarehouseType::Databricks
    }

    fn credentials(&self) -> Credentials {
        Credentials::Databricks(self.credentials.clone())
    }

    fn endpoint(&self) -> String {
        let host = self.credentials.host.trim_start_matches("https://").trim_end_matches('/');
        let path = self.credentials.http_path.trim_start_matches('/');
        format!("https://{}/{}", host, path)
    }

    fn default_schema(&self) -> &str {
        &self.credentials.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = DatabricksClient::new(DatabricksCredentials {
            host: "https://adb-1.azuredatabricks.net/".to_string(),
            http_path: "/sql/1.0/warehouses/abc".to_string(),
            token: "dapi123".to_string(),
            schema: "dbt".to_string(),
            catalog: None,
            threads: None,
        });
        assert_eq!(client.endpoint(), "https://adb-1.azuredatabricks.net/sql/1.0/warehouses/abc");
        assert_eq!(client.catalog(), "hive_metastore");
    }
}
