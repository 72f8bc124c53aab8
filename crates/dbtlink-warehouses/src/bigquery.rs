//! Google BigQuery client

use dbtlink_core::{BigQueryAuth, BigQueryCredentials, Credentials, WarehouseType};
use crate::client::WarehouseClient;

/// BigQuery client
#[derive(Debug, Clone)]
pub struct BigQueryClient {
    credentials: BigQueryCredentials,
}

impl BigQueryClient {
    pub fn new(credentials: BigQueryCredentials) -> Self {
        Self { credentials }
    }

    /// Project billed for queries (`execution_project`, else `project`)
    pub fn billing_project(&self) -> &str {
        self.credentials
            .execution_project
            .as_deref()
            .unwrap_or(&self.credentials.project)
    }

    /// Authentication method as written in profiles.yml
    pub fn auth_method(&self) -> &'static str {
        match self.credentials.auth {
            BigQueryAuth::Oauth => "oauth",
            BigQueryAuth::ServiceAccount { .. } => "service-account",
            BigQueryAuth::ServiceAccountJson { .. } => "service-account-json",
        }
    }
}

impl WarehouseClient for BigQueryClient {
    fn warehouse_type(&self) -> WarehouseType {
        WarehouseType::BigQuery
    }

    fn credentials(&self) -> Credentials {
        Credentials::BigQuery(self.credentials.clone())
    }

    fn endpoint(&self) -> String {
        match &self.credentials.location {
            Some(location) => format!("{} ({})", self.credentials.project, location),
            None => self.credentials.project.clone(),
        }
    }

    fn default_schema(&self) -> &str {
        &self.credentials.dataset
    }
}
