//! Databricks targets

use dbtlink_core::{Credentials, CredentialsError, DatabricksCredentials, WarehouseType};
use crate::fields::TargetFields;
use crate::schema::{FieldShape, FieldSpec, TargetSchema};
use crate::store::RawTarget;

pub static SCHEMA: TargetSchema = TargetSchema {
    warehouse: WarehouseType::Databricks,
    fields: &[
        FieldSpec::required("host", FieldShape::String),
        FieldSpec::required("http_path", FieldShape::String),
        FieldSpec::required("schema", FieldShape::String),
        FieldSpec::required("token", FieldShape::String),
        FieldSpec::optional("catalog", FieldShape::String),
        FieldSpec::optional("threads", FieldShape::Integer),
    ],
};

pub fn normalize(target: &RawTarget) -> Result<Credentials, CredentialsError> {
    let fields = TargetFields::new(WarehouseType::Databricks, target);

    Ok(Credentials::Databricks(DatabricksCredentials {
        host: fields.string("host")?,
        http_path: fields.string("http_path")?,
        token: fields.string("token")?,
        schema: fields.string("schema")?,
        catalog: fields.non_empty_string("catalog"),
        threads: fields.optional_u64("threads"),
    }))
}
