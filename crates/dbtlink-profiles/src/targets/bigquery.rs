//! Google BigQuery targets

use dbtlink_core::{BigQueryAuth, BigQueryCredentials, BigQueryPriority, Credentials, CredentialsError, WarehouseType};
use crate::alias::DATASET;
use crate::fields::TargetFields;
use crate::schema::{FieldShape, FieldSpec, TargetSchema};
use crate::store::RawTarget;

/// Accepted `method` values
const METHODS: &[&str] = &["oauth", "service-account", "service-account-json"];

pub static SCHEMA: TargetSchema = TargetSchema {
    warehouse: WarehouseType::BigQuery,
    fields: &[
        FieldSpec::required("project", FieldShape::String),
        FieldSpec::required("method", FieldShape::OneOf(METHODS)),
        FieldSpec::optional("dataset", FieldShape::String),
        FieldSpec::optional("schema", FieldShape::String),
        FieldSpec::optional("keyfile", FieldShape::String),
        FieldSpec::optional("keyfile_json", FieldShape::Object),
        FieldSpec::optional("threads", FieldShape::Integer),
        FieldSpec::optional("timeout_seconds", FieldShape::Integer),
        FieldSpec::optional("priority", FieldShape::OneOf(BigQueryPriority::TAGS)),
        FieldSpec::optional("retries", FieldShape::Integer),
        FieldSpec::optional("location", FieldShape::String),
        FieldSpec::optional("maximum_bytes_billed", FieldShape::Integer),
        FieldSpec::optional("execution_project", FieldShape::String),
    ],
};

pub fn normalize(target: &RawTarget) -> Result<Credentials, CredentialsError> {
    let fields = TargetFields::new(WarehouseType::BigQuery, target);

    Ok(Credentials::BigQuery(BigQueryCredentials {
        project: fields.string("project")?,
        dataset: fields.require_aliased(&DATASET)?,
        auth: auth(&fields)?,
        threads: fields.optional_u64("threads"),
        timeout_seconds: fields.optional_u64("timeout_seconds"),
        priority: fields.optional_enum("priority", BigQueryPriority::from_tag),
        retries: fields.optional_u64("retries"),
        location: fields.optional_string("location"),
        maximum_bytes_billed: fields.optional_u64("maximum_bytes_billed"),
        execution_project: fields.optional_string("execution_project"),
    }))
}

fn auth(fields: &TargetFields<'_>) -> Result<BigQueryAuth, CredentialsError> {
    let method = fields.required_enum("method", method_from_tag)?;

    match method {
        "service-account" => Ok(BigQueryAuth::ServiceAccount {
            keyfile: fields.non_empty_string("keyfile")
                .ok_or_else(|| fields.missing_any("keyfile", &["keyfile"]))?,
        }),
        "service-account-json" => Ok(BigQueryAuth::ServiceAccountJson {
            keyfile_json: fields.object("keyfile_json")?,
        }),
        _ => Ok(BigQueryAuth::Oauth),
    }
}

fn method_from_tag(tag: &str) -> Option<&'static str> {
    METHODS.iter().copied().find(|method| *method == tag)
}
