//! Trino targets
//!
//! `method` defaults to `ldap` when a password is configured and to `none`
//! otherwise. An explicit `ldap` without a password is an error.

use dbtlink_core::{Credentials, CredentialsError, HttpScheme, TrinoAuth, TrinoCredentials, WarehouseType};
use crate::alias::{CATALOG, PASSWORD};
use crate::fields::TargetFields;
use crate::schema::{FieldShape, FieldSpec, TargetSchema};
use crate::store::RawTarget;

const METHODS: &[&str] = &["none", "ldap"];

pub static SCHEMA: TargetSchema = TargetSchema {
    warehouse: WarehouseType::Trino,
    fields: &[
        FieldSpec::required("host", FieldShape::String),
        FieldSpec::required("user", FieldShape::String),
        FieldSpec::required("port", FieldShape::Port),
        FieldSpec::required("schema", FieldShape::String),
        FieldSpec::optional("method", FieldShape::OneOf(METHODS)),
        FieldSpec::optional("database", FieldShape::String),
        FieldSpec::optional("catalog", FieldShape::String),
        FieldSpec::optional("password", FieldShape::String),
        FieldSpec::optional("pass", FieldShape::String),
        FieldSpec::optional("http_scheme", FieldShape::OneOf(HttpScheme::TAGS)),
        FieldSpec::optional("threads", FieldShape::Integer),
    ],
};

pub fn normalize(target: &RawTarget) -> Result<Credentials, CredentialsError> {
    let fields = TargetFields::new(WarehouseType::Trino, target);

    Ok(Credentials::Trino(TrinoCredentials {
        host: fields.string("host")?,
        port: fields.port("port")?,
        user: fields.string("user")?,
        auth: auth(&fields)?,
        dbname: fields.require_aliased(&CATALOG)?,
        schema: fields.string("schema")?,
        http_scheme: fields.optional_enum("http_scheme", HttpScheme::from_tag),
        threads: fields.optional_u64("threads"),
    }))
}

fn auth(fields: &TargetFields<'_>) -> Result<TrinoAuth, CredentialsError> {
    let password = fields.aliased(&PASSWORD);

    match (fields.optional_string("method").as_deref(), password) {
        (Some("none"), _) => Ok(TrinoAuth::None),
        (_, Some(password)) => Ok(TrinoAuth::Ldap { password }),
        (Some(_), None) => fields.require_aliased(&PASSWORD).map(|password| TrinoAuth::Ldap { password }),
        (None, None) => Ok(TrinoAuth::None),
    }
}
