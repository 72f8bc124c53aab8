//! PostgreSQL targets
//!
//! Shared with RisingWave, which speaks the Postgres wire protocol and uses
//! the same profiles.yml fields.

use dbtlink_core::{Credentials, CredentialsError, PostgresCredentials, SslMode, WarehouseType};
use crate::alias::{DBNAME, PASSWORD};
use crate::fields::TargetFields;
use crate::schema::{FieldShape, FieldSpec, TargetSchema};
use crate::store::RawTarget;

/// Fields of a Postgres wire-protocol target
pub static WIRE_PROTOCOL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("host", FieldShape::String),
    FieldSpec::required("user", FieldShape::String),
    FieldSpec::required("port", FieldShape::Port),
    FieldSpec::required("schema", FieldShape::String),
    FieldSpec::optional("dbname", FieldShape::String),
    FieldSpec::optional("database", FieldShape::String),
    FieldSpec::optional("pass", FieldShape::String),
    FieldSpec::optional("password", FieldShape::String),
    FieldSpec::optional("threads", FieldShape::Integer),
    FieldSpec::optional("keepalives_idle", FieldShape::Integer),
    FieldSpec::optional("connect_timeout", FieldShape::Integer),
    FieldSpec::optional("search_path", FieldShape::String),
    FieldSpec::optional("role", FieldShape::String),
    FieldSpec::optional("sslmode", FieldShape::OneOf(SslMode::TAGS)),
];

pub static SCHEMA: TargetSchema = TargetSchema {
    warehouse: WarehouseType::Postgres,
    fields: WIRE_PROTOCOL_FIELDS,
};

pub fn normalize(target: &RawTarget) -> Result<Credentials, CredentialsError> {
    wire_protocol_credentials(WarehouseType::Postgres, target).map(Credentials::Postgres)
}

/// Build wire-protocol credentials; `warehouse` only labels errors
pub(crate) fn wire_protocol_credentials(
    warehouse: WarehouseType,
    target: &RawTarget,
) -> Result<PostgresCredentials, CredentialsError> {
    let fields = TargetFields::new(warehouse, target);

    Ok(PostgresCredentials {
        host: fields.string("host")?,
        user: fields.string("user")?,
        password: fields.require_aliased(&PASSWORD)?,
        port: fields.port("port")?,
        dbname: fields.require_aliased(&DBNAME)?,
        schema: fields.string("schema")?,
        threads: fields.optional_u64("threads"),
        keepalives_idle: fields.optional_u64("keepalives_idle"),
        connect_timeout: fields.optional_u64("connect_timeout"),
        search_path: fields.optional_string("search_path"),
        role: fields.optional_string("role"),
        sslmode: fields.optional_enum("sslmode", SslMode::from_tag),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::raw;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn minimal() -> RawTarget {
        raw(json!({
            "type": "postgres", "host": "localhost", "user": "alice", "port": 5432,
            "schema": "dbt_alice", "password": "pw", "dbname": "analytics"
        }))
    }

    #[test]
    fn minimal_target_normalizes() {
        assert!(SCHEMA.validate(&minimal()).is_ok());

        let credentials = normalize(&minimal()).unwrap();
        assert_eq!(
            credentials,
            Credentials::Postgres(PostgresCredentials {
                host: "localhost".to_string(),
                user: "alice".to_string(),
                password: "pw".to_string(),
                port: 5432,
                dbname: "analytics".to_string(),
                schema: "dbt_alice".to_string(),
                threads: None,
                keepalives_idle: None,
                connect_timeout: None,
                search_path: None,
                role: None,
                sslmode: None,
            })
        );
    }

    #[test]
    fn optional_fields_copy_across() {
        let mut target = minimal();
        target.insert("threads".to_string(), json!(4));
        target.insert("keepalives_idle".to_string(), json!(30));
        target.insert("connect_timeout".to_string(), json!(10));
        target.insert("search_path".to_string(), json!("analytics,public"));
        target.insert("role".to_string(), json!("transformer"));
        target.insert("sslmode".to_string(), json!("verify-full"));

        match normalize(&target).unwrap() {
            Credentials::Postgres(c) => {
                assert_eq!(c.threads, Some(4));
                assert_eq!(c.keepalives_idle, Some(30));
                assert_eq!(c.connect_timeout, Some(10));
                assert_eq!(c.search_path.as_deref(), Some("analytics,public"));
                assert_eq!(c.role.as_deref(), Some("transformer"));
                assert_eq!(c.sslmode, Some(SslMode::VerifyFull));
            }
            other => panic!("Expected Postgres credentials, got {:?}", other),
        }
    }

    #[test]
    fn missing_dbname_names_both_aliases() {
        let mut target = minimal();
        target.remove("dbname");

        let err = normalize(&target).unwrap_err();
        assert_eq!(
            err,
            CredentialsError::MissingRequiredField {
                warehouse: WarehouseType::Postgres,
                field: "dbname",
                aliases: vec!["dbname", "database"],
            }
        );
    }

    #[test]
    fn password_is_checked_before_dbname() {
        let mut target = minimal();
        target.remove("password");
        target.remove("dbname");

        let err = normalize(&target).unwrap_err();
        assert!(matches!(err, CredentialsError::MissingRequiredField { field: "password", .. }));
    }
}
