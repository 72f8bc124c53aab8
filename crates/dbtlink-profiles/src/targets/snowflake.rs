//! Snowflake targets

use dbtlink_core::{Credentials, CredentialsError, SnowflakeAuth, SnowflakeCredentials, WarehouseType};
use crate::fields::TargetFields;
use crate::schema::{FieldShape, FieldSpec, TargetSchema};
use crate::store::RawTarget;

pub static SCHEMA: TargetSchema = TargetSchema {
    warehouse: WarehouseType::Snowflake,
    fields: &[
        FieldSpec::required("account", FieldShape::String),
        FieldSpec::required("user", FieldShape::String),
        FieldSpec::required("database", FieldShape::String),
        FieldSpec::required("warehouse", FieldShape::String),
        FieldSpec::required("schema", FieldShape::String),
        FieldSpec::optional("password", FieldShape::String),
        FieldSpec::optional("private_key_path", FieldShape::String),
        FieldSpec::optional("private_key_passphrase", FieldShape::String),
        FieldSpec::optional("role", FieldShape::String),
        FieldSpec::optional("threads", FieldShape::Integer),
        FieldSpec::optional("client_session_keep_alive", FieldShape::Boolean),
        FieldSpec::optional("query_tag", FieldShape::String),
        FieldSpec::optional("authenticator", FieldShape::String),
    ],
};

pub fn normalize(target: &RawTarget) -> Result<Credentials, CredentialsError> {
    let fields = TargetFields::new(WarehouseType::Snowflake, target);

    Ok(Credentials::Snowflake(SnowflakeCredentials {
        account: fields.string("account")?,
        user: fields.string("user")?,
        auth: auth(&fields)?,
        database: fields.string("database")?,
        warehouse: fields.string("warehouse")?,
        schema: fields.string("schema")?,
        role: fields.optional_string("role"),
        threads: fields.optional_u64("threads"),
        client_session_keep_alive: fields.optional_bool("client_session_keep_alive"),
        query_tag: fields.optional_string("query_tag"),
        authenticator: fields.optional_string("authenticator"),
    }))
}

/// Password wins over key pair when both are configured
fn auth(fields: &TargetFields<'_>) -> Result<SnowflakeAuth, CredentialsError> {
    if let Some(password) = fields.non_empty_string("password") {
        return Ok(SnowflakeAuth::Password { password });
    }

    if let Some(private_key_path) = fields.non_empty_string("private_key_path") {
        return Ok(SnowflakeAuth::KeyPair {
            private_key_path,
            private_key_passphrase: fields.non_empty_string("private_key_passphrase"),
        });
    }

    Err(fields.missing_any("password", &["password", "private_key_path"]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::raw;
    use serde_json::json;

    fn base() -> RawTarget {
        raw(json!({
            "type": "snowflake", "account": "xy12345.eu-west-1", "user": "loader",
            "database": "RAW", "warehouse": "LOADING", "schema": "PUBLIC"
        }))
    }

    #[test]
    fn password_auth() {
        let mut target = base();
        target.insert("password".to_string(), json!("pw"));
        target.insert("role".to_string(), json!("TRANSFORMER"));

        match normalize(&target).unwrap() {
            Credentials::Snowflake(c) => {
                assert_eq!(c.auth, SnowflakeAuth::Password { password: "pw".to_string() });
                assert_eq!(c.role.as_deref(), Some("TRANSFORMER"));
                assert_eq!(c.warehouse, "LOADING");
            }
            other => panic!("Expected Snowflake credentials, got {:?}", other),
        }
    }

    #[test]
    fn key_pair_auth() {
        let mut target = base();
        target.insert("private_key_path".to_string(), json!("/keys/rsa_key.p8"));
        target.insert("private_key_passphrase".to_string(), json!("phrase"));

        match normalize(&target).unwrap() {
            Credentials::Snowflake(c) => assert_eq!(
                c.auth,
                SnowflakeAuth::KeyPair {
                    private_key_path: "/keys/rsa_key.p8".to_string(),
                    private_key_passphrase: Some("phrase".to_string()),
                }
            ),
            other => panic!("Expected Snowflake credentials, got {:?}", other),
        }
    }

    #[test]
    fn password_preferred_over_key_pair() {
        let mut target = base();
        target.insert("password".to_string(), json!("pw"));
        target.insert("private_key_path".to_string(), json!("/keys/rsa_key.p8"));

        match normalize(&target).unwrap() {
            Credentials::Snowflake(c) => {
                assert!(matches!(c.auth, SnowflakeAuth::Password { .. }));
            }
            other => panic!("Expected Snowflake credentials, got {:?}", other),
        }
    }

    #[test]
    fn no_auth_is_missing_password() {
        assert!(SCHEMA.validate(&base()).is_ok());

        let err = normalize(&base()).unwrap_err();
        assert_eq!(
            err,
            CredentialsError::MissingRequiredField {
                warehouse: WarehouseType::Snowflake,
                field: "password",
                aliases: vec!["password", "private_key_path"],
            }
        );
    }
}
