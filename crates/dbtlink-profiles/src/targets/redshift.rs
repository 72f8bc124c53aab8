//! Amazon Redshift targets

use dbtlink_core::{Credentials, CredentialsError, RedshiftCredentials, SslMode, WarehouseType};
use crate::alias::{DBNAME, PASSWORD};
use crate::fields::TargetFields;
use crate::schema::{FieldShape, FieldSpec, TargetSchema};
use crate::store::RawTarget;

pub static SCHEMA: TargetSchema = TargetSchema {
    warehouse: WarehouseType::Redshift,
    fields: &[
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
        FieldSpec::optional("sslmode", FieldShape::OneOf(SslMode::TAGS)),
        FieldSpec::optional("ra3_node", FieldShape::Boolean),
    ],
};

pub fn normalize(target: &RawTarget) -> Result<Credentials, CredentialsError> {
    let fields = TargetFields::new(WarehouseType::Redshift, target);

    Ok(Credentials::Redshift(RedshiftCredentials {
        host: fields.string("host")?,
        user: fields.string("user")?,
        password: fields.require_aliased(&PASSWORD)?,
        port: fields.port("port")?,
        dbname: fields.require_aliased(&DBNAME)?,
        schema: fields.string("schema")?,
        threads: fields.optional_u64("threads"),
        keepalives_idle: fields.optional_u64("keepalives_idle"),
        connect_timeout: fields.optional_u64("connect_timeout"),
        sslmode: fields.optional_enum("sslmode", SslMode::from_tag),
        ra3_node: fields.optional_bool("ra3_node"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::raw;
    use serde_json::json;

    #[test]
    fn ra3_node_is_carried() {
        let target = raw(json!({
            "type": "redshift", "host": "cluster.redshift.amazonaws.com", "user": "etl",
            "port": 5439, "schema": "analytics", "pass": "pw", "dbname": "dev",
            "ra3_node": true
        }));
        assert!(SCHEMA.validate(&target).is_ok());

        match normalize(&target).unwrap() {
            Credentials::Redshift(c) => {
                assert_eq!(c.port, 5439);
                assert_eq!(c.password, "pw");
                assert_eq!(c.ra3_node, Some(true));
            }
            other => panic!("Expected Redshift credentials, got {:?}", other),
        }
    }

    #[test]
    fn search_path_is_not_a_redshift_field() {
        assert!(SCHEMA.field("search_path").is_none());
        assert!(SCHEMA.field("role").is_none());
    }

    #[test]
    fn ra3_node_must_be_boolean() {
        let target = raw(json!({
            "type": "redshift", "host": "h", "user": "u", "port": 5439,
            "schema": "s", "ra3_node": "yes"
        }));
        let report = SCHEMA.validate(&target).unwrap_err();
        assert_eq!(report.len(), 1);
        assert!(report.get("ra3_node").is_some());
    }
}
