//! Declarative field tables for raw targets
//!
//! Each warehouse ships a static `TargetSchema`: the fields it knows, their
//! shape, and whether they are required. Validation walks the whole table
//! and reports every violation at once. Fields not in the table are
//! ignored, as dbt adapters accept extra keys.

use dbtlink_core::{SchemaViolation, ViolationReport, WarehouseType};
use serde_json::Value;
use crate::store::RawTarget;

/// Expected shape of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    String,

    /// Non-negative integer
    Integer,

    /// Integer between 1 and 65535
    Port,

    Boolean,

    /// Nested mapping (e.g. an inline keyfile)
    Object,

    /// String restricted to a fixed set
    OneOf(&'static [&'static str]),
}

impl FieldShape {
    /// Human-readable shape, used as the "expected" side of a violation
    pub fn describe(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Integer => "non-negative integer".to_string(),
            Self::Port => "integer between 1 and 65535".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Object => "mapping".to_string(),
            Self::OneOf(allowed) => format!("one of: {}", allowed.join(", ")),
        }
    }

    /// Check a present, non-null value
    fn check(&self, field: &str, value: &Value) -> Option<SchemaViolation> {
        let expected = self.describe();
        match self {
            Self::String if !value.is_string() => {
                Some(SchemaViolation::wrong_type(field, expected, value))
            }
            Self::Integer => match value {
                Value::Number(n) if n.is_u64() => None,
                Value::Number(n) if n.is_i64() => Some(SchemaViolation::invalid_value(field, expected, value)),
                _ => Some(SchemaViolation::wrong_type(field, expected, value)),
            },
            Self::Port => match value.as_u64() {
                Some(port) if (1..=u64::from(u16::MAX)).contains(&port) => None,
                Some(_) => Some(SchemaViolation::invalid_value(field, expected, value)),
                None if value.is_i64() => Some(SchemaViolation::invalid_value(field, expected, value)),
                None => Some(SchemaViolation::wrong_type(field, expected, value)),
            },
            Self::Boolean if !value.is_boolean() => {
                Some(SchemaViolation::wrong_type(field, expected, value))
            }
            Self::Object if !value.is_object() => {
                Some(SchemaViolation::wrong_type(field, expected, value))
            }
            Self::OneOf(allowed) => match value.as_str() {
                Some(s) if allowed.contains(&s) => None,
                Some(_) => Some(SchemaViolation::invalid_value(field, expected, value)),
                None => Some(SchemaViolation::wrong_type(field, expected, value)),
            },
            _ => None,
        }
    }
}

/// One field of a warehouse's raw target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: FieldShape,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, shape: FieldShape) -> Self {
        Self { name, shape, required: true }
    }

    /// Optional fields may be absent or `null`
    pub const fn optional(name: &'static str, shape: FieldShape) -> Self {
        Self { name, shape, required: false }
    }
}

/// Field table for one warehouse type
///
/// The `type` field is implied: it must be the warehouse's tag.
#[derive(Debug)]
pub struct TargetSchema {
    pub warehouse: WarehouseType,
    pub fields: &'static [FieldSpec],
}

impl TargetSchema {
    /// Look up a field by name (`type` is not listed)
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Names of required fields, `type` first
    pub fn required_fields(&self) -> Vec<&'static str> {
        std::iter::once("type")
            .chain(self.fields.iter().filter(|spec| spec.required).map(|spec| spec.name))
            .collect()
    }

    /// Validate a raw target, collecting every violation
    pub fn validate(&self, target: &RawTarget) -> Result<(), ViolationReport> {
        let mut report = ViolationReport::new();

        self.check_type(&mut report, target);

        for spec in self.fields {
            self.check_field(&mut report, spec, target);
        }

        if report.is_empty() {
            Ok(())
        } else {
            Err(report)
        }
    }

    fn check_type(&self, report: &mut ViolationReport, target: &RawTarget) {
        let tag = self.warehouse.as_str();
        let expected = format!("one of: {}", tag);
        match target.get("type") {
            None => report.push(SchemaViolation::missing("type", expected)),
            Some(Value::String(s)) if s == tag => {}
            Some(value @ Value::String(_)) => {
                report.push(SchemaViolation::invalid_value("type", expected, value));
            }
            Some(value) => report.push(SchemaViolation::wrong_type("type", expected, value)),
        }
    }

    fn check_field(&self, report: &mut ViolationReport, spec: &FieldSpec, target: &RawTarget) {
        match target.get(spec.name) {
            None if spec.required => {
                report.push(SchemaViolation::missing(spec.name, spec.shape.describe()));
            }
            Some(Value::Null) if spec.required => {
                report.push(SchemaViolation::wrong_type(spec.name, spec.shape.describe(), &Value::Null));
            }
            None | Some(Value::Null) => {}
            Some(value) => {
                if let Some(violation) = spec.shape.check(spec.name, value) {
                    report.push(violation);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbtlink_core::ViolationKind;
    use serde_json::json;

    static TEST_SCHEMA: TargetSchema = TargetSchema {
        warehouse: WarehouseType::Postgres,
        fields: &[
            FieldSpec::required("host", FieldShape::String),
            FieldSpec::required("port", FieldShape::Port),
            FieldSpec::optional("threads", FieldShape::Integer),
            FieldSpec::optional("ra3_node", FieldShape::Boolean),
            FieldSpec::optional("keyfile_json", FieldShape::Object),
            FieldSpec::optional("sslmode", FieldShape::OneOf(&["disable", "require"])),
        ],
    };

    fn target(value: Value) -> RawTarget {
        match value {
            Value::Object(map) => map,
            _ => panic!("test target must be an object"),
        }
    }

    #[test]
    fn valid_target_passes() {
        let raw = target(json!({
            "type": "postgres", "host": "h", "port": 5432,
            "threads": 4, "ra3_node": true, "sslmode": "require",
            "keyfile_json": {"a": 1}, "unknown_extra": [1, 2]
        }));
        assert!(TEST_SCHEMA.validate(&raw).is_ok());
    }

    #[test]
    fn optional_null_is_absent() {
        let raw = target(json!({"type": "postgres", "host": "h", "port": 5432, "threads": null}));
        assert!(TEST_SCHEMA.validate(&raw).is_ok());
    }

    #[test]
    fn reports_every_violation() {
        let raw = target(json!({
            "type": "postgres", "port": "5432", "threads": -1, "sslmode": "on", "ra3_node": "yes"
        }));
        let report = TEST_SCHEMA.validate(&raw).unwrap_err();

        assert_eq!(report.len(), 5);
        assert_eq!(report.get("/host").unwrap().kind, ViolationKind::Missing);
        assert_eq!(report.get("/port").unwrap().kind, ViolationKind::WrongType);
        assert_eq!(report.get("/port").unwrap().found, Some(json!("5432")));
        assert_eq!(report.get("/threads").unwrap().kind, ViolationKind::InvalidValue);
        assert_eq!(report.get("/sslmode").unwrap().kind, ViolationKind::InvalidValue);
        assert_eq!(report.get("/ra3_node").unwrap().expected, "boolean");
    }

    #[test]
    fn port_range_is_enforced() {
        for port in [json!(0), json!(70000), json!(-5)] {
            let raw = target(json!({"type": "postgres", "host": "h", "port": port}));
            let report = TEST_SCHEMA.validate(&raw).unwrap_err();
            assert_eq!(report.get("port").unwrap().kind, ViolationKind::InvalidValue);
        }

        let raw = target(json!({"type": "postgres", "host": "h", "port": 54.5}));
        let report = TEST_SCHEMA.validate(&raw).unwrap_err();
        assert_eq!(report.get("port").unwrap().kind, ViolationKind::WrongType);
    }

    #[test]
    fn type_tag_must_match_warehouse() {
        let raw = target(json!({"type": "redshift", "host": "h", "port": 5439}));
        let report = TEST_SCHEMA.validate(&raw).unwrap_err();
        let violation = report.get("type").unwrap();
        assert_eq!(violation.kind, ViolationKind::InvalidValue);
        assert_eq!(violation.expected, "one of: postgres");
    }

    #[test]
    fn required_null_is_wrong_type() {
        let raw = target(json!({"type": "postgres", "host": null, "port": 5432}));
        let report = TEST_SCHEMA.validate(&raw).unwrap_err();
        assert_eq!(report.get("host").unwrap().found, Some(Value::Null));
    }

    #[test]
    fn required_fields_start_with_type() {
        assert_eq!(TEST_SCHEMA.required_fields(), vec!["type", "host", "port"]);
        assert!(TEST_SCHEMA.field("threads").is_some());
        assert!(TEST_SCHEMA.field("type").is_none());
    }
}
