//! Typed access to a validated raw target
//!
//! Normalizers read fields through `TargetFields`. After schema validation
//! the required accessors always succeed; when called on an unvalidated
//! target they report the field as missing rather than panicking.

use dbtlink_core::{CredentialsError, WarehouseType};
use serde_json::{Map, Value};
use crate::alias::FieldAlias;
use crate::store::RawTarget;

pub struct TargetFields<'a> {
    warehouse: WarehouseType,
    target: &'a RawTarget,
}

impl<'a> TargetFields<'a> {
    pub fn new(warehouse: WarehouseType, target: &'a RawTarget) -> Self {
        Self { warehouse, target }
    }

    /// Non-null value of a field
    fn value(&self, name: &str) -> Option<&'a Value> {
        self.target.get(name).filter(|value| !value.is_null())
    }

    fn missing(&self, field: &'static str, aliases: Vec<&'static str>) -> CredentialsError {
        CredentialsError::MissingRequiredField {
            warehouse: self.warehouse,
            field,
            aliases,
        }
    }

    pub fn string(&self, name: &'static str) -> Result<String, CredentialsError> {
        self.optional_string(name)
            .ok_or_else(|| self.missing(name, vec![name]))
    }

    pub fn optional_string(&self, name: &str) -> Option<String> {
        self.value(name).and_then(Value::as_str).map(str::to_string)
    }

    /// Optional string, treating `""` as absent
    pub fn non_empty_string(&self, name: &str) -> Option<String> {
        self.optional_string(name).filter(|value| !value.is_empty())
    }

    pub fn port(&self, name: &'static str) -> Result<u16, CredentialsError> {
        self.value(name)
            .and_then(Value::as_u64)
            .and_then(|port| u16::try_from(port).ok())
            .ok_or_else(|| self.missing(name, vec![name]))
    }

    pub fn optional_u64(&self, name: &str) -> Option<u64> {
        self.value(name).and_then(Value::as_u64)
    }

    pub fn optional_bool(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(Value::as_bool)
    }

    pub fn optional_object(&self, name: &str) -> Option<Map<String, Value>> {
        self.value(name).and_then(Value::as_object).cloned()
    }

    /// Required mapping
    pub fn object(&self, name: &'static str) -> Result<Map<String, Value>, CredentialsError> {
        self.optional_object(name)
            .ok_or_else(|| self.missing(name, vec![name]))
    }

    /// Optional enumerated string parsed with `parse`
    pub fn optional_enum<T>(&self, name: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
        self.value(name).and_then(Value::as_str).and_then(parse)
    }

    /// Required enumerated string parsed with `parse`
    pub fn required_enum<T>(
        &self,
        name: &'static str,
        parse: fn(&str) -> Option<T>,
    ) -> Result<T, CredentialsError> {
        self.optional_enum(name, parse)
            .ok_or_else(|| self.missing(name, vec![name]))
    }

    /// Aliased field, absent when no candidate has a value
    pub fn aliased(&self, alias: &FieldAlias) -> Option<String> {
        alias.resolve(self.target).map(str::to_string)
    }

    /// Aliased field that is mandatory in the canonical credentials
    pub fn require_aliased(&self, alias: &FieldAlias) -> Result<String, CredentialsError> {
        self.aliased(alias)
            .ok_or_else(|| self.missing(alias.canonical, alias.candidate_list()))
    }

    /// Error for a mandatory value satisfied by any one of several fields
    pub fn missing_any(&self, field: &'static str, candidates: &[&'static str]) -> CredentialsError {
        self.missing(field, candidates.to_vec())
    }
}
