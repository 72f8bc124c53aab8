//! Structural violations found while validating a raw target
//!
//! A `ViolationReport` aggregates every violation of one target so the user
//! can fix them all in a single pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What went wrong with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent
    Missing,

    /// The field has the wrong primitive type
    WrongType,

    /// The field has the right type but a value outside the allowed set
    InvalidValue,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing required field"),
            Self::WrongType => write!(f, "wrong type"),
            Self::InvalidValue => write!(f, "invalid value"),
        }
    }
}

/// A single field-level violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaViolation {
    /// JSON-pointer style path to the field, e.g. `/port`
    pub path: String,

    pub kind: ViolationKind,

    /// Description of the expected shape, e.g. `integer between 1 and 65535`
    pub expected: String,

    /// The value encountered (`None` when the field is absent)
    pub found: Option<Value>,
}

impl SchemaViolation {
    /// Required field absent
    pub fn missing(field: &str, expected: impl Into<String>) -> Self {
        Self {
            path: field_path(field),
            kind: ViolationKind::Missing,
            expected: expected.into(),
            found: None,
        }
    }

    /// Field present with the wrong type
    pub fn wrong_type(field: &str, expected: impl Into<String>, found: &Value) -> Self {
        Self {
            path: field_path(field),
            kind: ViolationKind::WrongType,
            expected: expected.into(),
            found: Some(found.clone()),
        }
    }

    /// Field present with a value outside the allowed set
    pub fn invalid_value(field: &str, expected: impl Into<String>, found: &Value) -> Self {
        Self {
            path: field_path(field),
            kind: ViolationKind::InvalidValue,
            expected: expected.into(),
            found: Some(found.clone()),
        }
    }

    /// Field name without the leading `/`
    pub fn field(&self) -> &str {
        self.path.trim_start_matches('/')
    }

    fn found_display(&self) -> String {
        match &self.found {
            None => "<missing>".to_string(),
            Some(value) => value.to_string(),
        }
    }
}

fn field_path(field: &str) -> String {
    format!("/{}", field)
}

/// All violations of one raw target
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationReport {
    pub violations: Vec<SchemaViolation>,
}

impl ViolationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: SchemaViolation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Find the violation for a field path (`/port` or `port`)
    pub fn get(&self, path: &str) -> Option<&SchemaViolation> {
        let needle = path.trim_start_matches('/');
        self.violations.iter().find(|v| v.field() == needle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaViolation> {
        self.violations.iter()
    }
}

/// Diff-style rendering:
///
/// ```text
///   /port: wrong type
///   - expected: integer between 1 and 65535
///   + found:    "5432"
/// ```
impl std::fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "  {}: {}", violation.path, violation.kind)?;
            writeln!(f, "  - expected: {}", violation.expected)?;
            write!(f, "  + found:    {}", violation.found_display())?;
        }
        Ok(())
    }
}

impl FromIterator<SchemaViolation> for ViolationReport {
    fn from_iter<I: IntoIterator<Item = SchemaViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}
