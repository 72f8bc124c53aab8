//! Error taxonomy for profile resolution
//!
//! IMPORTANT: error codes are versioned and stable.
//! NEVER rename or remove codes - they are part of the public API.

use serde::{Deserialize, Serialize};
use crate::violation::ViolationReport;
use crate::warehouse::WarehouseType;

/// Stable error code registry (v1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Requested profile is absent from profiles.yml
    ProfileNotFound,

    /// Requested (or default) target is absent from the profile
    TargetNotFound,

    /// The target's `type` has no registered converter
    UnsupportedWarehouseType,

    /// The target failed structural validation
    InvalidCredentialsSchema,

    /// A field that is mandatory after alias resolution is absent
    MissingRequiredField,

    /// Internal defect: credentials reached the client factory with a mismatched type
    UnexpectedCredentialsType,
}

impl ErrorCode {
    /// Get the error code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::TargetNotFound => "TARGET_NOT_FOUND",
            Self::UnsupportedWarehouseType => "UNSUPPORTED_WAREHOUSE_TYPE",
            Self::InvalidCredentialsSchema => "INVALID_CREDENTIALS_SCHEMA",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::UnexpectedCredentialsType => "UNEXPECTED_CREDENTIALS_TYPE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised while resolving a target into canonical credentials and a client
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CredentialsError {
    #[error("Profile '{profile}' not found in {path}")]
    ProfileNotFound { profile: String, path: String },

    #[error("Couldn't find target '{target}' for profile '{profile}' in {path}")]
    TargetNotFound {
        profile: String,
        target: String,
        path: String,
    },

    #[error("Unsupported warehouse type '{type_tag}' (supported: {})", supported_tags())]
    UnsupportedWarehouseType { type_tag: String },

    #[error("Couldn't read {type_tag} target, {} schema violation(s):\n{violations}", .violations.len())]
    InvalidCredentialsSchema {
        type_tag: String,
        violations: ViolationReport,
    },

    #[error("{} target requires \"{field}\" (checked: {})", .warehouse.display_name(), .aliases.join(", "))]
    MissingRequiredField {
        warehouse: WarehouseType,
        field: &'static str,
        aliases: Vec<&'static str>,
    },

    #[error("Warehouse credentials type '{credentials}' produced a '{client}' client; this is a bug")]
    UnexpectedCredentialsType {
        credentials: WarehouseType,
        client: WarehouseType,
    },
}

impl CredentialsError {
    /// Stable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ProfileNotFound { .. } => ErrorCode::ProfileNotFound,
            Self::TargetNotFound { .. } => ErrorCode::TargetNotFound,
            Self::UnsupportedWarehouseType { .. } => ErrorCode::UnsupportedWarehouseType,
            Self::InvalidCredentialsSchema { .. } => ErrorCode::InvalidCredentialsSchema,
            Self::MissingRequiredField { .. } => ErrorCode::MissingRequiredField,
            Self::UnexpectedCredentialsType { .. } => ErrorCode::UnexpectedCredentialsType,
        }
    }

    /// Structural violations, if this is a schema error
    pub fn violations(&self) -> Option<&ViolationReport> {
        match self {
            Self::InvalidCredentialsSchema { violations, .. } => Some(violations),
            _ => None,
        }
    }

    /// Internal defects should be reported as bugs, not fixed in profiles.yml
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::UnexpectedCredentialsType { .. })
    }
}

fn supported_tags() -> String {
    WarehouseType::ALL
        .iter()
        .map(|w| w.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A `CredentialsError` located in a profile/target of a profiles.yml file
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{source}\n  --> profile '{profile}', target '{target}' in {path}")]
pub struct TargetError {
    pub profile: String,
    pub target: String,
    pub path: String,
    pub source: CredentialsError,
}

impl TargetError {
    pub fn new(
        profile: impl Into<String>,
        target: impl Into<String>,
        path: impl Into<String>,
        source: CredentialsError,
    ) -> Self {
        Self {
            profile: profile.into(),
            target: target.into(),
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.source.code()
    }
}
