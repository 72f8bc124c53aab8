//! Validation report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use serde::{Deserialize, Serialize};
use crate::error::{ErrorCode, TargetError};
use crate::violation::SchemaViolation;
use crate::warehouse::WarehouseType;

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of targets checked
    pub total: usize,

    /// Targets that resolved into a client
    pub valid: usize,

    /// Targets that failed
    pub invalid: usize,
}

/// Result for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Valid,
    Invalid,
}

/// Outcome of resolving one profile/target pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetOutcome {
    pub profile: String,

    pub target: String,

    pub status: TargetStatus,

    /// Resolved warehouse (absent when the type tag was unsupported)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_type: Option<WarehouseType>,

    /// Whether this target is the profile's default
    pub is_default: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Field-level violations for schema errors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<SchemaViolation>,
}

impl TargetOutcome {
    /// Target resolved successfully
    pub fn valid(
        profile: impl Into<String>,
        target: impl Into<String>,
        warehouse_type: WarehouseType,
        is_default: bool,
    ) -> Self {
        Self {
            profile: profile.into(),
            target: target.into(),
            status: TargetStatus::Valid,
            warehouse_type: Some(warehouse_type),
            is_default,
            code: None,
            message: None,
            violations: Vec::new(),
        }
    }

    /// Target failed with a located error
    pub fn invalid(error: &TargetError, warehouse_type: Option<WarehouseType>, is_default: bool) -> Self {
        Self {
            profile: error.profile.clone(),
            target: error.target.clone(),
            status: TargetStatus::Invalid,
            warehouse_type,
            is_default,
            code: Some(error.code()),
            message: Some(error.source.to_string()),
            violations: error
                .source
                .violations()
                .map(|report| report.violations.clone())
                .unwrap_or_default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == TargetStatus::Valid
    }
}

/// Validation report (report.json v1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// profiles.yml the targets came from
    pub profiles_path: String,

    /// Summary statistics
    pub summary: ReportSummary,

    /// One entry per target
    pub targets: Vec<TargetOutcome>,
}

impl ValidationReport {
    /// Create a new empty report
    pub fn new(profiles_path: impl Into<String>) -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            profiles_path: profiles_path.into(),
            summary: ReportSummary::default(),
            targets: Vec::new(),
        }
    }

    /// Add a target outcome to the report
    pub fn add_outcome(&mut self, outcome: TargetOutcome) {
        match outcome.status {
            TargetStatus::Valid => self.summary.valid += 1,
            TargetStatus::Invalid => self.summary.invalid += 1,
        }

        self.summary.total += 1;
        self.targets.push(outcome);
    }

    /// Check if any target failed
    pub fn has_errors(&self) -> bool {
        self.summary.invalid > 0
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}
