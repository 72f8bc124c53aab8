//! dbt_project.yml parsing
//!
//! Only the fields needed to pick a profile are read.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// dbt_project.yml structure (subset of fields we care about)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbtProject {
    /// Project name
    pub name: String,

    /// Profile used when none is given explicitly
    pub profile: Option<String>,
}

impl DbtProject {
    pub const FILE_NAME: &'static str = "dbt_project.yml";

    /// Load `<dir>/dbt_project.yml`
    pub fn from_dir(dir: &Path) -> Result<Self, ProjectError> {
        let path = dir.join(Self::FILE_NAME);
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ProjectError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ProjectError> {
        serde_yml::from_str(yaml).map_err(|e| ProjectError::ParseError(e.to_string()))
    }

    /// Profile name, falling back to the project name as dbt does
    pub fn profile_name(&self) -> &str {
        self.profile.as_deref().unwrap_or(&self.name)
    }
}

/// dbt_project.yml errors
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Failed to read project file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse dbt_project.yml: {0}")]
    ParseError(String),
}
