//! profiles.yml parsing
//!
//! Loads dbt's profiles.yml into an in-memory `ProfileStore`. Targets are
//! kept as loosely-typed JSON values; typing happens per warehouse in
//! `crate::targets`.
//!
//! Profiles are read leniently: a malformed profile only fails when it is
//! resolved, never while loading the others.

use dbtlink_jinja::{ProfileRenderer, RenderError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// A raw, unvalidated target from profiles.yml
pub type RawTarget = Map<String, Value>;

/// A profile: default target name plus named targets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    /// Default target name, if the profile declares one
    pub target: Option<String>,

    /// Targets by name, as written (not necessarily mappings)
    pub outputs: BTreeMap<String, Value>,
}

impl Profile {
    /// Read a profile body, keeping whatever is usable
    ///
    /// A non-string `target` counts as no default; a non-mapping `outputs`
    /// counts as no targets.
    pub fn from_value(body: &Value) -> Self {
        let target = body
            .get("target")
            .and_then(Value::as_str)
            .map(str::to_string);

        let outputs = body
            .get("outputs")
            .and_then(Value::as_object)
            .map(|outputs| outputs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();

        Self { target, outputs }
    }

    /// The default target name; an empty name counts as none
    pub fn default_target(&self) -> Option<&str> {
        self.target.as_deref().filter(|name| !name.is_empty())
    }

    /// A target, if present and a mapping
    pub fn get_target(&self, name: &str) -> Option<&RawTarget> {
        self.outputs.get(name).and_then(Value::as_object)
    }

    /// A target as written, whatever its shape
    pub fn output(&self, name: &str) -> Option<&Value> {
        self.outputs.get(name)
    }

    /// Target names, sorted
    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }
}

/// All profiles of one profiles.yml
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStore {
    /// Where the profiles were loaded from (for error messages)
    path: String,

    profiles: BTreeMap<String, Profile>,
}

impl ProfileStore {
    /// File name dbt looks for inside the profiles directory
    pub const FILE_NAME: &'static str = "profiles.yml";

    /// Path reported for stores built in memory
    pub const IN_MEMORY: &'static str = "<memory>";

    /// Top-level key holding dbt's global settings; not a profile
    const CONFIG_KEY: &'static str = "config";

    pub fn new(path: impl Into<String>, profiles: BTreeMap<String, Profile>) -> Self {
        Self {
            path: path.into(),
            profiles,
        }
    }

    /// Load `<dir>/profiles.yml`
    pub fn from_dir(dir: &Path, renderer: &ProfileRenderer) -> Result<Self, ProfileStoreError> {
        Self::from_file(&dir.join(Self::FILE_NAME), renderer)
    }

    /// Load a profiles.yml file
    pub fn from_file(path: &Path, renderer: &ProfileRenderer) -> Result<Self, ProfileStoreError> {
        let shown = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| ProfileStoreError::Unreadable {
            path: shown.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %shown, "loading profiles");
        Self::from_yaml_str(&contents, shown, renderer)
    }

    /// Render and parse profiles.yml text
    pub fn from_yaml_str(
        yaml: &str,
        path: impl Into<String>,
        renderer: &ProfileRenderer,
    ) -> Result<Self, ProfileStoreError> {
        let path = path.into();

        let rendered = renderer.render(yaml).map_err(|source| ProfileStoreError::Render {
            path: path.clone(),
            source,
        })?;

        let mut document: serde_yml::Value = serde_yml::from_str(&rendered)
            .map_err(|e| ProfileStoreError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        // Resolve `<<: *defaults` merge keys, common in profiles sharing settings
        document.apply_merge().map_err(|e| ProfileStoreError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let value = serde_json::to_value(&document).map_err(|e| ProfileStoreError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Self::from_value(value, path)
    }

    /// Build from an already-deserialized document
    pub fn from_value(value: Value, path: impl Into<String>) -> Result<Self, ProfileStoreError> {
        let path = path.into();

        let entries = match value {
            Value::Null => Map::new(),
            Value::Object(entries) => entries,
            other => {
                return Err(ProfileStoreError::Parse {
                    path,
                    message: format!("expected a mapping of profile names, found {}", kind_of(&other)),
                })
            }
        };

        let mut profiles = BTreeMap::new();
        for (name, body) in entries {
            if name == Self::CONFIG_KEY {
                continue;
            }

            if !body.is_object() {
                tracing::warn!(profile = %name, found = kind_of(&body), "profile is not a mapping");
            } else if body.get("outputs").map_or(true, |outputs| !outputs.is_object()) {
                tracing::warn!(profile = %name, "profile has no outputs mapping");
            }

            profiles.insert(name, Profile::from_value(&body));
        }

        Ok(Self { path, profiles })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Profiles sorted by name
    pub fn profiles(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.profiles.iter().map(|(name, profile)| (name.as_str(), profile))
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Errors loading profiles.yml
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("Could not find a valid profiles.yml file at {path}:\n  {message}")]
    Unreadable { path: String, message: String },

    #[error("Could not render profiles.yml at {path}:\n  {source}")]
    Render { path: String, source: RenderError },

    #[error("Could not parse profiles.yml at {path}:\n  {message}")]
    Parse { path: String, message: String },
}
