//! Render context for profiles.yml
//!
//! Holds the environment snapshot `env_var()` reads from. Rendering never
//! touches the live process environment directly, so tests can supply
//! their own variables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Variables visible to `env_var()` while rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    pub env: HashMap<String, String>,
}

impl RenderContext {
    /// Empty context: every `env_var()` without a default fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment
    ///
    /// Variables that are not valid unicode are skipped.
    pub fn from_process_env() -> Self {
        Self {
            env: std::env::vars_os()
                .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
        }
    }

    /// Add or replace a variable
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }
}
