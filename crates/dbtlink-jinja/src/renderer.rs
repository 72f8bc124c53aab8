//! profiles.yml rendering
//!
//! Renders the raw profiles.yml text before it is parsed as YAML, the way
//! dbt does: placeholders are resolved on the text, then YAML types the result.

use minijinja::{context, Environment, UndefinedBehavior};
use std::sync::Arc;
use crate::context::RenderContext;
use crate::functions::{env_var_function, passthrough_filter};

/// Error during profiles.yml rendering
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Jinja render error{}: {message}", .line.map(|l| format!(" on line {}", l)).unwrap_or_default())]
    Render {
        message: String,
        line: Option<usize>,
    },
}

/// Renders profiles.yml text
#[derive(Debug, Clone, Default)]
pub struct ProfileRenderer {
    context: RenderContext,
}

impl ProfileRenderer {
    pub fn new(context: RenderContext) -> Self {
        Self { context }
    }

    /// Renderer reading `env_var()` values from the process environment
    pub fn from_process_env() -> Self {
        Self::new(RenderContext::from_process_env())
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Render a profiles.yml document
    ///
    /// Text without Jinja markers is returned unchanged.
    pub fn render(&self, source: &str) -> Result<String, RenderError> {
        if !has_jinja(source) {
            return Ok(source.to_string());
        }

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let vars = Arc::new(self.context.env.clone());
        env.add_function("env_var", move |name: String, default: Option<minijinja::Value>| {
            env_var_function(&vars, &name, default)
        });
        env.add_filter("as_number", passthrough_filter);
        env.add_filter("as_bool", passthrough_filter);
        env.add_filter("as_text", passthrough_filter);

        let rendered = env.render_str(source, context! {}).map_err(|e| {
            tracing::debug!(error = %e, "profiles.yml render failed");
            RenderError::Render {
                message: e.detail().map(str::to_string).unwrap_or_else(|| e.to_string()),
                line: e.line(),
            }
        })?;

        Ok(rendered)
    }
}

/// Quick check for Jinja expressions, statements or comments
fn has_jinja(source: &str) -> bool {
    source.contains("{{") || source.contains("{%") || source.contains("{#")
}
