//! Jinja rendering for dbt profiles.yml
//!
//! This crate handles:
//! - Rendering `{{ env_var('NAME', 'default') }}` placeholders in profiles.yml
//! - dbt's type-casting filters (`as_number`, `as_bool`, `as_text`)
//! - Render errors with line information

pub mod renderer;
pub mod context;
pub mod functions;

pub use renderer::{ProfileRenderer, RenderError};
pub use context::RenderContext;
pub use functions::{env_var_function, passthrough_filter};
