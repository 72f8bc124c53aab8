//! dbt Jinja functions available in profiles.yml
//!
//! Only the subset dbt allows in profiles.yml: `env_var()` and the
//! type-casting filters.

use minijinja::{Error, ErrorKind, Value};
use std::collections::HashMap;

/// env_var() function - reads an environment variable
///
/// Usage in Jinja: {{ env_var('DBT_PASSWORD') }} or {{ env_var('DBT_PORT', '5432') }}
/// Returns: the variable's value, else the default, else an error
pub fn env_var_function(
    env: &HashMap<String, String>,
    name: &str,
    default: Option<Value>,
) -> Result<Value, Error> {
    if let Some(value) = env.get(name) {
        return Ok(Value::from(value.as_str()));
    }

    match default {
        Some(default) if !default.is_undefined() => Ok(default),
        _ => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("Env var required but not provided: '{}'", name),
        )),
    }
}

/// as_number / as_bool / as_text filters
///
/// profiles.yml is YAML after rendering, so the rendered text is typed by
/// the YAML parser. The filters only need to exist for templates to render.
pub fn passthrough_filter(value: Value) -> Value {
    value
}
