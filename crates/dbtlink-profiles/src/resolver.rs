//! Profile/target selection
//!
//! Picks the target dbt would use for a profile: the explicitly requested
//! one, else the profile's default, and converts it to credentials.

use dbtlink_core::{Credentials, CredentialsError, SchemaViolation, TargetError, ViolationReport};
use crate::dispatch::resolve_credentials;
use crate::store::{ProfileStore, RawTarget};

/// Credentials for one profile/target
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTarget {
    pub profile: String,
    pub target_name: String,
    pub credentials: Credentials,
}

/// Select a raw target
///
/// An empty `target` falls back to the profile's default, as an unset
/// `--target` would. With neither, the target is reported as not found
/// under the empty name.
pub fn resolve_target<'a>(
    store: &'a ProfileStore,
    profile_name: &str,
    target: Option<&str>,
) -> Result<(String, &'a RawTarget), CredentialsError> {
    let profile = store
        .profile(profile_name)
        .ok_or_else(|| CredentialsError::ProfileNotFound {
            profile: profile_name.to_string(),
            path: store.path().to_string(),
        })?;

    let not_found = |target_name: &str| CredentialsError::TargetNotFound {
        profile: profile_name.to_string(),
        target: target_name.to_string(),
        path: store.path().to_string(),
    };

    let target_name = target
        .filter(|name| !name.is_empty())
        .or_else(|| profile.default_target())
        .ok_or_else(|| not_found(""))?;

    let output = profile.output(target_name).ok_or_else(|| not_found(target_name))?;
    let raw = output.as_object().ok_or_else(|| {
        let mut violations = ViolationReport::new();
        violations.push(SchemaViolation::wrong_type("", "mapping", output));
        CredentialsError::InvalidCredentialsSchema {
            type_tag: String::new(),
            violations,
        }
    })?;

    tracing::debug!(profile = profile_name, target = target_name, "selected target");
    Ok((target_name.to_string(), raw))
}

/// Select, validate and normalize a target
///
/// Errors carry the profile, target and file they occurred in.
pub fn resolve_profile_credentials(
    store: &ProfileStore,
    profile_name: &str,
    target: Option<&str>,
) -> Result<ResolvedTarget, TargetError> {
    let requested = target.filter(|name| !name.is_empty());

    let (target_name, raw) = resolve_target(store, profile_name, target).map_err(|source| {
        let target_label = requested
            .map(str::to_string)
            .or_else(|| {
                store
                    .profile(profile_name)
                    .and_then(|p| p.default_target())
                    .map(str::to_string)
            })
            .unwrap_or_default();
        TargetError::new(profile_name, target_label, store.path(), source)
    })?;

    let credentials = resolve_credentials(raw)
        .map_err(|source| TargetError::new(profile_name, target_name.as_str(), store.path(), source))?;

    Ok(ResolvedTarget {
        profile: profile_name.to_string(),
        target_name,
        credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbtlink_core::ErrorCode;
    use serde_json::json;

    fn store() -> ProfileStore {
        ProfileStore::from_value(
            json!({
                "prod": {
                    "target": "warehouse",
                    "outputs": {
                        "warehouse": {
                            "type": "risingwave", "host": "h", "user": "u", "port": 5432,
                            "schema": "public", "password": "secret", "database": "db"
                        },
                        "broken": {"type": "postgres"},
                        "scalar": "postgres://h/db"
                    }
                },
                "scratch": {
                    "outputs": {
                        "dev": {
                            "type": "postgres", "host": "h", "user": "u", "port": 5432,
                            "schema": "public", "password": "secret", "dbname": "db"
                        }
                    }
                }
            }),
            "profiles.yml",
        )
        .unwrap()
    }

    #[test]
    fn default_target_is_used() {
        let store = store();
        let (name, raw) = resolve_target(&store, "prod", None).unwrap();
        assert_eq!(name, "warehouse");
        assert_eq!(raw["type"], "risingwave");
    }

    #[test]
    fn empty_target_falls_back_to_default() {
        let store = store();
        let (name, _) = resolve_target(&store, "prod", Some("")).unwrap();
        assert_eq!(name, "warehouse");
    }

    #[test]
    fn explicit_target_overrides_default() {
        let store = store();
        let (name, raw) = resolve_target(&store, "prod", Some("broken")).unwrap();
        assert_eq!(name, "broken");
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn unknown_profile() {
        let err = resolve_target(&store(), "staging", None).unwrap_err();
        assert_eq!(
            err,
            CredentialsError::ProfileNotFound {
                profile: "staging".to_string(),
                path: "profiles.yml".to_string(),
            }
        );
    }

    #[test]
    fn unknown_target() {
        let err = resolve_target(&store(), "prod", Some("does-not-exist")).unwrap_err();
        assert_eq!(
            err,
            CredentialsError::TargetNotFound {
                profile: "prod".to_string(),
                target: "does-not-exist".to_string(),
                path: "profiles.yml".to_string(),
            }
        );
    }

    #[test]
    fn profile_without_default_resolves_explicit_target() {
        let resolved = resolve_profile_credentials(&store(), "scratch", Some("dev")).unwrap();
        assert_eq!(resolved.target_name, "dev");
        assert_eq!(resolved.credentials.warehouse_type().as_str(), "postgres");
    }

    #[test]
    fn profile_without_default_needs_a_target() {
        let err = resolve_target(&store(), "scratch", None).unwrap_err();
        assert_eq!(
            err,
            CredentialsError::TargetNotFound {
                profile: "scratch".to_string(),
                target: String::new(),
                path: "profiles.yml".to_string(),
            }
        );

        let located = resolve_profile_credentials(&store(), "scratch", Some("")).unwrap_err();
        assert_eq!(located.code(), ErrorCode::TargetNotFound);
        assert_eq!(located.target, "");
    }

    #[test]
    fn profile_without_default_does_not_block_others() {
        let resolved = resolve_profile_credentials(&store(), "prod", None).unwrap();
        assert_eq!(resolved.target_name, "warehouse");
    }

    #[test]
    fn non_mapping_target_is_a_schema_error() {
        let err = resolve_target(&store(), "prod", Some("scalar")).unwrap_err();
        match err {
            CredentialsError::InvalidCredentialsSchema { type_tag, violations } => {
                assert_eq!(type_tag, "");
                assert_eq!(violations.len(), 1);
                assert_eq!(violations.violations[0].path, "/");
            }
            other => panic!("Expected InvalidCredentialsSchema, got {:?}", other),
        }
    }

    #[test]
    fn errors_are_located() {
        let err = resolve_profile_credentials(&store(), "prod", Some("broken")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCredentialsSchema);
        assert_eq!(err.profile, "prod");
        assert_eq!(err.target, "broken");
        assert_eq!(err.path, "profiles.yml");
    }

    #[test]
    fn resolves_default_target_credentials() {
        let resolved = resolve_profile_credentials(&store(), "prod", None).unwrap();
        assert_eq!(resolved.target_name, "warehouse");
        assert_eq!(resolved.credentials.warehouse_type().as_str(), "risingwave");
    }
}
