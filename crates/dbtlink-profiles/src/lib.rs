//! dbt profiles.yml resolution
//!
//! Turns a profile/target in profiles.yml into canonical credentials:
//! - Loading profiles.yml (rendering `env_var()` first) into a `ProfileStore`
//! - Selecting the requested or default target
//! - Validating the raw target against its warehouse's field table
//! - Normalizing aliases and optional fields into `Credentials`

pub mod store;
pub mod resolver;
pub mod schema;
pub mod alias;
pub mod fields;
pub mod targets;
pub mod dispatch;
pub mod project;
pub mod cache;

pub use store::{Profile, ProfileStore, ProfileStoreError, RawTarget};
pub use resolver::{resolve_profile_credentials, resolve_target, ResolvedTarget};
pub use schema::{FieldShape, FieldSpec, TargetSchema};
pub use alias::FieldAlias;
pub use dispatch::{resolve_credentials, TargetConverter};
pub use project::{DbtProject, ProjectError};
pub use cache::ProfileStoreCache;
