//! Process-lifetime profiles.yml cache
//!
//! profiles.yml is loaded at most once per cache. The first caller loads it;
//! concurrent callers wait and share the result, including a load failure.

use dbtlink_jinja::ProfileRenderer;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use crate::store::{ProfileStore, ProfileStoreError};

/// Single-assignment cache for one profiles directory
///
/// ## Usage
///
/// ```rust,ignore
/// let cache = ProfileStoreCache::new(profiles_dir, ProfileRenderer::from_process_env());
/// let store = cache.get()?; // loads once
/// let again = cache.get()?; // same Arc
/// ```
#[derive(Debug)]
pub struct ProfileStoreCache {
    dir: PathBuf,
    renderer: ProfileRenderer,
    cell: OnceLock<Result<Arc<ProfileStore>, ProfileStoreError>>,
}

impl ProfileStoreCache {
    pub fn new(dir: impl Into<PathBuf>, renderer: ProfileRenderer) -> Self {
        Self {
            dir: dir.into(),
            renderer,
            cell: OnceLock::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load on first call, then return the cached result
    pub fn get(&self) -> Result<Arc<ProfileStore>, ProfileStoreError> {
        self.cell
            .get_or_init(|| {
                tracing::debug!(dir = %self.dir.display(), "loading profiles into cache");
                ProfileStore::from_dir(&self.dir, &self.renderer).map(Arc::new)
            })
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
