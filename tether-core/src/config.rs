//! `tether.config.json` discovery and loading.
//!
//! # Discovery
//!
//! The config file is searched for from the working directory upward to the
//! filesystem root; the first hit wins. An explicit path (e.g. from a
//! `--config` flag) skips the search entirely.
//!
//! # API pattern
//!
//! Loaders have two forms:
//! - `load_at(cwd: &Path, …)`: explicit working directory; used in tests with `TempDir`
//! - `load(…)`: derives the directory from `std::env::current_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};
use crate::types::Config;

/// File name searched for during config discovery.
pub const CONFIG_FILE_NAME: &str = "tether.config.json";

/// A parsed config plus the path it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: Config,
}

/// Search `start` and its ancestors for [`CONFIG_FILE_NAME`].
pub fn find_config_path(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Load the config governing `cwd`.
///
/// With `explicit` set, the file is read from that path (resolved against
/// `cwd` when relative) and discovery is skipped. Returns
/// [`CoreError::ConfigNotFound`] when discovery finds nothing and
/// [`CoreError::Parse`] with the file path on malformed JSON.
pub fn load_at(cwd: &Path, explicit: Option<&Path>) -> Result<LoadedConfig, CoreError> {
    let path = match explicit {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => find_config_path(cwd).ok_or_else(|| CoreError::ConfigNotFound {
            start: cwd.to_path_buf(),
        })?,
    };
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    let config = serde_json::from_str(&contents).map_err(|e| CoreError::Parse {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(LoadedConfig { path, config })
}

/// `load_at` convenience wrapper against the process working directory.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, CoreError> {
    let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
    load_at(&cwd, explicit)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
