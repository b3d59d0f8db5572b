//! Seed documents used to initialise a settings store.
//!
//! A seed is a JSON [`SettingsSnapshot`]; any section it omits falls back to
//! the built-in defaults. Seeds are read once at start-up and never written.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ConfigError, ConfigResult};
use crate::model::SettingsSnapshot;

/// Environment variable naming the seed document.
pub const SEED_ENV_VAR: &str = "PDPMON_SETTINGS_SEED";

/// Read and parse the seed document at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::SeedParse`] if it is not a valid snapshot.
pub fn load_seed(path: &Path) -> ConfigResult<SettingsSnapshot> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        operation: "seed.read",
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: SettingsSnapshot =
        serde_json::from_str(&text).map_err(|source| ConfigError::SeedParse {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        sensors = snapshot.instrumentation.len(),
        controls = snapshot.controls.len(),
        profiles = snapshot.automation.len(),
        "loaded settings seed"
    );
    Ok(snapshot)
}

/// Where the initial settings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// Built-in defaults.
    Defaults,
    /// JSON seed document on disk.
    File(PathBuf),
}

impl SeedSource {
    /// Resolve the source from [`SEED_ENV_VAR`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_var(SEED_ENV_VAR)
    }

    /// Resolve the source from the environment variable `name`; unset or
    /// blank values select the defaults.
    #[must_use]
    pub fn from_env_var(name: &str) -> Self {
        Self::from_path(env::var_os(name).map(PathBuf::from))
    }

    /// Select a file seed when `path` is present and non-empty.
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::File(path),
            _ => Self::Defaults,
        }
    }

    /// Produce the initial snapshot for this source.
    ///
    /// # Errors
    ///
    /// Propagates [`load_seed`] failures for file sources.
    pub fn load(&self) -> ConfigResult<SettingsSnapshot> {
        match self {
            Self::Defaults => Ok(SettingsSnapshot::default()),
            Self::File(path) => load_seed(path),
        }
    }
}
