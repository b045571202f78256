//! Build configuration: where BridgeStan and CmdStan live, and which
//! `make` to run.
//!
//! Values are resolved once by [`BuildConfig::from_env`] and then passed
//! explicitly to the compiler. Each value remembers where it came from
//! so callers can tell a detected CmdStan from a missing one.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::paths::verify_bridgestan_path;

/// Environment variable selecting the build tool.
pub const MAKE_ENV: &str = "MAKE";

/// Environment variable selecting the CmdStan installation.
pub const CMDSTAN_ENV: &str = "CMDSTAN";

/// Environment variable selecting the BridgeStan folder.
pub const BRIDGESTAN_ENV: &str = "BRIDGESTAN";

/// Per-user folder where CmdStan installers put their versions.
const CMDSTAN_HOME_DIR: &str = ".cmdstan";

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSource {
    /// Read from an environment variable.
    Environment,
    /// Found by scanning the conventional install location.
    Detected,
    /// Built-in default.
    Default,
    /// Set through a setter or constructor.
    Explicit,
    /// Nothing configured and nothing detected.
    Unset,
}

/// Locations and tools used to build Stan models.
#[derive(Debug, Clone, Serialize)]
pub struct BuildConfig {
    bridgestan_path: PathBuf,
    bridgestan_source: PathSource,
    cmdstan_path: PathBuf,
    cmdstan_source: PathSource,
    make: String,
    make_source: PathSource,
}

impl BuildConfig {
    /// Create a configuration for an explicit BridgeStan folder.
    ///
    /// CmdStan and `make` are still resolved from the environment.
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] if `bridgestan_path` is not a
    /// BridgeStan folder.
    pub fn new(bridgestan_path: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::from_env();
        config.set_bridgestan_path(bridgestan_path)?;
        Ok(config)
    }

    /// Resolve the configuration from `MAKE`, `BRIDGESTAN` and `CMDSTAN`.
    ///
    /// Never fails: the BridgeStan folder is only validated when used, and
    /// a CmdStan installation that cannot be found leaves the path empty
    /// with source [`PathSource::Unset`].
    pub fn from_env() -> Self {
        let (make, make_source) = match non_empty_var(MAKE_ENV) {
            Some(make) => (make, PathSource::Environment),
            None => (default_make().to_string(), PathSource::Default),
        };

        let (bridgestan_path, bridgestan_source) =
            bridgestan_from_var(env::var(BRIDGESTAN_ENV).ok());

        let (cmdstan_path, cmdstan_source) = match non_empty_var(CMDSTAN_ENV) {
            Some(path) => (PathBuf::from(path), PathSource::Environment),
            None => match dirs::home_dir().and_then(|home| detect_cmdstan_path(&home)) {
                Some(path) => (path, PathSource::Detected),
                None => (PathBuf::new(), PathSource::Unset),
            },
        };

        tracing::debug!(
            bridgestan = %bridgestan_path.display(),
            cmdstan = %cmdstan_path.display(),
            make = %make,
            "Resolved build configuration"
        );

        Self {
            bridgestan_path,
            bridgestan_source,
            cmdstan_path,
            cmdstan_source,
            make,
            make_source,
        }
    }

    /// Set the path to CmdStan. No validation is performed.
    pub fn set_cmdstan_path(&mut self, path: impl Into<PathBuf>) {
        self.cmdstan_path = path.into();
        self.cmdstan_source = PathSource::Explicit;
    }

    /// Set the path to BridgeStan, the top-level folder holding its `Makefile`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] and keeps the previous path if the
    /// new one is not a BridgeStan folder.
    pub fn set_bridgestan_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        verify_bridgestan_path(&path)?;
        self.bridgestan_path = path;
        self.bridgestan_source = PathSource::Explicit;
        Ok(())
    }

    /// Set the build tool executable.
    pub fn set_make(&mut self, make: impl Into<String>) {
        self.make = make.into();
        self.make_source = PathSource::Explicit;
    }

    /// Get the BridgeStan folder.
    pub fn bridgestan_path(&self) -> &Path {
        &self.bridgestan_path
    }

    /// Get the CmdStan folder (empty when unset).
    pub fn cmdstan_path(&self) -> &Path {
        &self.cmdstan_path
    }

    /// Get the build tool executable.
    pub fn make(&self) -> &str {
        &self.make
    }

    /// Where the BridgeStan folder came from.
    pub fn bridgestan_source(&self) -> PathSource {
        self.bridgestan_source
    }

    /// Where the CmdStan folder came from.
    pub fn cmdstan_source(&self) -> PathSource {
        self.cmdstan_source
    }

    /// Where the build tool came from.
    pub fn make_source(&self) -> PathSource {
        self.make_source
    }
}

/// Find a CmdStan installation under `<home>/.cmdstan`.
///
/// Subdirectories are sorted by name and the first one wins. Returns
/// `None` if the folder is missing, unreadable or empty.
pub fn detect_cmdstan_path(home: &Path) -> Option<PathBuf> {
    let root = home.join(CMDSTAN_HOME_DIR);

    let entries = match fs::read_dir(&root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("No CmdStan installations in {}: {}", root.display(), e);
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    candidates.sort();

    let found = candidates.into_iter().next();
    match &found {
        Some(path) => tracing::debug!("Detected CmdStan at {}", path.display()),
        None => tracing::debug!("{} contains no CmdStan installations", root.display()),
    }
    found
}

/// Default build tool for the host platform.
pub fn default_make() -> &'static str {
    if cfg!(windows) { "mingw32-make" } else { "make" }
}

/// Default BridgeStan folder: the root of this source tree.
fn default_bridgestan_path() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// BridgeStan folder from the raw `BRIDGESTAN` value.
///
/// An empty value is kept and resolves to the current directory.
fn bridgestan_from_var(value: Option<String>) -> (PathBuf, PathSource) {
    match value {
        Some(path) => (PathBuf::from(path), PathSource::Environment),
        None => (default_bridgestan_path(), PathSource::Default),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
