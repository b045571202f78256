//! BridgeStan folder validation and model library naming.
//!
//! A usable BridgeStan folder looks like this:
//!
//! ```text
//! bridgestan/
//! ├── Makefile      # Required, drives the model build
//! └── src/
//! ```
//!
//! A model `path/to/model.stan` builds into `path/to/model_model.so`
//! (`.dylib` on macOS, `.dll` on Windows).

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File whose presence marks a BridgeStan folder.
pub const MAKEFILE: &str = "Makefile";

/// Extension of Stan model sources.
pub const STAN_EXTENSION: &str = "stan";

/// Suffix appended to the model stem to name the library.
const LIBRARY_SUFFIX: &str = "_model";

/// Check that `path` is a BridgeStan folder.
///
/// Returns the absolute folder path on success.
///
/// # Errors
/// Returns [`Error::Config`] naming the absolute path if the folder does
/// not exist or does not contain a `Makefile`.
pub fn verify_bridgestan_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let folder = absolute(path.as_ref())?;

    if !folder.is_dir() {
        return Err(Error::Config(format!(
            "BridgeStan folder '{}' does not exist!\n\
             If you need to set a different location, call 'set_bridgestan_path()'",
            folder.display()
        )));
    }

    if !folder.join(MAKEFILE).exists() {
        return Err(Error::Config(format!(
            "BridgeStan folder '{}' does not contain file '{MAKEFILE}', \
             please ensure it is built properly!\n\
             If you need to set a different location, call 'set_bridgestan_path()'",
            folder.display()
        )));
    }

    Ok(folder)
}

/// Path of the shared library built from a Stan model.
///
/// Pure path arithmetic, the filesystem is never touched.
pub fn library_path(model: impl AsRef<Path>) -> PathBuf {
    let model = model.as_ref();
    let stem = model.file_stem().unwrap_or_default().to_string_lossy();
    let filename = format!("{stem}{LIBRARY_SUFFIX}.{}", dylib_extension());
    model.with_file_name(filename)
}

/// Platform-specific dynamic library extension.
pub fn dylib_extension() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "dll"
    }
    #[cfg(target_os = "macos")]
    {
        "dylib"
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        "so"
    }
}

/// Make `path` absolute against the current directory.
///
/// Unlike `canonicalize`, the path does not need to exist. An empty path
/// resolves to the current directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(std::env::current_dir()?);
    }
    Ok(std::path::absolute(path)?)
}

/// Render a path with forward slashes, as make expects on every platform.
pub fn to_make_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
