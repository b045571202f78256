//! Error types for stanbuild-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for stanbuild-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Substring that marks a failure coming from the stanc compiler.
const STANC_MARKER: &str = "stanc";

/// Appended to build failures that mention stanc.
const CMDSTAN_HINT: &str =
    "If CmdStan is already installed, you may need to set the location with set_cmdstan_path()";

/// Errors that can occur while locating the toolchain or building a model.
#[derive(Debug, Error)]
pub enum Error {
    /// BridgeStan folder is missing or malformed.
    #[error("{0}")]
    Config(String),

    /// Requested Stan file does not exist.
    #[error("File '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    /// Requested file is not a `.stan` file.
    #[error("File '{}' does not end in .stan", .0.display())]
    InvalidExtension(PathBuf),

    /// The build tool exited with a non-zero status.
    #[error("{}", build_message(command, *code, stdout, stderr))]
    Build {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The build tool reported success but produced no library.
    #[error("Build succeeded but '{}' was not produced", .0.display())]
    MissingArtifact(PathBuf),

    /// The build tool executable could not be located.
    #[error("build tool '{0}' not found in PATH; set the MAKE environment variable")]
    ToolNotFound(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Recovery hint for this error, if one applies.
    ///
    /// The hint is already part of the `Display` output.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Build {
                command,
                code,
                stdout,
                stderr,
            } if failure_report(command, *code, stdout, stderr).contains(STANC_MARKER) => {
                Some(CMDSTAN_HINT)
            }
            _ => None,
        }
    }
}

/// Command, exit code and both captured streams.
fn failure_report(command: &str, code: Option<i32>, stdout: &str, stderr: &str) -> String {
    let code = code.map_or_else(|| "<signal>".to_string(), |c| c.to_string());
    format!("Command {command} failed with code {code}.\nstdout:\n{stdout}\nstderr:\n{stderr}")
}

fn build_message(command: &str, code: Option<i32>, stdout: &str, stderr: &str) -> String {
    let mut message = failure_report(command, code, stdout, stderr);
    if message.contains(STANC_MARKER) {
        message.push('\n');
        message.push_str(CMDSTAN_HINT);
    }
    message
}
