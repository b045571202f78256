//! Common types for the build pipeline.

use std::fmt;
use std::path::PathBuf;

/// A fully assembled build tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to run (e.g. `make`)
    pub program: String,

    /// Arguments, in order
    pub args: Vec<String>,

    /// Working directory for the child process
    pub working_dir: PathBuf,
}

impl Invocation {
    /// Program followed by its arguments, as a vector.
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    /// Space-joined command line, used in error reports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line().join(" "))
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (None if terminated by a signal)
    pub code: Option<i32>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Returns true if the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Options for a model build.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Fail if the library is missing after a successful build.
    ///
    /// Off by default: a zero exit code is trusted.
    pub verify_artifact: bool,
}

impl CompileOptions {
    /// Options that check the library exists after the build.
    pub fn verified() -> Self {
        Self {
            verify_artifact: true,
        }
    }
}
