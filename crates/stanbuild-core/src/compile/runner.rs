//! Process runners.
//!
//! The compiler never touches `std::process` directly; it hands an
//! [`Invocation`] to a [`CommandRunner`]. Tests substitute a fake.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{Error, Result};

use super::types::{CommandOutput, Invocation};

/// Runs an external command to completion and captures its output.
///
/// A non-zero exit is not an error at this layer; callers inspect
/// [`CommandOutput::code`].
pub trait CommandRunner {
    /// Run `invocation`, blocking until it exits.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let program = resolve_program(&invocation.program, &invocation.working_dir)?;

        tracing::debug!(
            "Running {} in {}",
            invocation,
            invocation.working_dir.display()
        );

        let output = Command::new(&program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => Error::ToolNotFound(invocation.program.clone()),
                _ => Error::Io(e),
            })?;

        Ok(capture(output))
    }
}

/// Locate the program the way a shell started in `working_dir` would.
///
/// Bare names are looked up on `PATH`. Anything with a path separator is
/// taken relative to `working_dir`.
fn resolve_program(program: &str, working_dir: &Path) -> Result<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 || path.is_absolute() {
        return Ok(working_dir.join(path));
    }

    which::which(program).map_err(|_| Error::ToolNotFound(program.to_string()))
}

fn capture(output: Output) -> CommandOutput {
    CommandOutput {
        code: exit_code(&output),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Exit code, or the negated signal number on Unix.
fn exit_code(output: &Output) -> Option<i32> {
    if let Some(code) = output.status.code() {
        return Some(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        output.status.signal().map(|signal| -signal)
    }
    #[cfg(not(unix))]
    {
        None
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn invocation(program: &str, args: &[&str], dir: PathBuf) -> Invocation {
        Invocation {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            working_dir: dir,
        }
    }

    #[test]
    fn test_captures_stdout_and_code() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let output = SystemRunner
            .run(&invocation("sh", &["-c", "echo hello; echo oops >&2; exit 3"], temp.path().to_path_buf()))
            .expect("sh should run");

        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.stderr, "oops\n");
    }

    #[test]
    fn test_runs_in_working_dir() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();

        let output = SystemRunner
            .run(&invocation("ls", &[], temp.path().to_path_buf()))
            .expect("ls should run");

        assert!(output.success());
        assert!(output.stdout.contains("marker.txt"));
    }

    fn executable_script(path: &Path, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_relative_program_resolves_in_working_dir() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        executable_script(&temp.path().join("mymake"), "echo \"made $1\"");

        let output = SystemRunner
            .run(&invocation("./mymake", &["lib.so"], temp.path().to_path_buf()))
            .expect("script in working dir should run");

        assert!(output.success());
        assert_eq!(output.stdout, "made lib.so\n");
    }

    #[test]
    fn test_missing_relative_program() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let err = SystemRunner
            .run(&invocation("./mymake", &[], temp.path().to_path_buf()))
            .unwrap_err();

        assert!(matches!(err, Error::ToolNotFound(ref name) if name == "./mymake"));
    }

    #[test]
    fn test_resolve_program() {
        let dir = Path::new("/opt/bridgestan");
        assert_eq!(
            resolve_program("./mymake", dir).unwrap(),
            dir.join("./mymake")
        );
        assert_eq!(
            resolve_program("/usr/local/bin/gmake", dir).unwrap(),
            PathBuf::from("/usr/local/bin/gmake")
        );
        assert!(resolve_program("sh", dir).unwrap().is_absolute());
    }

    #[test]
    fn test_missing_program() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let err = SystemRunner
            .run(&invocation("definitely-not-a-make-9f3c", &[], temp.path().to_path_buf()))
            .unwrap_err();

        assert!(matches!(err, Error::ToolNotFound(ref name) if name == "definitely-not-a-make-9f3c"));
    }
}
