//! Model compiler.
//!
//! Runs BridgeStan's `Makefile` on a `.stan` file to produce the model's
//! shared library.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::paths::{STAN_EXTENSION, absolute, library_path, to_make_path, verify_bridgestan_path};

use super::runner::{CommandRunner, SystemRunner};
use super::types::{CompileOptions, Invocation};

/// Compiles Stan models into shared libraries.
pub struct ModelCompiler<R = SystemRunner> {
    /// Build configuration
    config: BuildConfig,

    /// Runs the build tool
    runner: R,

    /// Build options
    options: CompileOptions,
}

impl ModelCompiler<SystemRunner> {
    /// Create a compiler that runs the real build tool.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            runner: SystemRunner,
            options: CompileOptions::default(),
        }
    }
}

impl<R: CommandRunner> ModelCompiler<R> {
    /// Replace the process runner.
    pub fn with_runner<T: CommandRunner>(self, runner: T) -> ModelCompiler<T> {
        ModelCompiler {
            config: self.config,
            runner,
            options: self.options,
        }
    }

    /// Set build options.
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the build configuration.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Get the process runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Build `stan_file` into a shared library and return its path.
    ///
    /// `args` are passed to `make` verbatim, e.g. `["STAN_THREADS=true"]`.
    ///
    /// # Errors
    /// - [`Error::Config`] if the BridgeStan folder is invalid
    /// - [`Error::NotFound`] if `stan_file` does not exist
    /// - [`Error::InvalidExtension`] if `stan_file` is not a `.stan` file
    /// - [`Error::Build`] if `make` exits with a non-zero code
    /// - [`Error::MissingArtifact`] if verification is enabled and no
    ///   library was produced
    pub fn compile<S: AsRef<str>>(&self, stan_file: impl AsRef<Path>, args: &[S]) -> Result<PathBuf> {
        let (invocation, output_path) = self.prepare(stan_file.as_ref(), args)?;

        tracing::info!("Building {}", output_path.display());
        let start = Instant::now();

        let output = self.runner.run(&invocation)?;

        if !output.success() {
            let err = Error::Build {
                command: invocation.to_string(),
                code: output.code,
                stdout: output.stdout,
                stderr: output.stderr,
            };
            tracing::warn!("Build of {} failed", output_path.display());
            return Err(err);
        }

        if self.options.verify_artifact && !output_path.exists() {
            return Err(Error::MissingArtifact(output_path));
        }

        tracing::info!(
            "Built {} in {:.2}s",
            output_path.display(),
            start.elapsed().as_secs_f64()
        );
        Ok(output_path)
    }

    /// Validate inputs and assemble the build tool invocation.
    ///
    /// Returns the invocation together with the library path it targets.
    fn prepare<S: AsRef<str>>(&self, stan_file: &Path, args: &[S]) -> Result<(Invocation, PathBuf)> {
        let bridgestan = verify_bridgestan_path(self.config.bridgestan_path())?;

        let file_path = absolute(stan_file)?;
        if !file_path.exists() {
            return Err(Error::NotFound(stan_file.to_path_buf()));
        }
        if file_path.extension().and_then(|ext| ext.to_str()) != Some(STAN_EXTENSION) {
            return Err(Error::InvalidExtension(stan_file.to_path_buf()));
        }

        let output = library_path(&file_path);
        let cmdstan = to_make_path(&absolute(self.config.cmdstan_path())?);

        let mut command_args = Vec::with_capacity(args.len() + 2);
        command_args.push(format!("CMDSTAN={cmdstan}/"));
        command_args.extend(args.iter().map(|arg| arg.as_ref().to_string()));
        command_args.push(output.to_string_lossy().into_owned());

        let invocation = Invocation {
            program: self.config.make().to_string(),
            args: command_args,
            working_dir: bridgestan,
        };
        Ok((invocation, output))
    }
}

/// Build `stan_file` with the real build tool.
///
/// Shorthand for `ModelCompiler::new(config.clone()).compile(stan_file, args)`.
pub fn compile_model<S: AsRef<str>>(
    config: &BuildConfig,
    stan_file: impl AsRef<Path>,
    args: &[S],
) -> Result<PathBuf> {
    ModelCompiler::new(config.clone()).compile(stan_file, args)
}
