//! Build Stan models into shared libraries with BridgeStan.
//!
//! This crate provides:
//! - Build configuration (BridgeStan folder, CmdStan folder, `make`)
//! - BridgeStan folder validation
//! - Model library naming
//! - The model compiler driving BridgeStan's `Makefile`
//!
//! ```no_run
//! use stanbuild_core::{BuildConfig, ModelCompiler};
//!
//! let mut config = BuildConfig::from_env();
//! config.set_cmdstan_path("/opt/cmdstan");
//! let library = ModelCompiler::new(config).compile("bernoulli.stan", &["STAN_THREADS=true"])?;
//! println!("{}", library.display());
//! # Ok::<(), stanbuild_core::Error>(())
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod paths;

pub use compile::{
    CommandOutput, CommandRunner, CompileOptions, Invocation, ModelCompiler, SystemRunner,
    compile_model,
};
pub use config::{BuildConfig, PathSource, detect_cmdstan_path};
pub use error::{Error, Result};
pub use paths::{library_path, verify_bridgestan_path};
