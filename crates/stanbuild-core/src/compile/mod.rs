//! Model build pipeline.
//!
//! This module provides:
//! - Command-line assembly for BridgeStan's `Makefile`
//! - Process runners (system `make`, or a fake in tests)
//! - The model compiler tying validation, naming and the build together
//!
//! # Architecture
//!
//! ```text
//! model.stan
//!     │
//!     ├── verify_bridgestan_path ──► BridgeStan folder
//!     │
//!     ├── library_path ──► model_model.so
//!     │
//!     └── ModelCompiler ──► CommandRunner ──► make CMDSTAN=<cmdstan>/ [args] model_model.so
//! ```

mod compiler;
mod runner;
mod types;

pub use compiler::{ModelCompiler, compile_model};
pub use runner::{CommandRunner, SystemRunner};
pub use types::{CommandOutput, CompileOptions, Invocation};
