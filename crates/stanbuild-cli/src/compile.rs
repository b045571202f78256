//! Compile command implementation for stanbuild CLI.
//!
//! Builds a Stan model into a shared library and prints its path.

use std::path::Path;
use std::time::Instant;

use stanbuild_core::{CompileOptions, ModelCompiler};

use crate::ConfigArgs;
use crate::colors;

/// Compile `model`, passing `make_args` through to make.
pub fn execute(
    model: &Path,
    config: &ConfigArgs,
    verify: bool,
    make_args: &[String],
) -> anyhow::Result<()> {
    let config = config.resolve()?;
    let start = Instant::now();

    eprintln!(
        "{}stanbuild{} - Compiling {}{}{}",
        colors::BOLD,
        colors::RESET,
        colors::CYAN,
        model.file_name().unwrap_or_default().to_string_lossy(),
        colors::RESET
    );

    let options = CompileOptions {
        verify_artifact: verify,
    };
    let library = ModelCompiler::new(config)
        .with_options(options)
        .compile(model, make_args)?;

    eprintln!(
        "{}Built{} in {:.2}s",
        colors::GREEN,
        colors::RESET,
        start.elapsed().as_secs_f64()
    );
    println!("{}", library.display());

    Ok(())
}
