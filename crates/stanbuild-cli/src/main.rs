//! stanbuild CLI - build Stan models into shared libraries with BridgeStan.

mod colors;
mod compile;
mod info;
mod verify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stanbuild_core::BuildConfig;

#[derive(Parser)]
#[command(name = "stanbuild")]
#[command(about = "Build Stan models into shared libraries with BridgeStan")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Overrides for the environment-derived build configuration.
#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    /// Path to BridgeStan (defaults to $BRIDGESTAN, then to this tool's
    /// source tree, which has no BridgeStan Makefile unless it is vendored
    /// there)
    #[arg(long, value_name = "DIR")]
    pub bridgestan: Option<PathBuf>,

    /// Path to CmdStan (defaults to $CMDSTAN or ~/.cmdstan/*)
    #[arg(long, value_name = "DIR")]
    pub cmdstan: Option<PathBuf>,

    /// Build tool to run (defaults to $MAKE or make)
    #[arg(long, value_name = "PROGRAM")]
    pub make: Option<String>,
}

impl ConfigArgs {
    /// Apply the overrides on top of [`BuildConfig::from_env`].
    pub fn resolve(&self) -> stanbuild_core::Result<BuildConfig> {
        let mut config = BuildConfig::from_env();
        if let Some(path) = &self.bridgestan {
            config.set_bridgestan_path(path)?;
        }
        if let Some(path) = &self.cmdstan {
            config.set_cmdstan_path(path);
        }
        if let Some(make) = &self.make {
            config.set_make(make);
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a .stan file into a shared library
    Compile {
        /// Path to the model (.stan file)
        model: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Fail if the library is missing after a successful build
        #[arg(long)]
        verify: bool,

        /// Extra arguments passed to make (e.g. STAN_THREADS=true)
        #[arg(last = true)]
        make_args: Vec<String>,
    },

    /// Show the resolved build configuration
    Info {
        #[command(flatten)]
        config: ConfigArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that a directory is a usable BridgeStan folder
    Verify {
        /// Path to the BridgeStan folder
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile {
            model,
            config,
            verify,
            make_args,
        } => compile::execute(&model, &config, verify, &make_args)?,

        Commands::Info { config, json } => info::execute(&config, json)?,

        Commands::Verify { path } => verify::execute(&path)?,
    }

    Ok(())
}
