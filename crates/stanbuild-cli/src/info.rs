//! Info command implementation for stanbuild CLI.
//!
//! Shows where BridgeStan, CmdStan and make resolve to, and why.

use serde::Serialize;
use stanbuild_core::{BuildConfig, PathSource, verify_bridgestan_path};

use crate::ConfigArgs;
use crate::colors;

/// Resolved configuration plus the BridgeStan validation outcome.
#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    config: &'a BuildConfig,
    bridgestan_valid: bool,
}

/// Print the resolved configuration.
pub fn execute(config: &ConfigArgs, json: bool) -> anyhow::Result<()> {
    let config = config.resolve()?;
    let bridgestan_error = verify_bridgestan_path(config.bridgestan_path()).err();

    if json {
        let report = Report {
            config: &config,
            bridgestan_valid: bridgestan_error.is_none(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_entry(
        "BridgeStan",
        &config.bridgestan_path().display().to_string(),
        config.bridgestan_source(),
    );
    print_entry(
        "CmdStan",
        &config.cmdstan_path().display().to_string(),
        config.cmdstan_source(),
    );
    print_entry("make", config.make(), config.make_source());

    if let Some(err) = bridgestan_error {
        println!("\n{}warning:{} {}", colors::YELLOW, colors::RESET, err);
        if config.bridgestan_source() == PathSource::Default {
            println!("Set BRIDGESTAN or pass --bridgestan to point at a BridgeStan checkout");
        }
    }
    if config.cmdstan_source() == PathSource::Unset {
        println!(
            "\n{}warning:{} CmdStan not found; set CMDSTAN or pass --cmdstan",
            colors::YELLOW,
            colors::RESET
        );
    }

    Ok(())
}

fn print_entry(label: &str, value: &str, source: PathSource) {
    let value = if value.is_empty() { "<unset>" } else { value };
    println!(
        "{}{:<11}{} {} {}({}){}",
        colors::BOLD,
        label,
        colors::RESET,
        value,
        colors::DIM,
        source_label(source),
        colors::RESET
    );
}

fn source_label(source: PathSource) -> &'static str {
    match source {
        PathSource::Environment => "environment",
        PathSource::Detected => "detected",
        PathSource::Default => "default",
        PathSource::Explicit => "command line",
        PathSource::Unset => "unset",
    }
}
