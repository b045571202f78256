//! Verify command implementation for stanbuild CLI.

use std::path::Path;

use stanbuild_core::verify_bridgestan_path;

use crate::colors;

/// Check that `path` is a BridgeStan folder.
pub fn execute(path: &Path) -> anyhow::Result<()> {
    let folder = verify_bridgestan_path(path)?;
    println!(
        "{}ok{} {}",
        colors::GREEN,
        colors::RESET,
        folder.display()
    );
    Ok(())
}
