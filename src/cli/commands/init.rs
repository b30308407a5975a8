//! Init command implementation
//!
//! Writes a starter hook configuration for a Python project.

use super::{CommandContext, display_path};
use crate::cli::Output;
use anyhow::{Context, Result};

/// Starter configuration written by `hookpin init`
pub const TEMPLATE: &str = include_str!("../../../templates/pre-commit-config.yaml");

/// Execute the init command
pub async fn execute(context: &CommandContext, force: bool, output: &Output) -> Result<()> {
    let path = match &context.config_override {
        Some(path) => context.cwd.join(path),
        None => context.cwd.join(&context.settings.config_file),
    };
    let shown = display_path(&path, &context.cwd);

    if path.exists() && !force {
        anyhow::bail!("{} already exists. Use --force to overwrite it", shown);
    }

    std::fs::write(&path, TEMPLATE).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote starter configuration to {}", path.display());

    output.success(&format!("Created {shown}"));
    output.info("Run 'hookpin validate' to check it and 'hookpin plan --all-files' to preview it");
    Ok(())
}
