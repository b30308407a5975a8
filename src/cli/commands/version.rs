//! Version command implementation

use crate::cli::Output;
use crate::{PKG_NAME, VERSION};
use anyhow::Result;

/// Execute the version command
pub async fn execute(output: &Output) -> Result<()> {
    let description = env!("CARGO_PKG_DESCRIPTION");
    let repository = env!("CARGO_PKG_REPOSITORY");

    output.header("🪝 hookpin Version Information");

    output.status_indicator("VERSION", &format!("{} v{}", PKG_NAME, VERSION), true);
    output.blank_line();

    output.section_header("About");
    output.key_value("Description:", description, false);
    output.key_value("Repository:", repository, false);
    output.blank_line();

    output.section_header("Build Information");
    output.key_value("Rust edition:", "2024", false);
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value("Profile:", if cfg!(debug_assertions) { "debug" } else { "release" }, false);

    output.blank_line();
    output.success("Run 'hookpin --help' for usage information");

    Ok(())
}
