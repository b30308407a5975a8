//! Audit command implementation
//!
//! Runs the `check-hooks-apply` and `check-useless-excludes` checks without
//! a hook runner.

use super::{CommandContext, normalize_paths};
use crate::cli::Output;
use crate::plan::{AuditFinding, check_hooks_apply, check_useless_excludes};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct AuditReport {
    hooks_apply: Vec<AuditFinding>,
    useless_excludes: Vec<AuditFinding>,
}

/// Execute the audit command
pub async fn execute(context: &CommandContext, files: Vec<String>, output: &Output) -> Result<()> {
    let (_, config) = context.load_config()?;

    let files = if files.is_empty() {
        context.git()?.all_files()?
    } else {
        normalize_paths(files)
    };

    let report = AuditReport {
        hooks_apply: check_hooks_apply(&config, &files)?,
        useless_excludes: check_useless_excludes(&config, &files)?,
    };
    let findings = report.hooks_apply.len() + report.useless_excludes.len();

    if context.is_json() {
        output.json(&report)?;
    } else {
        output.header(&format!("🔎 Auditing against {} files", files.len()));
        print_section("Hooks that apply to no file", &report.hooks_apply, output);
        print_section("Excludes that exclude nothing", &report.useless_excludes, output);
    }

    if findings > 0 {
        anyhow::bail!("Audit found {} problems", findings);
    }
    Ok(())
}

fn print_section(title: &str, findings: &[AuditFinding], output: &Output) {
    output.section_header(title);
    if findings.is_empty() {
        output.success("None");
        return;
    }
    for finding in findings {
        output.warning(&format!("{}: {}", finding.location, finding.message));
    }
}
