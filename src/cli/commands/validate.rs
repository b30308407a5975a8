//! Validate command implementation

use super::{CommandContext, display_path};
use crate::cli::Output;
use crate::config::{HookConfig, Severity, ValidationReport, validate};
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct FileReport<'a> {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a ValidationReport>,
}

/// Execute the validate command
pub async fn execute(
    context: &CommandContext,
    files: Vec<PathBuf>,
    strict: bool,
    output: &Output,
) -> Result<()> {
    let paths = if files.is_empty() {
        vec![context.load_config()?.0]
    } else {
        files.into_iter().map(|f| context.cwd.join(f)).collect()
    };

    let mut options = context.settings.validate_options();
    options.strict |= strict;

    let mut failures = 0;
    let mut json_reports = Vec::new();

    for path in &paths {
        let shown = display_path(path, &context.cwd);
        let (report, error) = match HookConfig::load_from_file(path) {
            Ok(config) => (Some(validate(&config, &options)), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let valid = report.as_ref().is_some_and(|r| r.is_valid());
        if !valid {
            failures += 1;
        }

        if context.is_json() {
            json_reports.push((shown, valid, error, report));
            continue;
        }

        output.header(&format!("Validating {shown}"));
        if let Some(error) = &error {
            output.error(error);
            continue;
        }
        if let Some(report) = &report {
            print_report(report, output);
        }
    }

    if context.is_json() {
        let reports: Vec<FileReport> = json_reports
            .iter()
            .map(|(path, valid, error, report)| FileReport {
                path: path.clone(),
                valid: *valid,
                error: error.clone(),
                report: report.as_ref(),
            })
            .collect();
        output.json(&reports)?;
    }

    if failures > 0 {
        anyhow::bail!("{} of {} configuration files failed validation", failures, paths.len());
    }

    Ok(())
}

fn print_report(report: &ValidationReport, output: &Output) {
    for issue in &report.issues {
        let line = issue.to_string();
        match issue.severity {
            Severity::Error => output.error(&line),
            Severity::Warning => output.warning(&line),
        }
    }

    if report.is_valid() {
        output.success(&format!(
            "Configuration is valid ({} warnings)",
            report.warning_count()
        ));
    } else {
        output.error(&format!(
            "Configuration is invalid ({} errors, {} warnings)",
            report.error_count(),
            report.warning_count()
        ));
    }
}
