//! Plan command implementation
//!
//! Shows, for the requested stage, which hooks would run and on which files.

use super::{CommandContext, normalize_paths};
use crate::cli::Output;
use crate::config::{HookConfig, validate};
use crate::plan::{HookAction, Plan, PlanRequest, build_plan};
use anyhow::Result;

/// Number of files listed per hook outside verbose mode
const FILE_PREVIEW: usize = 5;

pub struct PlanArgs {
    pub all_files: bool,
    pub stage: Option<String>,
    pub hook: Option<String>,
    pub files: Vec<String>,
}

/// Execute the plan command
pub async fn execute(context: &CommandContext, args: PlanArgs, output: &Output) -> Result<()> {
    let (_, config) = context.load_config()?;
    ensure_plannable(&config, context)?;

    let files = if !args.files.is_empty() {
        normalize_paths(args.files)
    } else if args.all_files {
        context.git()?.all_files()?
    } else {
        context.git()?.staged_files()?
    };
    output.verbose(&format!("{} candidate files", files.len()));

    let skip = context.settings.skip_list(|name| std::env::var(name).ok());
    if !skip.is_empty() {
        output.verbose(&format!("Skipping: {}", skip.join(", ")));
    }

    let request = PlanRequest::new(files)
        .with_stage(args.stage.unwrap_or_else(|| context.settings.default_stage.clone()))
        .with_hook(args.hook.clone())
        .with_skip(skip);
    let plan = build_plan(&config, &request)?;

    if let Some(wanted) = &args.hook {
        if plan.hooks.iter().all(|h| h.action == HookAction::Filtered) {
            anyhow::bail!("No hook with id or alias '{}' in the configuration", wanted);
        }
    }

    if context.is_json() {
        return output.json(&plan);
    }

    print_plan(&plan, output);
    Ok(())
}

/// Fail when the configuration has validation errors
fn ensure_plannable(config: &HookConfig, context: &CommandContext) -> Result<()> {
    let report = validate(config, &context.settings.validate_options());
    if report.error_count() > 0 {
        let first = report.errors().next().map(|i| i.to_string()).unwrap_or_default();
        anyhow::bail!(
            "Configuration has {} errors (first: {}). Run 'hookpin validate' for details",
            report.error_count(),
            first
        );
    }
    Ok(())
}

fn print_plan(plan: &Plan, output: &Output) {
    output.header(&format!(
        "🧭 Plan for {} ({} candidate files)",
        plan.stage, plan.candidates
    ));

    for hook in &plan.hooks {
        if hook.action == HookAction::Filtered {
            continue;
        }

        let label = format!("{} [{}]", hook.name, hook.id);
        match hook.action {
            HookAction::Run => {
                let detail = if hook.files.is_empty() && hook.matched == 0 {
                    "always runs".to_string()
                } else if hook.files.is_empty() {
                    format!("{} matching files, not passed as arguments", hook.matched)
                } else {
                    format!("{} files", hook.files.len())
                };
                output.status_indicator(hook.action.label(), &format!("{label} - {detail}"), true);

                let shown = if output.is_verbose() {
                    hook.files.len()
                } else {
                    FILE_PREVIEW
                };
                for file in hook.files.iter().take(shown) {
                    output.list_item(file);
                }
                if hook.files.len() > shown {
                    output.indent(&format!("... and {} more", hook.files.len() - shown));
                }
            }
            _ => output.status_indicator(hook.action.label(), &label, false),
        }
    }

    output.blank_line();
    output.count("🪝", "Hooks that would run", plan.runnable().count());
    if plan.fail_fast {
        output.info("fail_fast is set: the runner stops at the first failing hook");
    }
}
