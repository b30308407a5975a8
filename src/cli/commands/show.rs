//! Show command implementation
//!
//! Prints the pinned repositories and the hooks enabled from each.

use super::{CommandContext, display_path};
use crate::cli::Output;
use crate::config::{HookConfig, RepoKind};
use anyhow::Result;

/// Execute the show command
pub async fn execute(context: &CommandContext, output: &Output) -> Result<()> {
    let (path, config) = context.load_config()?;

    if context.is_json() {
        return output.json(&config);
    }

    output.header(&format!("📄 {}", display_path(&path, &context.root)));
    print_globals(&config, output);

    for repo in &config.repos {
        let title = match repo.kind() {
            RepoKind::Remote => format!("{} @ {}", repo.repo, repo.rev_or_empty()),
            RepoKind::Local | RepoKind::Meta => repo.repo.clone(),
        };
        output.section_header(&title);

        for hook in &repo.hooks {
            match hook.alias.as_deref() {
                Some(alias) => output.list_item(&format!("{} (alias {})", hook.id, alias)),
                None => output.list_item(&hook.id),
            }
            if let Some(name) = &hook.name {
                output.indent(&format!("name: {name}"));
            }
            if !hook.args.is_empty() {
                output.indent(&format!("args: {}", hook.args.join(" ")));
            }
            if let Some(files) = &hook.files {
                output.indent(&format!("files: {files}"));
            }
            if let Some(exclude) = &hook.exclude {
                output.indent(&format!("exclude: {exclude}"));
            }
            if !hook.types.is_empty() {
                output.indent(&format!("types: {}", hook.types.join(", ")));
            }
            if !hook.types_or.is_empty() {
                output.indent(&format!("types_or: {}", hook.types_or.join(", ")));
            }
            if !hook.stages.is_empty() {
                output.indent(&format!("stages: {}", hook.stages.join(", ")));
            }
        }
    }

    output.blank_line();
    output.count("🪝", "Hooks configured", config.hook_count());
    Ok(())
}

fn print_globals(config: &HookConfig, output: &Output) {
    if let Some(files) = &config.files {
        output.table_row("files", files);
    }
    if let Some(exclude) = &config.exclude {
        output.table_row("exclude", exclude);
    }
    if config.fail_fast {
        output.table_row("fail_fast", "true");
    }
    if !config.default_stages.is_empty() {
        output.table_row("default_stages", &config.default_stages.join(", "));
    }
}
