//! Dry-run planning
//!
//! Works out, for every hook in a configuration, whether it would run for a
//! given stage and which files it would be handed. Nothing is executed.

use crate::config::stages::normalize_stage;
use crate::config::{HookConfig, HookEntry, HookRepository, RepoKind};
use crate::error::{HookpinError, Result};
use crate::select::HookSelector;
use serde::Serialize;

pub mod audit;

pub use audit::{AuditFinding, check_hooks_apply, check_useless_excludes};

/// Stage planned when none is requested
pub const DEFAULT_STAGE: &str = "pre-commit";

/// Meta hooks that only look at the configuration file itself
const CONFIG_ONLY_META_HOOKS: &[&str] = &["check-hooks-apply", "check-useless-excludes"];
const CONFIG_FILE_PATTERN: &str = r"^\.pre-commit-config\.ya?ml$";

/// Inputs for [`build_plan`]
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Candidate paths, repository-relative
    pub files: Vec<String>,
    /// Stage being planned
    pub stage: String,
    /// Only plan the hook with this id or alias
    pub hook: Option<String>,
    /// Hook ids or aliases to skip
    pub skip: Vec<String>,
}

impl PlanRequest {
    pub fn new(files: Vec<String>) -> Self {
        Self {
            files,
            stage: DEFAULT_STAGE.to_string(),
            hook: None,
            skip: Vec::new(),
        }
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    pub fn with_hook(mut self, hook: Option<String>) -> Self {
        self.hook = hook;
        self
    }

    pub fn with_skip(mut self, skip: Vec<String>) -> Self {
        self.skip = skip;
        self
    }
}

/// What would happen to a hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookAction {
    /// The hook would run
    Run,
    /// No candidate file passed the hook's filters
    NoFiles,
    /// Listed in the skip list
    Skipped,
    /// Not bound to the planned stage
    OtherStage,
    /// A different hook was requested
    Filtered,
}

impl HookAction {
    pub fn label(&self) -> &'static str {
        match self {
            HookAction::Run => "run",
            HookAction::NoFiles => "no files",
            HookAction::Skipped => "skipped",
            HookAction::OtherStage => "other stage",
            HookAction::Filtered => "filtered",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedHook {
    pub repo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    pub id: String,
    pub name: String,
    pub args: Vec<String>,
    pub action: HookAction,
    /// Number of candidate files the hook's filters accepted
    pub matched: usize,
    /// Files passed on the command line (empty when `pass_filenames: false`)
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub stage: String,
    pub fail_fast: bool,
    pub candidates: usize,
    pub hooks: Vec<PlannedHook>,
}

impl Plan {
    /// Hooks that would actually run
    pub fn runnable(&self) -> impl Iterator<Item = &PlannedHook> {
        self.hooks.iter().filter(|h| h.action == HookAction::Run)
    }
}

/// Build a plan for `request` against `config`.
///
/// Fails with [`HookpinError::UnknownStage`] when the requested stage is not
/// a git hook stage.
pub fn build_plan(config: &HookConfig, request: &PlanRequest) -> Result<Plan> {
    let stage = normalize_stage(&request.stage).ok_or_else(|| HookpinError::UnknownStage {
        stage: request.stage.clone(),
    })?;
    let mut hooks = Vec::with_capacity(config.hook_count());

    for (repo, hook) in config.hooks() {
        let action = if request.hook.as_deref().is_some_and(|wanted| !hook.answers_to(wanted)) {
            Some(HookAction::Filtered)
        } else if !runs_at_stage(config, hook, stage) {
            Some(HookAction::OtherStage)
        } else if request.skip.iter().any(|s| hook.answers_to(s)) {
            Some(HookAction::Skipped)
        } else {
            None
        };

        let planned = match action {
            Some(action) => planned_hook(repo, hook, action, 0, Vec::new()),
            None => {
                let selector = selector_for(config, repo, hook)?;
                let selected = selector.select(&request.files);
                let matched = selected.len();
                let action = if matched > 0 || hook.always_run() {
                    HookAction::Run
                } else {
                    HookAction::NoFiles
                };
                let files = if hook.pass_filenames() {
                    selected.into_iter().map(str::to_string).collect()
                } else {
                    Vec::new()
                };
                planned_hook(repo, hook, action, matched, files)
            }
        };

        tracing::trace!(
            "Planned {} -> {:?} ({} files)",
            planned.id,
            planned.action,
            planned.matched
        );
        hooks.push(planned);
    }

    Ok(Plan {
        stage: stage.to_string(),
        fail_fast: config.fail_fast,
        candidates: request.files.len(),
        hooks,
    })
}

/// Selector for a hook, applying the config-file restriction of meta hooks
pub(crate) fn selector_for(
    config: &HookConfig,
    repo: &HookRepository,
    hook: &HookEntry,
) -> Result<HookSelector> {
    if repo.kind() == RepoKind::Meta
        && hook.files.is_none()
        && CONFIG_ONLY_META_HOOKS.contains(&hook.id.as_str())
    {
        let mut hook = hook.clone();
        hook.files = Some(CONFIG_FILE_PATTERN.to_string());
        return HookSelector::new(config, &hook);
    }
    HookSelector::new(config, hook)
}

fn runs_at_stage(config: &HookConfig, hook: &HookEntry, stage: &str) -> bool {
    let stages = if hook.stages.is_empty() {
        &config.default_stages
    } else {
        &hook.stages
    };

    stages.is_empty() || stages.iter().any(|s| normalize_stage(s) == Some(stage))
}

fn planned_hook(
    repo: &HookRepository,
    hook: &HookEntry,
    action: HookAction,
    matched: usize,
    files: Vec<String>,
) -> PlannedHook {
    PlannedHook {
        repo: repo.repo.clone(),
        rev: repo.rev.clone(),
        id: hook.id.clone(),
        name: hook.display_name().to_string(),
        args: hook.args.clone(),
        action,
        matched,
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
exclude: ^docs/_build/
repos:
  - repo: https://github.com/psf/black
    rev: 24.4.2
    hooks:
      - id: black
        types: [python]
  - repo: https://github.com/PyCQA/flake8
    rev: 7.0.0
    hooks:
      - id: flake8
        args: [--max-line-length=120]
        exclude: ^migrations/
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.6.0
    hooks:
      - id: check-json
        types: [json]
      - id: no-commit-to-branch
        stages: [push]
        always_run: true
        pass_filenames: false
  - repo: local
    hooks:
      - id: pytest
        name: run tests
        entry: pytest
        language: system
        pass_filenames: false
        types: [python]
  - repo: meta
    hooks:
      - id: check-useless-excludes
"#;

    fn files() -> Vec<String> {
        ["app.py", "migrations/0001.py", "docs/_build/x.py", "README.rst"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn plan(request: PlanRequest) -> Plan {
        let config = HookConfig::from_yaml_str(CONFIG).unwrap();
        build_plan(&config, &request).unwrap()
    }

    fn actions(plan: &Plan) -> Vec<(&str, HookAction)> {
        plan.hooks.iter().map(|h| (h.id.as_str(), h.action)).collect()
    }

    #[test]
    fn test_pre_commit_plan() {
        let plan = plan(PlanRequest::new(files()));
        assert_eq!(plan.stage, "pre-commit");
        assert_eq!(plan.candidates, 4);
        assert_eq!(
            actions(&plan),
            vec![
                ("black", HookAction::Run),
                ("flake8", HookAction::Run),
                ("check-json", HookAction::NoFiles),
                ("no-commit-to-branch", HookAction::OtherStage),
                ("pytest", HookAction::Run),
                ("check-useless-excludes", HookAction::NoFiles),
            ]
        );

        assert_eq!(plan.hooks[0].files, vec!["app.py", "migrations/0001.py"]);
        assert_eq!(plan.hooks[1].files, vec!["app.py", "README.rst"]);
        assert_eq!(plan.hooks[1].args, vec!["--max-line-length=120"]);
        assert_eq!(plan.hooks[4].name, "run tests");
        assert_eq!(plan.hooks[4].matched, 2);
        assert!(plan.hooks[4].files.is_empty());
        assert_eq!(plan.runnable().count(), 3);
    }

    #[test]
    fn test_push_stage_and_legacy_names() {
        let plan = plan(PlanRequest::new(Vec::new()).with_stage("push"));
        assert_eq!(plan.stage, "pre-push");
        let hook = plan.hooks.iter().find(|h| h.id == "no-commit-to-branch").unwrap();
        assert_eq!(hook.action, HookAction::Run);
        assert!(hook.files.is_empty());
        assert_eq!(plan.hooks[0].action, HookAction::NoFiles);
    }

    #[test]
    fn test_skip_and_hook_filter() {
        let skipped = plan(PlanRequest::new(files()).with_skip(vec!["flake8".to_string()]));
        assert_eq!(skipped.hooks[1].action, HookAction::Skipped);
        assert_eq!(skipped.hooks[0].action, HookAction::Run);

        let only = plan(PlanRequest::new(files()).with_hook(Some("black".to_string())));
        assert_eq!(only.runnable().map(|h| h.id.as_str()).collect::<Vec<_>>(), vec!["black"]);
        assert!(only.hooks[1..].iter().all(|h| h.action == HookAction::Filtered));
    }

    #[test]
    fn test_meta_hook_only_sees_config_file() {
        let mut files = files();
        files.push(".pre-commit-config.yaml".to_string());
        let plan = plan(PlanRequest::new(files));
        let meta = plan.hooks.last().unwrap();
        assert_eq!(meta.action, HookAction::Run);
        assert_eq!(meta.files, vec![".pre-commit-config.yaml"]);
    }

    #[test]
    fn test_default_stages_apply_to_unstaged_hooks() {
        let config = HookConfig::from_yaml_str(
            r#"
default_stages: [pre-push]
repos:
  - repo: https://x.org/r
    rev: v1
    hooks: [{id: a}]
"#,
        )
        .unwrap();
        let plan = build_plan(&config, &PlanRequest::new(files())).unwrap();
        assert_eq!(plan.hooks[0].action, HookAction::OtherStage);
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        let config = HookConfig::from_yaml_str(CONFIG).unwrap();
        let request = PlanRequest::new(files()).with_stage("pre-comit");
        let err = build_plan(&config, &request).unwrap_err();
        assert!(matches!(err, HookpinError::UnknownStage { ref stage } if stage == "pre-comit"));
    }
}
