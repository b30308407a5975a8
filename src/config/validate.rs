//! Configuration validation
//!
//! Checks a parsed [`HookConfig`] for the problems a runner would trip over:
//! missing keys, unparseable regular expressions, unknown stages and
//! malformed local or meta hooks. Everything is collected into a single
//! [`ValidationReport`] rather than failing on the first problem.

use super::stages::normalize_stage;
use super::{HookConfig, HookEntry, HookRepository, RepoKind};
use crate::select::compile_pattern;
use crate::select::tags::is_known_tag;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Hook ids provided by the `meta` repository
pub const META_HOOK_IDS: &[&str] = &["check-hooks-apply", "check-useless-excludes", "identity"];

/// Revisions that name a branch rather than an immutable tag or commit
const MUTABLE_REVS: &[&str] = &["main", "master", "develop", "trunk", "HEAD"];

/// Top level keys that are not part of the model but are legitimately used
const TOLERATED_TOP_LEVEL_KEYS: &[&str] = &["ci"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding, located by a dotted path into the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub location: String,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    /// Warn about revs that look like branch names
    pub warn_mutable_revs: bool,
    /// Treat warnings as failures
    pub strict: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            warn_mutable_revs: true,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
    #[serde(skip)]
    strict: bool,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// No errors, and no warnings either when validating strictly
    pub fn is_valid(&self) -> bool {
        if self.strict {
            self.issues.is_empty()
        } else {
            self.error_count() == 0
        }
    }

    fn error(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            location: location.into(),
            severity: Severity::Error,
            message: message.into(),
        });
    }

    fn warning(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            location: location.into(),
            severity: Severity::Warning,
            message: message.into(),
        });
    }
}

/// Validate a parsed configuration
pub fn validate(config: &HookConfig, options: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport {
        issues: Vec::new(),
        strict: options.strict,
    };

    check_regex(&mut report, "exclude", config.exclude.as_deref());
    check_regex(&mut report, "files", config.files.as_deref());
    check_stages(&mut report, "default_stages", &config.default_stages);

    for key in config.extra.keys() {
        if !TOLERATED_TOP_LEVEL_KEYS.contains(&key.as_str()) {
            report.warning(key.as_str(), "unexpected key");
        }
    }

    for (index, repo) in config.repos.iter().enumerate() {
        validate_repo(&mut report, &format!("repos[{index}]"), repo, options);
    }

    tracing::debug!(
        "Validation finished: {} errors, {} warnings",
        report.error_count(),
        report.warning_count()
    );
    report
}

fn validate_repo(
    report: &mut ValidationReport,
    location: &str,
    repo: &HookRepository,
    options: &ValidateOptions,
) {
    let kind = repo.kind();

    if repo.repo.trim().is_empty() {
        report.error(format!("{location}.repo"), "missing required key `repo`");
    } else if kind == RepoKind::Remote && !looks_like_source(&repo.repo) {
        report.warning(
            format!("{location}.repo"),
            format!("`{}` is neither a URL, a path, `local` nor `meta`", repo.repo),
        );
    }

    match (kind, repo.rev.as_deref()) {
        (RepoKind::Remote, None) => {
            report.error(format!("{location}.rev"), "missing required key `rev`");
        }
        (RepoKind::Remote, Some(rev)) if rev.trim().is_empty() => {
            report.error(format!("{location}.rev"), "`rev` must not be empty");
        }
        (RepoKind::Remote, Some(rev)) => {
            if options.warn_mutable_revs && MUTABLE_REVS.contains(&rev) {
                report.warning(
                    format!("{location}.rev"),
                    format!("`{rev}` looks like a branch; pin a tag or commit instead"),
                );
            }
        }
        (_, Some(_)) => {
            report.error(
                format!("{location}.rev"),
                format!("`rev` is not allowed for `{}` repositories", repo.repo),
            );
        }
        (_, None) => {}
    }

    for key in repo.extra.keys() {
        report.warning(format!("{location}.{key}"), "unexpected key");
    }

    if repo.hooks.is_empty() {
        report.error(format!("{location}.hooks"), "at least one hook is required");
        return;
    }

    let mut seen_ids = HashSet::new();
    for (index, hook) in repo.hooks.iter().enumerate() {
        let hook_location = format!("{location}.hooks[{index}]");
        validate_hook(report, &hook_location, kind, hook);

        if hook.alias.is_none() && !hook.id.is_empty() && !seen_ids.insert(hook.id.as_str()) {
            report.warning(
                format!("{hook_location}.id"),
                format!("hook `{}` is listed more than once; give it an `alias`", hook.id),
            );
        }
    }
}

fn validate_hook(report: &mut ValidationReport, location: &str, kind: RepoKind, hook: &HookEntry) {
    if hook.id.trim().is_empty() {
        report.error(format!("{location}.id"), "missing required key `id`");
    }

    match kind {
        RepoKind::Meta if !hook.id.is_empty() && !META_HOOK_IDS.contains(&hook.id.as_str()) => {
            report.error(
                format!("{location}.id"),
                format!(
                    "`{}` is not a meta hook (expected one of {})",
                    hook.id,
                    META_HOOK_IDS.join(", ")
                ),
            );
        }
        RepoKind::Local => {
            for (key, value) in [
                ("name", &hook.name),
                ("entry", &hook.entry),
                ("language", &hook.language),
            ] {
                if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                    report.error(
                        format!("{location}.{key}"),
                        format!("local hooks require `{key}`"),
                    );
                }
            }
        }
        _ => {}
    }

    check_regex(report, &format!("{location}.files"), hook.files.as_deref());
    check_regex(report, &format!("{location}.exclude"), hook.exclude.as_deref());
    check_stages(report, &format!("{location}.stages"), &hook.stages);

    for (key, tags) in [
        ("types", &hook.types),
        ("types_or", &hook.types_or),
        ("exclude_types", &hook.exclude_types),
    ] {
        for tag in tags.iter().filter(|tag| !is_known_tag(tag)) {
            report.warning(format!("{location}.{key}"), format!("unknown file type `{tag}`"));
        }
    }

    for (index, arg) in hook.args.iter().enumerate() {
        if arg.is_empty() {
            report.warning(format!("{location}.args[{index}]"), "empty argument");
        }
    }

    for key in hook.extra.keys() {
        report.warning(format!("{location}.{key}"), "unexpected key");
    }
}

fn check_regex(report: &mut ValidationReport, location: &str, pattern: Option<&str>) {
    if let Some(pattern) = pattern {
        if let Err(e) = compile_pattern(pattern) {
            report.error(location, e.to_string());
        }
    }
}

fn check_stages(report: &mut ValidationReport, location: &str, stages: &[String]) {
    for stage in stages {
        if normalize_stage(stage).is_none() {
            report.error(location, format!("unknown stage `{stage}`"));
        }
    }
}

fn looks_like_source(repo: &str) -> bool {
    repo.contains("://")
        || repo.starts_with("git@")
        || repo.starts_with("file:")
        || repo.starts_with('/')
        || repo.starts_with('.')
        || repo.starts_with('~')
}
