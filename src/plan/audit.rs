//! Configuration audits against a set of files
//!
//! The two checks the `meta` repository offers: hooks whose filters select
//! nothing, and `exclude` patterns that exclude nothing.

use super::selector_for;
use crate::config::{HookConfig, RepoKind};
use crate::error::Result;
use crate::select::global_filter;
use serde::Serialize;

/// Exclude pattern a runner applies when none is configured
const DEFAULT_EXCLUDE: &str = "^$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditFinding {
    pub location: String,
    pub message: String,
}

/// Hooks that would never receive any of `paths`.
///
/// Meta hooks and `always_run` hooks are not reported.
pub fn check_hooks_apply<S: AsRef<str>>(
    config: &HookConfig,
    paths: &[S],
) -> Result<Vec<AuditFinding>> {
    let mut findings = Vec::new();

    for (repo_index, repo) in config.repos.iter().enumerate() {
        if repo.kind() == RepoKind::Meta {
            continue;
        }
        for (hook_index, hook) in repo.hooks.iter().enumerate() {
            if hook.always_run() {
                continue;
            }
            let selector = selector_for(config, repo, hook)?;
            if !paths.iter().any(|p| selector.matches(p.as_ref())) {
                findings.push(AuditFinding {
                    location: format!("repos[{repo_index}].hooks[{hook_index}]"),
                    message: format!("{} does not apply to this repository", hook.id),
                });
            }
        }
    }

    Ok(findings)
}

/// `exclude` patterns, global and per hook, that match none of the paths
/// reaching them.
///
/// The global exclude only sees paths accepted by the global `files`, and the
/// runner's default `^$` is never reported.
pub fn check_useless_excludes<S: AsRef<str>>(
    config: &HookConfig,
    paths: &[S],
) -> Result<Vec<AuditFinding>> {
    let mut findings = Vec::new();

    let global = global_filter(config)?;
    if let Some(pattern) = config.exclude.as_deref().filter(|p| *p != DEFAULT_EXCLUDE) {
        let reached = paths
            .iter()
            .map(|p| p.as_ref())
            .any(|p| global.is_included(p) && global.is_excluded(p));
        if !reached {
            findings.push(AuditFinding {
                location: "exclude".to_string(),
                message: format!("the global exclude pattern `{pattern}` does not match any files"),
            });
        }
    }

    for (repo_index, repo) in config.repos.iter().enumerate() {
        for (hook_index, hook) in repo.hooks.iter().enumerate() {
            let Some(pattern) = hook.exclude.as_deref().filter(|p| *p != DEFAULT_EXCLUDE) else {
                continue;
            };
            let selector = selector_for(config, repo, hook)?;
            let candidates = selector.exclude_candidates(paths);
            if !candidates.iter().any(|p| selector.hook_filter().is_excluded(p)) {
                findings.push(AuditFinding {
                    location: format!("repos[{repo_index}].hooks[{hook_index}].exclude"),
                    message: format!(
                        "the exclude pattern `{pattern}` for {} does not match any files",
                        hook.id
                    ),
                });
            }
        }
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
exclude: ^vendor/
repos:
  - repo: https://github.com/psf/black
    rev: 24.4.2
    hooks:
      - id: black
        types: [python]
        exclude: ^migrations/
      - id: black-jupyter
        types: [jupyter]
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.6.0
    hooks:
      - id: check-json
        types: [json]
        exclude: ^fixtures/
      - id: check-added-large-files
        always_run: true
        files: ^nothing$
  - repo: meta
    hooks:
      - id: check-hooks-apply
"#;

    fn config() -> HookConfig {
        HookConfig::from_yaml_str(CONFIG).unwrap()
    }

    #[test]
    fn test_hooks_apply() {
        let paths = ["app.py", "migrations/0001.py", "vendor/lib.py"];
        let findings = check_hooks_apply(&config(), &paths).unwrap();
        let locations: Vec<&str> = findings.iter().map(|f| f.location.as_str()).collect();
        assert_eq!(locations, vec!["repos[0].hooks[1]", "repos[1].hooks[0]"]);
        assert_eq!(findings[1].message, "check-json does not apply to this repository");
    }

    #[test]
    fn test_useless_excludes() {
        let paths = ["app.py", "migrations/0001.py", "data.json"];
        let findings = check_useless_excludes(&config(), &paths).unwrap();
        let locations: Vec<&str> = findings.iter().map(|f| f.location.as_str()).collect();
        assert_eq!(locations, vec!["exclude", "repos[1].hooks[0].exclude"]);
    }

    #[test]
    fn test_hook_exclude_only_counts_files_reaching_it() {
        // fixtures/x.py reaches no json hook, so ^fixtures/ is still useless
        let paths = ["vendor/a.py", "fixtures/x.py", "migrations/0002.py"];
        let findings = check_useless_excludes(&config(), &paths).unwrap();
        let locations: Vec<&str> = findings.iter().map(|f| f.location.as_str()).collect();
        assert_eq!(locations, vec!["repos[1].hooks[0].exclude"]);
    }

    #[test]
    fn test_global_exclude_only_sees_included_paths() {
        let config = HookConfig::from_yaml_str(
            r#"
files: ^src/
exclude: ^docs/
repos:
  - repo: https://github.com/psf/black
    rev: 24.4.2
    hooks:
      - id: black
"#,
        )
        .unwrap();

        let paths = ["src/app.py", "docs/index.rst"];
        let findings = check_useless_excludes(&config, &paths).unwrap();
        let locations: Vec<&str> = findings.iter().map(|f| f.location.as_str()).collect();
        assert_eq!(locations, vec!["exclude"]);
    }

    #[test]
    fn test_default_exclude_is_never_useless() {
        let config = HookConfig::from_yaml_str(
            "exclude: ^$\nrepos:\n  - repo: https://x.org/r\n    rev: v1\n    hooks: [{id: a}]\n",
        )
        .unwrap();
        assert!(check_useless_excludes(&config, &["app.py"]).unwrap().is_empty());
    }
}
