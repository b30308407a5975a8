//! Hook configuration model
//!
//! This module handles loading, parsing and saving `.pre-commit-config.yaml`
//! documents. Missing keys default to empty values; [`validate`] reports
//! them together with their location in the document.

use crate::error::{HookpinError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod settings;
pub mod stages;
pub mod validate;

pub use settings::Settings;
pub use validate::{Issue, Severity, ValidateOptions, ValidationReport, validate};

/// Default file name looked up by the CLI
pub const DEFAULT_CONFIG_FILE: &str = ".pre-commit-config.yaml";

/// Sentinel `repo` value for hooks defined inline in the configuration
pub const LOCAL_REPO: &str = "local";

/// Sentinel `repo` value for the runner's built-in meta hooks
pub const META_REPO: &str = "meta";

/// Top level configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Hook repositories in document order
    #[serde(default)]
    pub repos: Vec<HookRepository>,

    /// Paths matching this regex are given to no hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Only paths matching this regex are candidates for any hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,

    /// Stop after the first failing hook
    #[serde(default, skip_serializing_if = "is_false")]
    pub fail_fast: bool,

    /// Stages applied to hooks that do not declare their own
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_stages: Vec<String>,

    /// Language -> version defaults
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_language_version: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_pre_commit_version: Option<String>,

    /// Keys this model does not know about, kept for round-tripping
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yml::Value>,
}

/// A repository providing one or more hooks, pinned at a revision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookRepository {
    /// Clone URL, local path, or one of `local` / `meta`
    #[serde(default)]
    pub repo: String,

    /// Tag or commit the repository is pinned to
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub rev: Option<String>,

    #[serde(default)]
    pub hooks: Vec<HookEntry>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yml::Value>,
}

/// What kind of source a repository entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoKind {
    Remote,
    Local,
    Meta,
}

/// A single hook enabled from a repository, with its overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookEntry {
    /// Hook id as declared by the repository's own manifest
    #[serde(default)]
    pub id: String,

    /// Alternative id usable with `SKIP` and `--hook`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Include regex over repository-relative paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,

    /// Exclude regex over repository-relative paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// Every tag must be present on a file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    /// At least one tag must be present on a file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types_or: Vec<String>,

    /// No tag may be present on a file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_types: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_run: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_filenames: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yml::Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Accept `rev: 1.0` as well as `rev: "1.0"`; YAML would otherwise read it as a float
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_yml::Value>::deserialize(deserializer)? {
        None | Some(serde_yml::Value::Null) => Ok(None),
        Some(serde_yml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a revision string, found {other:?}"
        ))),
    }
}

impl HookConfig {
    /// Parse a configuration document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document is a null, which would not deserialize into a struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: HookConfig = serde_yml::from_str(content)?;
        tracing::debug!("Parsed configuration with {} repositories", config.repos.len());
        Ok(config)
    }

    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HookpinError::io(path, e))?;

        match Self::from_yaml_str(&content) {
            Ok(config) => Ok(config),
            Err(HookpinError::Yaml(source)) => Err(HookpinError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(other) => Err(other),
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yml::to_string(self)?;
        std::fs::write(path, content).map_err(|e| HookpinError::io(path, e))?;
        Ok(())
    }

    /// Find a configuration file in `start` or any of its parents.
    ///
    /// Both the `.yaml` and `.yml` spellings of `name` are accepted, with
    /// `name` itself preferred in each directory.
    pub fn find_config_file(start: &Path, name: &str) -> Option<PathBuf> {
        let alternate = alternate_spelling(name);
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }

            if let Some(alternate) = &alternate {
                let candidate = current.join(alternate);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Locate and load `name` starting from `start`
    pub fn discover(start: &Path, name: &str) -> Result<(PathBuf, Self)> {
        let path = Self::find_config_file(start, name).ok_or_else(|| HookpinError::NotFound {
            name: name.to_string(),
            start: start.to_path_buf(),
        })?;
        tracing::debug!("Using configuration file {}", path.display());
        let config = Self::load_from_file(&path)?;
        Ok((path, config))
    }

    /// Iterate `(repository, hook)` pairs in document order
    pub fn hooks(&self) -> impl Iterator<Item = (&HookRepository, &HookEntry)> {
        self.repos
            .iter()
            .flat_map(|repo| repo.hooks.iter().map(move |hook| (repo, hook)))
    }

    /// Total number of hooks across all repositories
    pub fn hook_count(&self) -> usize {
        self.repos.iter().map(|repo| repo.hooks.len()).sum()
    }
}

impl HookRepository {
    pub fn kind(&self) -> RepoKind {
        match self.repo.as_str() {
            LOCAL_REPO => RepoKind::Local,
            META_REPO => RepoKind::Meta,
            _ => RepoKind::Remote,
        }
    }

    /// Pinned revision, or an empty string for local and meta repositories
    pub fn rev_or_empty(&self) -> &str {
        self.rev.as_deref().unwrap_or("")
    }
}

impl HookEntry {
    /// Name shown to users, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether `key` refers to this hook by id or alias
    pub fn answers_to(&self, key: &str) -> bool {
        self.id == key || self.alias.as_deref() == Some(key)
    }

    pub fn always_run(&self) -> bool {
        self.always_run.unwrap_or(false)
    }

    pub fn pass_filenames(&self) -> bool {
        self.pass_filenames.unwrap_or(true)
    }
}

fn alternate_spelling(name: &str) -> Option<String> {
    if let Some(stem) = name.strip_suffix(".yaml") {
        Some(format!("{stem}.yml"))
    } else {
        name.strip_suffix(".yml").map(|stem| format!("{stem}.yaml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
exclude: ^docs/_build/
repos:
  - repo: https://github.com/psf/black
    rev: 24.4.2
    hooks:
      - id: black
        exclude: ^migrations/
  - repo: https://github.com/PyCQA/flake8
    rev: 7.0.0
    hooks:
      - id: flake8
        args: [--max-line-length=120]
  - repo: local
    hooks:
      - id: pytest
        name: pytest
        entry: pytest
        language: system
        pass_filenames: false
"#;

    #[test]
    fn test_parse_preserves_order_and_fields() {
        let config = HookConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.repos.len(), 3);
        assert_eq!(config.exclude.as_deref(), Some("^docs/_build/"));

        let black = &config.repos[0];
        assert_eq!(black.repo, "https://github.com/psf/black");
        assert_eq!(black.rev.as_deref(), Some("24.4.2"));
        assert_eq!(black.hooks[0].exclude.as_deref(), Some("^migrations/"));

        assert_eq!(config.repos[1].hooks[0].args, vec!["--max-line-length=120"]);
        assert_eq!(config.repos[2].kind(), RepoKind::Local);
        assert!(!config.repos[2].hooks[0].pass_filenames());

        let ids: Vec<&str> = config.hooks().map(|(_, hook)| hook.id.as_str()).collect();
        assert_eq!(ids, vec!["black", "flake8", "pytest"]);
        assert_eq!(config.hook_count(), 3);
    }

    #[test]
    fn test_missing_keys_default_instead_of_failing() {
        let config =
            HookConfig::from_yaml_str("repos:\n  - repo: https://example.com/x\n").unwrap();
        assert_eq!(config.repos[0].rev, None);
        assert!(config.repos[0].hooks.is_empty());
    }

    #[test]
    fn test_numeric_rev_is_read_as_text() {
        let config = HookConfig::from_yaml_str(
            "repos:\n  - repo: https://example.com/x\n    rev: 7\n    hooks: [{id: x}]\n",
        )
        .unwrap();
        assert_eq!(config.repos[0].rev.as_deref(), Some("7"));
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let config = HookConfig::from_yaml_str("repos: []\nci:\n  autofix_prs: true\n").unwrap();
        assert!(config.extra.contains_key("ci"));
    }

    #[test]
    fn test_empty_document() {
        let config = HookConfig::from_yaml_str("   \n").unwrap();
        assert!(config.repos.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let result = HookConfig::from_yaml_str("repos: [unclosed");
        assert!(matches!(result, Err(HookpinError::Yaml(_))));
    }

    #[test]
    fn test_load_error_carries_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "repos: [unclosed").unwrap();

        let err = HookConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, HookpinError::Parse { .. }));
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        let config = HookConfig::from_yaml_str(SAMPLE).unwrap();

        config.save_to_file(&path).unwrap();
        let reloaded = HookConfig::load_from_file(&path).unwrap();
        assert_eq!(config, reloaded);
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join(".pre-commit-config.yml"), "repos: []\n").unwrap();

        let found = HookConfig::find_config_file(&nested, DEFAULT_CONFIG_FILE).unwrap();
        assert_eq!(found, temp_dir.path().join(".pre-commit-config.yml"));
    }

    #[test]
    fn test_discover_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = HookConfig::discover(temp_dir.path(), "no-such-config.yaml").unwrap_err();
        assert!(matches!(err, HookpinError::NotFound { .. }));
    }
}
