//! File selection
//!
//! Decides which candidate paths a hook receives. Patterns use search
//! semantics: `^` and `$` must be written explicitly to anchor them.
//! Look-around and backreferences are accepted, and Python's `\Z` means
//! end of text.

use crate::config::{HookConfig, HookEntry};
use crate::error::{HookpinError, Result};
use fancy_regex::Regex;

pub mod tags;

/// Compiled include/exclude pair
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl FileFilter {
    /// Compile a filter. An absent include matches everything, an absent
    /// exclude matches nothing. An empty include is treated as absent.
    pub fn compile(include: Option<&str>, exclude: Option<&str>) -> Result<Self> {
        Ok(Self {
            include: compile_optional(include.filter(|p| !p.is_empty()))?,
            exclude: compile_optional(exclude)?,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.is_included(path) && !self.is_excluded(path)
    }

    pub fn is_included(&self, path: &str) -> bool {
        self.include.as_ref().is_none_or(|re| search(re, path))
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude.as_ref().is_some_and(|re| search(re, path))
    }
}

/// Compile a file pattern written in Python's `re` dialect
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(&translate_pattern(pattern)).map_err(|e| HookpinError::regex(pattern, e))
}

fn compile_optional(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern.map(compile_pattern).transpose()
}

/// Rewrite `\Z` to `\z`, leaving escaped backslashes alone
fn translate_pattern(pattern: &str) -> String {
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        translated.push(c);
        if c == '\\' {
            match chars.next() {
                Some('Z') => translated.push('z'),
                Some(next) => translated.push(next),
                None => {}
            }
        }
    }

    translated
}

/// Search `path`; a match that exhausts the backtrack limit counts as no match
fn search(re: &Regex, path: &str) -> bool {
    re.is_match(path).unwrap_or_else(|e| {
        tracing::debug!("Pattern `{}` failed on {}: {}", re.as_str(), path, e);
        false
    })
}

/// Type tag requirements of a hook
#[derive(Debug, Clone, Default)]
pub struct TypeFilter {
    types: Vec<String>,
    types_or: Vec<String>,
    exclude_types: Vec<String>,
}

impl TypeFilter {
    pub fn from_hook(hook: &HookEntry) -> Self {
        Self {
            types: hook.types.clone(),
            types_or: hook.types_or.clone(),
            exclude_types: hook.exclude_types.clone(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        if self.types.is_empty() && self.types_or.is_empty() && self.exclude_types.is_empty() {
            return true;
        }

        let tags = tags::tags_for_path(path);
        self.types.iter().all(|t| tags.contains(t.as_str()))
            && (self.types_or.is_empty() || self.types_or.iter().any(|t| tags.contains(t.as_str())))
            && !self.exclude_types.iter().any(|t| tags.contains(t.as_str()))
    }
}

/// Everything that decides whether a hook sees a path
#[derive(Debug, Clone)]
pub struct HookSelector {
    global: FileFilter,
    hook: FileFilter,
    types: TypeFilter,
}

impl HookSelector {
    pub fn new(config: &HookConfig, hook: &HookEntry) -> Result<Self> {
        Ok(Self {
            global: global_filter(config)?,
            hook: FileFilter::compile(hook.files.as_deref(), hook.exclude.as_deref())?,
            types: TypeFilter::from_hook(hook),
        })
    }

    /// Whether the hook would be handed `path`
    pub fn matches(&self, path: &str) -> bool {
        self.global.matches(path) && self.hook.matches(path) && self.types.matches(path)
    }

    /// Paths the hook would be handed, in input order
    pub fn select<'a, S: AsRef<str>>(&self, paths: &'a [S]) -> Vec<&'a str> {
        paths
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| self.matches(p))
            .collect()
    }

    /// Paths that reach the hook's own exclude: they pass every other filter
    pub fn exclude_candidates<'a, S: AsRef<str>>(&self, paths: &'a [S]) -> Vec<&'a str> {
        paths
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| {
                self.global.matches(p) && self.hook.is_included(p) && self.types.matches(p)
            })
            .collect()
    }

    pub fn hook_filter(&self) -> &FileFilter {
        &self.hook
    }
}

/// Filter built from the top level `files` and `exclude`
pub fn global_filter(config: &HookConfig) -> Result<FileFilter> {
    FileFilter::compile(config.files.as_deref(), config.exclude.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> Vec<String> {
        [
            "setup.py",
            "src/app/models.py",
            "src/app/migrations/0001_initial.py",
            "docs/index.rst",
            "docs/_build/html/index.html",
            ".pre-commit-config.yaml",
            "package.json",
            "static/logo.png",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn config(yaml: &str) -> HookConfig {
        HookConfig::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn test_file_filter_search_semantics() {
        let filter = FileFilter::compile(Some(r"\.py$"), Some("migrations/")).unwrap();
        assert!(filter.matches("src/app/models.py"));
        assert!(!filter.matches("src/app/migrations/0001_initial.py"));
        assert!(!filter.matches("docs/index.rst"));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FileFilter::compile(Some(""), None).unwrap();
        assert!(filter.matches("anything/at/all"));
        assert!(!filter.is_excluded("anything/at/all"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = FileFilter::compile(None, Some("(")).unwrap_err();
        assert!(matches!(err, HookpinError::Regex { .. }));
    }

    #[test]
    fn test_global_and_hook_filters_combine() {
        let config = config(
            r#"
exclude: ^docs/_build/
repos:
  - repo: https://github.com/psf/black
    rev: 24.4.2
    hooks:
      - id: black
        types: [python]
        exclude: /migrations/
"#,
        );
        let selector = HookSelector::new(&config, &config.repos[0].hooks[0]).unwrap();
        let paths = paths();
        assert_eq!(selector.select(&paths), vec!["setup.py", "src/app/models.py"]);
    }

    #[test]
    fn test_types_or_and_exclude_types() {
        let config = config(
            r#"
repos:
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v4.6.0
    hooks:
      - id: check-syntax
        types_or: [yaml, json]
      - id: trailing-whitespace
        exclude_types: [binary, rst]
"#,
        );
        let paths = paths();

        let syntax = HookSelector::new(&config, &config.repos[0].hooks[0]).unwrap();
        assert_eq!(syntax.select(&paths), vec![".pre-commit-config.yaml", "package.json"]);

        let whitespace = HookSelector::new(&config, &config.repos[0].hooks[1]).unwrap();
        let selected = whitespace.select(&paths);
        assert!(!selected.contains(&"static/logo.png"));
        assert!(!selected.contains(&"docs/index.rst"));
        assert!(selected.contains(&"setup.py"));
    }

    #[test]
    fn test_global_files_restricts_candidates() {
        let config = config(
            r#"
files: ^src/
repos:
  - repo: https://x.org/r
    rev: v1
    hooks: [{id: a}]
"#,
        );
        let selector = HookSelector::new(&config, &config.repos[0].hooks[0]).unwrap();
        let paths = paths();
        assert_eq!(
            selector.select(&paths),
            vec!["src/app/models.py", "src/app/migrations/0001_initial.py"]
        );
    }

    #[test]
    fn test_exclude_candidates_ignore_own_exclude() {
        let config = config(
            r#"
repos:
  - repo: https://x.org/r
    rev: v1
    hooks:
      - id: a
        files: \.py$
        exclude: migrations
"#,
        );
        let selector = HookSelector::new(&config, &config.repos[0].hooks[0]).unwrap();
        let paths = paths();
        assert_eq!(selector.exclude_candidates(&paths).len(), 3);
        assert_eq!(selector.select(&paths).len(), 2);
    }

    #[test]
    fn test_lookahead_exclude() {
        let filter = FileFilter::compile(None, Some(r"^(?!src/).*\.py$")).unwrap();
        assert!(filter.is_excluded("setup.py"));
        assert!(filter.matches("src/app/models.py"));
        assert!(filter.matches("docs/conf.txt"));
    }

    #[test]
    fn test_python_end_of_text_anchor() {
        let filter = FileFilter::compile(Some(r"\.py\Z"), None).unwrap();
        assert!(filter.matches("src/app/models.py"));
        assert!(!filter.matches("src/app/models.pyc"));
    }

    #[test]
    fn test_translate_pattern_keeps_escaped_backslash() {
        assert_eq!(translate_pattern(r"\.py\Z"), r"\.py\z");
        assert_eq!(translate_pattern(r"a\\Z"), r"a\\Z");
        assert_eq!(translate_pattern(r"trailing\"), r"trailing\");
    }
}
