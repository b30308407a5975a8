use crate::config::stages::KNOWN_STAGES;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or interpreting a hook configuration
#[derive(Error, Debug)]
pub enum HookpinError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("No configuration file named {name} found from {start}")]
    NotFound { name: String, start: PathBuf },

    #[error("Invalid regular expression `{pattern}`: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    #[error("Unknown stage `{stage}`, expected one of: {}", KNOWN_STAGES.join(", "))]
    UnknownStage { stage: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),
}

/// Convenience type alias for library results
pub type Result<T> = std::result::Result<T, HookpinError>;

impl HookpinError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HookpinError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn regex(pattern: impl Into<String>, source: fancy_regex::Error) -> Self {
        HookpinError::Regex {
            pattern: pattern.into(),
            source,
        }
    }
}
