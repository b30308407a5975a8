//! Command implementations for the hookpin CLI
//!
//! Each command is organized into its own module. Shared state (working
//! directory, settings, configuration lookup) lives in [`CommandContext`].

use crate::cli::OutputFormat;
use crate::config::{DEFAULT_CONFIG_FILE, HookConfig, Settings};
use crate::git::GitRepo;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub mod audit;
pub mod init;
pub mod plan;
pub mod show;
pub mod validate;
pub mod version;

/// Files whose presence marks the directory repository settings are read from
const ROOT_MARKERS: &[&str] = &["hookpin.toml", "hookpin.yaml", DEFAULT_CONFIG_FILE];

/// State shared by all commands
pub struct CommandContext {
    pub cwd: PathBuf,
    /// Directory the repository settings were loaded from
    pub root: PathBuf,
    pub settings: Settings,
    pub config_override: Option<PathBuf>,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn new(
        config_override: Option<PathBuf>,
        format: OutputFormat,
        no_color: bool,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
        let root = repository_root(&cwd);
        tracing::debug!("Loading repository settings from {}", root.display());
        let settings = Settings::load(&root).context("Failed to load hookpin settings")?;

        if no_color || !settings.color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        Ok(Self {
            cwd,
            root,
            settings,
            config_override,
            format,
        })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Locate and parse the hook configuration
    pub fn load_config(&self) -> Result<(PathBuf, HookConfig)> {
        let (path, config) = match &self.config_override {
            Some(path) => {
                let path = self.cwd.join(path);
                let config = HookConfig::load_from_file(&path)?;
                (path, config)
            }
            None => HookConfig::discover(&self.cwd, &self.settings.config_file)
                .context("Run 'hookpin init' to create a configuration")?,
        };
        tracing::debug!("Loaded {} repositories from {}", config.repos.len(), path.display());
        Ok((path, config))
    }

    /// Open the git repository around the working directory
    pub fn git(&self) -> Result<GitRepo> {
        GitRepo::discover(&self.cwd).context("No git repository found")
    }
}

/// Git working tree root around `cwd`, else the nearest ancestor holding
/// hookpin settings or a hook configuration, else `cwd` itself
pub fn repository_root(cwd: &Path) -> PathBuf {
    if let Ok(git) = GitRepo::discover(cwd) {
        if let Some(workdir) = git.workdir() {
            return workdir.to_path_buf();
        }
    }

    cwd.ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).is_file()))
        .unwrap_or(cwd)
        .to_path_buf()
}

/// Normalise user supplied paths to the `/`-separated, `./`-free form git reports
pub fn normalize_paths(files: Vec<String>) -> Vec<String> {
    files
        .into_iter()
        .map(|f| {
            let f = f.replace('\\', "/");
            match f.strip_prefix("./") {
                Some(rest) => rest.to_string(),
                None => f,
            }
        })
        .collect()
}

/// Display a path relative to `base` when possible
pub fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).display().to_string()
}
