use anyhow::Result;
use figment::{
    Figment,
    providers::{Env, Format, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::ValidateOptions;

// Embed the default settings at compile time
const DEFAULT_SETTINGS: &str = include_str!("default-settings.toml");

/// Settings of hookpin itself, as opposed to the hook configuration it reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Hook configuration file name looked up from the working directory
    pub config_file: String,
    pub color: bool,
    /// Fail validation on warnings
    pub strict: bool,
    pub warn_mutable_revs: bool,
    /// Environment variable holding a comma separated list of hooks to skip
    pub skip_env: String,
    pub default_stage: String,
}

impl Settings {
    /// Load settings for a repository rooted at (or containing) `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        Self::from_figment(Self::figment(dir))
    }

    /// Standard priority: defaults -> user settings -> repository settings -> environment
    pub fn figment(dir: &Path) -> Figment {
        let mut figment = Self::defaults();

        if let Some(user) = Self::user_settings_path() {
            figment = figment
                .merge(Toml::file(&user))
                .merge(Yaml::file(user.with_extension("yaml")));
        }

        figment
            .merge(Toml::file(dir.join("hookpin.toml")))
            .merge(Yaml::file(dir.join("hookpin.yaml")))
            // Environment variables always have highest priority
            .merge(Env::prefixed("HOOKPIN_"))
    }

    /// Embedded defaults only
    pub fn defaults() -> Figment {
        Figment::new().merge(Toml::string(DEFAULT_SETTINGS))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let settings: Settings = figment.extract()?;
        tracing::trace!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            warn_mutable_revs: self.warn_mutable_revs,
            strict: self.strict,
        }
    }

    /// Hook ids listed in the skip variable of `lookup`
    pub fn skip_list(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        lookup(&self.skip_env)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn user_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hookpin").join("settings.toml"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file: super::DEFAULT_CONFIG_FILE.to_string(),
            color: true,
            strict: false,
            warn_mutable_revs: true,
            skip_env: "SKIP".to_string(),
            default_stage: crate::plan::DEFAULT_STAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let settings = Settings::from_figment(Settings::defaults()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_later_layers_override() {
        let figment = Settings::defaults()
            .merge(Toml::string("strict = true\nskip_env = \"HOOKPIN_SKIP\""));
        let settings = Settings::from_figment(figment).unwrap();
        assert!(settings.strict);
        assert_eq!(settings.skip_env, "HOOKPIN_SKIP");
        assert_eq!(settings.config_file, ".pre-commit-config.yaml");
        assert!(settings.validate_options().strict);
    }

    #[test]
    fn test_repository_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("hookpin.yaml"),
            "config_file: hooks.yaml\nwarn_mutable_revs: false\n",
        )
        .unwrap();

        let settings = Settings::load(temp_dir.path()).unwrap();
        assert_eq!(settings.config_file, "hooks.yaml");
        assert!(!settings.validate_options().warn_mutable_revs);
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let figment = Settings::defaults().merge(Toml::string("color = \"sometimes\""));
        assert!(Settings::from_figment(figment).is_err());
    }

    #[test]
    fn test_skip_list() {
        let settings = Settings::default();
        let skip = settings.skip_list(|name| {
            assert_eq!(name, "SKIP");
            Some(" flake8, ,mypy ".to_string())
        });
        assert_eq!(skip, vec!["flake8", "mypy"]);
        assert!(settings.skip_list(|_| None).is_empty());
    }
}
