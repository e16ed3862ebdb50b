use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Environment variable pointing at an alternative user config file.
pub const CONFIG_PATH_ENV: &str = "JUPYTER_TOC_FIX_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub tool: ToolConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    pub program: String,
    pub scope_flag: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let user_path = std::env::var_os(CONFIG_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(default_user_config_path);

        Self::load_from(user_path.as_deref())
    }

    pub fn load_from(user_path: Option<&Path>) -> Result<Self> {
        let mut config: AppConfig =
            toml::from_str(DEFAULT_CONFIG).context("built-in default config is invalid")?;

        if let Some(path) = user_path.filter(|path| path.exists()) {
            let user_str = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            config = toml::from_str(&user_str)
                .with_context(|| format!("failed to parse config {}", path.display()))?;
            tracing::debug!("loaded user config from {}", path.display());
        }

        Ok(config)
    }
}

fn default_user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "jupyter-toc-fix")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
