use anyhow::{Result, anyhow};
use std::ffi::OsString;
use std::path::PathBuf;

pub const CONFIG_DIR_ENV: &str = "JUPYTER_CONFIG_DIR";
pub const ENV_PREFIX_ENV: &str = "CONDA_PREFIX";

/// Environment signals that decide where the Jupyter config directory lives.
///
/// Captured once at startup so resolution never reads process state ad hoc.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub config_dir_override: Option<PathBuf>,
    pub env_prefix: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl Environment {
    pub fn from_process() -> Self {
        Self {
            config_dir_override: non_empty(std::env::var_os(CONFIG_DIR_ENV)),
            env_prefix: non_empty(std::env::var_os(ENV_PREFIX_ENV)),
            home: directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()),
        }
    }

    pub fn with_override(mut self, config_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = config_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            self.config_dir_override = Some(dir);
        }
        self
    }

    /// Override, then `<prefix>/etc/jupyter`, then `~/.jupyter`.
    pub fn resolve_config_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.config_dir_override {
            return Ok(dir.clone());
        }

        if let Some(prefix) = &self.env_prefix {
            return Ok(prefix.join("etc").join("jupyter"));
        }

        self.home
            .as_ref()
            .map(|home| home.join(".jupyter"))
            .ok_or_else(|| anyhow!("cannot determine home directory"))
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}
