use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Appended to `custom/custom.css`. Every run adds another copy.
pub const CSS_FIX: &str = concat!(
    "\n",
    "/* Fix TOC2 positioning - prevents it from being hidden behind header */\n",
    "/* Applied by jupyter-toc-fix package v",
    env!("CARGO_PKG_VERSION"),
    " */\n",
    "#toc-wrapper {\n",
    "    position: relative !important;\n",
    "    top: 130px !important;\n",
    "    left: 0px !important;\n",
    "}\n",
    "\n",
    "#notebook-container {\n",
    "    width: 95% !important;\n",
    "    margin-left: auto !important;\n",
    "    margin-right: auto !important;\n",
    "}\n",
);

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to append to {}: {source}", path.display())]
    AppendCss {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn custom_css_path(config_dir: &Path) -> PathBuf {
    config_dir.join("custom").join("custom.css")
}

/// Appends [`CSS_FIX`] to `<config_dir>/custom/custom.css`, creating the
/// directory if needed. Existing content is left in place.
pub fn append_css_fix(config_dir: &Path) -> Result<PathBuf, SetupError> {
    let custom_dir = config_dir.join("custom");
    fs::create_dir_all(&custom_dir).map_err(|source| SetupError::CreateDir {
        path: custom_dir.clone(),
        source,
    })?;

    let css_path = custom_css_path(config_dir);
    let append = |source| SetupError::AppendCss {
        path: css_path.clone(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&css_path)
        .map_err(append)?;
    file.write_all(CSS_FIX.as_bytes()).map_err(append)?;

    tracing::info!("appended css fix to {}", css_path.display());
    Ok(css_path)
}
