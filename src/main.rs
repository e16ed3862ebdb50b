mod model;
mod setup;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use model::config::AppConfig;
use model::environment::Environment;
use setup::{Installer, JupyterCli};

/// Enable the nbextensions this package depends on and fix the TOC2 layout.
#[derive(Debug, Parser)]
#[command(name = "jupyter-toc-fix", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Jupyter config directory (defaults to JUPYTER_CONFIG_DIR, then
    /// $CONDA_PREFIX/etc/jupyter, then ~/.jupyter)
    #[arg(long, global = true, value_name = "PATH")]
    config_dir: Option<PathBuf>,

    /// Program used to run the extension manager
    #[arg(long, global = true, env = "JUPYTER_TOC_FIX_JUPYTER", value_name = "PROGRAM")]
    jupyter: Option<PathBuf>,

    /// Directory for the log file
    #[arg(long, global = true, env = "JUPYTER_TOC_FIX_LOG_DIR", value_name = "PATH")]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Install and enable the extensions, then append the CSS fix (default)
    Install,
    /// Print the config directory an install would write to
    ConfigDir,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load()?;
    let _guard = init_logging(cli.log_dir.as_deref(), &config.logging.filter);

    tracing::info!("jupyter-toc-fix {} starting", env!("CARGO_PKG_VERSION"));

    let environment = Environment::from_process().with_override(cli.config_dir);
    tracing::debug!("environment: {environment:?}");
    let config_dir = environment.resolve_config_dir()?;

    match cli.command.unwrap_or(Command::Install) {
        Command::ConfigDir => {
            println!("{}", config_dir.display());
        }
        Command::Install => {
            let program = cli
                .jupyter
                .unwrap_or_else(|| PathBuf::from(&config.tool.program));
            let stdout = io::stdout();
            let mut installer =
                Installer::new(JupyterCli::new(program), stdout.lock(), config.tool.scope_flag);
            let report = installer
                .run(&config_dir)
                .with_context(|| format!("install into {} failed", config_dir.display()))?;
            tracing::info!(
                "install finished with {} warnings {:?}, stylesheet {}",
                report.warnings(),
                report.warned_steps(),
                report
                    .stylesheet
                    .as_deref()
                    .map_or_else(|| "untouched".to_string(), |p| p.display().to_string())
            );
        }
    }

    Ok(())
}

/// File logging only; stdout carries the progress report.
fn init_logging(log_dir: Option<&Path>, default_filter: &str) -> Option<WorkerGuard> {
    let log_dir = log_dir.map(Path::to_path_buf).unwrap_or_else(|| {
        directories::ProjectDirs::from("", "", "jupyter-toc-fix")
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(std::env::temp_dir)
    });

    if let Err(err) = std::fs::create_dir_all(&log_dir) {
        eprintln!("warning: logging disabled, cannot create {}: {err}", log_dir.display());
        return None;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let file_appender = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("jupyter-toc-fix.log")
        .build(&log_dir)
    {
        Ok(appender) => appender,
        Err(err) => {
            eprintln!("warning: logging disabled, cannot open log in {}: {err}", log_dir.display());
            return None;
        }
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
