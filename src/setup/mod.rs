pub mod installer;
pub mod report;
pub mod runner;
pub mod step;
pub mod stylesheet;

pub use installer::Installer;
pub use runner::JupyterCli;
