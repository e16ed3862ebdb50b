use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::model::extension::DEFAULT_EXTENSIONS;
use crate::setup::report::SetupReport;
use crate::setup::runner::{CommandRunner, RunError};
use crate::setup::step::{Step, StepOutcome};
use crate::setup::stylesheet;

const INDENT: &str = "      ";

/// Drives one install run: extension manager calls, then the CSS append.
///
/// Every external call is guarded on its own and downgraded to a warning.
/// Only the stylesheet write (and writing progress to `out`) can fail the run.
pub struct Installer<R, W> {
    runner: R,
    out: W,
    scope_flag: String,
    tool_missing_reported: bool,
}

impl<R: CommandRunner, W: Write> Installer<R, W> {
    pub fn new(runner: R, out: W, scope_flag: impl Into<String>) -> Self {
        Self {
            runner,
            out,
            scope_flag: scope_flag.into(),
            tool_missing_reported: false,
        }
    }

    pub fn run(&mut self, config_dir: &Path) -> Result<SetupReport> {
        let mut report = SetupReport::default();
        tracing::info!("installing into config dir {}", config_dir.display());

        self.banner("jupyter-toc-fix: Setting up Jupyter extensions...")?;
        writeln!(self.out)?;

        writeln!(self.out, "[1/4] Installing nbextensions...")?;
        self.attempt(&mut report, Step::InstallNbextensions)?;

        writeln!(self.out, "[2/4] Enabling configurator...")?;
        self.attempt(&mut report, Step::EnableConfigurator)?;

        writeln!(self.out, "[3/4] Enabling specific extensions...")?;
        for id in DEFAULT_EXTENSIONS {
            self.attempt(&mut report, Step::EnableExtension(id))?;
        }

        writeln!(self.out, "\n[4/4] Applying TOC positioning fix...")?;
        let css_path = stylesheet::append_css_fix(config_dir)?;
        writeln!(self.out, "{INDENT}✓ CSS fix applied to: {}", css_path.display())?;
        report.stylesheet = Some(css_path);

        writeln!(self.out)?;
        self.banner(&report.summary())?;
        writeln!(self.out)?;
        self.out.flush()?;

        Ok(report)
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (R, W) {
        (self.runner, self.out)
    }

    fn attempt(&mut self, report: &mut SetupReport, step: Step) -> Result<()> {
        let args = step.args(&self.scope_flag);

        let outcome = match self.runner.run(&args) {
            Ok(()) => {
                writeln!(self.out, "{INDENT}✓ {}", step.done_message())?;
                StepOutcome::Done
            }
            Err(RunError::NotFound { program }) => {
                if !self.tool_missing_reported {
                    self.tool_missing_reported = true;
                    writeln!(
                        self.out,
                        "{INDENT}⚠ Warning: {program} command not found, skipping {}",
                        step.skipped_subject()
                    )?;
                }
                StepOutcome::ToolMissing
            }
            Err(err) => {
                writeln!(self.out, "{INDENT}⚠ Warning: Could not {}: {err}", step.label())?;
                StepOutcome::Failed(err.to_string())
            }
        };

        report.record(step, outcome);
        Ok(())
    }

    fn banner(&mut self, title: &str) -> Result<()> {
        let rule = "=".repeat(60);
        writeln!(self.out, "\n{rule}")?;
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{rule}")?;
        Ok(())
    }
}
