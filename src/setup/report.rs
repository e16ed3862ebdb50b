use std::path::PathBuf;

use crate::setup::step::{Step, StepOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Everything one install run attempted, in order.
#[derive(Debug, Clone, Default)]
pub struct SetupReport {
    pub records: Vec<StepRecord>,
    pub stylesheet: Option<PathBuf>,
}

impl SetupReport {
    pub fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.records.push(StepRecord { step, outcome });
    }

    pub fn warnings(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.outcome.is_warning())
            .count()
    }

    pub fn warned_steps(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.outcome.is_warning())
            .map(|record| record.step.label())
            .collect()
    }

    pub fn summary(&self) -> String {
        match self.warnings() {
            0 => "jupyter-toc-fix: Setup complete!".to_string(),
            1 => "jupyter-toc-fix: Setup complete with 1 warning".to_string(),
            n => format!("jupyter-toc-fix: Setup complete with {n} warnings"),
        }
    }
}
