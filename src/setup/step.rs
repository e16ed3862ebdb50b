use crate::model::extension::ExtensionId;

/// One guarded invocation of the extension manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    InstallNbextensions,
    EnableConfigurator,
    EnableExtension(ExtensionId),
}

impl Step {
    /// Arguments after the program name, ending with the scope flag.
    pub fn args(&self, scope_flag: &str) -> Vec<String> {
        let mut args: Vec<String> = match self {
            Step::InstallNbextensions => vec!["contrib".into(), "nbextension".into(), "install".into()],
            Step::EnableConfigurator => vec!["nbextensions_configurator".into(), "enable".into()],
            Step::EnableExtension(id) => {
                vec!["nbextension".into(), "enable".into(), id.as_str().into()]
            }
        };
        args.push(scope_flag.to_string());
        args
    }

    pub fn label(&self) -> String {
        match self {
            Step::InstallNbextensions => "install nbextensions".to_string(),
            Step::EnableConfigurator => "enable configurator".to_string(),
            Step::EnableExtension(id) => format!("enable {id}"),
        }
    }

    /// What the "command not found" warning says is being skipped.
    pub fn skipped_subject(&self) -> String {
        match self {
            Step::InstallNbextensions => "nbextensions install".to_string(),
            Step::EnableConfigurator => "configurator enable".to_string(),
            Step::EnableExtension(id) => format!("{id} enable"),
        }
    }

    pub fn done_message(&self) -> String {
        match self {
            Step::InstallNbextensions => "nbextensions installed".to_string(),
            Step::EnableConfigurator => "configurator enabled".to_string(),
            Step::EnableExtension(id) => id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Failed(String),
    ToolMissing,
}

impl StepOutcome {
    pub fn is_warning(&self) -> bool {
        !matches!(self, StepOutcome::Done)
    }
}
