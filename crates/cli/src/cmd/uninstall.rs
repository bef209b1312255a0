//! Uninstall command implementation

use clap::Args;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Deactivate the git hooks of one or more packages
#[derive(Debug, Args)]
pub struct UninstallCommand {
    /// Package names as recorded in the hook collection
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,
}

impl Command for UninstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let aggregator = context.aggregator();
        for name in &self.names {
            let transition = aggregator.uninstall(name)?;
            super::print_transition("uninstalled git hooks of", name, &transition);
        }
        Ok(())
    }
}
