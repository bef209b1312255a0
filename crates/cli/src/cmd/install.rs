//! Install command implementation

use clap::Args;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Activate the git hooks required from one or more packages
#[derive(Debug, Args)]
pub struct InstallCommand {
    /// Package directories, or package names under the vendor directory
    #[arg(required = true, value_name = "PACKAGE")]
    pub packages: Vec<String>,
}

impl Command for InstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let aggregator = context.aggregator();
        for spec in &self.packages {
            let package = context.resolve_package(spec)?;
            let transition = aggregator.install(&package)?;
            super::print_transition("installed git hooks of", &package.name, &transition);
        }
        Ok(())
    }
}
