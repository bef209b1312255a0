//! Update command implementation

use clap::Args;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Swap the git hooks of an installed package for those of its new version
///
/// The new package is validated before anything of the old one is removed.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Name of the installed package
    #[arg(value_name = "OLD_NAME")]
    pub old_name: String,

    /// New package directory, or package name under the vendor directory
    #[arg(value_name = "PACKAGE")]
    pub package: String,
}

impl Command for UpdateCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let package = context.resolve_package(&self.package)?;
        let transition = context.aggregator().update(&self.old_name, &package)?;
        super::print_transition("updated git hooks of", &package.name, &transition);
        Ok(())
    }
}
