//! Sync command implementation

use clap::Args;
use hookmux_engine::Transition;
use owo_colors::OwoColorize;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Rewrite missing or modified dispatchers and remove orphaned ones
#[derive(Debug, Args)]
pub struct SyncCommand {}

impl Command for SyncCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        match context.aggregator().sync()? {
            Transition::Skipped(reason) => {
                println!("{} ({})", "Nothing to sync".dimmed(), reason);
            }
            Transition::Applied(report) => {
                for hook_type in &report.activated {
                    println!("{} rewrote dispatcher {}", "✓".green(), hook_type.cyan());
                }
                for hook_type in &report.deactivated {
                    println!("{} removed orphaned dispatcher {}", "✓".green(), hook_type.cyan());
                }
                if report.activated.is_empty() && report.deactivated.is_empty() {
                    println!("{}", "Dispatchers are in sync.".green());
                }
            }
        }
        Ok(())
    }
}
