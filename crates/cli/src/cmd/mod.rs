//! CLI command implementations
//!
//! This module contains all command implementations for the hookmux CLI.

pub mod dispatch;
pub mod install;
pub mod status;
pub mod sync;
pub mod uninstall;
pub mod update;

use hookmux_core::HookType;
use hookmux_engine::Transition;
use owo_colors::OwoColorize;

fn join_types(types: &[HookType]) -> String {
    types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the outcome of a transition for one package
pub(crate) fn print_transition(action: &str, package: &str, transition: &Transition) {
    match transition {
        Transition::Applied(report) => {
            println!("{} {} {}", "✓".green(), action, package.cyan());
            if !report.activated.is_empty() {
                println!("  activated:   {}", join_types(&report.activated).green());
            }
            if !report.deactivated.is_empty() {
                println!("  deactivated: {}", join_types(&report.deactivated).yellow());
            }
            if report.activated.is_empty()
                && report.deactivated.is_empty()
                && !report.collection_changed
            {
                println!("  {}", "nothing to change".dimmed());
            }
        }
        Transition::Skipped(reason) => {
            println!("{} {} {} ({})", "-".dimmed(), action, package, reason.dimmed());
        }
    }
}
