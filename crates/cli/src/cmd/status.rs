//! Status command implementation
//!
//! Show the collected git hooks and any mismatch between the collection and
//! the dispatcher files.

use clap::Args;
use hookmux_engine::{HookCollection, Inconsistency};
use owo_colors::OwoColorize;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Output format for status command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable listing
    Simple,
    /// Machine readable JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(OutputFormat::Simple),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!("Invalid output format: {}. Use 'simple' or 'json'", s),
        }
    }
}

/// Show collected git hooks
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output format (simple, json)
    #[arg(short, long, default_value = "simple")]
    pub format: OutputFormat,
}

impl Command for StatusCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let aggregator = context.aggregator();
        let hooks_dir = aggregator.locate();
        let collection = aggregator.collection()?.unwrap_or_default();
        let problems = aggregator.verify()?;

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "projectRoot": context.project_root,
                    "hooksDir": hooks_dir.as_ref().map(|d| d.path()),
                    "collection": collection,
                    "problems": problems.iter().map(ToString::to_string).collect::<Vec<_>>(),
                });
                let rendered = serde_json::to_string_pretty(&json).map_err(anyhow::Error::from)?;
                println!("{rendered}");
            }
            OutputFormat::Simple => match hooks_dir {
                Some(dir) => {
                    println!("Hooks directory: {}", dir.path().cyan());
                    println!();
                    print_collection(&collection);
                    print_problems(&problems);
                }
                None => println!(
                    "{}",
                    format!("{} has no git hooks directory.", context.project_root).yellow()
                ),
            },
        }
        Ok(())
    }
}

fn print_collection(collection: &HookCollection) {
    if collection.is_empty() {
        println!("{}", "No git hooks installed.".dimmed());
        return;
    }

    for hook_type in collection.hook_types() {
        println!("{}", hook_type.bold());
        for hook in collection.scripts(hook_type) {
            println!(
                "  • {} {} {}",
                hook.package.green(),
                hook.hook_name,
                hook.path.dimmed()
            );
        }
    }
}

fn print_problems(problems: &[Inconsistency]) {
    if problems.is_empty() {
        return;
    }

    println!();
    println!("{}", "Problems:".yellow().bold());
    for problem in problems {
        println!("  {} {}", "!".yellow(), problem);
    }
    println!("Run {} to repair.", "hookmux sync".cyan());
}
