//! hookmux CLI library
//!
//! This library contains all the CLI logic for hookmux, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;

/// hookmux - git hooks from many packages, one dispatcher per hook
#[derive(Parser)]
#[command(name = "hookmux")]
#[command(about = "Aggregate git hooks contributed by dependency packages")]
#[command(version)]
#[command(long_about = "Aggregate git hooks contributed by dependency packages

Packages list the hook scripts they ship under `extra.available-git-hooks`
in their manifest. The project lists the hooks it wants from each package
under `extra.required-git-hooks` in its own manifest. hookmux merges them
into .git/hooks/hookmux-hooks.json and writes one dispatcher per git hook
type that runs every contributed script in order.")]
pub struct Cli {
    /// Project root (defaults to the enclosing git working tree)
    #[arg(long, env = "HOOKMUX_PROJECT", value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "HOOKMUX_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Show what would change without touching the hooks directory
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for hookmux CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Activate the git hooks the project requires from packages
    Install(cmd::install::InstallCommand),

    /// Deactivate every git hook contributed by packages
    Uninstall(cmd::uninstall::UninstallCommand),

    /// Replace the git hooks of an installed package with a new version
    Update(cmd::update::UpdateCommand),

    /// Show collected git hooks and dispatcher problems
    Status(cmd::status::StatusCommand),

    /// Repair dispatcher files so they match the collection
    Sync(cmd::sync::SyncCommand),

    /// Run every collected script for a git hook type
    #[command(long_about = "Run every collected script for a git hook type

Invoked by the generated dispatcher files in .git/hooks. Scripts run in
install order with the working directory as their only argument. The first
script that fails stops the run and its exit code is passed on to git.")]
    Dispatch(cmd::dispatch::DispatchCommand),
}

/// Execute the command based on the command type
fn execute_command(command: Commands, context: &RuntimeContext) -> Result<()> {
    match command {
        Commands::Install(install_cmd) => install_cmd.execute(context)?,
        Commands::Uninstall(uninstall_cmd) => uninstall_cmd.execute(context)?,
        Commands::Update(update_cmd) => update_cmd.execute(context)?,
        Commands::Status(status_cmd) => status_cmd.execute(context)?,
        Commands::Sync(sync_cmd) => sync_cmd.execute(context)?,
        Commands::Dispatch(_) => unreachable!("Dispatch command already handled above"),
    }
    Ok(())
}

/// Main entry point for the CLI logic
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - The project root cannot be determined
/// - Configuration or the root manifest cannot be loaded
/// - Command execution fails
pub fn run(cli: Cli) -> Result<()> {
    hookmux_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    let project_root = hookmux_config::resolve_project_root(cli.project.as_deref())
        .context("Failed to determine the project root")?;
    tracing::debug!("Project root: {}", project_root.display());

    // Dispatch runs inside git and must not depend on the root manifest
    if let Commands::Dispatch(dispatch_cmd) = &cli.command {
        return Ok(dispatch_cmd.run(&project_root)?);
    }

    let context = RuntimeContext::new(&project_root, cli.dry_run)?;
    execute_command(cli.command, &context)?;
    context.print_recorded();

    Ok(())
}
