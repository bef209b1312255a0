//! Dispatch command implementation
//!
//! The generated dispatcher files in `.git/hooks` hand over to this command.
//! It runs every script collected for one hook type, in install order, and
//! stops at the first failure.

use clap::Args;
use hookmux_config::Config;
use hookmux_core::{AbsPath, HookType};
use hookmux_engine::{CollectionStore, HooksDir, RealSystem};
use std::path::{Path, PathBuf};

use crate::error::{CommandError, Result};

/// Run every collected script for a git hook type
#[derive(Debug, Args)]
pub struct DispatchCommand {
    /// Git hook type to run
    #[arg(value_name = "HOOK_TYPE")]
    pub hook_type: HookType,

    /// Hooks directory holding the collection (defaults to <project>/.git/hooks)
    #[arg(long, value_name = "DIR")]
    pub hooks_dir: Option<PathBuf>,
}

impl DispatchCommand {
    /// Run the collected scripts
    ///
    /// Each script gets the current directory as its only argument. Its
    /// stdout and stderr are captured together and echoed indented by a tab.
    ///
    /// # Errors
    ///
    /// Returns `HookFailed` carrying the exit code of the first failing
    /// script, `HookSpawn` if a script cannot be started, or an error if
    /// the configuration or collection cannot be loaded
    pub fn run(&self, project_root: &Path) -> Result<()> {
        let config = Config::load(project_root)?;
        let dir = match &self.hooks_dir {
            Some(dir) => std::path::absolute(dir)?,
            None => project_root.join(".git").join("hooks"),
        };

        let Some(hooks_dir) = HooksDir::open(&RealSystem, AbsPath::new(dir)?) else {
            tracing::debug!("No hooks directory, nothing to run");
            return Ok(());
        };
        let collection =
            CollectionStore::new(&hooks_dir, &config.general.collection_file).load(&RealSystem)?;
        let working_dir = std::env::current_dir()?;

        for hook in collection.scripts(self.hook_type) {
            println!("Executing git {} hook '{}'...", self.hook_type, hook.path);
            let script = hooks_dir.path().as_path().join(hook.path);
            self.execute_script(&script, &working_dir)?;
        }

        println!("All {} hooks passed.", self.hook_type);
        Ok(())
    }

    fn execute_script(&self, script: &Path, working_dir: &Path) -> Result<()> {
        let output = duct::cmd(script, [working_dir])
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()
            .map_err(|e| CommandError::HookSpawn {
                hook_type: self.hook_type,
                path: script.to_path_buf(),
                source: e,
            })?;

        let text = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<&str> = text.trim_end().lines().map(str::trim_end).collect();
        if !lines.is_empty() {
            println!("\t{}", lines.join("\n\t"));
        }

        if output.status.success() {
            return Ok(());
        }

        // Killed by a signal: no exit code to forward
        let code = output.status.code().unwrap_or(1);
        println!("Hook failed with exit code {code}");
        Err(CommandError::HookFailed {
            hook_type: self.hook_type,
            code,
        })
    }
}
