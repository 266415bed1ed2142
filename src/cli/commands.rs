//! CLI commands and argument parsing
//!
//! The tool has a single command. `--update` rewrites the debugger
//! interpreter in the configured project file.

use crate::config::Settings;
use crate::error::Result;
use crate::project::update_debugger_path;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Get the full version string with build information
fn get_version() -> &'static str {
    env!("VERSION_WITH_GIT")
}

/// Utility to change the Sublime debugger virtualenv path for Python to the
/// current VIRTUAL_ENV in the Sublime project file
#[derive(Debug, Parser)]
#[command(name = "sublime-debugger")]
#[command(version = get_version(), author)]
pub struct Cli {
    /// Update the sublime project file with the active virtualenv
    #[arg(short, long)]
    pub update: bool,
}

/// What `--update` changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub project_file: PathBuf,
    pub virtualenv: PathBuf,
    pub python_path: String,
}

impl Cli {
    pub fn execute(&self, settings: &Settings) -> Result<()> {
        if self.update {
            let summary = update(settings)?;
            println!(
                "Successfully updated {} with {}",
                summary.project_file.display(),
                summary.virtualenv.display()
            );
        } else {
            info!("Nothing to do; pass --update to patch the project file");
        }
        Ok(())
    }
}

/// Patch the configured project file with the configured virtualenv
pub fn update(settings: &Settings) -> Result<UpdateSummary> {
    let project_file = settings.sublime.require_project_file()?;
    let virtualenv = settings.sublime.require_virtualenv()?;

    let python_path = update_debugger_path(project_file, virtualenv)?;

    Ok(UpdateSummary {
        project_file: project_file.clone(),
        virtualenv: virtualenv.clone(),
        python_path,
    })
}
