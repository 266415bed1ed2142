//! sublime-debugger - Sublime Text debugger virtualenv switcher
//!
//! Points the Python debugger configuration of a Sublime project at the
//! interpreter of the active virtualenv.

use clap::Parser;
use sublime_debugger::cli::Cli;
use sublime_debugger::config::{self, ConfigStore, ProcessEnv, Settings, MODULE_NAME};
use sublime_debugger::logging::init_logging;
use sublime_debugger::Result;
use tracing::{error, info};

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("Error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Settings are resolved before the logger exists; their provenance is
    // buffered in the store and replayed below
    let mut store = ConfigStore::load(config::config_dir(&ProcessEnv), MODULE_NAME)?;
    let settings = Settings::resolve(&mut store, &ProcessEnv)?;

    init_logging(&settings.logging)?;
    store.flush_deferred(|message| info!("{}", message));

    cli.execute(&settings)
}
