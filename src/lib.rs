//! sublime-debugger - Sublime Text debugger virtualenv switcher
//!
//! Resolves its settings from a layered configuration (`config.toml`,
//! environment variables, defaults) and rewrites the Python interpreter path
//! of a Sublime project's debug configuration.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod project;
pub mod utils;

// Re-export commonly used types
pub use error::{Result, SublimeDebuggerError};
