//! CLI module for sublime-debugger
//!
//! This module contains the command-line interface definition and the
//! command execution entry point.

pub mod commands;

pub use commands::*;
