//! Sublime project file handling
//!
//! This module reads a `.sublime-project` JSON document, points its debugger
//! configuration at a virtualenv interpreter and writes it back.

pub mod patcher;

pub use patcher::*;
