//! Utility functions module
//!
//! Path helpers and the size-rotating log file writer.

pub mod helpers;
pub mod rotating;

pub use helpers::*;
pub use rotating::*;
