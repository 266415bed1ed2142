//! Configuration management module
//!
//! This module resolves settings from `config.toml`, environment variables
//! and defaults, and holds the diagnostic messages produced along the way
//! until logging is available.

pub mod cast;
pub mod deferred;
pub mod env;
pub mod settings;
pub mod store;

pub use cast::Cast;
pub use deferred::DeferredLog;
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use settings::*;
pub use store::{config_file_path, ConfigStore, Source, CONFIG_FILE_NAME};
