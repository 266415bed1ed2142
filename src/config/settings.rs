//! Typed application settings
//!
//! Every setting the tool understands is resolved exactly once, in
//! [`Settings::resolve`], through the layered [`ConfigStore`].

use crate::config::cast::Cast;
use crate::config::env::EnvSource;
use crate::config::store::ConfigStore;
use crate::error::{ConfigError, Result};
use crate::utils::expand_home;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Identifier used as the `config.toml` table name and the environment
/// variable prefix
pub const MODULE_NAME: &str = "sublime_debugger";

/// Overrides the directory holding `config.toml`
pub const CONFIG_PATH_ENV: &str = "SUBLIME_DEBUGGER_CONFIG_PATH";

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/sublime_debugger";

/// Fallback for `sublime.virtualenv`
pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";

pub const DEFAULT_BACKUP_COUNT: usize = 3;
pub const DEFAULT_ROTATE_BYTES: u64 = 512_000;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Timestamp, level, target, file and line
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "text" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl Cast for LogFormat {
    const TYPE_NAME: &'static str = "log format (full, compact, json)";

    fn from_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for `sublime_debugger.log`; file logging is off when unset
    pub path: Option<PathBuf>,
    pub format: LogFormat,
    /// `tracing` level or filter directive
    pub level: String,
    pub backup_count: usize,
    pub rotate_bytes: u64,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            path: None,
            format: LogFormat::Full,
            level: "info".to_string(),
            backup_count: DEFAULT_BACKUP_COUNT,
            rotate_bytes: DEFAULT_ROTATE_BYTES,
        }
    }
}

impl LoggingSettings {
    /// Full path of the log file, if file logging is enabled
    pub fn log_file(&self) -> Option<PathBuf> {
        self.path
            .as_ref()
            .map(|dir| expand_home(dir).join(format!("{}.log", MODULE_NAME)))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SublimeSettings {
    /// The `.sublime-project` file to patch
    pub project_file: Option<PathBuf>,
    /// Virtualenv whose interpreter the debugger should use
    pub virtualenv: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub sublime: SublimeSettings,
}

impl Settings {
    /// Resolve every known setting through `store`.
    ///
    /// `logging.backup_count` and `logging.rotate_bytes` only matter for
    /// file logging and are left at their defaults, unresolved, when
    /// `logging.path` is unset. `env` supplies the `VIRTUAL_ENV` fallback.
    pub fn resolve(store: &mut ConfigStore, env: &dyn EnvSource) -> Result<Self> {
        let defaults = LoggingSettings::default();

        let path = store.resolve_as::<PathBuf>("logging.path", None)?;
        let format = store.resolve_or("logging.format", defaults.format)?;
        let level = store.resolve_or("logging.level", defaults.level)?;

        let (backup_count, rotate_bytes) = if path.is_some() {
            (
                store.resolve_or("logging.backup_count", defaults.backup_count)?,
                store.resolve_or("logging.rotate_bytes", defaults.rotate_bytes)?,
            )
        } else {
            (defaults.backup_count, defaults.rotate_bytes)
        };

        let project_file = store.resolve_as::<PathBuf>("sublime.project_file", None)?;
        let virtualenv =
            store.resolve_as::<PathBuf>("sublime.virtualenv", env.get(VIRTUAL_ENV).map(PathBuf::from))?;

        Ok(Self {
            logging: LoggingSettings {
                path,
                format,
                level,
                backup_count,
                rotate_bytes,
            },
            sublime: SublimeSettings {
                project_file,
                virtualenv,
            },
        })
    }
}

impl SublimeSettings {
    /// Project file, or an error naming the variable to set
    pub fn require_project_file(&self) -> Result<&PathBuf> {
        self.project_file.as_ref().ok_or_else(|| {
            ConfigError::missing_setting("sublime.project_file", env_var_for("sublime.project_file"))
                .into()
        })
    }

    /// Virtualenv, or an error naming the variable to set.
    ///
    /// An empty path counts as unset so the interpreter can never collapse
    /// to `/bin/python`.
    pub fn require_virtualenv(&self) -> Result<&PathBuf> {
        self.virtualenv
            .as_ref()
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| ConfigError::missing_setting("sublime.virtualenv", VIRTUAL_ENV).into())
    }
}

/// Directory holding `config.toml`: `SUBLIME_DEBUGGER_CONFIG_PATH` if set,
/// otherwise `~/.config/sublime_debugger`
pub fn config_dir(env: &dyn EnvSource) -> PathBuf {
    let dir = env
        .get(CONFIG_PATH_ENV)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    expand_home(dir)
}

fn env_var_for(key: &str) -> String {
    format!("{}_{}", MODULE_NAME.to_uppercase(), key.to_uppercase().replace('.', "_"))
}
