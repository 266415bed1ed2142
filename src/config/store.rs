//! Layered configuration store
//!
//! Settings are looked up in three tiers and the first hit wins:
//!
//! 1. `config.toml`, under the table named after the module
//!    (`[module] key` or `[module.section] key`)
//! 2. the environment variable `MODULE_SECTION_KEY`
//! 3. the caller's default
//!
//! Each lookup records one line in the store's [`DeferredLog`] naming the
//! tier that answered, so the startup sequence can replay them once the
//! logger is initialized.

use crate::config::cast::Cast;
use crate::config::deferred::DeferredLog;
use crate::config::env::{EnvSource, ProcessEnv};
use crate::error::{ConfigError, Result, SublimeDebuggerError};
use crate::utils::expand_home;
use std::fmt;
use std::path::{Path, PathBuf};

/// File name looked up inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Tier that produced a resolved value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    File,
    Env,
    Default,
}

/// Raw value taken from the file or the environment, before any cast
#[derive(Debug, Clone, PartialEq)]
enum Hit {
    File(toml::Value),
    Env(String),
}

impl Hit {
    fn source(&self) -> Source {
        match self {
            Hit::File(_) => Source::File,
            Hit::Env(_) => Source::Env,
        }
    }

    fn cast<T: Cast>(&self) -> Option<T> {
        match self {
            Hit::File(value) => T::from_toml(value),
            Hit::Env(text) => T::from_text(text),
        }
    }

    fn raw(&self) -> String {
        match self {
            Hit::File(toml::Value::String(text)) | Hit::Env(text) => text.clone(),
            Hit::File(value) => value.to_string(),
        }
    }

    fn into_toml(self) -> toml::Value {
        match self {
            Hit::File(value) => value,
            Hit::Env(text) => toml::Value::String(text),
        }
    }
}

pub struct ConfigStore {
    module_name: String,
    config_file: Option<toml::Table>,
    deferred: DeferredLog,
    env: Box<dyn EnvSource>,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("module_name", &self.module_name)
            .field("config_file", &self.config_file)
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Load `<dir>/config.toml` and read overrides from the process
    /// environment.
    pub fn load<P: AsRef<Path>>(dir: P, module_name: &str) -> Result<Self> {
        Self::load_with_env(dir, module_name, ProcessEnv)
    }

    /// Load `<dir>/config.toml`, reading overrides from `env`.
    ///
    /// A missing file is not an error: it is noted in the deferred log and
    /// every lookup falls through to the environment. A file that exists but
    /// does not parse is an error.
    pub fn load_with_env<P, E>(dir: P, module_name: &str, env: E) -> Result<Self>
    where
        P: AsRef<Path>,
        E: EnvSource + 'static,
    {
        let path = config_file_path(dir.as_ref());
        let mut deferred = DeferredLog::new();

        let config_file = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let table = toml::from_str::<toml::Table>(&contents).map_err(|e| {
                    SublimeDebuggerError::config_parse(path.display().to_string(), e)
                })?;
                deferred.defer(format!("Config file found at {}", path.display()));
                Some(table)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                deferred.defer(format!("Config file not found at {}", path.display()));
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            module_name: module_name.to_lowercase(),
            config_file,
            deferred,
            env: Box::new(env),
        })
    }

    /// Build a store from an already parsed table. Nothing is deferred.
    pub fn from_table<E>(module_name: &str, config_file: Option<toml::Table>, env: E) -> Self
    where
        E: EnvSource + 'static,
    {
        Self {
            module_name: module_name.to_lowercase(),
            config_file,
            deferred: DeferredLog::new(),
            env: Box::new(env),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Parsed `config.toml`, if one was found
    pub fn config_file(&self) -> Option<&toml::Table> {
        self.config_file.as_ref()
    }

    pub fn deferred(&self) -> &DeferredLog {
        &self.deferred
    }

    /// Replay the deferred messages into `sink` and clear them
    pub fn flush_deferred<F: FnMut(&str)>(&mut self, sink: F) {
        self.deferred.flush(sink);
    }

    pub fn reset_deferred(&mut self) {
        self.deferred.reset();
    }

    /// Environment variable consulted for `key`: `demo.foo` under module
    /// `app` becomes `APP_DEMO_FOO`.
    pub fn env_key(&self, key: &str) -> String {
        format!(
            "{}_{}",
            self.module_name.to_uppercase(),
            key.to_uppercase().replace('.', "_")
        )
    }

    /// Resolve `key` without casting. Environment hits come back as
    /// `toml::Value::String`; a miss returns `default` untouched.
    pub fn resolve(&mut self, key: &str, default: Option<toml::Value>) -> Option<toml::Value> {
        let env_key = self.env_key(key);
        let hit = self.lookup(key);
        self.record(&env_key, hit.as_ref(), || match &default {
            Some(value) => value.to_string(),
            None => "none".to_string(),
        });

        match hit {
            Some(hit) => Some(hit.into_toml()),
            None => default,
        }
    }

    /// Resolve `key` and cast a file or environment hit to `T`. The default
    /// is returned as given.
    pub fn resolve_as<T: Cast>(&mut self, key: &str, default: Option<T>) -> Result<Option<T>> {
        let described = default.as_ref().map_or_else(|| "none".to_string(), T::describe);
        Ok(self.lookup_cast(key, described)?.or(default))
    }

    /// Like [`ConfigStore::resolve_as`] with a default that is always present
    pub fn resolve_or<T: Cast>(&mut self, key: &str, default: T) -> Result<T> {
        let described = default.describe();
        Ok(self.lookup_cast(key, described)?.unwrap_or(default))
    }

    /// Record the lookup of `key` and cast a hit; `None` means the default
    /// tier answers
    fn lookup_cast<T: Cast>(&mut self, key: &str, described_default: String) -> Result<Option<T>> {
        let env_key = self.env_key(key);
        let hit = self.lookup(key);
        self.record(&env_key, hit.as_ref(), || described_default);

        match hit {
            Some(hit) => match hit.cast::<T>() {
                Some(value) => Ok(Some(value)),
                None => Err(ConfigError::invalid_value(env_key, hit.raw(), T::TYPE_NAME).into()),
            },
            None => Ok(None),
        }
    }

    /// Tier that would answer `key`, without recording anything
    pub fn source_of(&self, key: &str) -> Source {
        self.lookup(key).map_or(Source::Default, |hit| hit.source())
    }

    fn lookup(&self, key: &str) -> Option<Hit> {
        if let Some(value) = self.lookup_file(key) {
            return Some(Hit::File(value.clone()));
        }
        self.env.get(&self.env_key(key)).map(Hit::Env)
    }

    /// File tier. `section.name` is looked up one table down; any other
    /// shape of key is looked up directly under the module table, so keys
    /// with more than one dot never match.
    fn lookup_file(&self, key: &str) -> Option<&toml::Value> {
        let module = self.config_file.as_ref()?.get(&self.module_name)?;
        let key = key.to_lowercase();
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            [section, name] => module.get(*section)?.get(*name),
            _ => module.get(key.as_str()),
        }
    }

    fn record<F>(&mut self, env_key: &str, hit: Option<&Hit>, describe_default: F)
    where
        F: FnOnce() -> String,
    {
        let message = match hit.map(Hit::source) {
            Some(Source::File) => format!("{} found in {}", env_key, CONFIG_FILE_NAME),
            Some(Source::Env) => format!("{} found in an environment variable", env_key),
            _ => format!(
                "{} not found, falling back to default {}",
                env_key,
                describe_default()
            ),
        };
        self.deferred.defer(message);
    }
}

/// `<dir>/config.toml`, with a leading `~` in `dir` expanded
pub fn config_file_path(dir: &Path) -> PathBuf {
    expand_home(dir).join(CONFIG_FILE_NAME)
}
