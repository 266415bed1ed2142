//! Environment variable sources
//!
//! The resolver reads environment variables through [`EnvSource`] so tests
//! can supply a fixed map instead of mutating the process environment.

use std::collections::HashMap;

pub trait EnvSource {
    /// Value of `name`, or `None` when the variable is absent. A variable set
    /// to the empty string is present and yields `Some("")`. Values that are
    /// not valid UTF-8 are reported as absent rather than lossily converted.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads from the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var_os(name).and_then(|value| value.into_string().ok())
    }
}

/// Fixed set of variables, used by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.set(name, value);
        self
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.vars.insert(name.into(), value.into());
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = MapEnv::new();
        for (name, value) in iter {
            env.set(name, value);
        }
        env
    }
}
