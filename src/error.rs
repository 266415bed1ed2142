use thiserror::Error;

/// Main error type for sublime-debugger operations
#[derive(Debug, Error)]
pub enum SublimeDebuggerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Project file error: {0}")]
    Project(#[from] ProjectError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Errors raised while resolving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has value '{value}' which is not a valid {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("{key} is not set; add it to config.toml or export {env_var}")]
    MissingSetting { key: String, env_var: String },
}

/// Errors raised while patching the project file
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("'{path}' not found in {file}")]
    MissingKey { path: String, file: String },

    #[error("'{path}' in {file} is not a JSON object")]
    NotAnObject { path: String, file: String },
}

impl SublimeDebuggerError {
    pub fn config_parse<S: Into<String>>(path: S, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    pub fn logging<S: Into<String>>(msg: S) -> Self {
        Self::Logging(msg.into())
    }
}

impl ConfigError {
    pub fn invalid_value<K: Into<String>, V: Into<String>>(
        key: K,
        value: V,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            expected,
        }
    }

    pub fn missing_setting<K: Into<String>, E: Into<String>>(key: K, env_var: E) -> Self {
        Self::MissingSetting {
            key: key.into(),
            env_var: env_var.into(),
        }
    }
}

impl ProjectError {
    pub fn missing_key<P: Into<String>, F: Into<String>>(path: P, file: F) -> Self {
        Self::MissingKey {
            path: path.into(),
            file: file.into(),
        }
    }

    pub fn not_an_object<P: Into<String>, F: Into<String>>(path: P, file: F) -> Self {
        Self::NotAnObject {
            path: path.into(),
            file: file.into(),
        }
    }
}

/// Result type alias for sublime-debugger operations
pub type Result<T> = std::result::Result<T, SublimeDebuggerError>;
