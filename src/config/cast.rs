//! Conversions from raw setting values to typed values
//!
//! A raw value is either a TOML value read from `config.toml` or the text of
//! an environment variable. Types implement [`Cast::from_text`] and get TOML
//! handling for free: TOML strings are cast as text, other scalars through
//! their TOML rendering (`42`, `true`, `1.5`).

use std::path::PathBuf;

pub trait Cast: Sized {
    /// Name used in error messages
    const TYPE_NAME: &'static str;

    fn from_text(text: &str) -> Option<Self>;

    /// Render the value the way it would be written in `config.toml` or an
    /// environment variable
    fn describe(&self) -> String;

    fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::String(text) => Self::from_text(text),
            toml::Value::Array(_) | toml::Value::Table(_) => None,
            other => Self::from_text(&other.to_string()),
        }
    }
}

impl Cast for String {
    const TYPE_NAME: &'static str = "string";

    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn describe(&self) -> String {
        self.clone()
    }
}

impl Cast for PathBuf {
    const TYPE_NAME: &'static str = "path";

    fn from_text(text: &str) -> Option<Self> {
        Some(PathBuf::from(text))
    }

    fn describe(&self) -> String {
        self.display().to_string()
    }
}

impl Cast for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_text(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

macro_rules! impl_cast_from_str {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Cast for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_text(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }

                fn describe(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_cast_from_str! {
    i32 => "i32",
    i64 => "i64",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
}
