//! Logging bootstrap
//!
//! Builds the global `tracing` subscriber from the resolved
//! [`LoggingSettings`]: a stdout layer, plus a size-rotated file layer
//! when `logging.path` is set. `RUST_LOG`, when present, overrides the
//! configured level.

use crate::config::{LogFormat, LoggingSettings};
use crate::error::{Result, SublimeDebuggerError};
use crate::utils::RotatingFile;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(level: &str) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), level)
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(&settings.level)))
        .map_err(|e| {
            SublimeDebuggerError::logging(format!(
                "invalid logging.level '{}': {}",
                settings.level, e
            ))
        })?;

    let mut layers: Vec<BoxedLayer> = vec![format_layer(settings.format, std::io::stdout, true)];

    if let Some(log_file) = settings.log_file() {
        let writer = RotatingFile::open(&log_file, settings.rotate_bytes, settings.backup_count)
            .map_err(|e| {
                SublimeDebuggerError::logging(format!(
                    "cannot open log file {}: {}",
                    log_file.display(),
                    e
                ))
            })?;
        layers.push(format_layer(settings.format, Mutex::new(writer), false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| SublimeDebuggerError::logging(e.to_string()))
}

fn format_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);

    match format {
        LogFormat::Full => layer.with_file(true).with_line_number(true).boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}
