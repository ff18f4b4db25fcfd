//! `tracing` setup for the binary
//!
//! Diagnostics go to stderr (and optionally a log file) so that stdout only
//! carries generation results: human lines, JSON or the download link.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Flushes the log file worker when the process exits.
static LOG_FILE_WORKER: OnceLock<WorkerGuard> = OnceLock::new();

type FilteredRegistry = Layered<EnvFilter, Registry>;
type DynLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Install the global subscriber described by `options`.
///
/// `options.level` already reflects `QRCRAFT_LOG_LEVEL`. A no-op when a
/// subscriber is already installed.
pub fn init(options: &LoggingOptions) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = EnvFilter::try_new(&options.level)
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {e}", options.level)))?;
    let log_file = log_file_layer::<FilteredRegistry>(options)?;

    Registry::default()
        .with(filter)
        .with(log_file)
        .with(terminal_layer(options.color))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}

fn terminal_layer<S>(ansi: bool) -> DynLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(ansi)
        .boxed()
}

/// Plain-text layer writing to `options.file`, if one is configured.
fn log_file_layer<S>(options: &LoggingOptions) -> Result<Option<DynLayer<S>>>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    let Some(path) = options.file.as_deref() else {
        return Ok(None);
    };

    let sink = open_log_sink(path, options.rotation)?;
    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(sink);
    let _ = LOG_FILE_WORKER.set(worker);

    Ok(Some(
        fmt::layer()
            .with_writer(writer)
            .with_timer(UtcTime::rfc_3339())
            .with_ansi(false)
            .boxed(),
    ))
}

fn open_log_sink(path: &Path, rotation: Option<LogRotation>) -> Result<Box<dyn Write + Send>> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .map_err(|e| Error::Config(format!("Cannot create log directory {}: {e}", dir.display())))?;

    match rotation {
        Some(rotation) => Ok(Box::new(rotating_appender(path, dir, rotation)?)),
        None => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    Error::Config(format!("Cannot open log file {}: {e}", path.display()))
                })?;
            Ok(Box::new(file))
        }
    }
}

fn rotating_appender(path: &Path, dir: &Path, rotation: LogRotation) -> Result<RollingFileAppender> {
    let prefix = path.file_name().ok_or_else(|| {
        Error::Config(format!(
            "Rotated log path '{}' has no file name",
            path.display()
        ))
    })?;

    Ok(match rotation {
        LogRotation::Hourly => rolling::hourly(dir, prefix),
        LogRotation::Daily => rolling::daily(dir, prefix),
    })
}
