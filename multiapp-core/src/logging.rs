//! Logging setup for the multiapp workspace.
//!
//! Built on the `tracing` ecosystem: a console layer, plus an optional
//! daily-rolling file layer, both in text or JSON format.

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
    Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Installs a stderr subscriber filtered by `RUST_LOG` (default "info").
///
/// Meant for tests and early startup. Errors (e.g. a subscriber is already
/// set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Creates a daily-rolling file layer and its flush guard.
fn create_file_layer(log_path: &Path, format: &str) -> Result<(BoxedLayer, WorkerGuard), CoreError> {
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    utils::fs::ensure_dir_exists(directory)?;

    let file_appender = tracing_appender::rolling::daily(
        directory,
        log_path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("multiapp.log")),
    );
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer: BoxedLayer = match format.to_lowercase().as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .boxed(),
        _ => fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .boxed(),
    };
    Ok((layer, guard))
}

/// Keeps the file writer's guard alive so buffered lines are flushed on exit.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

fn level_filter(level: &str) -> Result<String, CoreError> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        invalid_level => {
            return Err(CoreError::Logging(LoggingError::InitializationFailure(format!(
                "Invalid log level in config: {}",
                invalid_level
            ))));
        }
    };
    Ok(level.to_string())
}

/// Initializes the global subscriber from a [`LoggingConfig`].
///
/// With `is_reload == true`, an already installed subscriber is not an
/// error; the attempt is reported on stderr and `Ok` is returned.
///
/// # Errors
///
/// [`CoreError::Logging`] for an invalid level or a failed first-time
/// installation; [`CoreError::Filesystem`] when the log directory cannot be
/// created.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let level_filter_str = level_filter(&config.level)?;

    let stdout_filter = EnvFilter::try_new(&level_filter_str)
        .map_err(|e| CoreError::Logging(LoggingError::FilterError(e.to_string())))?;
    let stdout_layer: BoxedLayer = match config.format.to_lowercase().as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(stdout)
            .with_ansi(false)
            .with_filter(stdout_filter)
            .boxed(),
        _ => fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_filter(stdout_filter)
            .boxed(),
    };

    let mut layers: Vec<BoxedLayer> = vec![stdout_layer];
    let mut new_file_guard: Option<WorkerGuard> = None;
    if let Some(log_path) = &config.file_path {
        let file_filter = EnvFilter::try_new(&level_filter_str)
            .map_err(|e| CoreError::Logging(LoggingError::FilterError(e.to_string())))?;
        let (file_layer, guard) = create_file_layer(log_path, &config.format)?;
        new_file_guard = Some(guard);
        layers.push(file_layer.with_filter(file_filter).boxed());
    }

    let result = Registry::default().with(layers).try_init();

    match LOG_WORKER_GUARD.lock() {
        Ok(mut guard_slot) => {
            // Dropping the previous guard flushes its writer.
            *guard_slot = new_file_guard;
        }
        Err(e) => {
            eprintln!("[ERROR] Failed to lock LOG_WORKER_GUARD: {}. Log flushing may be affected.", e);
        }
    }

    match result {
        Ok(()) => Ok(()),
        Err(e) if is_reload => {
            eprintln!(
                "[INFO] Re-initializing logging attempted; the previous subscriber stays active: {}",
                e
            );
            Ok(())
        }
        Err(e) => Err(CoreError::Logging(LoggingError::InitializationFailure(format!(
            "Failed to set global tracing subscriber. Was it already initialized? Error: {}",
            e
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_minimal_logging_runs_twice_without_panic() {
        init_minimal_logging();
        init_minimal_logging();
        tracing::info!("Minimal logging test");
    }

    #[test]
    fn test_create_file_layer_ensures_parent_dir_exists() {
        let temp_dir = TempDir::new().unwrap();
        let nested_log_path = temp_dir.path().join("new_parent_dir/nested.log");

        let result = create_file_layer(&nested_log_path, "json");
        assert!(result.is_ok(), "create_file_layer failed: {:?}", result.err());
        assert!(nested_log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_level_filter_accepts_known_levels() {
        for level in ["trace", "DEBUG", "Info", "warn", "error"] {
            assert!(level_filter(level).is_ok(), "level {} rejected", level);
        }
    }

    #[test]
    fn test_init_logging_invalid_level_returns_error() {
        let config = LoggingConfig {
            level: "supertrace".to_string(),
            file_path: None,
            format: "text".to_string(),
        };
        match init_logging(&config, false) {
            Err(CoreError::Logging(LoggingError::InitializationFailure(msg))) => {
                assert!(msg.contains("Invalid log level in config: supertrace"));
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_init_logging_reload_never_errors() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            level: "debug".to_string(),
            file_path: Some(temp_dir.path().join("reload.log")),
            format: "text".to_string(),
        };
        // Other tests may already have installed a subscriber; reload mode tolerates that.
        assert!(init_logging(&config, true).is_ok());
        assert!(LOG_WORKER_GUARD.lock().unwrap().is_some());

        let console_only = LoggingConfig { file_path: None, ..config };
        assert!(init_logging(&console_only, true).is_ok());
        assert!(LOG_WORKER_GUARD.lock().unwrap().is_none());
    }
}
