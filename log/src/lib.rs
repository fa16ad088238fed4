//! Logging setup for jot with file output and optional stdout.
//!
//! Logs always go to a file at `warn` level (or higher if the user asks).
//! Stdout logging is enabled when `JOT_LOG` or `RUST_LOG` is set, or in
//! debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`JOT_LOG`** (highest priority) - jot-specific logging control;
//!    a bare level like `debug` is expanded to the jot crates
//! 2. **`RUST_LOG`** - standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for jot crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/jot/logs/jot-<pid>.log`. Override with the
//! `--log-file` CLI flag or `JOT_LOG_FILE`.

use std::{env, path::PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

/// Initialize logging.
///
/// `log_file_override` wins over `JOT_LOG_FILE`, which wins over the
/// platform default. The returned [`LogGuard`] must be held for the
/// lifetime of the program -- dropping it flushes and stops the background
/// file writer.
pub fn init(log_file_override: Option<PathBuf>) -> Result<LogGuard, InitError> {
    let (log_dir, filename) = resolve_log_path(
        log_file_override.or_else(|| env::var("JOT_LOG_FILE").ok().map(PathBuf::from)),
    );

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter()?);

    let stdout_enabled =
        env::var("JOT_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);
    let stdout_layer = if stdout_enabled {
        Some(fmt::layer().with_filter(env_filter()?))
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        log_file: log_dir.join(filename),
        _file_guard: file_guard,
    })
}

/// Initialize stdout-only logging for tests.
///
/// Will not crash if called multiple times or if logging is already
/// initialized by another test.
pub fn test() {
    if let Ok(filter) = env_filter() {
        let _ = fmt().with_env_filter(filter).try_init();
    }
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("jot-{}.log", std::process::id());

    if let Some(path) = override_path {
        // A path with an extension names the file; otherwise it names the
        // directory and the default filename is used.
        if path.extension().is_some() {
            let dir = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir, name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jot")
        .join("logs");
    (dir, filename)
}

/// File filter: user-specified level if set, otherwise `warn`.
fn file_filter() -> Result<EnvFilter, InitError> {
    if env::var("JOT_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return env_filter();
    }
    Ok(EnvFilter::new("warn"))
}

/// Build the filter from the `JOT_LOG` > `RUST_LOG` > default priority.
fn env_filter() -> Result<EnvFilter, InitError> {
    if let Ok(jot_log) = env::var("JOT_LOG") {
        return Ok(expand_jot_log(&jot_log));
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return Ok(EnvFilter::new(rust_log));
    }
    Ok(EnvFilter::new("warn,jot=info,jot_bin=info"))
}

/// Expand a bare `JOT_LOG` level into a full filter string.
///
/// `JOT_LOG=debug` becomes `warn,jot=debug,jot_bin=debug`; anything with
/// module-specific syntax is passed through untouched so advanced usage
/// like `JOT_LOG=jot=trace` keeps working.
fn expand_jot_log(jot_log: &str) -> EnvFilter {
    if jot_log.contains('=') || jot_log.contains(':') || jot_log.contains(',') {
        return EnvFilter::new(jot_log);
    }
    EnvFilter::new(format!("warn,jot={jot_log},jot_bin={jot_log}"))
}
