//! Tracing setup.
//!
//! Human-readable events go to stderr, filtered by `RUST_LOG` or the
//! `-q`/`-v` flags and the configured level. When a log file is
//! configured, every event is also appended to it as one JSON object per
//! line.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "PASHTO_LEX_LOG_PATH";
const LOG_DIR_ENV: &str = "PASHTO_LEX_LOG_DIR";
const LOG_FILE_NAME: &str = "pashto-lex.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// JSONL log file. `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, then the config's
    /// `log_dir`.
    ///
    /// `PASHTO_LEX_LOG_PATH` names the file itself; `PASHTO_LEX_LOG_DIR` and
    /// `log_dir` name a directory that receives `pashto-lex.jsonl`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_file = non_empty_var(LOG_PATH_ENV)
            .or_else(|| non_empty_var(LOG_DIR_ENV).map(|dir| dir.join(LOG_FILE_NAME)))
            .or_else(|| config_log_dir.map(|dir| dir.join(LOG_FILE_NAME)));
        Self { log_file }
    }
}

fn non_empty_var(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Build the event filter. `RUST_LOG` wins over everything else.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit; dropping it flushes the file
/// writer.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(guard)
}
