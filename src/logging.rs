//! Tracing subscriber setup: stdout always, plus a daily rolling file when
//! `LOG_DIR` is set.

use std::{
    env,
    io::IsTerminal,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::{
    non_blocking,
    non_blocking::NonBlocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
};

use crate::error::AppError;

/// Log files are named `lol-healthcheck.log.<date>`.
pub const LOG_FILE_PREFIX: &str = concat!(env!("CARGO_PKG_NAME"), ".log");

const DEFAULT_FILTER: &str = "info";

/// Guard to ensure buffered logs are flushed on shutdown.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogSettings {
    pub dir: Option<PathBuf>,
    /// Rolled files kept in `dir`, all of them when unset.
    pub max_files: Option<usize>,
}

impl LogSettings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let dir = var("LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        let max_files = var("LOG_MAX_FILES")
            .map(|raw| match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(AppError::Config(format!(
                    "LOG_MAX_FILES must be a positive integer, got {raw:?}"
                ))),
            })
            .transpose()?;

        Ok(Self { dir, max_files })
    }
}

pub fn init() -> Result<(), AppError> {
    let settings = LogSettings::from_env()?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .with_level(true);

    match &settings.dir {
        Some(dir) => {
            let stdout = std::io::stdout.with_max_level(tracing::Level::INFO);
            let writer = stdout.and(init_file_writer(dir, settings.max_files)?);

            builder.with_writer(writer).init();
        }
        None => builder.init(),
    }

    tracing::info!(
        log_dir = settings.dir.as_ref().map(|d| d.display().to_string()),
        "logger initialized"
    );

    Ok(())
}

fn init_file_writer(dir: &Path, max_files: Option<usize>) -> Result<NonBlocking, AppError> {
    let mut file_builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX);

    if let Some(n) = max_files {
        file_builder = file_builder.max_log_files(n);
    }

    let file_appender = file_builder.build(dir).map_err(|e| {
        AppError::Config(format!("cannot create log file in {}: {e}", dir.display()))
    })?;

    let (file_writer, guard) = non_blocking(file_appender);

    if LOG_GUARD.set(guard).is_err() {
        return Err(AppError::Config("logging initialized twice".into()));
    }

    Ok(file_writer)
}
