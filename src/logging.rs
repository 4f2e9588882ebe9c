//! Logging setup
//!
//! The library only emits `tracing` events. Applications that want them in a
//! file can call [`init`] once at startup and keep the returned guard alive.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(anyhow::anyhow!("Unknown log level: {}", other)),
        }
    }
}

/// Default log file location
pub fn default_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("hypermedia-client").join("hypermedia-client.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".hypermedia-client").join("hypermedia-client.log");
    }
    PathBuf::from("hypermedia-client.log")
}

/// Filter from `RUST_LOG`-style directives, falling back to `level` when
/// they are empty or all invalid
fn build_filter(level: Level, directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives)
}

/// Install a global file subscriber at `level`.
///
/// `RUST_LOG` overrides `level` when set. Returns `None` for
/// [`LogLevel::Off`]. The guard flushes pending lines when dropped.
pub fn init(level: LogLevel, log_path: &Path) -> Result<Option<WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(tracing_level, &directives))
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;

    tracing::info!("Logging at {:?} to {:?}", level, log_path);

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_off_has_no_tracing_level() {
        assert_eq!(LogLevel::Off.to_tracing_level(), None);
        assert_eq!(LogLevel::Trace.to_tracing_level(), Some(Level::TRACE));
    }

    #[test]
    fn test_filter_defaults_to_level() {
        let filter = build_filter(Level::DEBUG, "");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_filter_directives_override_level() {
        let filter = build_filter(Level::WARN, "trace");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        let filter = build_filter(Level::DEBUG, "hypermedia_client=error");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_off_installs_nothing() {
        let path = std::env::temp_dir().join("hypermedia-client-never-created.log");
        assert!(init(LogLevel::Off, &path).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_default_log_path_file_name() {
        assert_eq!(
            default_log_path().file_name().unwrap(),
            "hypermedia-client.log"
        );
    }
}
