use crate::error::Result;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const LOG_FILE_PREFIX: &str = "querybind.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub console_enabled: bool,
    pub json_format: bool,
    pub log_dir: Option<PathBuf>,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            console_enabled: true,
            json_format: false,
            log_dir: None,
            max_files: 5,
        }
    }
}

impl LogConfig {
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }
}

fn get_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("querybind={}", level)))
}

fn console_layer(config: &LogConfig) -> BoxedLayer {
    // stdout carries command output
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false);

    if config.json_format {
        layer
            .json()
            .with_filter(get_env_filter(&config.level))
            .boxed()
    } else {
        layer.with_filter(get_env_filter(&config.level)).boxed()
    }
}

fn file_layer(config: &LogConfig, log_dir: &Path) -> Result<BoxedLayer> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    LOG_GUARD.set(guard).ok();

    let layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    let layer = if config.json_format {
        layer
            .json()
            .with_filter(get_env_filter(&config.level))
            .boxed()
    } else {
        layer.with_filter(get_env_filter(&config.level)).boxed()
    };
    Ok(layer)
}

/// Install the global subscriber. Call once, before any work is logged.
pub fn init_logging(config: LogConfig) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.console_enabled {
        layers.push(console_layer(&config));
    }

    if let Some(log_dir) = config.log_dir.as_deref() {
        layers.push(file_layer(&config, log_dir)?);
        cleanup_old_logs(log_dir, config.max_files)?;
    }

    tracing_subscriber::registry().with(layers).init();
    Ok(())
}

/// Remove the oldest `querybind.log*` files beyond `max_files`; returns how many went
pub fn cleanup_old_logs(log_dir: &Path, max_files: usize) -> Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let mut entries: Vec<_> = std::fs::read_dir(log_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
        .collect();

    if entries.len() <= max_files {
        return Ok(0);
    }

    entries.sort_by_key(|e| {
        e.metadata()
            .and_then(|m| m.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
    });

    let to_remove = entries.len() - max_files;
    for entry in entries.into_iter().take(to_remove) {
        std::fs::remove_file(entry.path())?;
    }

    Ok(to_remove)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_keeps_newest_files() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=4 {
            let path = dir.path().join(format!("{}.2026-01-0{}", LOG_FILE_PREFIX, day));
            std::fs::write(&path, "line\n").unwrap();
        }
        std::fs::write(dir.path().join("unrelated.txt"), "keep").unwrap();

        let removed = cleanup_old_logs(dir.path(), 2).unwrap();
        assert_eq!(removed, 2);

        let remaining = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(remaining, 3);
        assert!(dir.path().join("unrelated.txt").exists());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(cleanup_old_logs(&missing, 1).unwrap(), 0);
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::with_level("debug");
        assert_eq!(config.level, "debug");
        assert!(config.console_enabled);
        assert!(config.log_dir.is_none());
    }
}
