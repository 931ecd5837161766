use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::config::LoggingConfig;

/// Filter directive for a `-v` count when RUST_LOG is not set
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Platform log directory
pub fn get_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("passport-cli")
        .join("logs")
}

/// Timestamped log file name inside `dir`
pub fn log_file_path(dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("passport-cli_{}.log", timestamp))
}

/// Initialize tracing for the process.
///
/// RUST_LOG takes precedence over `verbosity`. Returns the log file path when
/// logging goes to a file rather than stderr.
pub fn init_tracing(verbosity: u8, config: &LoggingConfig) -> Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.write_file {
        let dir = config.directory.clone().unwrap_or_else(get_log_dir);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

        let path = log_file_path(&dir);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;

        let fmt_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_target(true)
            .with_ansi(false)
            .compact();
        registry.with(fmt_layer).try_init()?;

        tracing::info!(target: "passport_cli", "Logging to {}", path.display());
        Ok(Some(path))
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .without_time()
            .compact();
        registry.with(fmt_layer).try_init()?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(2), "debug");
        assert_eq!(default_level(9), "trace");
    }

    #[test]
    fn test_log_file_path() {
        let path = log_file_path(Path::new("/var/log/x"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("passport-cli_"));
        assert!(name.ends_with(".log"));
        assert_eq!(path.parent().unwrap(), Path::new("/var/log/x"));
    }
}
