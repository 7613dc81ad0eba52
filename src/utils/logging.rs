//! Diagnostic logging.
//!
//! The terminal belongs to the TUI, so logs only go to a file, and only when
//! `MAHORAGA_LOG_FILE` names one. Without it no subscriber is installed and
//! every `tracing` macro is a no-op.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FILE_ENV: &str = "MAHORAGA_LOG_FILE";
pub const LOG_FILTER_ENV: &str = "MAHORAGA_LOG";
const DEFAULT_FILTER: &str = "mahoraga=debug";

/// Installs the file subscriber if `MAHORAGA_LOG_FILE` is set.
///
/// Returns the log path when logging was enabled.
pub fn init_tracing() -> io::Result<Option<PathBuf>> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV).map(PathBuf::from) else {
        return Ok(None);
    };

    let file = open_log_file(&path)?;
    let filter = std::env::var(LOG_FILTER_ENV).ok();

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .with_filter(build_filter(filter.as_deref()));
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry().with(layer).try_init();

    Ok(Some(path))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn build_filter(directives: Option<&str>) -> EnvFilter {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn log_file_is_created_with_parents() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("logs").join("mahoraga.log");
        open_log_file(&path).expect("open");
        assert!(path.exists());
    }

    #[test]
    fn log_file_is_appended_not_truncated() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("mahoraga.log");
        std::fs::write(&path, "earlier run\n").expect("seed");
        open_log_file(&path).expect("open");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "earlier run\n"
        );
    }

    #[test]
    fn filter_falls_back_to_default() {
        assert_eq!(build_filter(None).to_string(), DEFAULT_FILTER);
        assert_eq!(build_filter(Some("  ")).to_string(), DEFAULT_FILTER);
        assert_eq!(build_filter(Some("mahoraga=trace")).to_string(), "mahoraga=trace");
    }
}
