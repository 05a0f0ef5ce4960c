//! Log setup
//!
//! Plain-text lines appended to `<log_dir>/app.log`. When the file cannot be
//! opened the same format goes to stderr instead.

use crate::config::Config;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{warn, Level};

pub const LOG_FILE: &str = "app.log";

/// Install the global subscriber. Returns the log file in use, if any.
pub fn init(config: &Config) -> Option<PathBuf> {
    let level = if config.debug { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level);

    match open_log_file(&config.log_dir) {
        Ok((file, path)) => {
            if builder.with_writer(Mutex::new(file)).try_init().is_err() {
                return None;
            }
            Some(path)
        }
        Err(e) => {
            if builder.with_writer(io::stderr).try_init().is_ok() {
                warn!(error = %e, dir = %config.log_dir.display(), "cannot open log file, logging to stderr");
            }
            None
        }
    }
}

fn open_log_file(dir: &Path) -> io::Result<(File, PathBuf)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_log_directory() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        let (_, path) = open_log_file(&log_dir).unwrap();
        assert_eq!(path, log_dir.join("app.log"));
        assert!(path.exists());
    }

    #[test]
    fn test_appends() {
        use std::io::Write;

        let dir = TempDir::new().unwrap();
        let (mut file, path) = open_log_file(dir.path()).unwrap();
        writeln!(file, "first").unwrap();
        drop(file);
        let (mut file, _) = open_log_file(dir.path()).unwrap();
        writeln!(file, "second").unwrap();
        drop(file);
        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_unusable_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        assert!(open_log_file(&blocker).is_err());
    }
}
