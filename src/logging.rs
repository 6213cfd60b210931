use crate::error::Result;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

static LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

// Maximum log file size before rotation (10 MB)
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;
// Maximum number of rotated log files to keep
const MAX_ROTATED_LOGS: usize = 5;

/// Rotate log files if the current log exceeds `max_size` bytes.
///
/// `indicator.log` becomes `indicator.log.1`, older files shift up by one and
/// anything past [`MAX_ROTATED_LOGS`] is removed.
pub fn rotate_logs_if_needed(log_file_path: &Path, max_size: u64) -> Result<()> {
    let Ok(metadata) = fs::metadata(log_file_path) else {
        return Ok(());
    };
    if metadata.len() <= max_size {
        return Ok(());
    }

    let log_dir = log_file_path.parent().unwrap_or_else(|| Path::new("."));
    let log_name = log_file_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let rotated = |i: usize| log_dir.join(format!("{log_name}.{i}"));

    let oldest = rotated(MAX_ROTATED_LOGS);
    if oldest.exists() {
        fs::remove_file(&oldest).ok();
    }

    for i in (1..MAX_ROTATED_LOGS).rev() {
        let old_path = rotated(i);
        if old_path.exists() {
            fs::rename(&old_path, rotated(i + 1)).ok();
        }
    }

    fs::rename(log_file_path, rotated(1))?;
    Ok(())
}

pub fn init_logging(log_file_path: &Path) -> Result<()> {
    rotate_logs_if_needed(log_file_path, MAX_LOG_SIZE)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(log_file);
    }

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    // Console and log file get the same line
    builder.target(Target::Stderr);
    builder.format(move |buf, record| {
        let formatted = format!(
            "[{}] {} {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        );

        writeln!(buf, "{}", &formatted)?;

        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(ref mut file) = *guard {
                writeln!(file, "{}", &formatted).ok();
                file.flush().ok();
            }
        }

        Ok(())
    });

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    } else {
        builder.filter_level(LevelFilter::Info);
    }

    // A logger may already be installed when running under a test harness
    builder.try_init().ok();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_small_log_is_not_rotated() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("indicator.log");
        fs::write(&log_path, "short").unwrap();

        rotate_logs_if_needed(&log_path, 1024).unwrap();

        assert!(log_path.exists());
        assert!(!temp_dir.path().join("indicator.log.1").exists());
    }

    #[test]
    fn test_oversized_log_is_rotated() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("indicator.log");
        fs::write(&log_path, "x".repeat(64)).unwrap();
        fs::write(temp_dir.path().join("indicator.log.1"), "previous").unwrap();

        rotate_logs_if_needed(&log_path, 16).unwrap();

        assert!(!log_path.exists());
        let first = fs::read_to_string(temp_dir.path().join("indicator.log.1")).unwrap();
        let second = fs::read_to_string(temp_dir.path().join("indicator.log.2")).unwrap();
        assert_eq!(first.len(), 64);
        assert_eq!(second, "previous");
    }

    #[test]
    fn test_missing_log_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("missing.log");

        assert!(rotate_logs_if_needed(&log_path, 0).is_ok());
    }
}
