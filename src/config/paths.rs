use crate::config::constants::APP_ID;
use crate::error::{IndicatorError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub settings_file: PathBuf,
    pub log_file: PathBuf,
    pub pid_file: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                IndicatorError::InvalidConfiguration(
                    "Could not determine config directory".to_string(),
                )
            })?
            .join(APP_ID);

        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| {
                IndicatorError::InvalidConfiguration(
                    "Could not determine cache directory".to_string(),
                )
            })?
            .join(APP_ID);

        Self::with_dirs(config_dir, cache_dir)
    }

    /// Lay out every file under a single base directory.
    pub fn in_dir(base: &Path) -> Result<Self> {
        Self::with_dirs(base.join("config"), base.join("cache"))
    }

    fn with_dirs(config_dir: PathBuf, cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&config_dir)?;
        std::fs::create_dir_all(&cache_dir)?;

        Ok(AppPaths {
            settings_file: config_dir.join("settings.json"),
            log_file: cache_dir.join(format!("{APP_ID}.log")),
            pid_file: cache_dir.join(format!("{APP_ID}.pid")),
            config_dir,
            cache_dir,
        })
    }
}
