pub mod constants;
pub mod paths;
pub mod settings;


use crate::error::{IndicatorError, Result};
use std::sync::{Mutex, MutexGuard};

pub use paths::AppPaths;
pub use settings::{locale_override, Settings};

pub struct Config {
    paths: AppPaths,
    settings: Mutex<Settings>,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_paths(AppPaths::new()?)
    }

    pub fn from_paths(paths: AppPaths) -> Result<Self> {
        let settings = Settings::load(&paths.settings_file)?;

        Ok(Config {
            paths,
            settings: Mutex::new(settings),
        })
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> Result<Settings> {
        Ok(self.lock()?.clone())
    }

    /// Apply `updater`, validate the result and persist it.
    pub fn update_settings<F>(&self, updater: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.lock()?;
        let mut updated = settings.clone();
        updater(&mut updated);
        updated.validate()?;
        updated.save(&self.paths.settings_file)?;
        *settings = updated;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Settings>> {
        self.settings
            .lock()
            .map_err(|_| IndicatorError::Other("Settings lock poisoned".to_string()))
    }
}
