use crate::calendar::Locale;
use crate::config::constants::{formats, intervals, LOCALE_ENV};
use crate::error::{IndicatorError, Result};
use crate::icon::{IconColors, IconStyle};
use crate::indicator::RefreshSchedule;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub check_interval_secs: u64,
    pub force_refresh_secs: u64,
    pub show_gregorian: bool,
    pub icon_style: IconStyle,
    pub locale: Locale,
    pub date_format: String,
    pub colors: IconColors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_interval_secs: intervals::DEFAULT_CHECK,
            force_refresh_secs: intervals::DEFAULT_FORCE_REFRESH,
            show_gregorian: true,
            icon_style: IconStyle::DayNumber,
            locale: Locale::English,
            date_format: formats::DEFAULT_DATE.to_string(),
            colors: IconColors::default(),
        }
    }
}

/// Locale forced through the environment, if any. Read once at startup.
pub fn locale_override() -> Option<Locale> {
    let value = std::env::var(LOCALE_ENV).ok()?;
    match value.parse() {
        Ok(locale) => Some(locale),
        Err(_) => {
            warn!("Ignoring unknown {}={:?}", LOCALE_ENV, value);
            None
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let settings = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace the configured locale when an override is given.
    pub fn with_locale_override(mut self, locale: Option<Locale>) -> Self {
        if let Some(locale) = locale {
            self.locale = locale;
        }
        self
    }

    pub fn schedule(&self) -> RefreshSchedule {
        RefreshSchedule {
            check_interval: Duration::from_secs(self.check_interval_secs),
            force_interval: Duration::from_secs(self.force_refresh_secs),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.check_interval_secs < intervals::MIN_CHECK
            || self.check_interval_secs > intervals::MAX_CHECK
        {
            return Err(IndicatorError::InvalidConfiguration(format!(
                "Check interval must be between {} and {} seconds",
                intervals::MIN_CHECK,
                intervals::MAX_CHECK
            )));
        }

        if self.force_refresh_secs < self.check_interval_secs {
            return Err(IndicatorError::InvalidConfiguration(
                "Force refresh interval must not be shorter than the check interval".to_string(),
            ));
        }

        if self.date_format.trim().is_empty() {
            return Err(IndicatorError::InvalidConfiguration(
                "Date format must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
