//! Platform-independent indicator state.
//!
//! [`Indicator`] owns everything the tray shows: the date labels and the
//! icon. Tray backends call [`Indicator::tick`] from their event loop and
//! publish [`Indicator::state`] whenever it reports a change. The ksni
//! backend drives this through [`run_event_loop`].

pub mod menu;
pub mod runner;
pub mod scheduler;

pub use menu::{menu_entries, MenuEntry};
pub use runner::{run_event_loop, ControlEvent};
pub use scheduler::{RefreshSchedule, RefreshScheduler, Tick};

use crate::calendar::{format_gregorian, format_jalali, Clock, JalaliDate, Locale, SystemClock};
use crate::config::constants::DEFAULT_ICON_NAME;
use crate::config::Settings;
use crate::error::Result;
use crate::icon::{IconRenderer, IconStore, IconStyle, RenderedIcon, TrayIconImage};
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::path::Path;

/// Snapshot of what the tray displays.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorState {
    pub date: Option<JalaliDate>,
    pub label: String,
    pub gregorian: Option<String>,
    pub icon: TrayIconImage,
    pub locale: Locale,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub label_changed: bool,
    pub icon_changed: bool,
}

impl RefreshOutcome {
    pub fn changed(&self) -> bool {
        self.label_changed || self.icon_changed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateLabels {
    pub date: JalaliDate,
    pub label: String,
    pub gregorian: Option<String>,
}

/// The Persian label and optional Gregorian label for `today`.
pub fn date_labels(settings: &Settings, today: NaiveDate) -> Result<DateLabels> {
    let locale = settings.locale;
    let date = JalaliDate::from_gregorian(today)?;
    let label = format_jalali(&date, &settings.date_format, locale);
    let gregorian = settings
        .show_gregorian
        .then(|| format_gregorian(today, locale));
    Ok(DateLabels {
        date,
        label,
        gregorian,
    })
}

pub struct Indicator<C: Clock = SystemClock> {
    clock: C,
    settings: Settings,
    renderer: IconRenderer,
    store: Option<IconStore>,
    state: IndicatorState,
}

impl<C: Clock> Indicator<C> {
    pub fn new(settings: &Settings, clock: C) -> Self {
        let store = match settings.icon_style {
            IconStyle::DayNumber => match IconStore::new() {
                Ok(store) => Some(store),
                Err(e) => {
                    warn!("Failed to create icon directory, using static icon: {}", e);
                    None
                }
            },
            IconStyle::Static => None,
        };

        let mut indicator = Self {
            clock,
            settings: settings.clone(),
            renderer: IconRenderer::new(settings.colors.clone()),
            store,
            state: IndicatorState {
                date: None,
                label: String::new(),
                gregorian: None,
                icon: TrayIconImage::Themed(DEFAULT_ICON_NAME),
                locale: settings.locale,
            },
        };
        indicator.refresh();
        indicator
    }

    pub fn state(&self) -> &IndicatorState {
        &self.state
    }

    pub fn renderer(&self) -> &IconRenderer {
        &self.renderer
    }

    pub fn icon_dir(&self) -> Option<&Path> {
        self.store.as_ref().map(IconStore::dir)
    }

    /// Handle a timer firing. Returns whether the tray should be updated.
    pub fn tick(&mut self, tick: Tick) -> bool {
        let outcome = self.refresh();
        if tick == Tick::Force {
            debug!("Forced refresh");
        }
        outcome.changed() || tick == Tick::Force
    }

    /// Re-read the date, update the labels and regenerate the icon when the
    /// day of month differs from the one currently shown.
    pub fn refresh(&mut self) -> RefreshOutcome {
        let today = self.clock.today();
        let DateLabels {
            date,
            label,
            gregorian,
        } = match date_labels(&self.settings, today) {
            Ok(labels) => labels,
            Err(e) => {
                error!("Failed to compute date for {}: {}", today, e);
                return RefreshOutcome::default();
            }
        };

        let label_changed = label != self.state.label || gregorian != self.state.gregorian;
        if label_changed {
            info!("Date label updated: {}", label);
        }
        self.state.label = label;
        self.state.gregorian = gregorian;
        self.state.date = Some(date);

        let day = date.day();
        let icon_changed = match self.settings.icon_style {
            IconStyle::Static => false,
            // A missing or unparsable icon day forces regeneration
            IconStyle::DayNumber if self.state.icon.rendered_day() == Some(day) => false,
            IconStyle::DayNumber => {
                let icon = self.make_icon(day);
                let changed = icon != self.state.icon;
                self.state.icon = icon;
                changed
            }
        };

        RefreshOutcome {
            label_changed,
            icon_changed,
        }
    }

    fn make_icon(&self, day: u32) -> TrayIconImage {
        let Some(store) = &self.store else {
            return TrayIconImage::Themed(DEFAULT_ICON_NAME);
        };

        let rendered = self.renderer.render_day(day).and_then(|image| {
            let path = store.save(day, &image)?;
            Ok(RenderedIcon { day, path, image })
        });

        match rendered {
            Ok(icon) => {
                debug!("Rendered icon for day {} at {}", day, icon.path.display());
                store.prune_except(day);
                TrayIconImage::Rendered(icon)
            }
            Err(e) => {
                warn!("Failed to render icon for day {}, using default: {}", day, e);
                TrayIconImage::Themed(DEFAULT_ICON_NAME)
            }
        }
    }

    /// Remove generated icons.
    pub fn close(self) -> Result<()> {
        match self.store {
            Some(store) => store.close(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "indicator_test.rs"]
mod indicator_test;
