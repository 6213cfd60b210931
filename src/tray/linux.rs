// Linux-specific tray implementation using ksni (StatusNotifierItem)
// This works directly with GNOME's AppIndicator extension via D-Bus

use super::rgba_to_argb;
use crate::calendar::Clock;
use crate::config::constants::{APP_ID, APP_TITLE};
use crate::error::{IndicatorError, Result};
use crate::icon::TrayIconImage;
use crate::indicator::{
    menu_entries, run_event_loop, ControlEvent, Indicator, IndicatorState, MenuEntry,
    RefreshSchedule, RefreshScheduler,
};
use log::{debug, error, info};
use std::future::Future;
use tokio::sync::mpsc;

/// What ksni publishes over D-Bus. Holds a copy of the indicator state.
pub struct DateTray {
    state: IndicatorState,
    events: mpsc::UnboundedSender<ControlEvent>,
}

impl DateTray {
    fn request_quit(&self) {
        info!("Quit requested from tray menu");
        if self.events.send(ControlEvent::Quit).is_err() {
            error!("Event loop is gone, cannot deliver quit request");
        }
    }
}

impl ksni::Tray for DateTray {
    fn id(&self) -> String {
        APP_ID.to_string()
    }

    fn title(&self) -> String {
        APP_TITLE.to_string()
    }

    fn category(&self) -> ksni::Category {
        ksni::Category::ApplicationStatus
    }

    // Rendered icons are looked up as <icon_theme_path>/<icon_name>.png
    fn icon_theme_path(&self) -> String {
        match &self.state.icon {
            TrayIconImage::Rendered(icon) => icon
                .path
                .parent()
                .map(|dir| dir.to_string_lossy().into_owned())
                .unwrap_or_default(),
            TrayIconImage::Themed(_) => String::new(),
        }
    }

    fn icon_name(&self) -> String {
        match &self.state.icon {
            TrayIconImage::Rendered(icon) => icon
                .path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            TrayIconImage::Themed(name) => name.to_string(),
        }
    }

    // Hosts that ignore icon_theme_path still get the pixels
    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        match &self.state.icon {
            TrayIconImage::Rendered(icon) => {
                let (width, height) = icon.image.dimensions();
                vec![ksni::Icon {
                    width: width as i32,
                    height: height as i32,
                    data: rgba_to_argb(icon.image.as_raw()),
                }]
            }
            TrayIconImage::Themed(_) => vec![],
        }
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        ksni::ToolTip {
            title: APP_TITLE.to_string(),
            description: self.state.label.clone(),
            ..Default::default()
        }
    }

    fn menu(&self) -> Vec<ksni::MenuItem<Self>> {
        menu_entries(&self.state)
            .into_iter()
            .map(|entry| match entry {
                // Date lines are disabled, just for display
                MenuEntry::Label(label) => ksni::menu::StandardItem {
                    label,
                    enabled: false,
                    ..Default::default()
                }
                .into(),
                MenuEntry::Separator => ksni::menu::MenuItem::Separator,
                MenuEntry::Quit(label) => ksni::menu::StandardItem {
                    label,
                    icon_name: "application-exit".to_string(),
                    activate: Box::new(|this: &mut Self| this.request_quit()),
                    ..Default::default()
                }
                .into(),
            })
            .collect()
    }
}

// Public interface shared with the tray-icon implementation
pub struct SystemTray<C: Clock> {
    indicator: Indicator<C>,
    scheduler: RefreshScheduler,
    handle: ksni::Handle<DateTray>,
    events: mpsc::UnboundedReceiver<ControlEvent>,
}

impl<C: Clock> SystemTray<C> {
    pub fn new(indicator: Indicator<C>, schedule: RefreshSchedule) -> Result<Self> {
        debug!("Creating Linux tray with ksni");

        let (tx, rx) = mpsc::unbounded_channel();
        let tray = DateTray {
            state: indicator.state().clone(),
            events: tx.clone(),
        };

        let service = ksni::TrayService::new(tray);
        let handle = service.handle();

        // Run the D-Bus service on its own thread so registration errors
        // reach the event loop instead of being printed and lost
        std::thread::Builder::new()
            .name("ksni-tray".to_string())
            .spawn(move || {
                if let Err(e) = service.run() {
                    error!("Tray service stopped: {}", e);
                    let _ = tx.send(ControlEvent::Failed(e.to_string()));
                }
            })
            .map_err(|e| IndicatorError::Tray(format!("Failed to start tray service: {e}")))?;

        info!("ksni tray service started");

        Ok(SystemTray {
            indicator,
            scheduler: RefreshScheduler::new(schedule, std::time::Instant::now()),
            handle,
            events: rx,
        })
    }

    /// Run the event loop until Quit, `shutdown` or a tray failure.
    ///
    /// Hands the indicator back so the caller can clean up its icons.
    pub async fn run<F>(self, shutdown: F) -> Result<Indicator<C>>
    where
        F: Future<Output = ()>,
    {
        let SystemTray {
            indicator,
            scheduler,
            handle,
            events,
        } = self;

        let result = run_event_loop(indicator, scheduler, events, shutdown, |state| {
            publish(&handle, state)
        })
        .await;

        handle.shutdown();
        result
    }
}

fn publish(handle: &ksni::Handle<DateTray>, state: &IndicatorState) {
    debug!("Publishing tray state: {}", state.label);
    let state = state.clone();
    handle.update(move |tray: &mut DateTray| {
        tray.state = state;
    });
}
