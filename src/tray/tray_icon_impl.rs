// tray-icon implementation for macOS and Windows

use super::menu::DateMenu;
use crate::calendar::Clock;
use crate::config::constants::APP_TITLE;
use crate::error::{IndicatorError, Result};
use crate::icon::TrayIconImage;
use crate::indicator::{Indicator, IndicatorState, RefreshSchedule, RefreshScheduler};
use log::{debug, error, info};
use std::future::Future;
use std::time::{Duration, Instant};
use tray_icon::menu::{MenuEvent, MenuId};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopProxy};

pub enum TrayEvent {
    Tick,
    Menu(MenuId),
    Quit,
}

pub struct SystemTray<C: Clock> {
    indicator: Indicator<C>,
    scheduler: RefreshScheduler,
    menu: DateMenu,
    tray_icon: TrayIcon,
    event_loop: EventLoop<TrayEvent>,
}

impl<C: Clock> SystemTray<C> {
    pub fn new(indicator: Indicator<C>, schedule: RefreshSchedule) -> Result<Self> {
        debug!("Creating event loop...");
        let mut event_loop_builder = EventLoop::<TrayEvent>::with_user_event();

        // On macOS, run as a background app without a Dock icon
        #[cfg(target_os = "macos")]
        {
            use winit::platform::macos::EventLoopBuilderExtMacOS;
            event_loop_builder
                .with_activation_policy(winit::platform::macos::ActivationPolicy::Accessory);
        }

        let event_loop = event_loop_builder
            .build()
            .map_err(|e| IndicatorError::Tray(format!("Failed to create event loop: {e}")))?;

        let menu = DateMenu::new(indicator.state());
        let icon = tray_icon_for(&indicator)?;

        let tray_icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu.menu.clone()))
            .with_tooltip(tooltip(indicator.state()))
            .with_icon(icon)
            .build()
            .map_err(|e| IndicatorError::Tray(format!("Failed to create tray icon: {e}")))?;
        debug!("Tray icon created successfully");

        Ok(SystemTray {
            indicator,
            scheduler: RefreshScheduler::new(schedule, Instant::now()),
            menu,
            tray_icon,
            event_loop,
        })
    }

    /// Block on the event loop until Quit or `shutdown` completes.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn run<F>(self, shutdown: F) -> Result<Indicator<C>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let SystemTray {
            mut indicator,
            mut scheduler,
            menu,
            tray_icon,
            event_loop,
        } = self;
        let event_loop_proxy = event_loop.create_proxy();

        start_ticker(event_loop_proxy.clone(), scheduler.check_interval());

        let menu_proxy = event_loop_proxy.clone();
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            menu_proxy.send_event(TrayEvent::Menu(event.id)).ok();
        }));

        let signal_proxy = event_loop_proxy.clone();
        tokio::spawn(async move {
            shutdown.await;
            signal_proxy.send_event(TrayEvent::Quit).ok();
        });

        #[allow(deprecated)]
        event_loop
            .run(|event, event_loop| {
                event_loop.set_control_flow(ControlFlow::Wait);

                if let winit::event::Event::UserEvent(tray_event) = event {
                    match tray_event {
                        TrayEvent::Tick => {
                            let tick = scheduler.on_tick(Instant::now());
                            if indicator.tick(tick) {
                                publish(&indicator, &menu, &tray_icon);
                            }
                        }
                        TrayEvent::Menu(id) if menu.is_quit(&id) => {
                            info!("Quit requested from tray menu");
                            event_loop.exit();
                        }
                        TrayEvent::Menu(_) => {}
                        TrayEvent::Quit => {
                            info!("Shutdown signal received, exiting tray loop");
                            event_loop.exit();
                        }
                    }
                }
            })
            .map_err(|e| IndicatorError::Tray(format!("Event loop failed: {e}")))?;

        MenuEvent::set_event_handler(None::<fn(MenuEvent)>);
        Ok(indicator)
    }
}

fn start_ticker(proxy: EventLoopProxy<TrayEvent>, period: Duration) {
    std::thread::spawn(move || loop {
        std::thread::sleep(period);
        if proxy.send_event(TrayEvent::Tick).is_err() {
            debug!("Event loop closed, stopping ticker");
            break;
        }
    });
}

fn publish<C: Clock>(indicator: &Indicator<C>, menu: &DateMenu, tray_icon: &TrayIcon) {
    let state = indicator.state();
    menu.update(state);

    if let Err(e) = tray_icon.set_tooltip(Some(tooltip(state))) {
        error!("Failed to update tooltip: {}", e);
    }

    match tray_icon_for(indicator) {
        Ok(icon) => {
            if let Err(e) = tray_icon.set_icon(Some(icon)) {
                error!("Failed to update tray icon: {}", e);
            }
        }
        Err(e) => error!("Failed to build tray icon: {}", e),
    }
}

fn tooltip(state: &IndicatorState) -> String {
    format!("{APP_TITLE}\n{}", state.label)
}

// There is no icon theme here, so the themed fallback is drawn instead
fn tray_icon_for<C: Clock>(indicator: &Indicator<C>) -> Result<Icon> {
    let image = match &indicator.state().icon {
        TrayIconImage::Rendered(icon) => icon.image.clone(),
        TrayIconImage::Themed(_) => indicator.renderer().render_placeholder(),
    };
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height)
        .map_err(|e| IndicatorError::Tray(format!("Failed to create icon: {e}")))
}
