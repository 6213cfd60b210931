use super::{Indicator, IndicatorState, RefreshScheduler};
use crate::calendar::Clock;
use crate::error::{IndicatorError, Result};
use log::info;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Requests reaching the event loop from the tray service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// Quit chosen from the menu
    Quit,
    /// The tray service stopped and cannot show the indicator any more
    Failed(String),
}

/// Refresh the indicator on every scheduler tick until Quit, `shutdown` or a
/// tray failure. `publish` receives the state whenever the tray must redraw.
///
/// Hands the indicator back on a clean exit so the caller can remove its
/// icons. A closed event channel counts as Quit.
pub async fn run_event_loop<C, F, P>(
    mut indicator: Indicator<C>,
    mut scheduler: RefreshScheduler,
    mut events: mpsc::UnboundedReceiver<ControlEvent>,
    shutdown: F,
    mut publish: P,
) -> Result<Indicator<C>>
where
    C: Clock,
    F: Future<Output = ()>,
    P: FnMut(&IndicatorState),
{
    let period = scheduler.check_interval();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    info!("Checking the date every {}s", period.as_secs());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let tick = scheduler.on_tick(std::time::Instant::now());
                if indicator.tick(tick) {
                    publish(indicator.state());
                }
            }
            event = events.recv() => match event {
                Some(ControlEvent::Quit) | None => {
                    info!("Quit requested, exiting tray loop");
                    return Ok(indicator);
                }
                Some(ControlEvent::Failed(message)) => {
                    return Err(IndicatorError::Tray(message));
                }
            },
            _ = &mut shutdown => {
                info!("Shutdown signal received, exiting tray loop");
                return Ok(indicator);
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
