use std::time::{Duration, Instant};

/// How often the date is re-read and how often the tray is refreshed
/// unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSchedule {
    pub check_interval: Duration,
    pub force_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Push to the tray only if something changed
    Check,
    /// Push to the tray regardless
    Force,
}

/// Classifies timer firings into checks and forced refreshes.
#[derive(Debug)]
pub struct RefreshScheduler {
    schedule: RefreshSchedule,
    last_forced: Instant,
}

impl RefreshScheduler {
    pub fn new(schedule: RefreshSchedule, now: Instant) -> Self {
        Self {
            schedule,
            last_forced: now,
        }
    }

    pub fn check_interval(&self) -> Duration {
        self.schedule.check_interval
    }

    pub fn on_tick(&mut self, now: Instant) -> Tick {
        if now.saturating_duration_since(self.last_forced) >= self.schedule.force_interval {
            self.last_forced = now;
            Tick::Force
        } else {
            Tick::Check
        }
    }
}
