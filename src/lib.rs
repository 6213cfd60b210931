// Library module for persian-date-indicator
// This allows modules to be used in tests and the binary

pub mod calendar;
pub mod config;
pub mod daemon;
pub mod error;
pub mod icon;
pub mod indicator;
pub mod logging;
pub mod tray;

pub use error::{IndicatorError, Result};
