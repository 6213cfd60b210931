//! Compile-time constants shared by the indicator, the renderer and the CLI.

/// Stable identifier registered with the tray host.
pub const APP_ID: &str = "persian-date-indicator";

/// Human readable title shown by hosts that display one.
pub const APP_TITLE: &str = "Persian Date";

/// Themed icon used when no day icon could be produced.
pub const DEFAULT_ICON_NAME: &str = "x-office-calendar";

/// Prefix of generated icon files, followed by `<day>.png`.
pub const ICON_FILE_PREFIX: &str = "persian-date-";

/// Icon edge length in pixels.
pub const ICON_SIZE: u32 = 32;

/// Environment variable overriding the configured locale.
pub const LOCALE_ENV: &str = "PERSIAN_DATE_LOCALE";

/// Timer bounds and defaults, in seconds.
pub mod intervals {
    pub const DEFAULT_CHECK: u64 = 60;
    pub const DEFAULT_FORCE_REFRESH: u64 = 3600;
    pub const MIN_CHECK: u64 = 1;
    pub const MAX_CHECK: u64 = 86_400;
}

/// Label formats.
pub mod formats {
    pub const DEFAULT_DATE: &str = "%A, %d %B %Y";
    pub const GREGORIAN: &str = "Gregorian: %Y-%m-%d";
}
