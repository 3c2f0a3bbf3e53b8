//! Tick cadence and time arithmetic constants

/// Display tick period in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Ticks between feed fetches (one fetch roughly every minute)
pub const REFRESH_TICKS: u8 = 60;

/// Departures leaving within this many seconds are not shown
pub const GRACE_WINDOW_S: i64 = 4 * 60;

/// Offset added to the hour field of the clock (CEST)
pub const TIMEZONE_OFFSET_S: i64 = 7200;

/// Scroll tick wraps at this value
pub const SCROLL_MODULUS: u8 = 255;

/// Seconds per day
pub const SECS_PER_DAY: i64 = 86_400;

/// Seconds per hour
pub const SECS_PER_HOUR: i64 = 3_600;
