//! Fixed Hours-of-Service rule set (property-carrying driver, 70h/8-day cycle).
//!
//! All limits are expressed in whole minutes; the scheduler works at minute
//! resolution and converts to hours only at the edges.

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// 70-hour cycle ceiling.
pub const CYCLE_LIMIT_MINUTES: u32 = 70 * MINUTES_PER_HOUR;
/// 11-hour driving cap per duty day.
pub const DRIVING_LIMIT_MINUTES: u32 = 11 * MINUTES_PER_HOUR;
/// 14-hour on-duty window per duty day.
pub const DUTY_WINDOW_MINUTES: u32 = 14 * MINUTES_PER_HOUR;
/// Driving allowed before a 30-minute break is required.
pub const BREAK_AFTER_DRIVING_MINUTES: u32 = 8 * MINUTES_PER_HOUR;

/// Off-duty period that resets the duty day.
pub const REST_DURATION_MINUTES: u32 = 10 * MINUTES_PER_HOUR;
pub const BREAK_DURATION_MINUTES: u32 = 30;
pub const FUEL_DURATION_MINUTES: u32 = 30;
pub const PICKUP_DURATION_MINUTES: u32 = 30;
pub const DROPOFF_DURATION_MINUTES: u32 = 30;

/// Trip distance after which one fuel stop per duty day is required.
pub const FUEL_THRESHOLD_MILES: f64 = 1000.0;

pub const METERS_PER_MILE: f64 = 1609.34;

/// Longest leg accepted from a provider or input file. Both legs together
/// stay far inside the `u32` minute counters.
pub const MAX_LEG_DURATION_HOURS: f64 = 10_000.0;

/// Convert fractional hours to whole minutes (nearest minute).
pub fn hours_to_minutes(hours: f64) -> u32 {
    (hours * MINUTES_PER_HOUR as f64).round().max(0.0) as u32
}

pub fn minutes_to_hours(minutes: u32) -> f64 {
    minutes as f64 / MINUTES_PER_HOUR as f64
}

/// Round to one decimal place (output contract for hours).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
