//! Millisecond timestamp helpers shared by the ledger and front ends.

use chrono::{DateTime, Local, TimeZone, Utc};

/// One hour, the production time-unit.
pub const HOUR_MS: u64 = 60 * 60 * 1000;

/// Convert epoch milliseconds to a UTC datetime.
///
/// Values beyond chrono's range clamp to the epoch.
pub fn to_utc(ms: u64) -> DateTime<Utc> {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_default()
}

/// Convert epoch milliseconds to local time for display.
pub fn to_local(ms: u64) -> DateTime<Local> {
    Local.from_utc_datetime(&to_utc(ms).naive_utc())
}

/// Short date like `Mar 04`.
pub fn format_day(ms: u64) -> String {
    to_local(ms).format("%b %d").to_string()
}

/// 24h clock time like `09:30`.
pub fn format_clock(ms: u64) -> String {
    to_local(ms).format("%H:%M").to_string()
}

/// Render a duration in ms as `HH:MM:SS`. Hours are not wrapped.
pub fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
