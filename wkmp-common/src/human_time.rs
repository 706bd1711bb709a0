//! Human-readable duration formatting
//!
//! Consistent display of playlist and track lengths across WKMP modules.

/// Durations below this use `M:SS`, at or above it `H:MM:SS`
const HOUR_SECONDS: u64 = 3600;

/// Format a duration in whole seconds.
///
/// # Examples
///
/// ```
/// use wkmp_common::human_time::format_duration;
///
/// assert_eq!(format_duration(0), "0:00");
/// assert_eq!(format_duration(245), "4:05");
/// assert_eq!(format_duration(2700), "45:00");
/// assert_eq!(format_duration(3725), "1:02:05");
/// ```
pub fn format_duration(seconds: u64) -> String {
    if seconds < HOUR_SECONDS {
        format!("{}:{:02}", seconds / 60, seconds % 60)
    } else {
        let hours = seconds / HOUR_SECONDS;
        let mins = (seconds % HOUR_SECONDS) / 60;
        let secs = seconds % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    }
}

/// Format a signed offset from a target, always with a sign.
///
/// # Examples
///
/// ```
/// use wkmp_common::human_time::format_offset;
///
/// assert_eq!(format_offset(0), "+0:00");
/// assert_eq!(format_offset(200), "+3:20");
/// assert_eq!(format_offset(-65), "-1:05");
/// ```
pub fn format_offset(seconds: i64) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    format!("{}{}", sign, format_duration(seconds.unsigned_abs()))
}
