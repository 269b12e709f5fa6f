//! Display formatting for quota reset times.

use chrono::{DateTime, Utc};

/// Label used when a model has no reset time.
pub const UNKNOWN_RESET_LABEL: &str = "unknown";

/// Parse an RFC 3339 reset time, falling back to chrono's own parser for
/// timestamps without an explicit offset.
pub fn parse_reset_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| raw.parse::<DateTime<Utc>>().ok())
}

/// Format a reset time into the remaining time relative to `now`.
///
/// - absent or empty -> "unknown"
/// - unparseable -> returned as-is
/// - already passed -> "0h 0m"
/// - under a day -> "2h 15m"
/// - a day or more -> "1d 3h"
pub fn format_reset_time(reset_time: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = reset_time.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_RESET_LABEL.to_string();
    };

    let Some(target) = parse_reset_time(raw) else {
        return raw.to_string();
    };

    let diff = target.signed_duration_since(now);
    if diff.num_milliseconds() <= 0 {
        return "0h 0m".to_string();
    }

    let total_minutes = diff.num_minutes();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 24 {
        format!("{}d {}h", hours / 24, hours % 24)
    } else {
        format!("{}h {}m", hours, minutes)
    }
}
