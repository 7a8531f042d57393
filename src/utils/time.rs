//! Time and timestamp utilities

use chrono::{SecondsFormat, Utc};

/// Get the current UTC time as an ISO 8601 string with millisecond precision
///
/// Timestamps are stored as strings so that chronological order equals
/// lexicographic order, which the date-range filters rely on.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Get the current Unix timestamp in milliseconds
pub fn current_timestamp_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_iso8601_format() {
        let ts = now_iso8601();
        // e.g. 2026-08-26T12:34:56.789Z
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }

    #[test]
    fn test_timestamps_are_lexicographically_ordered() {
        let a = now_iso8601();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = now_iso8601();
        assert!(a <= b);
    }

    #[test]
    fn test_current_timestamp_millis() {
        let millis = current_timestamp_millis();
        // Sometime after 2020-01-01
        assert!(millis > 1_577_836_800_000);
    }
}
