use chrono::{DateTime, NaiveDateTime};

/// Sort key for source timestamps, in milliseconds since the epoch.
///
/// Timestamps are platform-formatted strings; anything unparsable sorts after every
/// parsable value so document order decides among them.
pub fn sort_key(timestamp: &str) -> i64 {
    parse_millis(timestamp.trim()).unwrap_or(i64::MAX)
}

fn parse_millis(ts: &str) -> Option<i64> {
    if ts.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(ts, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    // Epoch numbers: seconds below 1e11, milliseconds above
    let n: f64 = ts.parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    if n.abs() < 1e11 {
        Some((n * 1000.0) as i64)
    } else {
        Some(n as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_and_naive_agree() {
        assert_eq!(
            sort_key("2025-03-04T10:00:00Z"),
            sort_key("2025-03-04T10:00:00")
        );
        assert_eq!(
            sort_key("2025-03-04T10:00:00.000000Z"),
            sort_key("2025-03-04 10:00:00")
        );
        assert!(sort_key("2025-03-04T10:00:00+02:00") < sort_key("2025-03-04T10:00:00Z"));
    }

    #[test]
    fn test_epoch_numbers() {
        assert_eq!(sort_key("1700000000"), 1_700_000_000_000);
        assert_eq!(sort_key("1700000000123"), 1_700_000_000_123);
    }

    #[test]
    fn test_unparsable_sorts_last() {
        assert_eq!(sort_key(""), i64::MAX);
        assert_eq!(sort_key("yesterday"), i64::MAX);
        assert!(sort_key("2025-01-01T00:00:00Z") < sort_key("soon"));
    }
}
