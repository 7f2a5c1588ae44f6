use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// What to show once a timestamp is more than a week old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OlderThanWeek {
    /// "3 weeks ago"
    Weeks,
    /// "March 02, 2024"
    Date,
}

/// Human readable distance between `then` and `now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>, older: OlderThanWeek) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < MINUTE {
        return "Just now".to_string();
    }
    if seconds < HOUR {
        return plural(seconds / MINUTE, "minute");
    }
    if seconds < DAY {
        return plural(seconds / HOUR, "hour");
    }
    if seconds < WEEK {
        return plural(seconds / DAY, "day");
    }
    match older {
        OlderThanWeek::Weeks => plural(seconds / WEEK, "week"),
        OlderThanWeek::Date => format_date(then),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %d, %Y").to_string()
}

/// `2_500_000` -> `"2500k"`, `999` -> `"999"`.
pub fn compact_count(n: u64) -> String {
    if n < 1000 {
        n.to_string()
    } else {
        format!("{}k", (n + 500) / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = now();
        assert_eq!(time_ago(now - Duration::seconds(30), now, OlderThanWeek::Weeks), "Just now");
        assert_eq!(time_ago(now - Duration::minutes(1), now, OlderThanWeek::Weeks), "1 minute ago");
        assert_eq!(time_ago(now - Duration::minutes(45), now, OlderThanWeek::Weeks), "45 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(2), now, OlderThanWeek::Weeks), "2 hours ago");
        assert_eq!(time_ago(now - Duration::days(3), now, OlderThanWeek::Weeks), "3 days ago");
        assert_eq!(time_ago(now - Duration::days(21), now, OlderThanWeek::Weeks), "3 weeks ago");
    }

    #[test]
    fn test_time_ago_falls_back_to_date() {
        let now = now();
        assert_eq!(
            time_ago(now - Duration::days(28), now, OlderThanWeek::Date),
            "March 02, 2024"
        );
    }

    #[test]
    fn test_future_timestamps_read_as_just_now() {
        let now = now();
        assert_eq!(time_ago(now + Duration::hours(1), now, OlderThanWeek::Weeks), "Just now");
    }

    #[test]
    fn test_compact_count() {
        assert_eq!(compact_count(999), "999");
        assert_eq!(compact_count(2_500_000), "2500k");
        assert_eq!(compact_count(1_499), "1k");
        assert_eq!(compact_count(1_500), "2k");
    }
}
