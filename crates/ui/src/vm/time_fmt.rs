use chrono::{DateTime, Utc};

use tutor_core::time::elapsed_days;

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// Long calendar date, e.g. "March 5, 2024".
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

/// Human label for a whole number of elapsed days.
#[must_use]
pub fn relative_days_label(days: i64) -> String {
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        _ => format!("{} months ago", days / 30),
    }
}

#[must_use]
pub fn relative_time(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    relative_days_label(elapsed_days(now, then))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tutor_core::time::fixed_now;

    #[test]
    fn day_boundaries() {
        assert_eq!(relative_days_label(0), "Today");
        assert_eq!(relative_days_label(1), "Yesterday");
        assert_eq!(relative_days_label(6), "6 days ago");
        assert_eq!(relative_days_label(7), "1 weeks ago");
        assert_eq!(relative_days_label(29), "4 weeks ago");
        assert_eq!(relative_days_label(30), "1 months ago");
        assert_eq!(relative_days_label(75), "2 months ago");
    }

    #[test]
    fn partial_days_round_up() {
        let now = fixed_now();
        assert_eq!(relative_time(now, now), "Today");
        assert_eq!(relative_time(now, now - Duration::hours(3)), "Yesterday");
        assert_eq!(relative_time(now, now - Duration::hours(49)), "3 days ago");
    }

    #[test]
    fn formats_calendar_date() {
        let value = DateTime::parse_from_rfc3339("2024-03-05T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(value), "March 5, 2024");
    }
}
