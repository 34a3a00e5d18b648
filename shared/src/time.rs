use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a backend timestamp. Naive timestamps are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Age without a suffix: "a few seconds", "5 minutes", "a day", "3 years".
pub fn format_age(created_at: &str, now: DateTime<Utc>) -> Option<String> {
    let then = parse_timestamp(created_at)?;
    let secs = (now - then).num_seconds().max(0) as f64;
    Some(humanize(secs))
}

fn humanize(secs: f64) -> String {
    let round = |v: f64| v.round() as i64;
    let minutes = round(secs / 60.0);
    let hours = round(secs / 3600.0);
    let days = round(secs / 86_400.0);
    // Average month and year lengths over the Gregorian cycle.
    let months = round(secs / 86_400.0 * 4800.0 / 146_097.0);
    let years = round(secs / 86_400.0 * 400.0 / 146_097.0);

    let plural = |n: i64, unit: &str| format!("{} {}s", n, unit);
    if secs < 45.0 {
        "a few seconds".to_string()
    } else if minutes <= 1 {
        "a minute".to_string()
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if hours <= 1 {
        "an hour".to_string()
    } else if hours < 22 {
        plural(hours, "hour")
    } else if days <= 1 {
        "a day".to_string()
    } else if days < 26 {
        plural(days, "day")
    } else if months <= 1 {
        "a month".to_string()
    } else if months < 11 {
        plural(months, "month")
    } else if years <= 1 {
        "a year".to_string()
    } else {
        plural(years, "year")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn age(secs: i64) -> String {
        let now = Utc::now();
        let then = (now - Duration::seconds(secs)).to_rfc3339();
        format_age(&then, now).unwrap()
    }

    #[test]
    fn thresholds() {
        assert_eq!(age(10), "a few seconds");
        assert_eq!(age(60), "a minute");
        assert_eq!(age(5 * 60), "5 minutes");
        assert_eq!(age(50 * 60), "an hour");
        assert_eq!(age(3 * 3600), "3 hours");
        assert_eq!(age(23 * 3600), "a day");
        assert_eq!(age(4 * 86_400), "4 days");
        assert_eq!(age(30 * 86_400), "a month");
        assert_eq!(age(90 * 86_400), "3 months");
        assert_eq!(age(365 * 86_400), "a year");
        assert_eq!(age(3 * 365 * 86_400), "3 years");
    }

    #[test]
    fn naive_timestamps_are_utc() {
        let now = parse_timestamp("2024-05-01T13:00:00Z").unwrap();
        assert_eq!(format_age("2024-05-01T12:00:00", now).as_deref(), Some("an hour"));
        assert_eq!(format_age("2024-05-01 10:00:00.123", now).as_deref(), Some("3 hours"));
    }

    #[test]
    fn future_and_garbage() {
        let now = parse_timestamp("2024-05-01T12:00:00Z").unwrap();
        assert_eq!(format_age("2024-05-01T12:05:00", now).as_deref(), Some("a few seconds"));
        assert_eq!(format_age("yesterday", now), None);
    }
}
