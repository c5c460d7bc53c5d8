use chrono::{DateTime, NaiveDate, Utc};

/// Accepts a calendar day (`2025-02-01`) or an RFC 3339 timestamp, whose UTC
/// date is taken.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc).date_naive())
            .ok()
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_calendar_days() {
        assert_eq!(
            parse_date("2025-02-01"),
            NaiveDate::from_ymd_opt(2025, 2, 1)
        );
    }

    #[test]
    fn takes_the_utc_day_of_a_timestamp() {
        assert_eq!(
            parse_date("2025-02-01T23:30:00-02:00"),
            NaiveDate::from_ymd_opt(2025, 2, 2)
        );
    }

    #[test]
    fn rejects_garbage_and_blank_input() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("2025-13-40"), None);
        assert_eq!(parse_date("tomorrow"), None);
    }
}
