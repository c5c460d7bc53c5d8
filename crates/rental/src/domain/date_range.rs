use chrono::{Duration, NaiveDate};
use shared::{errors::ServiceError, utils::parse_date};

/// Longest closed range a single query or reservation may span.
pub const MAX_RANGE_DAYS: i64 = 366;

/// Closed calendar-day range `[start, end]`, always `start <= end` and at
/// most [`MAX_RANGE_DAYS`] long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ServiceError> {
        if start > end {
            return Err(ServiceError::InvalidRange { start, end });
        }

        let days = (end - start).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(ServiceError::RangeTooLarge {
                days,
                max: MAX_RANGE_DAYS,
            });
        }

        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ServiceError> {
        let start_date = parse_date(start)
            .ok_or_else(|| ServiceError::InvalidDate(format!("startDate '{start}'")))?;
        let end_date =
            parse_date(end).ok_or_else(|| ServiceError::InvalidDate(format!("endDate '{end}'")))?;

        Self::new(start_date, end_date)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start;
        (0..self.len_days()).map(move |offset| start + Duration::days(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn enumerates_every_day_inclusive() {
        let range = DateRange::new(day(1), day(3)).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(days, vec![day(1), day(2), day(3)]);
        assert_eq!(range.len_days(), 3);
    }

    #[test]
    fn single_day_range_has_one_day() {
        let range = DateRange::new(day(5), day(5)).unwrap();
        assert_eq!(range.days().count(), 1);
        assert_eq!(range, DateRange::single(day(5)));
    }

    #[test]
    fn start_after_end_is_rejected() {
        let err = DateRange::new(day(4), day(2)).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRange { .. }));
    }

    #[test]
    fn ranges_longer_than_a_leap_year_are_rejected() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert!(DateRange::new(start, start + Duration::days(365)).is_ok());

        let err = DateRange::new(start, start + Duration::days(366)).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::RangeTooLarge { days: 367, max: 366 }
        ));
    }

    #[test]
    fn unparseable_dates_are_invalid() {
        let err = DateRange::parse("2025-13-01", "2025-12-02").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidDate(_)));
    }

    #[test]
    fn parse_accepts_timestamps() {
        let range = DateRange::parse("2025-03-01T10:00:00Z", "2025-03-02").unwrap();
        assert_eq!(range.start(), day(1));
        assert_eq!(range.end(), day(2));
    }
}
