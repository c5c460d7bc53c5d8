use crate::domain::date_range::DateRange;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Availability of one product as seen through the sparse ledger: days with
/// an override report it, every other day reports the catalogue stock.
#[derive(Debug, Clone)]
pub struct LedgerView {
    baseline: i32,
    overrides: HashMap<NaiveDate, i32>,
}

impl LedgerView {
    pub fn new(baseline: i32, overrides: impl IntoIterator<Item = (NaiveDate, i32)>) -> Self {
        Self {
            baseline,
            overrides: overrides.into_iter().collect(),
        }
    }

    pub fn baseline(&self) -> i32 {
        self.baseline
    }

    pub fn available_on(&self, day: NaiveDate) -> i32 {
        self.overrides.get(&day).copied().unwrap_or(self.baseline)
    }

    pub fn min_across(&self, range: &DateRange) -> i32 {
        range
            .days()
            .map(|day| self.available_on(day))
            .min()
            .unwrap_or(self.baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn missing_rows_fall_back_to_baseline() {
        let view = LedgerView::new(100, []);
        let range = DateRange::new(day(1), day(5)).unwrap();
        assert_eq!(view.min_across(&range), 100);
    }

    #[test]
    fn minimum_of_range_wins() {
        let view = LedgerView::new(100, [(day(2), 20)]);
        let range = DateRange::new(day(1), day(3)).unwrap();
        assert_eq!(view.min_across(&range), 20);
    }

    #[test]
    fn overrides_outside_the_range_are_ignored() {
        let view = LedgerView::new(100, [(day(10), 0)]);
        let range = DateRange::new(day(1), day(3)).unwrap();
        assert_eq!(view.min_across(&range), 100);
    }

    #[test]
    fn single_day_is_a_lookup() {
        let view = LedgerView::new(100, [(day(2), 42)]);
        assert_eq!(view.min_across(&DateRange::single(day(2))), 42);
        assert_eq!(view.min_across(&DateRange::single(day(3))), 100);
    }

    proptest! {
        #[test]
        fn availability_never_exceeds_any_day_in_range(
            baseline in 0i32..500,
            stocks in proptest::collection::vec(0i32..500, 1..20),
        ) {
            let overrides = stocks
                .iter()
                .enumerate()
                .map(|(i, s)| (day(1) + chrono::Duration::days(i as i64), *s));
            let view = LedgerView::new(baseline, overrides);
            let range = DateRange::new(day(1), day(1) + chrono::Duration::days(25)).unwrap();

            let min = view.min_across(&range);
            for d in range.days() {
                prop_assert!(min <= view.available_on(d));
            }
            prop_assert!(min <= baseline);
        }
    }
}
