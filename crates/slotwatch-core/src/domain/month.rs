use std::fmt::{Display, Formatter};

use serde::Serialize;
use time::{Date, Month};

use crate::{ValidationError, VisitDate};

/// Months offered ahead of today; one more is added from mid-month on.
const LOOKAHEAD_MONTHS: u8 = 3;
const LATE_MONTH_DAY: u8 = 15;

/// A month of a specific year, the unit the vendor lists dates by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    pub fn new(year: i32, month: u8) -> Result<Self, ValidationError> {
        let calendar_month =
            Month::try_from(month).map_err(|_| ValidationError::InvalidMonth { value: month })?;
        // Rejects years the calendar cannot represent.
        Date::from_calendar_date(year, calendar_month, 1)
            .map_err(|_| ValidationError::InvalidYear { value: year })?;
        Ok(Self { year, month })
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month_number(self) -> u8 {
        self.month
    }

    /// First calendar day of the month, the `dateFrom` of a date listing.
    pub fn first_day(self) -> VisitDate {
        // `new` already proved the first day is representable.
        let date = Month::try_from(self.month)
            .and_then(|month| Date::from_calendar_date(self.year, month, 1))
            .unwrap_or(Date::MIN);
        VisitDate::new(date)
    }

    /// Month `count` months after this one, rolling into the next year.
    pub fn plus_months(self, count: u8) -> Self {
        let index = self.year * 12 + i32::from(self.month_number()) - 1 + i32::from(count);
        Self {
            year: index.div_euclid(12),
            month: u8::try_from(index.rem_euclid(12) + 1).unwrap_or(1),
        }
    }

    /// Months a scan may target, in chronological order: the current month
    /// and the next three, plus a fourth once `today` is past mid-month.
    pub fn candidates(today: Date) -> Vec<Self> {
        let current = Self::from(today);
        let mut extra = LOOKAHEAD_MONTHS;
        if today.day() >= LATE_MONTH_DAY {
            extra += 1;
        }

        (0..=extra).map(|offset| current.plus_months(offset)).collect()
    }
}

impl From<Date> for YearMonth {
    fn from(value: Date) -> Self {
        Self {
            year: value.year(),
            month: u8::from(value.month()),
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month_number())
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn serializes_as_display_form() {
        let month = YearMonth::new(2026, 1).expect("valid month");
        assert_eq!(
            serde_json::to_string(&month).expect("month should serialize"),
            r#""2026-01""#
        );
    }

    #[test]
    fn rejects_month_out_of_range() {
        assert_eq!(
            YearMonth::new(2025, 13).expect_err("must fail"),
            ValidationError::InvalidMonth { value: 13 }
        );
        assert!(YearMonth::new(2025, 0).is_err());
    }

    #[test]
    fn first_day_formats_as_date_from() {
        let month = YearMonth::new(2025, 3).expect("valid month");
        assert_eq!(month.first_day().to_string(), "2025-03-01");
    }

    #[test]
    fn plus_months_rolls_over_year() {
        let month = YearMonth::new(2025, 11).expect("valid month");
        assert_eq!(month.plus_months(3), YearMonth::new(2026, 2).expect("valid"));
    }

    #[test]
    fn early_month_offers_four_candidates() {
        let months = YearMonth::candidates(date!(2025 - 03 - 14));
        let rendered: Vec<String> = months.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["2025-03", "2025-04", "2025-05", "2025-06"]);
    }

    #[test]
    fn late_month_offers_an_extra_candidate_across_new_year() {
        let months = YearMonth::candidates(date!(2025 - 10 - 15));
        let rendered: Vec<String> = months.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["2025-10", "2025-11", "2025-12", "2026-01", "2026-02"]
        );
    }
}
