use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Weekday};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const ISO_DATE_LEN: usize = 10;

/// A calendar date the vendor reports as sellable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VisitDate(Date);

impl VisitDate {
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Parses the leading `YYYY-MM-DD` of `input`, so `2025-03-03T00:00:00`
    /// is accepted as well.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidDate {
            value: trimmed.to_owned(),
        };

        let head = trimmed.get(..ISO_DATE_LEN).ok_or_else(invalid)?;
        Date::parse(head, ISO_DATE).map(Self).map_err(|_| invalid())
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub const fn weekday(self) -> Weekday {
        self.0.weekday()
    }
}

impl Display for VisitDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl From<Date> for VisitDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl TryFrom<String> for VisitDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for VisitDate {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<VisitDate> for String {
    fn from(value: VisitDate) -> Self {
        value.to_string()
    }
}
