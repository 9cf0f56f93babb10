//! Calendar months and how their names are displayed.

use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use time::{Date, Duration, Month, util::days_in_year_month};

use crate::Error;

/// A month of a specific year, spanning its first to its last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    first_day: Date,
    last_day: Date,
}

impl CalendarMonth {
    /// The month `month` (1 to 12) of `year`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if the month is not between 1 and 12 or
    /// the year is out of range.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        let month = Month::try_from(month)
            .map_err(|_| Error::validation("month", "must be between 1 and 12"))?;
        let first_day = Date::from_calendar_date(year, month, 1)
            .map_err(|_| Error::validation("year", "is out of range"))?;

        Ok(Self::containing(first_day))
    }

    /// The month that `date` falls in.
    pub fn containing(date: Date) -> Self {
        let first_day = date - Duration::days(i64::from(date.day()) - 1);
        let length = days_in_year_month(date.year(), date.month());
        let last_day = first_day + Duration::days(i64::from(length) - 1);

        Self {
            first_day,
            last_day,
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> Month {
        self.first_day.month()
    }

    pub fn first_day(&self) -> Date {
        self.first_day
    }

    pub fn last_day(&self) -> Date {
        self.last_day
    }

    /// Every day of the month, inclusive.
    pub fn date_range(&self) -> RangeInclusive<Date> {
        self.first_day..=self.last_day
    }

    /// The month before this one, or `None` before the earliest supported date.
    pub fn previous(&self) -> Option<Self> {
        self.first_day.previous_day().map(Self::containing)
    }
}

/// The language that month names are reported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthLabels {
    /// "Jan", "Feb", ...
    #[default]
    English,
    /// "ene", "feb", ...
    Spanish,
}

impl MonthLabels {
    /// The short name of `month`.
    pub fn label(&self, month: Month) -> &'static str {
        match self {
            MonthLabels::English => match month {
                Month::January => "Jan",
                Month::February => "Feb",
                Month::March => "Mar",
                Month::April => "Apr",
                Month::May => "May",
                Month::June => "Jun",
                Month::July => "Jul",
                Month::August => "Aug",
                Month::September => "Sep",
                Month::October => "Oct",
                Month::November => "Nov",
                Month::December => "Dec",
            },
            MonthLabels::Spanish => match month {
                Month::January => "ene",
                Month::February => "feb",
                Month::March => "mar",
                Month::April => "abr",
                Month::May => "may",
                Month::June => "jun",
                Month::July => "jul",
                Month::August => "ago",
                Month::September => "sept",
                Month::October => "oct",
                Month::November => "nov",
                Month::December => "dic",
            },
        }
    }
}

impl FromStr for MonthLabels {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(MonthLabels::English),
            "es" | "spanish" => Ok(MonthLabels::Spanish),
            other => Err(format!(
                "unsupported month labels \"{other}\", expected \"en\" or \"es\""
            )),
        }
    }
}

impl Display for MonthLabels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonthLabels::English => write!(f, "en"),
            MonthLabels::Spanish => write!(f, "es"),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::Error;

    use super::{CalendarMonth, MonthLabels};

    #[test]
    fn containing_spans_whole_month() {
        let month = CalendarMonth::containing(date!(2024 - 02 - 17));

        assert_eq!(month.first_day(), date!(2024 - 02 - 01));
        assert_eq!(month.last_day(), date!(2024 - 02 - 29));
    }

    #[test]
    fn previous_rolls_over_year() {
        let january = CalendarMonth::new(2025, 1).unwrap();

        let december = january.previous().unwrap();

        assert_eq!(december.year(), 2024);
        assert_eq!(december.month(), Month::December);
        assert_eq!(december.last_day(), date!(2024 - 12 - 31));
    }

    #[test]
    fn new_rejects_month_thirteen() {
        let result = CalendarMonth::new(2024, 13);

        assert!(matches!(result, Err(Error::Validation { field: "month", .. })));
    }

    #[test]
    fn labels_follow_language() {
        assert_eq!(MonthLabels::English.label(Month::September), "Sep");
        assert_eq!(MonthLabels::Spanish.label(Month::September), "sept");
        assert_eq!(MonthLabels::Spanish.label(Month::January), "ene");
    }

    #[test]
    fn parse_month_labels() {
        assert_eq!("es".parse(), Ok(MonthLabels::Spanish));
        assert_eq!("English".parse(), Ok(MonthLabels::English));
        assert!("fr".parse::<MonthLabels>().is_err());
    }
}
