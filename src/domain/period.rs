//! Weekly reporting periods.
//!
//! A period is a `(year, month, week-of-month)` triple. It only feeds file
//! naming; no calendar validation happens here.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

/// Highest week number a month can have.
///
/// Days 29-31 always land in week 5, whether or not the business publishes a
/// fifth weekly file for that month.
pub const MAX_WEEK: u32 = 5;

/// One weekly raw-data batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub year: i32,
    /// 1-12.
    pub month: u32,
    /// 1-5.
    pub week: u32,
}

impl Period {
    pub fn new(year: i32, month: u32, week: u32) -> Self {
        Self { year, month, week }
    }

    /// Period containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            week: week_of_month(date.day()),
        }
    }

    /// Period containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// `YYYYMM`, the token shared by raw and processed file names.
    pub fn month_stamp(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02} week {}", self.year, self.month, self.week)
    }
}

/// `((day - 1) / 7) + 1`, capped at [`MAX_WEEK`].
pub fn week_of_month(day: u32) -> u32 {
    (day.saturating_sub(1) / 7 + 1).min(MAX_WEEK)
}
