use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar day used to qualify a consumption-price request.
///
/// The API receives it as `DD-MM-YYYY`: day first, then month, then year.
/// That is the order the upstream service has always been queried with,
/// even though the parameter looks like it wants a US-style date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateStamp {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DateStamp {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }

    /// Builds a stamp from anything carrying a calendar date.
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }

    /// Today's date on the local wall clock.
    pub fn today() -> Self {
        Self::from_date(&Local::now())
    }

    /// Renders the `date=` query value, zero padded as `DD-MM-YYYY`.
    pub fn to_query_value(&self) -> String {
        format!("{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }

    /// Returns `None` when the fields do not name a real day.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for DateStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

impl From<NaiveDate> for DateStamp {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(&date)
    }
}
