use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use period_core::{ENCODED_LEN, Period};

/// A date or date-time given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instant {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Instant {
    pub fn to_date_time(self) -> NaiveDateTime {
        match self {
            Self::Date(date) => date.and_time(chrono::NaiveTime::MIN),
            Self::DateTime(date_time) => date_time,
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(date_time) => write!(f, "{}", date_time.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

#[derive(Debug)]
pub struct DurationResult {
    pub period: Period,
    pub elapsed: TimeDelta,
    pub precise: bool,
}

#[derive(Debug)]
pub struct AddToResult {
    pub period: Period,
    pub start: Instant,
    pub end: Instant,
    pub precise: bool,
}

#[derive(Debug)]
pub struct EncodeResult {
    pub period: Period,
    pub bytes: [u8; ENCODED_LEN],
}
