//! Calendar collaborators for adding periods to instants.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Utc};

/// An instant that calendar periods can be added to.
///
/// Implemented for the `chrono` date and date-time types. No time zone or
/// daylight saving rules are applied; `DateTime<Utc>` is treated as a plain
/// UTC clock.
pub trait CalendarInstant: Sized + Copy {
    /// Add whole years, months and days.
    ///
    /// Years and months move the month first; a day of month past the end of
    /// the target month rolls over into the following month, so 31 January
    /// plus one month is 3 March (2 March in leap years).
    fn add_calendar(self, years: i32, months: i32, days: i32) -> Option<Self>;

    /// Add an elapsed time, at the resolution of the instant type.
    fn add_elapsed(self, delta: TimeDelta) -> Option<Self>;

    /// Whether [`CalendarInstant::add_elapsed`] keeps all of `delta`.
    fn holds_elapsed(_delta: TimeDelta) -> bool {
        true
    }
}

fn add_to_date(date: NaiveDate, years: i32, months: i32, days: i32) -> Option<NaiveDate> {
    let month_index = i64::from(date.year()) * 12
        + i64::from(date.month0())
        + i64::from(years) * 12
        + i64::from(months);
    let year = i32::try_from(month_index.div_euclid(12)).ok()?;
    let month0 = u32::try_from(month_index.rem_euclid(12)).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    first.checked_add_signed(TimeDelta::try_days(i64::from(date.day0()) + i64::from(days))?)
}

impl CalendarInstant for NaiveDate {
    fn add_calendar(self, years: i32, months: i32, days: i32) -> Option<Self> {
        add_to_date(self, years, months, days)
    }

    /// Whole days only; any part of a day is dropped.
    fn add_elapsed(self, delta: TimeDelta) -> Option<Self> {
        self.checked_add_signed(TimeDelta::try_days(delta.num_days())?)
    }

    fn holds_elapsed(delta: TimeDelta) -> bool {
        TimeDelta::try_days(delta.num_days()) == Some(delta)
    }
}

impl CalendarInstant for NaiveDateTime {
    fn add_calendar(self, years: i32, months: i32, days: i32) -> Option<Self> {
        add_to_date(self.date(), years, months, days).map(|date| date.and_time(self.time()))
    }

    fn add_elapsed(self, delta: TimeDelta) -> Option<Self> {
        self.checked_add_signed(delta)
    }
}

impl CalendarInstant for DateTime<Utc> {
    fn add_calendar(self, years: i32, months: i32, days: i32) -> Option<Self> {
        self.naive_utc()
            .add_calendar(years, months, days)
            .map(|naive| naive.and_utc())
    }

    fn add_elapsed(self, delta: TimeDelta) -> Option<Self> {
        self.checked_add_signed(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_end_rolls_over() {
        assert_eq!(date(2023, 1, 31).add_calendar(0, 1, 0), Some(date(2023, 3, 3)));
        assert_eq!(date(2024, 1, 31).add_calendar(0, 1, 0), Some(date(2024, 3, 2)));
        assert_eq!(date(2024, 2, 29).add_calendar(1, 0, 0), Some(date(2025, 3, 1)));
    }

    #[test]
    fn test_negative_calendar_units() {
        assert_eq!(date(2024, 3, 15).add_calendar(0, -3, 0), Some(date(2023, 12, 15)));
        assert_eq!(date(2024, 3, 1).add_calendar(0, 0, -1), Some(date(2024, 2, 29)));
        assert_eq!(date(2024, 3, 15).add_calendar(-1, -14, -15), Some(date(2021, 12, 31)));
    }

    #[test]
    fn test_date_time_keeps_clock() {
        let t = date(2024, 1, 31).and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            t.add_calendar(0, 1, 1),
            Some(date(2024, 3, 3).and_hms_opt(10, 30, 0).unwrap())
        );

        let utc = t.and_utc();
        assert_eq!(
            utc.add_elapsed(TimeDelta::try_hours(14).unwrap()),
            Some(date(2024, 2, 1).and_hms_opt(0, 30, 0).unwrap().and_utc())
        );
    }

    #[test]
    fn test_date_drops_partial_days() {
        let delta = TimeDelta::try_hours(47).unwrap();
        assert_eq!(date(2024, 1, 1).add_elapsed(delta), Some(date(2024, 1, 2)));
        assert!(!NaiveDate::holds_elapsed(delta));
        assert!(!NaiveDate::holds_elapsed(-TimeDelta::try_hours(1).unwrap()));
        assert!(NaiveDate::holds_elapsed(TimeDelta::try_days(-3).unwrap()));
        assert!(NaiveDateTime::holds_elapsed(delta));
    }
}
