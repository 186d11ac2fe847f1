//! The ripple engine: carrying values between adjacent units.
//!
//! Normalisation runs on the non-negative magnitudes of a [`Period64`]:
//!
//! 1. **ripple up** carries whole units upwards, seconds to minutes to hours,
//!    then (imprecise mode, or to avoid 16-bit overflow) hours to days and
//!    days to months, and finally months to years.
//! 2. **move fraction down** pushes a tenths digit out of any field that has
//!    non-zero fields below it, so only the least significant non-zero field
//!    keeps a fraction.
//!
//! Pushing a fraction down can overflow a lower unit's natural range, so the
//! two steps repeat until the fields stop changing. The result is idempotent.

use crate::period64::{MAX_FIELD, Period64};

/// Mean Gregorian month, 30.4375 days, scaled by 1e4.
pub(crate) const DAYS_PER_MONTH_E4: i64 = 304_375;

/// Mean Gregorian year, 365.2425 days, scaled by 1e4.
pub(crate) const DAYS_PER_YEAR_E4: i64 = 3_652_425;

/// Upper bound on fraction and ripple rounds; values settle within two or three.
const MAX_ROUNDS: usize = 8;

impl Period64 {
    /// Normalise in place and return self.
    ///
    /// In precise mode only the exact carries (seconds, minutes, months) are
    /// made, unless hours or days would otherwise overflow.
    pub(crate) fn normalise(mut self, precise: bool) -> Self {
        self.ripple_up(precise);
        // the day remainder of a month carry can leave a new fraction behind
        for _ in 0..MAX_ROUNDS {
            let before = self.fields();
            self.move_fraction_down();
            self.ripple_up(precise);
            if self.fields() == before {
                break;
            }
        }
        self.locate_fraction();
        self.denormal = false;
        tracing::trace!(input = %self.input, precise, "normalised period");
        self
    }

    /// Only move a misplaced fraction down, leaving all other fields as is.
    pub(crate) fn settle_fraction(mut self) -> Self {
        self.move_fraction_down();
        self.locate_fraction();
        self
    }

    fn ripple_up(&mut self, precise: bool) {
        self.minutes = self.minutes.saturating_add((self.seconds / 600) * 10);
        self.seconds %= 600;

        self.hours = self.hours.saturating_add((self.minutes / 600) * 10);
        self.minutes %= 600;

        if !precise || self.hours > MAX_FIELD {
            self.days = self.days.saturating_add((self.hours / 240) * 10);
            self.hours %= 240;
        }

        if !precise || self.days > MAX_FIELD {
            // days in tenths times 1e3 gives days scaled by 1e4
            let scaled = i128::from(self.days) * 1_000;
            let month_e4 = i128::from(DAYS_PER_MONTH_E4);
            let whole_months = i64::try_from(scaled / month_e4).unwrap_or(i64::MAX);
            self.months = self.months.saturating_add(whole_months.saturating_mul(10));
            // remainder is below one month, so it always fits
            self.days = ((scaled % month_e4) / 1_000) as i64;
        }

        self.years = self.years.saturating_add((self.months / 120) * 10);
        self.months %= 120;
    }

    fn move_fraction_down(&mut self) {
        let y10 = self.years % 10;
        if y10 != 0 && self.below_year() {
            self.months = self.months.saturating_add(y10 * 12);
            self.years -= y10;
        }

        let m10 = self.months % 10;
        if m10 != 0 && self.below_month() {
            self.days = self
                .days
                .saturating_add(m10 * DAYS_PER_MONTH_E4 / 10_000);
            self.months -= m10;
        }

        let d10 = self.days % 10;
        if d10 != 0 && self.below_day() {
            self.hours = self.hours.saturating_add(d10 * 24);
            self.days -= d10;
        }

        let h10 = self.hours % 10;
        if h10 != 0 && (self.minutes != 0 || self.seconds != 0) {
            self.minutes = self.minutes.saturating_add(h10 * 60);
            self.hours -= h10;
        }

        let mm10 = self.minutes % 10;
        if mm10 != 0 && self.seconds != 0 {
            self.seconds = self.seconds.saturating_add(mm10 * 60);
            self.minutes -= mm10;
        }
    }

    fn below_year(&self) -> bool {
        self.months != 0 || self.below_month()
    }

    fn below_month(&self) -> bool {
        self.days != 0 || self.below_day()
    }

    fn below_day(&self) -> bool {
        self.hours != 0 || self.minutes != 0 || self.seconds != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designator::Designator;

    fn wide(fields: [i64; 6]) -> Period64 {
        let mut p64 = Period64::new("test");
        p64.set_fields(fields);
        p64.locate_fraction();
        p64
    }

    #[test]
    fn test_precise_ripple_keeps_hours() {
        let p64 = wide([0, 0, 0, 0, 0, 115_920_000]).normalise(true);
        assert_eq!(p64.fields(), [0, 0, 0, 32_200, 0, 0]);
    }

    #[test]
    fn test_imprecise_ripple_carries_into_calendar_units() {
        // 49 hours -> 2 days 1 hour
        let p64 = wide([0, 0, 0, 490, 0, 0]).normalise(false);
        assert_eq!(p64.fields(), [0, 0, 20, 10, 0, 0]);

        // 61 days -> 2 months 0.1 day (61 - 60.875 = 0.125)
        let p64 = wide([0, 0, 610, 0, 0, 0]).normalise(false);
        assert_eq!(p64.fields(), [0, 20, 1, 0, 0, 0]);
        assert_eq!(p64.fpart, Designator::Day);
    }

    #[test]
    fn test_months_always_carry_into_years() {
        let p64 = wide([10, 140, 0, 0, 0, 0]).normalise(true);
        assert_eq!(p64.fields(), [20, 20, 0, 0, 0, 0]);
    }

    #[test]
    fn test_hours_overflow_forces_day_carry() {
        let p64 = wide([0, 0, 0, 40_000, 0, 0]).normalise(true);
        // 4000 hours = 166 days 16 hours
        assert_eq!(p64.fields(), [0, 0, 1_660, 160, 0, 0]);
    }

    #[test]
    fn test_fraction_moves_down() {
        // 1.5 years and 2 months -> 1 year 8 months
        let p64 = wide([15, 20, 0, 0, 0, 0]).normalise(true);
        assert_eq!(p64.fields(), [10, 80, 0, 0, 0, 0]);
        assert_eq!(p64.fpart, Designator::NoFraction);

        // 1.5 hours and 59 minutes -> 2 hours 29 minutes
        let p64 = wide([0, 0, 0, 15, 590, 0]).normalise(true);
        assert_eq!(p64.fields(), [0, 0, 0, 20, 290, 0]);

        // 0.1 day and 1 second -> 2.4 hours -> 2 hours 24 minutes 1 second
        let p64 = wide([0, 0, 1, 0, 0, 10]).normalise(true);
        assert_eq!(p64.fields(), [0, 0, 0, 20, 240, 10]);
    }

    #[test]
    fn test_last_field_keeps_fraction() {
        let p64 = wide([10, 0, 15, 0, 0, 0]).normalise(true);
        assert_eq!(p64.fields(), [10, 0, 15, 0, 0, 0]);
        assert_eq!(p64.fpart, Designator::Day);
        assert_eq!(p64.fraction(), 5);
    }

    #[test]
    fn test_settle_fraction_leaves_ranges_alone() {
        let p64 = wide([0, 0, 0, 15, 590, 0]).settle_fraction();
        assert_eq!(p64.fields(), [0, 0, 0, 10, 890, 0]);
        assert_eq!(p64.fpart, Designator::NoFraction);
    }

    #[test]
    fn test_normalise_is_idempotent() {
        for fields in [
            [15, 20, 0, 0, 0, 0],
            [0, 15, 20, 0, 0, 0],
            [0, 0, 0, 15, 590, 0],
            [0, 0, 3_650, 490, 1_234, 99_999],
        ] {
            for precise in [true, false] {
                let once = wide(fields).normalise(precise);
                let twice = once.clone().normalise(precise);
                assert_eq!(once.fields(), twice.fields(), "{fields:?} precise={precise}");
            }
        }
    }
}
