//! Period arithmetic and conversion to and from elapsed time.
//!
//! Exact integer arithmetic is always tried first. Where no exact answer
//! exists the period is converted to an approximate elapsed time using the
//! mean Gregorian year (365.2425 days) and month (30.4375 days), and the
//! returned precision flag says so.

use chrono::{NaiveDateTime, TimeDelta};

use crate::calendar::CalendarInstant;
use crate::error::{PeriodError, Result};
use crate::normalise::{DAYS_PER_MONTH_E4, DAYS_PER_YEAR_E4};
use crate::period::Period;
use crate::period64::Period64;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SECOND;

// nanoseconds in one tenth of each unit
const YEAR_TENTH_NANOS: i128 = DAYS_PER_YEAR_E4 as i128 * 864_000_000;
const MONTH_TENTH_NANOS: i128 = DAYS_PER_MONTH_E4 as i128 * 864_000_000;
const DAY_TENTH_NANOS: i128 = NANOS_PER_DAY / 10;
const HOUR_TENTH_NANOS: i128 = 360 * NANOS_PER_SECOND;
const MINUTE_TENTH_NANOS: i128 = 6 * NANOS_PER_SECOND;
const SECOND_TENTH_NANOS: i128 = NANOS_PER_SECOND / 10;

/// Resolution the approximate scaling path rounds to.
const SCALE_ROUNDING_NANOS: i128 = 100_000;

/// Largest denominator used when turning a float factor into a ratio.
const MAX_FACTOR_DENOMINATOR: i128 = 1_000_000;

impl Period {
    /// Signed nanoseconds of the calendar part and of the clock part.
    ///
    /// The calendar part uses the mean Gregorian year and month, and 24-hour
    /// days. The clock part is exact.
    fn nanos_parts(&self) -> (i128, i128) {
        let [years, months, days, hours, minutes, seconds] = self.tenths().map(i128::from);
        let date = years * YEAR_TENTH_NANOS + months * MONTH_TENTH_NANOS + days * DAY_TENTH_NANOS;
        let time = hours * HOUR_TENTH_NANOS + minutes * MINUTE_TENTH_NANOS + seconds * SECOND_TENTH_NANOS;
        (date, time)
    }

    /// Add two periods field by field.
    ///
    /// The sum is not normalised, so repeated additions stay cheap; call
    /// [`Period::normalise`] for a canonical result. When the operands have
    /// opposite signs the fields are first regrouped into months, days and
    /// seconds; only if those groups still disagree in sign is the sum
    /// computed through the approximate elapsed time.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::FieldOverflow`] if a field leaves the narrow
    /// range.
    pub fn add(&self, other: &Period) -> Result<Period> {
        let a = self.tenths().map(i64::from);
        let b = other.tenths().map(i64::from);
        let sum: [i64; 6] = std::array::from_fn(|i| a[i] + b[i]);

        let p64 = match Period64::from_signed(sum, String::new()) {
            Some(p64) => p64.settle_fraction(),
            None => self.regroup_sum(other, sum),
        };
        p64.narrow().map_err(|err| match err {
            PeriodError::FieldOverflow { field, .. } => {
                PeriodError::field_overflow(field, format!("{self} + {other}"))
            }
            err => err,
        })
    }

    /// Subtract `other`, equivalent to adding its negation.
    ///
    /// # Errors
    ///
    /// See [`Period::add`].
    pub fn subtract(&self, other: &Period) -> Result<Period> {
        self.add(&other.negate())
    }

    fn regroup_sum(&self, other: &Period, sum: [i64; 6]) -> Period64 {
        let [years, months, days, hours, minutes, seconds] = sum;
        let grouped = [
            0,
            years * 12 + months,
            days,
            0,
            0,
            hours * 3_600 + minutes * 60 + seconds,
        ];
        if let Some(p64) = Period64::from_signed(grouped, String::new()) {
            return p64.normalise(true);
        }

        tracing::debug!(lhs = %self, rhs = %other, "mixed-sign sum needs the approximate elapsed time");
        let (date_a, time_a) = self.nanos_parts();
        let (date_b, time_b) = other.nanos_parts();
        wide_from_nanos(date_a + time_a + date_b + time_b).normalise(false)
    }

    /// Multiply by a float factor.
    ///
    /// The factor is first turned into the closest ratio with a denominator
    /// of at most one million, then [`Period::rational_scale`] does the work.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidScaleFactor`] for NaN or infinite factors
    /// and [`PeriodError::ScaleOverflow`] if the result does not fit.
    pub fn scale(&self, factor: f64) -> Result<Period> {
        if !factor.is_finite() {
            return Err(PeriodError::InvalidScaleFactor {
                factor: factor.to_string(),
            });
        }
        let Some((numerator, denominator)) = to_ratio(factor) else {
            return Err(PeriodError::ScaleOverflow {
                fields: self.non_zero_fields(),
            });
        };
        self.rational_scale(numerator, denominator)
    }

    /// Multiply by `numerator / denominator`.
    ///
    /// The years and months, the days, and the hours, minutes and seconds are
    /// each scaled as one total. If every total divides exactly, the exact
    /// result is normalised precisely and returned. Otherwise the approximate
    /// elapsed time is scaled, rounded half up to 100 µs and converted back,
    /// precisely only if the period had no calendar part.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::ScaleOverflow`] naming the fields that would
    /// not fit.
    pub fn rational_scale(&self, numerator: i64, denominator: i64) -> Result<Period> {
        assert!(denominator != 0, "period scale denominator must not be zero");
        if numerator == denominator {
            return Ok(*self);
        }
        if numerator == 0 || self.is_zero() {
            return Ok(Period::ZERO);
        }

        let neg = self.is_negative() ^ (numerator < 0) ^ (denominator < 0);
        let n = i128::from(numerator.unsigned_abs());
        let d = i128::from(denominator.unsigned_abs());
        let magnitude = self.abs();

        let [years, months, days, hours, minutes, seconds] = magnitude.tenths().map(i128::from);
        let groups = [
            years * 12 + months,
            days,
            hours * 3_600 + minutes * 60 + seconds,
        ];

        let mut p64 = if groups.iter().all(|g| (g * n) % d == 0) {
            let [ym, days, hms] = groups.map(|g| i64::try_from(g * n / d).unwrap_or(i64::MAX));
            let mut p64 = Period64::new(String::new());
            p64.months = ym;
            p64.days = days;
            p64.seconds = hms;
            p64.normalise(true)
        } else {
            tracing::debug!(
                period = %self,
                numerator,
                denominator,
                "no exact rational scaling, using elapsed time"
            );
            let (date, time) = magnitude.nanos_parts();
            let scaled = (date + time)
                .checked_mul(n)
                .and_then(|total| round_half_up(total, d * SCALE_ROUNDING_NANOS))
                .and_then(|units| units.checked_mul(SCALE_ROUNDING_NANOS))
                .ok_or_else(|| PeriodError::ScaleOverflow {
                    fields: self.non_zero_fields(),
                })?;
            wide_from_nanos(scaled).normalise(date == 0)
        };

        p64.neg = neg && !p64.is_zero();
        let fields = p64.overflowing_fields();
        if !fields.is_empty() {
            return Err(PeriodError::ScaleOverflow { fields });
        }
        p64.narrow()
    }

    fn non_zero_fields(&self) -> Vec<&'static str> {
        crate::period64::FIELD_DESIGNATORS
            .iter()
            .zip(self.tenths())
            .filter(|(_, v)| *v != 0)
            .map(|(d, _)| d.field_name())
            .collect()
    }

    /// The approximate elapsed time of this period.
    ///
    /// Years, months and days use the mean Gregorian year, mean month and
    /// 24-hour days; hours, minutes and seconds are exact. The flag is true
    /// when the years, months and days are all zero.
    #[must_use]
    pub fn duration(&self) -> (TimeDelta, bool) {
        let (date, time) = self.nanos_parts();
        (delta_from_nanos(date + time), date == 0)
    }

    /// Convert an elapsed time into a period, to a tenth of a second.
    ///
    /// Seconds carry into minutes and hours. Only when that would overflow the
    /// hours field are days, months and years used, in which case the flag is
    /// false.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::FieldOverflow`] if even the years overflow.
    pub fn from_duration(delta: TimeDelta) -> Result<(Period, bool)> {
        let p64 = wide_from_nanos(nanos_of(delta));
        let precise = p64.clone().normalise(true);
        if precise.years == 0 && precise.months == 0 && precise.days == 0 {
            return Ok((precise.narrow()?, true));
        }
        Ok((p64.normalise(false).narrow()?, false))
    }

    /// The period from `start` to `end` in days, hours, minutes and seconds.
    ///
    /// Negative when `end` is before `start`.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::FieldOverflow`] if the instants are too far
    /// apart.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Result<Period> {
        let nanos = nanos_of(end.signed_duration_since(start));
        let magnitude = nanos.abs();

        let mut p64 = Period64::new(format!("{start} to {end}"));
        p64.neg = nanos < 0;
        p64.days = saturate(magnitude / NANOS_PER_DAY * 10);
        p64.seconds = saturate((magnitude % NANOS_PER_DAY) / SECOND_TENTH_NANOS);
        p64.normalise(true).narrow()
    }

    /// Add this period to an instant.
    ///
    /// When the years, months and days are whole they are added on the
    /// calendar and the clock part is added exactly, so the result is exact.
    /// Otherwise the approximate [`Period::duration`] is added. The flag
    /// reports whether the result is exact; it is false when the instant type
    /// drops part of the elapsed time, as a date drops a part of a day.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InstantOutOfRange`] if the result is outside the
    /// instant type's range.
    pub fn add_to<T: CalendarInstant>(&self, instant: T) -> Result<(T, bool)> {
        let out_of_range = || PeriodError::InstantOutOfRange {
            period: self.to_string(),
        };

        if !self.has_fractional_date() {
            let (_, time) = self.nanos_parts();
            let clock = delta_from_nanos(time);
            let moved = instant
                .add_calendar(self.years(), self.months(), self.days())
                .and_then(|t| t.add_elapsed(clock))
                .ok_or_else(out_of_range)?;
            return Ok((moved, T::holds_elapsed(clock)));
        }

        let (delta, precise) = self.duration();
        let moved = instant.add_elapsed(delta).ok_or_else(out_of_range)?;
        Ok((moved, precise && T::holds_elapsed(delta)))
    }
}

/// A non-normalised wide period holding the nanoseconds as seconds.
fn wide_from_nanos(nanos: i128) -> Period64 {
    let mut p64 = Period64::new(String::new());
    p64.neg = nanos < 0;
    p64.seconds = saturate(nanos.abs() / SECOND_TENTH_NANOS);
    p64
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn nanos_of(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SECOND + i128::from(delta.subsec_nanos())
}

fn delta_from_nanos(nanos: i128) -> TimeDelta {
    let seconds = nanos.div_euclid(NANOS_PER_SECOND);
    let subsec = nanos.rem_euclid(NANOS_PER_SECOND);
    // periods span at most a few thousand years, far inside TimeDelta's range
    i64::try_from(seconds)
        .ok()
        .and_then(|s| TimeDelta::new(s, subsec as u32))
        .unwrap_or(if nanos < 0 { TimeDelta::MIN } else { TimeDelta::MAX })
}

/// `value / divisor` rounded half up, for non-negative values.
fn round_half_up(value: i128, divisor: i128) -> Option<i128> {
    value
        .checked_mul(2)?
        .checked_add(divisor)?
        .checked_div(divisor.checked_mul(2)?)
}

/// The closest ratio to `factor` by continued fractions.
fn to_ratio(factor: f64) -> Option<(i64, i64)> {
    let mut value = factor.abs();
    if value > i64::MAX as f64 {
        return None;
    }

    // convergents h/k, seeded with h(-2)/k(-2) = 0/1 and h(-1)/k(-1) = 1/0
    let (mut h_prev, mut h) = (0i128, 1i128);
    let (mut k_prev, mut k) = (1i128, 0i128);
    loop {
        let whole = value.floor();
        let a = whole as i128;
        let h_next = a * h + h_prev;
        let k_next = a * k + k_prev;
        if k_next > MAX_FACTOR_DENOMINATOR || h_next > i128::from(i64::MAX) {
            break;
        }
        (h_prev, h) = (h, h_next);
        (k_prev, k) = (k, k_next);

        let remainder = value - whole;
        if remainder < 1e-12 {
            break;
        }
        value = 1.0 / remainder;
    }

    let numerator = i64::try_from(h).ok()?;
    let denominator = i64::try_from(k).ok().filter(|&k| k != 0)?;
    Some((if factor < 0.0 { -numerator } else { numerator }, denominator))
}
