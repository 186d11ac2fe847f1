//! The public, narrow period value.

use std::ops::Neg;

use crate::designator::Designator;
use crate::normalise::{DAYS_PER_MONTH_E4, DAYS_PER_YEAR_E4};
use crate::period64::{FIELD_DESIGNATORS, Period64};

/// An ISO 8601 period of years, months, days, hours, minutes and seconds.
///
/// Each field is stored as a fixed-point integer holding the value times ten,
/// so one decimal place is kept exactly and every field ranges over roughly
/// ±3276.7. All non-zero fields share the same sign. At most one field owns a
/// fractional digit, and every field less significant than it is zero.
///
/// Equality is structural: `P1Y` and `P12M` are different values until
/// normalised. All zero periods compare equal.
///
/// ```
/// use period_core::Period;
///
/// let period: Period = "P3Y6M4DT12H30M5S".parse().unwrap();
/// assert_eq!(period.years(), 3);
/// assert_eq!(period.to_string(), "P3Y6M4DT12H30M5S");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    years: i16,
    months: i16,
    days: i16,
    hours: i16,
    minutes: i16,
    seconds: i16,
    fraction: i8,
    fpart: Designator,
}

/// Largest whole-unit value accepted by the whole-unit constructors.
const MAX_WHOLE: i32 = (i16::MAX / 10) as i32;

impl Period {
    /// The zero period, written `P0D`.
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        fraction: 0,
        fpart: Designator::NoFraction,
    };

    /// Create a period from whole units.
    ///
    /// # Panics
    ///
    /// Panics if the non-zero arguments do not all share one sign, or if any
    /// argument is outside ±3276. Both are caller bugs; use
    /// [`Period::parse`] for untrusted input.
    #[must_use]
    pub fn new(years: i32, months: i32, days: i32, hours: i32, minutes: i32, seconds: i32) -> Self {
        let whole = [years, months, days, hours, minutes, seconds];
        assert!(
            whole.iter().all(|v| (-MAX_WHOLE..=MAX_WHOLE).contains(v)),
            "period fields must be within ±{MAX_WHOLE}; got {whole:?}"
        );
        // in range, so the tenths fit in i16
        Self::from_tenths(whole.map(|v| (v * 10) as i16))
    }

    /// Create a period of years, months and days.
    #[must_use]
    pub fn new_ymd(years: i32, months: i32, days: i32) -> Self {
        Self::new(years, months, days, 0, 0, 0)
    }

    /// Create a period of hours, minutes and seconds.
    #[must_use]
    pub fn new_hms(hours: i32, minutes: i32, seconds: i32) -> Self {
        Self::new(0, 0, 0, hours, minutes, seconds)
    }

    /// Create a period from fixed-point tenths, ordered years to seconds.
    ///
    /// # Panics
    ///
    /// Panics if the non-zero fields do not all share one sign, or if a field
    /// is `i16::MIN` (outside ±3276.7).
    #[must_use]
    pub fn from_tenths(tenths: [i16; 6]) -> Self {
        assert!(
            !tenths.contains(&i16::MIN),
            "period fields must be within ±3276.7; got {tenths:?}"
        );
        let any_neg = tenths.iter().any(|&v| v < 0);
        let any_pos = tenths.iter().any(|&v| v > 0);
        assert!(
            !(any_neg && any_pos),
            "periods must have homogeneous signs; got {tenths:?}"
        );
        Self::from_narrow_fields(tenths)
    }

    /// Assemble from signed tenths already known to share one sign.
    pub(crate) fn from_narrow_fields(tenths: [i16; 6]) -> Self {
        let owner = tenths.iter().position(|v| v % 10 != 0);
        debug_assert!(
            owner.is_none_or(|i| tenths[i + 1..].iter().all(|&v| v == 0)),
            "only the least significant non-zero field may hold a fraction; got {tenths:?}"
        );
        let [years, months, days, hours, minutes, seconds] = tenths;
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            // |v % 10| < 10
            fraction: owner.map_or(0, |i| (tenths[i] % 10) as i8),
            fpart: owner.map_or(Designator::NoFraction, |i| FIELD_DESIGNATORS[i]),
        }
    }

    /// Widen into the staging representation.
    pub(crate) fn widen(&self, input: impl Into<String>) -> Period64 {
        let mut p64 = Period64::new(input);
        p64.neg = self.is_negative();
        p64.set_fields(self.tenths().map(|v| i64::from(v).abs()));
        p64.fpart = self.fpart;
        p64.denormal = p64.compute_denormal();
        p64
    }

    /// All fields in tenths, ordered years to seconds.
    #[must_use]
    pub const fn tenths(&self) -> [i16; 6] {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ]
    }

    #[must_use]
    pub const fn years_tenths(&self) -> i16 {
        self.years
    }

    #[must_use]
    pub const fn months_tenths(&self) -> i16 {
        self.months
    }

    #[must_use]
    pub const fn days_tenths(&self) -> i16 {
        self.days
    }

    #[must_use]
    pub const fn hours_tenths(&self) -> i16 {
        self.hours
    }

    #[must_use]
    pub const fn minutes_tenths(&self) -> i16 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds_tenths(&self) -> i16 {
        self.seconds
    }

    /// Whole years, truncated towards zero.
    #[must_use]
    pub const fn years(&self) -> i32 {
        (self.years / 10) as i32
    }

    /// Whole months, truncated towards zero.
    #[must_use]
    pub const fn months(&self) -> i32 {
        (self.months / 10) as i32
    }

    /// Whole days, truncated towards zero.
    #[must_use]
    pub const fn days(&self) -> i32 {
        (self.days / 10) as i32
    }

    /// Whole weeks in the days field.
    #[must_use]
    pub const fn weeks(&self) -> i32 {
        (self.days / 70) as i32
    }

    /// Days left over after taking whole weeks.
    #[must_use]
    pub const fn modulo_days(&self) -> i32 {
        self.days() % 7
    }

    /// Whole hours, truncated towards zero.
    #[must_use]
    pub const fn hours(&self) -> i32 {
        (self.hours / 10) as i32
    }

    /// Whole minutes, truncated towards zero.
    #[must_use]
    pub const fn minutes(&self) -> i32 {
        (self.minutes / 10) as i32
    }

    /// Whole seconds, truncated towards zero.
    #[must_use]
    pub const fn seconds(&self) -> i32 {
        (self.seconds / 10) as i32
    }

    #[must_use]
    pub fn years_f64(&self) -> f64 {
        f64::from(self.years) / 10.0
    }

    #[must_use]
    pub fn months_f64(&self) -> f64 {
        f64::from(self.months) / 10.0
    }

    #[must_use]
    pub fn days_f64(&self) -> f64 {
        f64::from(self.days) / 10.0
    }

    #[must_use]
    pub fn hours_f64(&self) -> f64 {
        f64::from(self.hours) / 10.0
    }

    #[must_use]
    pub fn minutes_f64(&self) -> f64 {
        f64::from(self.minutes) / 10.0
    }

    #[must_use]
    pub fn seconds_f64(&self) -> f64 {
        f64::from(self.seconds) / 10.0
    }

    /// The field owning the fractional digit, or `NoFraction`.
    #[must_use]
    pub const fn fraction_owner(&self) -> Designator {
        self.fpart
    }

    /// The signed fractional digit (-9..=9) of the owning field.
    #[must_use]
    pub const fn fraction(&self) -> i8 {
        self.fraction
    }

    /// Whether any of the years, months or days fields is fractional.
    #[must_use]
    pub fn has_fractional_date(&self) -> bool {
        self.fpart.is_date()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.tenths().iter().all(|&v| v == 0)
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.tenths().iter().any(|&v| v < 0)
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.tenths().iter().any(|&v| v > 0)
    }

    /// -1 for negative periods, otherwise +1 (zero counts as positive).
    #[must_use]
    pub fn sign(&self) -> i32 {
        if self.is_negative() { -1 } else { 1 }
    }

    /// The period with every field sign-flipped.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
            fraction: -self.fraction,
            fpart: self.fpart,
        }
    }

    /// The period with every field non-negative.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() { self.negate() } else { *self }
    }

    /// Only the years, months and days fields.
    #[must_use]
    pub fn only_ymd(&self) -> Self {
        Self::from_narrow_fields([self.years, self.months, self.days, 0, 0, 0])
    }

    /// Only the hours, minutes and seconds fields.
    #[must_use]
    pub fn only_hms(&self) -> Self {
        Self::from_narrow_fields([0, 0, 0, self.hours, self.minutes, self.seconds])
    }

    /// Approximate whole days, using the mean Gregorian year and month.
    ///
    /// Hours, minutes and seconds are ignored.
    #[must_use]
    pub fn total_days_approx(&self) -> i64 {
        // tenths times 1e4 / 1e5 = whole days
        let tenths_e4 = i64::from(self.years) * DAYS_PER_YEAR_E4
            + i64::from(self.months) * DAYS_PER_MONTH_E4
            + i64::from(self.days) * 10_000;
        tenths_e4 / 100_000
    }

    /// Approximate whole months, using the mean Gregorian month for days.
    ///
    /// Hours, minutes and seconds are ignored.
    #[must_use]
    pub fn total_months_approx(&self) -> i64 {
        let days_as_month_tenths = i64::from(self.days) * 10_000 / DAYS_PER_MONTH_E4;
        (i64::from(self.years) * 12 + i64::from(self.months) + days_as_month_tenths) / 10
    }

    /// Normalise the period, carrying between units.
    ///
    /// Precise normalisation only makes exact carries: seconds into minutes,
    /// minutes into hours, months into years. Imprecise normalisation also
    /// carries hours into days and days into months using the mean Gregorian
    /// month. Either mode moves a fraction down to the least significant
    /// non-zero field.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::FieldOverflow`](crate::PeriodError::FieldOverflow)
    /// if a field is still too large after normalisation.
    pub fn normalise(&self, precise: bool) -> crate::Result<Self> {
        let p64 = self.widen(String::new());
        if !p64.denormal {
            return Ok(*self);
        }
        p64.normalise(precise).narrow()
    }
}

impl Neg for Period {
    type Output = Period;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stores_tenths() {
        let p = Period::new(1, 2, 3, 4, 5, 6);
        assert_eq!(p.tenths(), [10, 20, 30, 40, 50, 60]);
        assert_eq!(p.fraction_owner(), Designator::NoFraction);
        assert_eq!(p.years(), 1);
        assert_eq!(p.seconds(), 6);
    }

    #[test]
    #[should_panic(expected = "homogeneous signs")]
    fn test_mixed_signs_panic() {
        let _ = Period::new(1, -1, 0, 0, 0, 0);
    }

    #[test]
    #[should_panic(expected = "within")]
    fn test_out_of_range_whole_value_panics() {
        let _ = Period::new_ymd(3277, 0, 0);
    }

    #[test]
    #[should_panic(expected = "within ±3276.7")]
    fn test_most_negative_tenths_panic() {
        let _ = Period::from_tenths([0, 0, 0, i16::MIN, 0, 0]);
    }

    #[test]
    fn test_fraction_owner() {
        let p = Period::from_tenths([0, 0, 15, 0, 0, 0]);
        assert_eq!(p.fraction_owner(), Designator::Day);
        assert_eq!(p.fraction(), 5);
        assert!(p.has_fractional_date());
        assert!((p.days_f64() - 1.5).abs() < f64::EPSILON);

        let n = p.negate();
        assert_eq!(n.fraction(), -5);
        assert_eq!(n.fraction_owner(), Designator::Day);
    }

    #[test]
    fn test_sign_predicates() {
        assert_eq!(Period::ZERO.sign(), 1);
        assert!(Period::ZERO.is_zero());
        assert!(!Period::ZERO.is_positive());

        let p = Period::new_hms(-1, -30, 0);
        assert!(p.is_negative());
        assert_eq!(p.sign(), -1);
        assert_eq!(p.abs(), Period::new_hms(1, 30, 0));
        assert_eq!(-p, Period::new_hms(1, 30, 0));
    }

    #[test]
    fn test_weeks() {
        let p = Period::new_ymd(0, 0, 17);
        assert_eq!(p.weeks(), 2);
        assert_eq!(p.modulo_days(), 3);
    }

    #[test]
    fn test_only_parts() {
        let p = Period::new(1, 2, 3, 4, 5, 6);
        assert_eq!(p.only_ymd(), Period::new_ymd(1, 2, 3));
        assert_eq!(p.only_hms(), Period::new_hms(4, 5, 6));
    }

    #[test]
    fn test_totals_approx() {
        assert_eq!(Period::new_ymd(1, 0, 0).total_days_approx(), 365);
        assert_eq!(Period::new_ymd(0, 2, 1).total_days_approx(), 61);
        assert_eq!(Period::new_ymd(1, 1, 0).total_months_approx(), 13);
        assert_eq!(Period::new_ymd(0, 0, 61).total_months_approx(), 2);
    }

    #[test]
    fn test_normalise_skips_normal_values() {
        let p = Period::new(1, 2, 3, 4, 5, 6);
        assert_eq!(p.normalise(true).unwrap(), p);
    }

    #[test]
    fn test_normalise_carries() {
        let p = Period::new(0, 14, 0, 0, 90, 0);
        assert_eq!(p.normalise(true).unwrap(), Period::new(1, 2, 0, 1, 30, 0));

        let n = p.negate();
        assert_eq!(n.normalise(true).unwrap(), Period::new(-1, -2, 0, -1, -30, 0));
    }
}
