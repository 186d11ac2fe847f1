//! Wide staging value used while parsing and computing.
//!
//! Every operation that may transiently exceed the 16-bit fields of
//! [`Period`] widens into a [`Period64`], works on non-negative 64-bit
//! magnitudes with a separate sign flag, and narrows back at the end.

use crate::designator::Designator;
use crate::error::{PeriodError, Result};
use crate::period::Period;

/// Largest magnitude a narrow field can hold, in tenths.
pub(crate) const MAX_FIELD: i64 = i16::MAX as i64;

/// Field order shared by the wide and narrow representations.
pub(crate) const FIELD_DESIGNATORS: [Designator; 6] = [
    Designator::Year,
    Designator::Month,
    Designator::Day,
    Designator::Hour,
    Designator::Minute,
    Designator::Second,
];

/// Per-field magnitudes (tenths) at or above which a ripple would act.
///
/// Days and hours only ripple in imprecise mode, so these are the lowest
/// thresholds over both modes.
const RIPPLE_THRESHOLDS: [i64; 6] = [i64::MAX, 120, 305, 240, 600, 600];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Period64 {
    // always non-negative, fixed-point tenths
    pub(crate) years: i64,
    pub(crate) months: i64,
    pub(crate) days: i64,
    pub(crate) hours: i64,
    pub(crate) minutes: i64,
    pub(crate) seconds: i64,
    pub(crate) neg: bool,
    pub(crate) fpart: Designator,
    pub(crate) input: String,
    pub(crate) denormal: bool,
}

impl Period64 {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Build from signed tenths; `None` when the signs are mixed.
    pub(crate) fn from_signed(fields: [i64; 6], input: impl Into<String>) -> Option<Self> {
        let any_neg = fields.iter().any(|&v| v < 0);
        let any_pos = fields.iter().any(|&v| v > 0);
        if any_neg && any_pos {
            return None;
        }
        let mut p64 = Self::new(input);
        p64.neg = any_neg;
        p64.set_fields(fields.map(i64::saturating_abs));
        p64.locate_fraction();
        p64.denormal = p64.compute_denormal();
        Some(p64)
    }

    pub(crate) fn fields(&self) -> [i64; 6] {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ]
    }

    pub(crate) fn set_fields(&mut self, fields: [i64; 6]) {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ] = fields;
    }

    /// Signed tenths, negated when the period is negative.
    pub(crate) fn signed_fields(&self) -> [i64; 6] {
        let sign = if self.neg { -1 } else { 1 };
        self.fields().map(|v| v * sign)
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.fields().iter().all(|&v| v == 0)
    }

    /// The fractional digit held by the owning field, 0 when there is none.
    pub(crate) fn fraction(&self) -> i64 {
        FIELD_DESIGNATORS
            .iter()
            .position(|&d| d == self.fpart)
            .map_or(0, |i| self.fields()[i] % 10)
    }

    /// Record the most significant field that carries a tenths digit.
    pub(crate) fn locate_fraction(&mut self) {
        self.fpart = FIELD_DESIGNATORS
            .iter()
            .zip(self.fields())
            .find(|(_, v)| v % 10 != 0)
            .map_or(Designator::NoFraction, |(&d, _)| d);
    }

    /// Whether a normalisation pass could change any field.
    pub(crate) fn compute_denormal(&self) -> bool {
        let fields = self.fields();
        if fields
            .iter()
            .zip(RIPPLE_THRESHOLDS)
            .any(|(&v, threshold)| v >= threshold || v > MAX_FIELD)
        {
            return true;
        }
        // a fraction above a non-zero lower field must be pushed down
        fields
            .iter()
            .enumerate()
            .any(|(i, v)| v % 10 != 0 && fields[i + 1..].iter().any(|&lower| lower != 0))
    }

    /// Names of the fields that do not fit the narrow representation.
    pub(crate) fn overflowing_fields(&self) -> Vec<&'static str> {
        FIELD_DESIGNATORS
            .iter()
            .zip(self.fields())
            .filter(|(_, v)| *v > MAX_FIELD)
            .map(|(d, _)| d.field_name())
            .collect()
    }

    /// Validate the range of every field and narrow to a [`Period`].
    pub(crate) fn narrow(&self) -> Result<Period> {
        if let Some(&field) = self.overflowing_fields().first() {
            return Err(PeriodError::field_overflow(field, self.input.clone()));
        }
        let sign: i16 = if self.neg { -1 } else { 1 };
        // range checked above
        let fields = self.fields().map(|v| sign * v as i16);
        Ok(Period::from_narrow_fields(fields))
    }
}
