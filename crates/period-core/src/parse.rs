//! Parsing ISO 8601 period text.
//!
//! Grammar: `[+-]P[nY][nM][nW][nD][T[nH][nM][nS]]`, where each `n` is a digit
//! run with at most one `.` or `,` and one significant fractional digit.
//! `P0` is accepted as shorthand for zero.

use std::str::FromStr;

use crate::decimal::scan_tenths;
use crate::designator::Designator;
use crate::error::{PeriodError, Result};
use crate::options::{NormalisationMode, ParseOptions};
use crate::period::Period;
use crate::period64::Period64;

impl Period {
    /// Parse an ISO 8601 period, normalising it precisely.
    ///
    /// # Errors
    ///
    /// Returns a parse error describing the offending designator or number,
    /// or [`PeriodError::FieldOverflow`] if a field is out of range.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parse an ISO 8601 period with explicit normalisation options.
    ///
    /// # Errors
    ///
    /// See [`Period::parse`].
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self> {
        let p64 = parse_wide(text)?;
        let p64 = match options.mode {
            NormalisationMode::Verbatim => p64.settle_fraction(),
            NormalisationMode::Constrained if p64.overflowing_fields().is_empty() => {
                p64.settle_fraction()
            }
            NormalisationMode::Constrained => p64.normalise(true),
            NormalisationMode::Normalised | NormalisationMode::Imprecise if p64.denormal => {
                p64.normalise(options.mode.is_precise())
            }
            NormalisationMode::Normalised | NormalisationMode::Imprecise => p64,
        };
        p64.narrow()
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Period {
    type Error = PeriodError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

/// Read period text into the wide representation without normalising.
pub(crate) fn parse_wide(input: &str) -> Result<Period64> {
    if input.is_empty() {
        return Err(PeriodError::empty_input(input));
    }

    let (neg, unsigned) = if let Some(rest) = input.strip_prefix('-') {
        (true, rest)
    } else {
        (false, input.strip_prefix('+').unwrap_or(input))
    };

    let Some(body) = unsigned.strip_prefix('P') else {
        return Err(PeriodError::MissingPeriodMarker {
            input: input.to_string(),
        });
    };

    let mut p64 = Period64::new(input);
    if body == "0" {
        return Ok(p64);
    }
    p64.neg = neg;

    let mut scanner = FieldScanner::new(input);
    let mut remaining = body;
    while !remaining.is_empty() {
        if let Some(after) = remaining.strip_prefix('T') {
            if scanner.time_side {
                return Err(PeriodError::DuplicateTimeMarker {
                    input: input.to_string(),
                });
            }
            scanner.time_side = true;
            remaining = after;
            continue;
        }

        let end = remaining
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
            .unwrap_or(remaining.len());
        let (number, tail) = remaining.split_at(end);
        let Some(symbol) = tail.chars().next() else {
            return Err(PeriodError::MissingDesignator {
                input: input.to_string(),
                number: number.to_string(),
            });
        };

        let designator = scanner.accept(symbol)?;
        let tenths = scan_tenths(number, designator, input)?;
        scanner.track_fraction(designator, tenths)?;
        store(&mut p64, designator, tenths);
        remaining = &tail[symbol.len_utf8()..];
    }

    if scanner.fields == 0 || (scanner.time_side && !scanner.seen_time_field) {
        return Err(PeriodError::empty_input(input));
    }

    if p64.is_zero() {
        p64.neg = false;
    }
    p64.locate_fraction();
    p64.denormal = p64.compute_denormal();
    tracing::trace!(input, denormal = p64.denormal, "parsed period");
    Ok(p64)
}

/// Ordering and uniqueness state while walking the fields.
struct FieldScanner<'a> {
    input: &'a str,
    time_side: bool,
    seen_time_field: bool,
    previous: Option<Designator>,
    seen: Vec<Designator>,
    fraction_owner: Option<Designator>,
    fields: usize,
}

impl<'a> FieldScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            time_side: false,
            seen_time_field: false,
            previous: None,
            seen: Vec::with_capacity(7),
            fraction_owner: None,
            fields: 0,
        }
    }

    /// Resolve a designator letter and check it may appear here.
    fn accept(&mut self, symbol: char) -> Result<Designator> {
        let Some(designator) = Designator::from_symbol(symbol, self.time_side) else {
            return Err(PeriodError::UnknownDesignator {
                input: self.input.to_string(),
                designator: symbol,
            });
        };
        if designator.is_time() != self.time_side {
            return Err(PeriodError::out_of_sequence(self.input, symbol));
        }
        if self.seen.contains(&designator) {
            return Err(PeriodError::DuplicateDesignator {
                input: self.input.to_string(),
                designator: symbol,
            });
        }
        if self.previous.is_some_and(|previous| designator < previous) {
            return Err(PeriodError::out_of_sequence(self.input, symbol));
        }

        self.seen.push(designator);
        self.previous = Some(designator);
        self.seen_time_field |= self.time_side;
        self.fields += 1;
        Ok(designator)
    }

    fn track_fraction(&mut self, designator: Designator, tenths: i64) -> Result<()> {
        if tenths % 10 == 0 {
            return Ok(());
        }
        if let Some(first) = self.fraction_owner {
            return Err(PeriodError::MultipleFractions {
                input: self.input.to_string(),
                first: first.symbol(),
                second: designator.symbol(),
            });
        }
        self.fraction_owner = Some(designator);
        Ok(())
    }
}

fn store(p64: &mut Period64, designator: Designator, tenths: i64) {
    match designator {
        Designator::Year => p64.years = tenths,
        Designator::Month => p64.months = tenths,
        Designator::Week => p64.days = p64.days.saturating_add(tenths.saturating_mul(7)),
        Designator::Day => p64.days = p64.days.saturating_add(tenths),
        Designator::Hour => p64.hours = tenths,
        Designator::Minute => p64.minutes = tenths,
        Designator::Second => p64.seconds = tenths,
        Designator::NoFraction => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(text: &str) -> [i64; 6] {
        parse_wide(text).unwrap().fields()
    }

    #[test]
    fn test_full_period() {
        assert_eq!(
            fields("P3Y6M4DT12H30M5S"),
            [30, 60, 40, 120, 300, 50]
        );
    }

    #[test]
    fn test_signs() {
        assert!(parse_wide("-P1D").unwrap().neg);
        assert!(!parse_wide("+P1D").unwrap().neg);
        assert!(!parse_wide("-P0D").unwrap().neg);
        assert!(!parse_wide("-P0").unwrap().neg);
    }

    #[test]
    fn test_weeks_fold_into_days() {
        assert_eq!(fields("P2W"), [0, 0, 140, 0, 0, 0]);
        assert_eq!(fields("P1W3D"), [0, 0, 100, 0, 0, 0]);
        assert_eq!(fields("P1.5W"), [0, 0, 105, 0, 0, 0]);
    }

    #[test]
    fn test_month_and_minute() {
        assert_eq!(fields("P1M"), [0, 10, 0, 0, 0, 0]);
        assert_eq!(fields("PT1M"), [0, 0, 0, 0, 10, 0]);
        assert_eq!(fields("P1MT1M"), [0, 10, 0, 0, 10, 0]);
    }

    #[test]
    fn test_zero_forms() {
        for text in ["P0", "P0D", "PT0S", "P0Y0M0W0DT0H0M0S", "+P0Y"] {
            assert!(parse_wide(text).unwrap().is_zero(), "{text}");
        }
    }

    #[test]
    fn test_denormal_hint() {
        assert!(!parse_wide("P1Y11M").unwrap().denormal);
        assert!(parse_wide("P1Y12M").unwrap().denormal);
        assert!(parse_wide("PT90M").unwrap().denormal);
        assert!(parse_wide("P1.5YT1H").unwrap().denormal);
    }

    #[test]
    fn test_empty_and_unrecognised() {
        for text in ["", "P", "-P", "PT", "P1DT"] {
            assert!(
                matches!(parse_wide(text), Err(PeriodError::EmptyInput { .. })),
                "{text}"
            );
        }
        assert!(matches!(
            parse_wide("1Y"),
            Err(PeriodError::MissingPeriodMarker { .. })
        ));
        assert!(matches!(
            parse_wide("P1X"),
            Err(PeriodError::UnknownDesignator { designator: 'X', .. })
        ));
        assert!(matches!(
            parse_wide("P12"),
            Err(PeriodError::MissingDesignator { .. })
        ));
    }

    #[test]
    fn test_out_of_sequence() {
        for (text, symbol) in [("P1H", 'H'), ("PT1Y", 'Y'), ("P1D2Y", 'Y'), ("PT1S2H", 'H'), ("PT1D", 'D')] {
            assert_eq!(
                parse_wide(text).unwrap_err(),
                PeriodError::out_of_sequence(text, symbol),
                "{text}"
            );
        }
    }

    #[test]
    fn test_duplicates() {
        assert!(matches!(
            parse_wide("P1Y2Y"),
            Err(PeriodError::DuplicateDesignator { designator: 'Y', .. })
        ));
        assert!(matches!(
            parse_wide("PT1HT2M"),
            Err(PeriodError::DuplicateTimeMarker { .. })
        ));
    }

    #[test]
    fn test_multiple_fractions() {
        assert_eq!(
            parse_wide("P1.5Y2.5M").unwrap_err(),
            PeriodError::MultipleFractions {
                input: "P1.5Y2.5M".to_string(),
                first: 'Y',
                second: 'M',
            }
        );
        // a whole later field is fine
        assert!(parse_wide("P1.5Y2M").is_ok());
    }

    #[test]
    fn test_malformed_number_names_designator() {
        assert_eq!(
            parse_wide("P1.2.3D").unwrap_err(),
            PeriodError::malformed_number("P1.2.3D", "1.2.3", 'D')
        );
        assert_eq!(
            parse_wide("PY").unwrap_err(),
            PeriodError::malformed_number("PY", "", 'Y')
        );
    }
}
