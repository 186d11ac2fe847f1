//! Fixed-point decimal scanning.
//!
//! Period numbers carry one implied decimal place: `"12.5"` scans to `125`.
//! Digits after the first fractional digit are truncated, never rounded.

use crate::designator::Designator;
use crate::error::{PeriodError, Result};

/// Scan a digit run with an optional `.` or `,` separator into tenths.
///
/// `input` is the whole period text, used only for error reporting.
pub(crate) fn scan_tenths(number: &str, designator: Designator, input: &str) -> Result<i64> {
    let malformed = || PeriodError::malformed_number(input, number, designator.symbol());

    let mut whole: i64 = 0;
    let mut tenths: Option<i64> = None;
    let mut seen_separator = false;
    let mut digits = 0usize;

    for ch in number.chars() {
        match ch {
            '0'..='9' => {
                let digit = i64::from(ch as u8 - b'0');
                digits += 1;
                if !seen_separator {
                    whole = whole
                        .checked_mul(10)
                        .and_then(|w| w.checked_add(digit))
                        .ok_or_else(|| PeriodError::field_overflow(designator.field_name(), input))?;
                } else if tenths.is_none() {
                    tenths = Some(digit);
                }
            }
            '.' | ',' if !seen_separator => seen_separator = true,
            _ => return Err(malformed()),
        }
    }

    if digits == 0 {
        return Err(malformed());
    }

    whole
        .checked_mul(10)
        .and_then(|w| w.checked_add(tenths.unwrap_or(0)))
        .ok_or_else(|| PeriodError::field_overflow(designator.field_name(), input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(number: &str) -> Result<i64> {
        scan_tenths(number, Designator::Day, "test")
    }

    #[test]
    fn test_whole_numbers() {
        assert_eq!(scan("0").unwrap(), 0);
        assert_eq!(scan("7").unwrap(), 70);
        assert_eq!(scan("3276").unwrap(), 32760);
    }

    #[test]
    fn test_fractions_truncate() {
        assert_eq!(scan("1.5").unwrap(), 15);
        assert_eq!(scan("1,5").unwrap(), 15);
        assert_eq!(scan("2.99").unwrap(), 29);
        assert_eq!(scan("0.05").unwrap(), 0);
        assert_eq!(scan(".5").unwrap(), 5);
        assert_eq!(scan("4.").unwrap(), 40);
    }

    #[test]
    fn test_malformed() {
        for bad in ["", ".", "1.2.3", "1,2.3", "1a", "-1", "+1"] {
            let err = scan(bad).unwrap_err();
            assert!(
                matches!(err, PeriodError::MalformedNumber { designator: 'D', .. }),
                "expected malformed number for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_too_many_digits_overflows() {
        let err = scan("99999999999999999999").unwrap_err();
        assert_eq!(err, PeriodError::field_overflow("days", "test"));
    }
}
