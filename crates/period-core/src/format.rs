//! Canonical ISO 8601 rendering.

use std::fmt;

use crate::period::Period;

/// Text of every zero period.
pub const ZERO_TEXT: &str = "P0D";

impl fmt::Display for Period {
    /// Writes `[-]P[nY][nM][nD][T[nH][nM][nS]]`, or `P0D` for zero.
    ///
    /// Zero fields are omitted and a fractional digit is written only when
    /// it is non-zero. Days are never rewritten as weeks.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str(ZERO_TEXT);
        }
        if self.is_negative() {
            f.write_str("-")?;
        }
        f.write_str("P")?;

        let [years, months, days, hours, minutes, seconds] = self.tenths();
        write_field(f, years, 'Y')?;
        write_field(f, months, 'M')?;
        write_field(f, days, 'D')?;

        if hours != 0 || minutes != 0 || seconds != 0 {
            f.write_str("T")?;
            write_field(f, hours, 'H')?;
            write_field(f, minutes, 'M')?;
            write_field(f, seconds, 'S')?;
        }
        Ok(())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, tenths: i16, symbol: char) -> fmt::Result {
    if tenths == 0 {
        return Ok(());
    }
    let magnitude = i32::from(tenths).abs();
    let (whole, fraction) = (magnitude / 10, magnitude % 10);
    if fraction == 0 {
        write!(f, "{whole}{symbol}")
    } else {
        write!(f, "{whole}.{fraction}{symbol}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(Period::ZERO.to_string(), "P0D");
        assert_eq!(Period::ZERO.negate().to_string(), "P0D");
    }

    #[test]
    fn test_fields() {
        assert_eq!(Period::new(3, 6, 4, 12, 30, 5).to_string(), "P3Y6M4DT12H30M5S");
        assert_eq!(Period::new_ymd(0, 1, 0).to_string(), "P1M");
        assert_eq!(Period::new_hms(0, 1, 0).to_string(), "PT1M");
        assert_eq!(Period::new_ymd(0, 0, 14).to_string(), "P14D");
    }

    #[test]
    fn test_negative_and_fractional() {
        assert_eq!(Period::new_hms(-2, -30, 0).to_string(), "-PT2H30M");
        assert_eq!(
            Period::from_tenths([0, 0, 0, 0, 0, -15]).to_string(),
            "-PT1.5S"
        );
        assert_eq!(
            Period::from_tenths([32767, 0, 0, 0, 0, 0]).to_string(),
            "P3276.7Y"
        );
        assert_eq!(Period::from_tenths([0, 0, 0, 0, 0, 5]).to_string(), "PT0.5S");
    }
}
