//! Binary and serde encodings of [`Period`].
//!
//! The binary layout is fixed width, 14 bytes:
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0      | 12   | years, months, days, hours, minutes, seconds as big-endian `i16` tenths |
//! | 12     | 1    | fractional digit, two's complement |
//! | 13     | 1    | fraction owner tag |
//!
//! Serde uses the canonical ISO 8601 text.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::designator::Designator;
use crate::error::{PeriodError, Result};
use crate::period::Period;

/// Length of the binary encoding.
pub const ENCODED_LEN: usize = 14;

impl Period {
    /// Encode as 14 fixed-width bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        let mut out = [0u8; ENCODED_LEN];
        for (chunk, field) in out.chunks_exact_mut(2).zip(self.tenths()) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        out[12] = self.fraction().to_be_bytes()[0];
        out[13] = self.fraction_owner().tag();
        out
    }

    /// Decode bytes written by [`Period::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::MalformedBinary`] if the buffer has the wrong
    /// length or does not describe a valid period.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ENCODED_LEN {
            return Err(PeriodError::malformed_binary(format!(
                "expected {ENCODED_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let mut tenths = [0i16; 6];
        for (field, chunk) in tenths.iter_mut().zip(bytes[..12].chunks_exact(2)) {
            *field = i16::from_be_bytes([chunk[0], chunk[1]]);
        }
        let fraction = i8::from_be_bytes([bytes[12]]);
        let owner = Designator::from_tag(bytes[13])
            .ok_or_else(|| PeriodError::malformed_binary(format!("unknown owner tag {}", bytes[13])))?;

        if tenths.contains(&i16::MIN) {
            return Err(PeriodError::malformed_binary("field is outside ±3276.7"));
        }
        if tenths.iter().any(|&v| v < 0) && tenths.iter().any(|&v| v > 0) {
            return Err(PeriodError::malformed_binary("fields have mixed signs"));
        }
        if let Some(i) = tenths.iter().position(|v| v % 10 != 0)
            && tenths[i + 1..].iter().any(|&v| v != 0)
        {
            return Err(PeriodError::malformed_binary(
                "fraction is not on the last non-zero field",
            ));
        }

        let period = Period::from_narrow_fields(tenths);
        if period.fraction() != fraction || period.fraction_owner() != owner {
            return Err(PeriodError::malformed_binary(
                "fraction does not match the field values",
            ));
        }
        Ok(period)
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Period::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_big_endian() {
        let period = Period::from_tenths([0, 0, 0, 0, 0, -15]);
        let bytes = period.to_bytes();
        assert_eq!(&bytes[..10], &[0; 10]);
        assert_eq!(&bytes[10..12], &(-15i16).to_be_bytes());
        assert_eq!(bytes[12], 0xFB);
        assert_eq!(bytes[13], Designator::Second.tag());
        assert_eq!(Period::from_bytes(&bytes).unwrap(), period);
    }

    #[test]
    fn test_wrong_length() {
        let err = Period::from_bytes(&[0; 13]).unwrap_err();
        assert_eq!(
            err,
            PeriodError::malformed_binary("expected 14 bytes, got 13")
        );
    }

    #[test]
    fn test_rejects_invalid_contents() {
        let mut bytes = Period::new_ymd(1, 0, 0).to_bytes();
        bytes[2] = 0xFF; // months = -256
        assert!(Period::from_bytes(&bytes).is_err());

        let mut bytes = Period::ZERO.to_bytes();
        bytes[13] = 42;
        assert!(Period::from_bytes(&bytes).is_err());

        let mut bytes = Period::from_tenths([15, 0, 0, 0, 0, 0]).to_bytes();
        bytes[12] = 3;
        assert!(Period::from_bytes(&bytes).is_err());

        // years 1.5 with months 1
        let mut bytes = Period::from_tenths([15, 0, 0, 0, 0, 0]).to_bytes();
        bytes[3] = 10;
        assert!(Period::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_rejects_most_negative_field() {
        // -3276.8 years with fractional digit -8 owned by years
        let mut bytes = [0u8; ENCODED_LEN];
        bytes[0] = 0x80;
        bytes[12] = 0xF8;
        bytes[13] = Designator::Year.tag();
        assert_eq!(
            Period::from_bytes(&bytes).unwrap_err(),
            PeriodError::malformed_binary("field is outside ±3276.7")
        );

        let lowest = Period::from_tenths([-32767, 0, 0, 0, 0, 0]);
        let decoded = Period::from_bytes(&lowest.to_bytes()).unwrap();
        assert_eq!(decoded.negate().years_tenths(), i16::MAX);
    }

    #[test]
    fn test_serde_uses_text() {
        let period = Period::new(1, 2, 0, 0, 0, 30);
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, r#""P1Y2MT30S""#);
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);

        assert!(serde_json::from_str::<Period>(r#""1Y""#).is_err());
    }
}
