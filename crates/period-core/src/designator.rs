//! ISO 8601 period designators.

use std::fmt;

/// The unit markers of an ISO 8601 period, in the order they must appear.
///
/// `NoFraction` is the owner tag used when no field carries a fractional
/// part. Ordering follows declaration order, so `Year < Month < ... < Second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Designator {
    /// No field owns a fraction.
    #[default]
    NoFraction,
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl Designator {
    /// Resolve a designator letter on the given side of the `T` marker.
    ///
    /// `M` means months before `T` and minutes after it. Side checking for
    /// the other letters is left to the caller so that it can report the
    /// letter as out of sequence.
    #[must_use]
    pub const fn from_symbol(symbol: char, time_side: bool) -> Option<Self> {
        match symbol {
            'Y' => Some(Self::Year),
            'M' if time_side => Some(Self::Minute),
            'M' => Some(Self::Month),
            'W' => Some(Self::Week),
            'D' => Some(Self::Day),
            'H' => Some(Self::Hour),
            'S' => Some(Self::Second),
            _ => None,
        }
    }

    /// The designator letter; `NoFraction` has none and renders as a space.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::NoFraction => ' ',
            Self::Year => 'Y',
            Self::Month | Self::Minute => 'M',
            Self::Week => 'W',
            Self::Day => 'D',
            Self::Hour => 'H',
            Self::Second => 'S',
        }
    }

    /// Field name used in error messages.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::NoFraction => "none",
            Self::Year => "years",
            Self::Month => "months",
            Self::Week => "weeks",
            Self::Day => "days",
            Self::Hour => "hours",
            Self::Minute => "minutes",
            Self::Second => "seconds",
        }
    }

    /// Whether this designator belongs after the `T` marker.
    #[must_use]
    pub const fn is_time(self) -> bool {
        matches!(self, Self::Hour | Self::Minute | Self::Second)
    }

    /// Whether this designator belongs before the `T` marker.
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Week | Self::Day)
    }

    /// Whether this designator appears in `set`.
    #[must_use]
    pub fn is_one_of(self, set: &[Designator]) -> bool {
        set.contains(&self)
    }

    /// Stable tag used by the binary encoding.
    #[must_use]
    pub(crate) const fn tag(self) -> u8 {
        match self {
            Self::NoFraction => 0,
            Self::Year => 1,
            Self::Month => 2,
            Self::Week => 3,
            Self::Day => 4,
            Self::Hour => 5,
            Self::Minute => 6,
            Self::Second => 7,
        }
    }

    #[must_use]
    pub(crate) const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::NoFraction),
            1 => Some(Self::Year),
            2 => Some(Self::Month),
            3 => Some(Self::Week),
            4 => Some(Self::Day),
            5 => Some(Self::Hour),
            6 => Some(Self::Minute),
            7 => Some(Self::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_and_minute_share_a_letter() {
        assert_eq!(Designator::from_symbol('M', false), Some(Designator::Month));
        assert_eq!(Designator::from_symbol('M', true), Some(Designator::Minute));
        assert_eq!(Designator::Minute.symbol(), 'M');
        assert_eq!(Designator::from_symbol('X', false), None);
    }

    #[test]
    fn test_sides() {
        assert!(Designator::Year.is_date());
        assert!(Designator::Week.is_date());
        assert!(Designator::Second.is_time());
        assert!(!Designator::Day.is_time());
        assert!(!Designator::NoFraction.is_time());
        assert!(!Designator::NoFraction.is_date());
    }

    #[test]
    fn test_ordering_follows_iso_sequence() {
        assert!(Designator::Year < Designator::Month);
        assert!(Designator::Week < Designator::Day);
        assert!(Designator::Hour < Designator::Second);
        assert!(Designator::Hour.is_one_of(&[Designator::Hour, Designator::Day]));
        assert!(!Designator::Hour.is_one_of(&[Designator::Year]));
    }

    #[test]
    fn test_tag_roundtrip() {
        for tag in 0..8 {
            let designator = Designator::from_tag(tag).unwrap();
            assert_eq!(designator.tag(), tag);
        }
        assert_eq!(Designator::from_tag(8), None);
    }
}
