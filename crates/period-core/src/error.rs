//! Error types for period parsing, arithmetic and decoding.

use thiserror::Error;

/// Errors that can occur when parsing, computing with, or decoding periods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Empty input, or input with no period fields at all.
    #[error("cannot parse a blank period: '{input}'")]
    EmptyInput { input: String },

    /// The `P` marker is missing after the optional sign.
    #[error("'{input}': expected 'P' period mark at the start")]
    MissingPeriodMarker { input: String },

    /// The number in front of a designator is not a decimal.
    #[error("'{input}': malformed number '{number}' for designator '{designator}'")]
    MalformedNumber {
        input: String,
        number: String,
        designator: char,
    },

    /// A letter that is not one of the period designators.
    #[error("'{input}': unrecognised designator '{designator}'")]
    UnknownDesignator { input: String, designator: char },

    /// A number without a trailing designator.
    #[error("'{input}': missing designator after '{number}'")]
    MissingDesignator { input: String, number: String },

    /// A designator in the wrong half of the period or out of order.
    #[error("'{input}': designator '{designator}' is out of sequence")]
    DesignatorOutOfSequence { input: String, designator: char },

    /// A designator that occurs more than once.
    #[error("'{input}': designator '{designator}' cannot be repeated")]
    DuplicateDesignator { input: String, designator: char },

    /// A second `T` time marker.
    #[error("'{input}': 'T' time marker cannot be repeated")]
    DuplicateTimeMarker { input: String },

    /// More than one field has a fractional part.
    #[error("'{input}': '{first}' & '{second}' only the last field can have a fraction")]
    MultipleFractions {
        input: String,
        first: char,
        second: char,
    },

    /// A field is too large for the narrow representation.
    #[error("{field} overflow in '{input}'")]
    FieldOverflow { field: &'static str, input: String },

    /// Scaling produced one or more fields outside the narrow range.
    #[error("scaling overflowed {}", .fields.join(", "))]
    ScaleOverflow { fields: Vec<&'static str> },

    /// A float scale factor that is NaN or infinite.
    #[error("scale factor {factor} is not finite")]
    InvalidScaleFactor { factor: String },

    /// Binary input that does not decode to a period.
    #[error("malformed binary period: {message}")]
    MalformedBinary { message: String },

    /// Adding a period moved an instant outside the calendar's range.
    #[error("adding {period} leaves the supported date range")]
    InstantOutOfRange { period: String },
}

/// Result type alias for period operations.
pub type Result<T> = std::result::Result<T, PeriodError>;

impl PeriodError {
    /// Create an EmptyInput error.
    pub fn empty_input(input: impl Into<String>) -> Self {
        Self::EmptyInput {
            input: input.into(),
        }
    }

    /// Create a MalformedNumber error.
    pub fn malformed_number(
        input: impl Into<String>,
        number: impl Into<String>,
        designator: char,
    ) -> Self {
        Self::MalformedNumber {
            input: input.into(),
            number: number.into(),
            designator,
        }
    }

    /// Create a DesignatorOutOfSequence error.
    pub fn out_of_sequence(input: impl Into<String>, designator: char) -> Self {
        Self::DesignatorOutOfSequence {
            input: input.into(),
            designator,
        }
    }

    /// Create a FieldOverflow error.
    pub fn field_overflow(field: &'static str, input: impl Into<String>) -> Self {
        Self::FieldOverflow {
            field,
            input: input.into(),
        }
    }

    /// Create a MalformedBinary error.
    pub fn malformed_binary(message: impl Into<String>) -> Self {
        Self::MalformedBinary {
            message: message.into(),
        }
    }

    /// Whether this error came from reading period text.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput { .. }
                | Self::MissingPeriodMarker { .. }
                | Self::MalformedNumber { .. }
                | Self::UnknownDesignator { .. }
                | Self::MissingDesignator { .. }
                | Self::DesignatorOutOfSequence { .. }
                | Self::DuplicateDesignator { .. }
                | Self::DuplicateTimeMarker { .. }
                | Self::MultipleFractions { .. }
                | Self::FieldOverflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PeriodError::malformed_number("P1.2.3Y", "1.2.3", 'Y');
        assert_eq!(
            format!("{err}"),
            "'P1.2.3Y': malformed number '1.2.3' for designator 'Y'"
        );

        let err = PeriodError::field_overflow("years", "P32768Y");
        assert_eq!(format!("{err}"), "years overflow in 'P32768Y'");
    }

    #[test]
    fn test_scale_overflow_lists_fields() {
        let err = PeriodError::ScaleOverflow {
            fields: vec!["years", "hours"],
        };
        assert_eq!(format!("{err}"), "scaling overflowed years, hours");
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_parse_error_classification() {
        assert!(PeriodError::empty_input("").is_parse_error());
        assert!(PeriodError::out_of_sequence("PT1Y", 'Y').is_parse_error());
        assert!(!PeriodError::malformed_binary("short").is_parse_error());
    }
}
