//! ISO 8601 periods as exact fixed-point values.
//!
//! A [`Period`] holds years, months, days, hours, minutes and seconds with one
//! decimal place each, in a compact 14-byte value. This crate provides:
//!
//! - Parsing of `PnYnMnWnDTnHnMnS` text, with a choice of [`NormalisationMode`]
//! - Canonical text, binary and serde encodings
//! - Normalisation, either precise (exact carries only) or imprecise
//!   (30.4375-day months, 24-hour days)
//! - Addition, subtraction and rational or floating-point scaling
//! - Conversion to and from [`chrono::TimeDelta`], and addition to calendar
//!   instants through [`CalendarInstant`]
//!
//! # Example
//!
//! ```
//! use period_core::{NormalisationMode, ParseOptions, Period};
//!
//! let a = Period::parse("P1Y2M3DT4H5M6S").unwrap();
//! let b = Period::parse("P6Y5M4DT3H2M1S").unwrap();
//! assert_eq!(a.add(&b).unwrap().to_string(), "P7Y7M7DT7H7M7S");
//!
//! let verbatim = Period::parse_with("PT90M", &ParseOptions::verbatim()).unwrap();
//! assert_eq!(verbatim.to_string(), "PT90M");
//! assert_eq!(Period::parse("PT90M").unwrap().to_string(), "PT1H30M");
//!
//! let options = ParseOptions::new().with_mode(NormalisationMode::Imprecise);
//! assert_eq!(Period::parse_with("PT49H", &options).unwrap().to_string(), "P2DT1H");
//! ```
//!
//! # Errors
//!
//! Every fallible operation returns [`PeriodError`]. Parse errors carry the
//! original input text.

mod arithmetic;
mod calendar;
mod codec;
mod decimal;
mod designator;
mod error;
mod format;
mod normalise;
mod options;
mod parse;
mod period;
mod period64;

pub use calendar::CalendarInstant;
pub use codec::ENCODED_LEN;
pub use designator::Designator;
pub use error::{PeriodError, Result};
pub use format::ZERO_TEXT;
pub use options::{NormalisationMode, ParseOptions};
pub use period::Period;
