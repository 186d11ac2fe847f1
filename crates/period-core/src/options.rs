//! Options controlling how parsed periods are normalised.

use serde::{Deserialize, Serialize};

/// How aggressively parsing normalises the fields it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalisationMode {
    /// Keep fields as written; fail if any is out of range.
    Verbatim,
    /// Normalise precisely, but only when a field would otherwise overflow.
    Constrained,
    /// Always normalise without losing precision.
    #[default]
    Normalised,
    /// Always normalise, carrying days and months by calendar means.
    Imprecise,
}

impl NormalisationMode {
    /// Whether carries through calendar units are allowed.
    #[must_use]
    pub const fn is_precise(self) -> bool {
        !matches!(self, Self::Imprecise)
    }
}

impl std::fmt::Display for NormalisationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Verbatim => write!(f, "verbatim"),
            Self::Constrained => write!(f, "constrained"),
            Self::Normalised => write!(f, "normalised"),
            Self::Imprecise => write!(f, "imprecise"),
        }
    }
}

/// Options for [`Period::parse_with`](crate::Period::parse_with).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Normalisation applied after reading the fields.
    pub mode: NormalisationMode,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that keep the fields exactly as written.
    #[must_use]
    pub fn verbatim() -> Self {
        Self {
            mode: NormalisationMode::Verbatim,
        }
    }

    /// Set the normalisation mode.
    #[must_use]
    pub fn with_mode(mut self, mode: NormalisationMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_normalised() {
        assert_eq!(ParseOptions::new().mode, NormalisationMode::Normalised);
        assert_eq!(ParseOptions::verbatim().mode, NormalisationMode::Verbatim);
        assert!(NormalisationMode::Constrained.is_precise());
        assert!(!NormalisationMode::Imprecise.is_precise());
    }

    #[test]
    fn test_options_serde() {
        let options = ParseOptions::new().with_mode(NormalisationMode::Imprecise);
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"mode":"imprecise"}"#);
        let back: ParseOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
