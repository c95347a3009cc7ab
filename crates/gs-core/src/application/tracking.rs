use std::fmt;

use serde::{Deserialize, Serialize};

use super::ApplicationError;

/// Human-facing reference such as `DL2024001`: two-letter prefix, four-digit
/// year, zero-padded sequence of at least three digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingNumber(String);

impl TrackingNumber {
    pub fn new(prefix: &str, year: i32, sequence: u32) -> Self {
        Self(format!("{prefix}{year}{sequence:03}"))
    }

    /// Accepts user input, ignoring surrounding whitespace and letter case.
    pub fn parse(raw: &str) -> Result<Self, ApplicationError> {
        let value = raw.trim().to_ascii_uppercase();
        let bytes = value.as_bytes();
        let well_formed = bytes.len() >= 9
            && bytes[..2].iter().all(u8::is_ascii_uppercase)
            && bytes[2..].iter().all(u8::is_ascii_digit);
        if well_formed {
            Ok(Self(value))
        } else {
            Err(ApplicationError::InvalidTrackingNumber(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_prefix_year_and_padded_sequence() {
        assert_eq!(TrackingNumber::new("DL", 2024, 1).as_str(), "DL2024001");
        assert_eq!(TrackingNumber::new("PP", 2025, 1234).as_str(), "PP20251234");
    }

    #[test]
    fn parse_normalizes_case() {
        assert_eq!(
            TrackingNumber::parse(" dl2024001 ").unwrap(),
            TrackingNumber::new("DL", 2024, 1)
        );
        assert!(TrackingNumber::parse("DL24").is_err());
        assert!(TrackingNumber::parse("2024DL001").is_err());
    }
}
