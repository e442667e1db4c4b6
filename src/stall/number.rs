//! Stall number decoding
//!
//! A stall number is decimal text such as `107` or `107.5`. The integer part,
//! left-padded with zeros to three digits, is `[floor][position...]`; the
//! optional fractional part marks a sub-stall sharing its base stall's
//! position.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Longest accepted integer part; keeps the position within `u32`.
const MAX_WHOLE_DIGITS: usize = 9;

/// Rejected stall number text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid stall number '{text}': {reason}")]
pub struct InvalidStallNumber {
    pub text: String,
    pub reason: &'static str,
}

/// A validated stall number, kept in its textual form
///
/// The text is what the directory shows and what identifies a stall when
/// several records are compared, so `107.50` and `107.5` are different stalls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StallNumber(String);

/// Decoded components of a stall number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedIdentifier {
    pub floor: u8,
    pub position: u32,
    pub is_fractional: bool,
    /// Fractional part as a value in `[0, 1)`, e.g. `0.5` for `107.5`
    pub fractional_value: Option<f64>,
}

impl StallNumber {
    /// Validate and wrap stall number text
    pub fn new(text: impl Into<String>) -> Result<Self, InvalidStallNumber> {
        let text = text.into();
        let trimmed = text.trim();
        let invalid = |reason| InvalidStallNumber {
            text: text.clone(),
            reason,
        };

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (trimmed, None),
        };

        if whole.is_empty() {
            return Err(invalid("missing integer part"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("integer part must be decimal digits"));
        }
        if whole.len() > MAX_WHOLE_DIGITS {
            return Err(invalid("integer part is too long"));
        }
        if let Some(fraction) = fraction {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("fractional part must be decimal digits"));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode into floor, position and fractional part
    ///
    /// Never fails: the text was validated on construction.
    pub fn parse(&self) -> ParsedIdentifier {
        let (whole, fraction) = match self.0.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (self.0.as_str(), None),
        };

        let padded = format!("{:0>3}", whole);
        let (floor_digit, position_digits) = padded.split_at(1);
        let floor = floor_digit.bytes().next().map_or(0, |b| b - b'0');
        let position = position_digits
            .bytes()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));

        ParsedIdentifier {
            floor,
            position,
            is_fractional: fraction.is_some(),
            fractional_value: fraction.and_then(|digits| format!("0.{}", digits).parse().ok()),
        }
    }
}

impl ParsedIdentifier {
    /// Rebuild the integer stall number (`floor * 100 + position`)
    pub fn base_number(&self) -> u32 {
        u32::from(self.floor) * 100 + self.position
    }
}

impl fmt::Display for StallNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StallNumber {
    type Err = InvalidStallNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<u32> for StallNumber {
    fn from(number: u32) -> Self {
        Self(number.to_string())
    }
}

impl<'de> Deserialize<'de> for StallNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StallNumberVisitor)
    }
}

/// Accepts the JSON number or string forms the directory endpoint emits
struct StallNumberVisitor;

impl<'de> Visitor<'de> for StallNumberVisitor {
    type Value = StallNumber;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative stall number such as 107 or 107.5")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StallNumber, E> {
        StallNumber::new(v.to_string()).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StallNumber, E> {
        StallNumber::new(v.to_string()).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<StallNumber, E> {
        if !v.is_finite() {
            return Err(E::custom("stall number must be finite"));
        }
        // `Display` for f64 prints 107.5 as "107.5" and 107.0 as "107"
        StallNumber::new(v.to_string()).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<StallNumber, E> {
        StallNumber::new(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedIdentifier {
        StallNumber::new(text).expect("valid stall number").parse()
    }

    #[test]
    fn test_parse_integer() {
        let id = parse("107");
        assert_eq!(id.floor, 1);
        assert_eq!(id.position, 7);
        assert!(!id.is_fractional);
        assert_eq!(id.fractional_value, None);
    }

    #[test]
    fn test_parse_fractional() {
        let id = parse("107.5");
        assert_eq!(id.floor, 1);
        assert_eq!(id.position, 7);
        assert!(id.is_fractional);
        assert_eq!(id.fractional_value, Some(0.5));
    }

    #[test]
    fn test_parse_pads_short_numbers() {
        // "7" pads to "007": floor 0, position 7
        let id = parse("7");
        assert_eq!(id.floor, 0);
        assert_eq!(id.position, 7);
    }

    #[test]
    fn test_parse_long_position() {
        let id = parse("3120");
        assert_eq!(id.floor, 3);
        assert_eq!(id.position, 120);
    }

    #[test]
    fn test_base_number_round_trip() {
        for n in 100..=599u32 {
            let id = StallNumber::from(n).parse();
            assert_eq!(id.base_number(), n, "round trip failed for {}", n);
        }
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(StallNumber::new("A12").is_err());
        assert!(StallNumber::new("").is_err());
        assert!(StallNumber::new("107.").is_err());
        assert!(StallNumber::new(".5").is_err());
        assert!(StallNumber::new("-101").is_err());
        assert!(StallNumber::new("1234567890").is_err());
    }

    #[test]
    fn test_trims_whitespace() {
        let number = StallNumber::new(" 204 ").unwrap();
        assert_eq!(number.as_str(), "204");
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let numbers: Vec<StallNumber> =
            serde_json::from_str(r#"[101, 107.5, "212", "212.25"]"#).unwrap();
        let texts: Vec<&str> = numbers.iter().map(StallNumber::as_str).collect();
        assert_eq!(texts, vec!["101", "107.5", "212", "212.25"]);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<StallNumber, _> = serde_json::from_str("-4");
        assert!(result.is_err());
    }
}
