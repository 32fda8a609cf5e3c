//! Data type registry and match spans

use crate::error::FenceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Category of regulated identifier.
///
/// Declaration order is detector order; the derived `Ord` follows it and is
/// relied on for deterministic tie-breaks and type-set ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum DataType {
    /// Email address
    Email = 0,
    /// Phone number
    Phone = 1,
    /// International bank account number
    Iban = 2,
    /// Payment card number
    CreditCard = 3,
    /// Postal address fragment
    Address = 4,
    /// Password, API key or other credential
    Password = 5,
}

impl DataType {
    /// Number of data types
    pub const COUNT: usize = 6;

    /// All data types in detector order
    pub const ALL: [DataType; Self::COUNT] = [
        Self::Email,
        Self::Phone,
        Self::Iban,
        Self::CreditCard,
        Self::Address,
        Self::Password,
    ];

    /// Stable wire identifier (`EMAIL`, `CREDIT_CARD`, ...)
    pub const fn id(self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Iban => "IBAN",
            Self::CreditCard => "CREDIT_CARD",
            Self::Address => "ADDRESS",
            Self::Password => "PASSWORD",
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::Iban => "Bank Account (IBAN)",
            Self::CreditCard => "Credit Card",
            Self::Address => "Physical Address",
            Self::Password => "Password/API Key",
        }
    }

    /// Redaction placeholder substituted by the anonymizer
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Email => "[EMAIL]",
            Self::Phone => "[PHONE]",
            Self::Iban => "[IBAN]",
            Self::CreditCard => "[CREDIT_CARD]",
            Self::Address => "[ADDRESS]",
            Self::Password => "[PASSWORD]",
        }
    }

    /// How much a detection of this type can be trusted
    pub const fn confidence(self) -> Confidence {
        match self {
            Self::Iban | Self::CreditCard => Confidence::Checksum,
            Self::Email | Self::Phone => Confidence::Structural,
            Self::Address | Self::Password => Confidence::Heuristic,
        }
    }

    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DataType {
    type Err = FenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FenceError::UnknownDataType(s.to_string()))
    }
}

/// Detection certainty class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Pattern plus heuristic only (address, credential)
    Heuristic,
    /// Pattern plus structural check (email shape, phone digit count)
    Structural,
    /// Pattern plus checksum (IBAN mod-97, Luhn)
    Checksum,
}

/// A detected span over one input string.
///
/// Offsets are byte offsets into the scanned `&str`, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Match<'t> {
    /// Detected type
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Matched slice of the input
    pub text: &'t str,
}

impl<'t> Match<'t> {
    /// Build a match from a span of `haystack`
    #[inline]
    pub fn new(data_type: DataType, haystack: &'t str, start: usize, end: usize) -> Self {
        Self {
            data_type,
            start,
            end,
            text: &haystack[start..end],
        }
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two spans share at least one byte
    pub fn overlaps(&self, other: &Match<'_>) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Mask the matched text for safe display
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.text.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{head}****{tail}")
    }
}

/// De-duplicated set of types present in `matches`, in detector order
pub fn detected_types(matches: &[Match<'_>]) -> BTreeSet<DataType> {
    matches.iter().map(|m| m.data_type).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_strings() {
        assert_eq!(DataType::CreditCard.id(), "CREDIT_CARD");
        assert_eq!(DataType::Email.placeholder(), "[EMAIL]");
        assert_eq!(DataType::Iban.label(), "Bank Account (IBAN)");
        assert_eq!(DataType::Password.to_string(), "PASSWORD");
    }

    #[test]
    fn test_parse_data_type() {
        assert_eq!("credit_card".parse::<DataType>().unwrap(), DataType::CreditCard);
        assert_eq!(" IBAN ".parse::<DataType>().unwrap(), DataType::Iban);
        assert!(matches!(
            "SSN".parse::<DataType>(),
            Err(FenceError::UnknownDataType(_))
        ));
    }

    #[test]
    fn test_serde_wire_ids() {
        let json = serde_json::to_string(&DataType::CreditCard).unwrap();
        assert_eq!(json, "\"CREDIT_CARD\"");
        let back: DataType = serde_json::from_str("\"ADDRESS\"").unwrap();
        assert_eq!(back, DataType::Address);
    }

    #[test]
    fn test_confidence_asymmetry() {
        assert_eq!(DataType::Iban.confidence(), Confidence::Checksum);
        assert_eq!(DataType::Phone.confidence(), Confidence::Structural);
        assert_eq!(DataType::Password.confidence(), Confidence::Heuristic);
        assert!(Confidence::Checksum > Confidence::Heuristic);
    }

    #[test]
    fn test_match_helpers() {
        let text = "key sk-live-abcdef123";
        let m = Match::new(DataType::Password, text, 4, text.len());
        assert_eq!(m.text, "sk-live-abcdef123");
        assert_eq!(m.len(), 17);
        assert_eq!(m.masked(), "sk****23");

        let short = Match::new(DataType::Password, text, 0, 3);
        assert_eq!(short.masked(), "****");
        assert!(!m.overlaps(&short));
    }

    #[test]
    fn test_detected_types_dedup() {
        let text = "a@b.co c@d.co";
        let matches = vec![
            Match::new(DataType::Email, text, 0, 6),
            Match::new(DataType::Email, text, 7, 13),
        ];
        let types = detected_types(&matches);
        assert_eq!(types.len(), 1);
        assert!(types.contains(&DataType::Email));
    }
}
