//! Per-type detectors
//!
//! Every detector scans the same immutable input independently and returns
//! non-overlapping spans of its own type in ascending order. Cross-type
//! overlap is settled later by [`crate::resolve`].

use crate::checksum::{iban_checksum_valid, luhn_valid};
use crate::patterns::PatternSet;
use crate::resolve::resolve;
use crate::types::{DataType, Match};
use regex::Regex;

/// Minimum digit count of an accepted phone number
pub const PHONE_MIN_DIGITS: usize = 8;
/// Maximum digit count of an accepted phone number
pub const PHONE_MAX_DIGITS: usize = 15;

/// Trait for finding spans of one data type
pub trait Detector: Send + Sync {
    /// Type produced by this detector
    fn data_type(&self) -> DataType;

    /// Find every occurrence in `text`
    fn detect<'t>(&self, text: &'t str) -> Vec<Match<'t>>;
}

/// Collect regex hits as matches, keeping those accepted by `accept`
fn collect<'t>(
    regex: &Regex,
    data_type: DataType,
    text: &'t str,
    accept: impl Fn(&str) -> bool,
) -> Vec<Match<'t>> {
    regex
        .find_iter(text)
        .filter(|m| accept(m.as_str()))
        .map(|m| Match::new(data_type, text, m.start(), m.end()))
        .collect()
}

/// Union of several heuristic patterns, de-overlapped within the type
fn union<'t>(regexes: &[Regex], data_type: DataType, text: &'t str) -> Vec<Match<'t>> {
    let mut candidates = Vec::new();
    for re in regexes {
        candidates.extend(collect(re, data_type, text, |_| true));
    }
    resolve(candidates)
}

/// Email addresses (shape only)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailDetector;

impl Detector for EmailDetector {
    fn data_type(&self) -> DataType {
        DataType::Email
    }

    fn detect<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        // Every email contains '@'
        if memchr::memchr(b'@', text.as_bytes()).is_none() {
            return Vec::new();
        }
        collect(&PatternSet::global().email, DataType::Email, text, |_| true)
    }
}

/// Phone numbers, accepted on digit count
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneDetector;

impl PhoneDetector {
    /// Whether a candidate carries a plausible number of digits
    pub fn digit_count_valid(candidate: &str) -> bool {
        let digits = candidate.bytes().filter(u8::is_ascii_digit).count();
        (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
    }
}

impl Detector for PhoneDetector {
    fn data_type(&self) -> DataType {
        DataType::Phone
    }

    fn detect<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        collect(
            &PatternSet::global().phone,
            DataType::Phone,
            text,
            Self::digit_count_valid,
        )
    }
}

/// IBANs, accepted on mod-97 checksum
#[derive(Debug, Clone, Copy, Default)]
pub struct IbanDetector;

impl Detector for IbanDetector {
    fn data_type(&self) -> DataType {
        DataType::Iban
    }

    fn detect<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        collect(
            &PatternSet::global().iban,
            DataType::Iban,
            text,
            iban_checksum_valid,
        )
    }
}

/// Payment card numbers, accepted on Luhn checksum
#[derive(Debug, Clone, Copy, Default)]
pub struct CardDetector;

impl Detector for CardDetector {
    fn data_type(&self) -> DataType {
        DataType::CreditCard
    }

    fn detect<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        collect(
            &PatternSet::global().card,
            DataType::CreditCard,
            text,
            luhn_valid,
        )
    }
}

/// Postal addresses: street line, ZIP code or UK postcode.
///
/// Heuristic only; expect false positives on bare five-digit numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressDetector;

impl Detector for AddressDetector {
    fn data_type(&self) -> DataType {
        DataType::Address
    }

    fn detect<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        union(&PatternSet::global().address, DataType::Address, text)
    }
}

/// Credentials: keyword assignments, one-time codes, vendor key prefixes
/// and long opaque tokens.
///
/// Heuristic only; the most false-positive prone detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretDetector;

impl Detector for SecretDetector {
    fn data_type(&self) -> DataType {
        DataType::Password
    }

    fn detect<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        let patterns = PatternSet::global();
        let [assignment, rest @ ..] = &patterns.secret;

        let mut candidates: Vec<Match<'t>> = Vec::new();
        if patterns.has_secret_keyword(text) {
            candidates.extend(collect(assignment, DataType::Password, text, |_| true));
        }
        for re in rest {
            candidates.extend(collect(re, DataType::Password, text, |_| true));
        }
        resolve(candidates)
    }
}

/// All detectors in detector order
pub fn default_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(EmailDetector),
        Box::new(PhoneDetector),
        Box::new(IbanDetector),
        Box::new(CardDetector),
        Box::new(AddressDetector),
        Box::new(SecretDetector),
    ]
}

/// Detector for a single type
pub fn detector_for(data_type: DataType) -> Box<dyn Detector> {
    match data_type {
        DataType::Email => Box::new(EmailDetector),
        DataType::Phone => Box::new(PhoneDetector),
        DataType::Iban => Box::new(IbanDetector),
        DataType::CreditCard => Box::new(CardDetector),
        DataType::Address => Box::new(AddressDetector),
        DataType::Password => Box::new(SecretDetector),
    }
}
