//! Pre-compiled candidate patterns
//!
//! All patterns use explicit `[0-9]` classes so that digits are ASCII only
//! and byte offsets line up with the validators.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Email: local part, `@`, dotted domain, alphabetic TLD of two or more
pub(crate) const EMAIL: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

/// Phone candidate: digit-rich run starting and ending on a digit
pub(crate) const PHONE_CANDIDATE: &str = r"\+?[0-9][0-9\s().-]{6,}[0-9]";

/// IBAN candidate: country, check digits, 2-7 groups of four, optional tail
pub(crate) const IBAN_CANDIDATE: &str =
    r"\b[A-Za-z]{2}[0-9]{2}(?:\s?[A-Za-z0-9]{4}){2,7}(?:\s?[A-Za-z0-9]{1,4})?\b";

/// Card candidate: 3-4 groups of four digits, optionally space/dash separated
pub(crate) const CARD_CANDIDATE: &str = r"\b(?:[0-9]{4}[\s-]?){2,3}[0-9]{4}\b";

/// Street number, one to three words, street suffix
pub(crate) const ADDRESS_STREET: &str = r"(?i)\b[0-9]{1,5}\s+(?:[a-z]+\s+){1,3}(?:street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct|way|place|pl|terrace|close)\b\.?";

/// US ZIP or ZIP+4
pub(crate) const ADDRESS_ZIP: &str = r"\b[0-9]{5}(?:-[0-9]{4})?\b";

/// UK postcode shape (`SW1A 1AA`, `M1 1AE`)
pub(crate) const ADDRESS_UK_POSTCODE: &str = r"\b[A-Z]{1,2}[0-9][A-Z0-9]?\s?[0-9][A-Z]{2}\b";

/// Keyword-prefixed credential assignment
pub(crate) const SECRET_ASSIGNMENT: &str =
    r"(?i)\b(?:password|passwd|pwd|api[_-]?key|secret|token)\s*[:=]\s*\S+";

/// Six-digit one-time code
pub(crate) const SECRET_OTP: &str = r"\b[0-9]{6}\b";

/// Vendor-style secret prefixes (Stripe, GitHub, AWS, Slack)
pub(crate) const SECRET_VENDOR: &str = r"\b(?:(?:sk|pk|rk)[-_](?:live|test)[-_][A-Za-z0-9]{8,}|gh[pousr]_[A-Za-z0-9]{20,}|AKIA[0-9A-Z]{16}|xox[abprs]-[A-Za-z0-9-]{10,})";

/// Bare alphanumeric run of 32 or more characters
pub(crate) const SECRET_BARE_TOKEN: &str = r"\b[A-Za-z0-9]{32,}\b";

/// Literals that must occur before [`SECRET_ASSIGNMENT`] can match
pub(crate) const SECRET_KEYWORDS: [&str; 6] = ["password", "passwd", "pwd", "api", "secret", "token"];

/// Compiled pattern table shared by every detector
pub struct PatternSet {
    pub(crate) email: Regex,
    pub(crate) phone: Regex,
    pub(crate) iban: Regex,
    pub(crate) card: Regex,
    pub(crate) address: [Regex; 3],
    pub(crate) secret: [Regex; 4],
    pub(crate) secret_keywords: AhoCorasick,
}

impl PatternSet {
    /// Compile every pattern.
    ///
    /// Patterns are constants, so a failure here is a programming error.
    fn build() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("Invalid built-in pattern");

        let secret_keywords = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostFirst)
            .build(SECRET_KEYWORDS)
            .expect("Failed to build Aho-Corasick");

        Self {
            email: compile(EMAIL),
            phone: compile(PHONE_CANDIDATE),
            iban: compile(IBAN_CANDIDATE),
            card: compile(CARD_CANDIDATE),
            address: [
                compile(ADDRESS_STREET),
                compile(ADDRESS_ZIP),
                compile(ADDRESS_UK_POSTCODE),
            ],
            secret: [
                compile(SECRET_ASSIGNMENT),
                compile(SECRET_OTP),
                compile(SECRET_VENDOR),
                compile(SECRET_BARE_TOKEN),
            ],
            secret_keywords,
        }
    }

    /// Process-wide compiled patterns
    pub fn global() -> &'static PatternSet {
        &PATTERNS
    }

    /// Whether `text` contains a credential keyword (case-insensitive)
    #[inline]
    pub fn has_secret_keyword(&self, text: &str) -> bool {
        self.secret_keywords.is_match(text)
    }

    /// Total number of compiled patterns
    pub fn pattern_count(&self) -> usize {
        4 + self.address.len() + self.secret.len()
    }
}

static PATTERNS: Lazy<PatternSet> = Lazy::new(PatternSet::build);
