//! Checksum validation (IBAN mod-97, Luhn)
//!
//! Both validators are total: any input, including empty or garbage text,
//! yields `false` instead of an error.

/// Validate an IBAN with the ISO 7064 mod-97-10 check.
///
/// Any Unicode whitespace (including no-break spaces from web pages) is
/// ignored and letters are case-folded before checking, so
/// `"de89 3704 0044 0532 0130 00"` is accepted.
pub fn iban_checksum_valid(candidate: &str) -> bool {
    let normalized: Vec<u8> = match candidate
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.is_ascii().then(|| c.to_ascii_uppercase() as u8))
        .collect::<Option<Vec<_>>>()
    {
        Some(normalized) => normalized,
        None => return false,
    };

    if normalized.len() < 15 || normalized.len() > 34 {
        return false;
    }

    // Shape: two letters, two check digits, alphanumeric BBAN
    if !normalized[..2].iter().all(u8::is_ascii_uppercase)
        || !normalized[2..4].iter().all(u8::is_ascii_digit)
        || !normalized[4..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return false;
    }

    // Country code and check digits move to the end
    let rearranged = normalized[4..].iter().chain(&normalized[..4]);
    mod97(rearranged) == 1
}

/// Digit-wise mod 97 over the decimal expansion (A=10 .. Z=35)
fn mod97<'a>(chars: impl Iterator<Item = &'a u8>) -> u32 {
    let mut remainder = 0u32;
    for &c in chars {
        if c.is_ascii_digit() {
            remainder = (remainder * 10 + u32::from(c - b'0')) % 97;
        } else {
            let value = u32::from(c - b'A') + 10;
            remainder = (remainder * 100 + value) % 97;
        }
    }
    remainder
}

/// Validate a payment card number with the Luhn algorithm.
///
/// Whitespace of any kind and dashes are stripped, matching the separators
/// the card candidate pattern admits; the rest must be 13 to 19 ASCII digits.
#[inline]
pub fn luhn_valid(candidate: &str) -> bool {
    let digits: Vec<u32> = match candidate
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
    {
        Some(digits) => digits,
        None => return false,
    };

    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }

    let mut sum: u32 = 0;
    for (i, &d) in digits.iter().rev().enumerate() {
        let mut val = d;
        if i % 2 == 1 {
            val *= 2;
            if val > 9 {
                val -= 9;
            }
        }
        sum += val;
    }

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iban_valid() {
        assert!(iban_checksum_valid("DE89370400440532013000"));
        assert!(iban_checksum_valid("DE89 3704 0044 0532 0130 00"));
        assert!(iban_checksum_valid("de89370400440532013000"));
        assert!(iban_checksum_valid("GB82WEST12345698765432"));
        assert!(iban_checksum_valid("FR7630006000011234567890189"));
        assert!(iban_checksum_valid("NO9386011117947"));
    }

    #[test]
    fn test_iban_unicode_whitespace_groups() {
        assert!(iban_checksum_valid("DE89\u{a0}3704\u{a0}0044\u{a0}0532\u{a0}0130\u{a0}00"));
        assert!(iban_checksum_valid("DE89\t3704\t0044\t0532\t0130\t00"));
        assert!(iban_checksum_valid("GB82\nWEST\n1234\n5698\n7654\n32"));
        assert!(iban_checksum_valid("DE89\u{2009}3704\u{2009}0044\u{2009}0532\u{2009}0130\u{2009}00"));
        // Non-whitespace separators still fail the shape check
        assert!(!iban_checksum_valid("DE89\u{b7}3704\u{b7}0044\u{b7}0532\u{b7}0130\u{b7}00"));
    }

    #[test]
    fn test_iban_invalid() {
        // Wrong check digit
        assert!(!iban_checksum_valid("DE89370400440532013001"));
        assert!(!iban_checksum_valid("GB82WEST12345698765431"));
        assert!(!iban_checksum_valid("DE00370400440532013000"));
        // Length bounds
        assert!(!iban_checksum_valid("DE89"));
        assert!(!iban_checksum_valid(""));
        assert!(!iban_checksum_valid(&format!("DE89{}", "1".repeat(31))));
        // Shape
        assert!(!iban_checksum_valid("1289370400440532013000"));
        assert!(!iban_checksum_valid("DEX9370400440532013000"));
        assert!(!iban_checksum_valid("DE89-3704-0044-0532-0130-00"));
        assert!(!iban_checksum_valid("DE89370400440532013ÄÖ0"));
    }

    #[test]
    fn test_luhn_valid() {
        assert!(luhn_valid("4111111111111111"));
        assert!(luhn_valid("4111-1111-1111-1111"));
        assert!(luhn_valid("5500 0000 0000 0004"));
        assert!(luhn_valid("4222222222222"));
        assert!(luhn_valid("378282246310005"));
    }

    #[test]
    fn test_luhn_unicode_whitespace_groups() {
        assert!(luhn_valid("4111\n1111\n1111\n1111"));
        assert!(luhn_valid("4111\t1111\t1111\t1111"));
        assert!(luhn_valid("4111\u{a0}1111\u{a0}1111\u{a0}1111"));
        assert!(luhn_valid("4111\r\n1111\r\n1111\r\n1111"));
        assert!(!luhn_valid("4111\u{a0}1111\u{a0}1111\u{a0}1112"));
    }

    #[test]
    fn test_luhn_invalid() {
        assert!(!luhn_valid("1234567890123456"));
        assert!(!luhn_valid("4111111111111112"));
        // Length bounds
        assert!(!luhn_valid("79927398713"));
        assert!(!luhn_valid("41111111111111111111"));
        // Non-digit content
        assert!(!luhn_valid("4111.1111.1111.1111"));
        assert!(!luhn_valid("4111 1111 1111 111a"));
        assert!(!luhn_valid(""));
    }
}
