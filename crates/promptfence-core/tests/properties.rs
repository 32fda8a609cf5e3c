//! Property tests for validators, resolution and anonymization

use promptfence_core::resolve::is_resolved;
use promptfence_core::{
    anonymize, detect, iban_checksum_valid, luhn_valid, resolve, DataType, Fence, Match,
    PolicyConfig,
};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "hello",
    "please review",
    "a@b.com",
    "jane.doe@example.org",
    "+1-555-123-4567",
    "DE89370400440532013000",
    "GB82 WEST 1234 5698 7654 32",
    "DE89\u{a0}3704\u{a0}0044\u{a0}0532\u{a0}0130\u{a0}00",
    "GB82\tWEST\t1234\t5698\t7654\t32",
    "4111 1111 1111 1111",
    "4111\n1111\n1111\n1111",
    "4111\t1111\t1111\t1111",
    "5500\u{a0}0000\u{a0}0000\u{a0}0004",
    "221 Baker Street",
    "SW1A 1AA",
    "password=hunter2",
    "ghp_abcdefghijklmnopqrstuvwx",
    "123456",
    "ünïcödé",
    "\n",
];

/// Append a Luhn check digit to `body`
fn with_check_digit(body: &[u32]) -> Vec<u32> {
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    let mut digits = body.to_vec();
    digits.push((10 - sum % 10) % 10);
    digits
}

fn digits_to_string(digits: &[u32]) -> String {
    digits
        .iter()
        .map(|d| char::from_digit(*d, 10).unwrap())
        .collect()
}

/// Build a valid IBAN from a country code and BBAN
fn make_iban(country: &str, bban: &str) -> String {
    let rearranged = format!("{bban}{country}00");
    let mut remainder = 0u32;
    for c in rearranged.chars() {
        let value = c.to_digit(36).unwrap();
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }
    format!("{country}{:02}{bban}", 98 - remainder)
}

/// Separators seen in pasted numbers
const SEPARATORS: &[&str] = &[" ", "\u{a0}", "\t", "\n", "\u{2009}"];

fn group_by_four(s: &str, sep: &str) -> String {
    s.as_bytes()
        .chunks(4)
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect::<Vec<_>>()
        .join(sep)
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..12).prop_map(|parts| parts.join(" "))
}

fn span_strategy(len: usize) -> impl Strategy<Value = (usize, usize, usize)> {
    (0..len, 1..8usize, 0..DataType::COUNT)
        .prop_map(move |(start, width, t)| (start, (start + width).min(len), t))
        .prop_filter("non-empty span", |(start, end, _)| start < end)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_luhn_construction_validates(body in prop::collection::vec(0u32..10, 12..=18)) {
        let digits = with_check_digit(&body);
        prop_assert!(luhn_valid(&digits_to_string(&digits)));
    }

    #[test]
    fn prop_luhn_ignores_whitespace_grouping(
        body in prop::collection::vec(0u32..10, 15..=15),
        sep in prop::sample::select(SEPARATORS),
    ) {
        let number = digits_to_string(&with_check_digit(&body));
        let grouped = group_by_four(&number, sep);
        prop_assert!(luhn_valid(&grouped));

        let text = format!("card {grouped} thanks");
        let matches = detect(&text);
        prop_assert_eq!(matches.len(), 1);
        prop_assert_eq!(matches[0].data_type, DataType::CreditCard);
        prop_assert_eq!(matches[0].text, grouped.as_str());
    }

    #[test]
    fn prop_luhn_single_digit_edit_breaks(
        body in prop::collection::vec(0u32..10, 12..=18),
        pos in any::<prop::sample::Index>(),
        delta in 1u32..10,
    ) {
        let mut digits = with_check_digit(&body);
        let i = pos.index(digits.len() - 1);
        digits[i] = (digits[i] + delta) % 10;
        prop_assert!(!luhn_valid(&digits_to_string(&digits)));
    }

    #[test]
    fn prop_iban_grouping_is_ignored(
        country in "[A-Z]{2}",
        bban in "[0-9A-Z]{11,30}",
        sep in prop::sample::select(SEPARATORS),
    ) {
        let iban = make_iban(&country, &bban);
        prop_assert!(iban_checksum_valid(&iban));
        prop_assert!(iban_checksum_valid(&group_by_four(&iban, sep)));
        prop_assert!(iban_checksum_valid(&iban.to_lowercase()));
    }

    #[test]
    fn prop_iban_check_digit_edit_breaks(
        country in "[A-Z]{2}",
        bban in "[0-9]{11,30}",
        delta in 1u32..10,
    ) {
        let iban = make_iban(&country, &bban);
        let mut bytes = iban.into_bytes();
        // Third character is the first check digit
        let d = u32::from(bytes[2] - b'0');
        bytes[2] = b'0' + ((d + delta) % 10) as u8;
        let edited = String::from_utf8(bytes).unwrap();
        prop_assert!(!iban_checksum_valid(&edited));
    }

    #[test]
    fn prop_resolver_output_is_sorted_disjoint_subset(
        spans in prop::collection::vec(span_strategy(36), 0..24),
    ) {
        let text = "0123456789abcdefghijklmnopqrstuvwxyz";
        let candidates: Vec<Match<'_>> = spans
            .iter()
            .map(|&(start, end, t)| Match::new(DataType::ALL[t], text, start, end))
            .collect();

        let resolved = resolve(candidates.clone());
        prop_assert!(is_resolved(&resolved));
        for m in &resolved {
            prop_assert!(candidates.contains(m));
        }
        if !candidates.is_empty() {
            prop_assert!(!resolved.is_empty());
        }
    }

    #[test]
    fn prop_detect_is_resolved_and_sliced(text in text_strategy()) {
        let matches = detect(&text);
        prop_assert!(is_resolved(&matches));
        for m in &matches {
            prop_assert_eq!(&text[m.start..m.end], m.text);
        }
    }

    #[test]
    fn prop_anonymize_keeps_text_outside_spans(text in text_strategy()) {
        let matches = detect(&text);
        let mut expected = String::new();
        let mut cursor = 0;
        for m in &matches {
            expected.push_str(&text[cursor..m.start]);
            expected.push_str(m.data_type.placeholder());
            cursor = m.end;
        }
        expected.push_str(&text[cursor..]);
        prop_assert_eq!(anonymize(&text, &matches), expected);
    }

    #[test]
    fn prop_inspection_is_deterministic(
        text in text_strategy(),
        preset in prop::sample::select(vec!["personal", "finance", "health", "workplace", "developer"]),
        enable_warn in any::<bool>(),
        enable_block in any::<bool>(),
    ) {
        let config = PolicyConfig::for_preset_id(preset)
            .unwrap()
            .with_warn(enable_warn)
            .with_block(enable_block);
        let fence = Fence::new(config);
        let first = fence.inspect(&text);
        let second = fence.inspect(&text);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.anonymized(&text), second.anonymized(&text));
    }

    #[test]
    fn prop_arbitrary_text_never_panics(text in "\\PC{0,256}") {
        let matches = detect(&text);
        prop_assert!(is_resolved(&matches));
        let _ = anonymize(&text, &matches);
    }
}
