//! Placeholder substitution over resolved matches

use crate::types::Match;
use tracing::warn;

/// Replace every resolved span of `original` with its type placeholder.
///
/// `matches` must come from [`crate::resolve`] run over this same string.
/// Spans are rewritten from the last to the first so earlier offsets stay
/// valid. Spans that fall outside `original` or split a UTF-8 character are
/// skipped.
pub fn anonymize(original: &str, matches: &[Match<'_>]) -> String {
    if matches.is_empty() {
        return original.to_string();
    }

    let mut ordered: Vec<&Match<'_>> = matches.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = original.to_string();
    for m in ordered {
        if m.start >= m.end
            || m.end > original.len()
            || !original.is_char_boundary(m.start)
            || !original.is_char_boundary(m.end)
        {
            warn!(
                start = m.start,
                end = m.end,
                len = original.len(),
                "skipping span outside input"
            );
            continue;
        }
        result.replace_range(m.start..m.end, m.data_type.placeholder());
    }
    result
}
