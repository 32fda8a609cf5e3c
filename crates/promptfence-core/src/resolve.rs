//! Overlap resolution across detectors
//!
//! First match wins: candidates are ordered by start offset, ties keep
//! emission order (detector order EMAIL, PHONE, IBAN, CREDIT_CARD, ADDRESS,
//! PASSWORD), and any candidate starting before the end of the last accepted
//! span is dropped regardless of its type.

use crate::types::Match;

/// Merge candidate spans into a sorted, non-overlapping list.
///
/// The output is a subset of `candidates`. Callers must pass candidates in
/// emission order; the sort is stable so that order decides equal starts.
pub fn resolve<'t>(mut candidates: Vec<Match<'t>>) -> Vec<Match<'t>> {
    if candidates.len() <= 1 {
        return candidates;
    }

    candidates.sort_by_key(|m| m.start);

    let mut last_end = 0usize;
    let mut resolved = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.start >= last_end {
            last_end = candidate.end;
            resolved.push(candidate);
        }
    }
    resolved
}

/// Check the resolved-set invariant: ascending and pairwise disjoint
pub fn is_resolved(matches: &[Match<'_>]) -> bool {
    matches
        .windows(2)
        .all(|pair| pair[0].start <= pair[1].start && pair[0].end <= pair[1].start)
}
