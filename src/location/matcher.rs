//! Fixed (non-regex) substring matching.
//!
//! An empty needle is contained in every haystack and occurs at offset 0.

use super::types::Candidate;

/// True iff `needle` occurs as a contiguous substring of `haystack`.
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

/// Byte offset of the first occurrence of `needle`, or `None` if absent.
pub fn earliest_index(haystack: &str, needle: &str) -> Option<usize> {
    haystack.find(needle)
}

/// Pick the candidate whose name starts earliest in `input`.
///
/// Offsets are recomputed against `input`. Among candidates sharing the
/// minimum offset the first one in `candidates` order wins. Candidates whose
/// name does not occur in `input` are never picked. Returns `None` only when
/// no candidate occurs.
pub fn pick_earliest<'a>(input: &str, candidates: &[Candidate<'a>]) -> Option<Candidate<'a>> {
    let mut best: Option<Candidate<'a>> = None;
    for c in candidates {
        let Some(offset) = earliest_index(input, &c.entry.name) else {
            continue;
        };
        // Strict `<` keeps the earlier candidate on ties.
        if best.map_or(true, |b| offset < b.offset) {
            best = Some(Candidate { entry: c.entry, offset });
        }
    }
    best
}
