/// The last `target.len()` bases of `candidate` together with the number of positions at which
/// they differ from `target`.
///
/// Returns `None` when `candidate` is shorter than `target`. Only substitutions are counted;
/// there is no notion of insertions or deletions.
#[inline]
pub fn aligned_mismatches<'a>(candidate: &'a str, target: &str) -> Option<(&'a str, usize)> {
    let window = suffix(candidate, target.len())?;
    let mismatches = window
        .bytes()
        .zip(target.bytes())
        .filter(|(a, b)| a != b)
        .count();
    Some((window, mismatches))
}

/// Returns the aligned end of `candidate` if it differs from `target` at exactly `budget`
/// positions.
///
/// Matching on an exact count rather than "at most" lets callers bucket reads by how many
/// substitutions they carry. The scanner buckets with [`aligned_mismatches`] directly.
#[allow(dead_code)]
pub fn match_target<'a>(candidate: &'a str, target: &str, budget: usize) -> Option<&'a str> {
    match aligned_mismatches(candidate, target) {
        Some((window, d)) if d == budget => Some(window),
        _ => None,
    }
}

/// The last `len` bytes of `candidate`, or `None` if it is too short.
#[inline]
pub fn suffix(candidate: &str, len: usize) -> Option<&str> {
    let start = candidate.len().checked_sub(len)?;
    candidate.get(start..)
}
