/// Per-file match results: how many reads matched each target at each mismatch count, and the
/// literal aligned subsequences of every inexact match.
///
/// Targets are indexed from 0 internally; callers that present results to users add 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTally {
    counts: Vec<Vec<usize>>,
    subsequences: Vec<Vec<Vec<String>>>,
    /// Every record seen, whether or not the adaptor was present.
    pub records: usize,
    /// Records in which the adaptor was found.
    pub adaptor_hits: usize,
}

impl MatchTally {
    pub fn new(n_targets: usize, max_mismatches: usize) -> Self {
        Self {
            counts: vec![vec![0; max_mismatches + 1]; n_targets],
            subsequences: vec![vec![Vec::new(); max_mismatches + 1]; n_targets],
            records: 0,
            adaptor_hits: 0,
        }
    }

    pub fn n_targets(&self) -> usize {
        self.counts.len()
    }

    /// Inclusive upper bound of the mismatch counts tracked.
    pub fn max_mismatches(&self) -> usize {
        self.counts.first().map_or(0, |c| c.len() - 1)
    }

    /// Records one match of `target` with `mismatches` substitutions. Exact matches are only
    /// counted; inexact ones also keep the matched subsequence.
    ///
    /// # Panics
    ///
    /// If `target` or `mismatches` is outside the dimensions given to [`MatchTally::new`].
    pub fn add_match(&mut self, target: usize, mismatches: usize, subsequence: &str) {
        self.counts[target][mismatches] += 1;
        if mismatches > 0 {
            self.subsequences[target][mismatches].push(subsequence.to_string());
        }
    }

    pub fn count(&self, target: usize, mismatches: usize) -> usize {
        self.counts
            .get(target)
            .and_then(|c| c.get(mismatches))
            .copied()
            .unwrap_or(0)
    }

    /// The subsequences logged for a bucket, in the order they were seen.
    pub fn subsequences(&self, target: usize, mismatches: usize) -> &[String] {
        self.subsequences
            .get(target)
            .and_then(|s| s.get(mismatches))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The counts table, one row per target and one column per mismatch count.
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    /// Sum of all buckets of the counts table.
    pub fn total_matches(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}
