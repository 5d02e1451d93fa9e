use regex::Regex;
use thiserror::Error;

/// Illumina TruSeq read 2 adaptor, which marks the end of the insert.
pub const ADAPTOR: &str = "AGATCGGAAGAGCGTCGTGTAGGGAAA";

pub const TARGET_1: &str = "AGCTGACGTTTGTACTCCAGCG";
pub const TARGET_2: &str = "AGCTGACGTTTGTACTCCAGCGTCTCATCTTTATGCGTCAGCAGAGATTTCTGCT";
pub const TARGET_3: &str = "AGCAGAAATCTCTGCTGACGCATAAAGATGAGA";
pub const TARGET_4: &str = "AGCAGAAATCTCTGCTGACGCATAAAGATGAGACGCTGGAGTACAAACGTCAGCT";

/// The built-in targets, numbered 1..=4 in this order.
pub const TARGETS: [&str; 4] = [TARGET_1, TARGET_2, TARGET_3, TARGET_4];

/// Largest number of substitutions that is still bucketed.
pub const MAX_MISMATCHES: usize = 4;

/// The references a run matches against: one adaptor, an ordered list of targets, and the
/// inclusive upper bound of the mismatch budget.
#[derive(Debug, Clone)]
pub struct TargetSet {
    pub adaptor: String,
    pub targets: Vec<String>,
    pub max_mismatches: usize,
}

impl Default for TargetSet {
    fn default() -> Self {
        Self {
            adaptor: ADAPTOR.to_string(),
            targets: TARGETS.iter().map(|t| t.to_string()).collect(),
            max_mismatches: MAX_MISMATCHES,
        }
    }
}

impl TargetSet {
    /// Builds a target set from user supplied sequences. `None` keeps the built-in value and an
    /// empty target list keeps the built-in targets.
    ///
    /// Sequences are upper-cased and must consist only of `A`, `C`, `G`, `T` or `N`. The budget
    /// cannot exceed the length of the longest target, since no read can differ at more
    /// positions than that.
    pub fn from_options(
        adaptor: Option<&str>,
        targets: &[String],
        max_mismatches: usize,
    ) -> Result<Self, TargetError> {
        let re = Regex::new(r"^[ACGTN]+$").expect("static regex is valid");

        let check = |seq: &str| -> Option<String> {
            let seq = seq.trim().to_ascii_uppercase();
            re.is_match(&seq).then_some(seq)
        };

        let mut set = TargetSet {
            max_mismatches,
            ..TargetSet::default()
        };

        if let Some(a) = adaptor {
            set.adaptor = check(a).ok_or_else(|| TargetError::InvalidAdaptor {
                sequence: a.to_string(),
            })?;
        }

        if !targets.is_empty() {
            set.targets = targets
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    check(t).ok_or_else(|| TargetError::InvalidTarget {
                        index: i + 1,
                        sequence: t.clone(),
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        if set.targets.is_empty() {
            return Err(TargetError::Empty);
        }

        let longest = set.targets.iter().map(String::len).max().unwrap_or(0);
        if max_mismatches > longest {
            return Err(TargetError::BudgetTooLarge {
                max_mismatches,
                longest,
            });
        }

        Ok(set)
    }

    /// The reference sequence for a 1-based target number.
    pub fn target(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.targets.get(i))
            .map(String::as_str)
    }
}

#[derive(Error, Debug)]
pub enum TargetError {
    #[error("at least one target sequence is required")]
    Empty,

    #[error(
        "invalid adaptor `{sequence}`
sequences may only contain the bases A, C, G, T and N"
    )]
    InvalidAdaptor { sequence: String },

    #[error(
        "invalid sequence for target {index}: `{sequence}`
sequences may only contain the bases A, C, G, T and N"
    )]
    InvalidTarget { index: usize, sequence: String },

    #[error("a mismatch budget of {max_mismatches} exceeds the longest target ({longest} bases)")]
    BudgetTooLarge {
        max_mismatches: usize,
        longest: usize,
    },
}
