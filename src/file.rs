use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::tally::MatchTally;

/// Results of scanning one input file, as recorded in the JSON summary.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
pub struct FileSummary {
    pub file_path: String,
    pub records: usize,
    pub adaptor_hits: usize,
    pub matched: usize,
    /// One row per target, one column per mismatch count
    pub counts: Vec<Vec<usize>>,
    pub dumps: Vec<String>,
    pub elapsed: f64,
}

impl FileSummary {
    pub fn new(path: &str, tally: &MatchTally, dumps: Vec<PathBuf>, elapsed: f64) -> Self {
        Self {
            file_path: std::fs::canonicalize(path)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| path.to_string()),
            records: tally.records,
            adaptor_hits: tally.adaptor_hits,
            matched: tally.total_matches(),
            counts: tally.counts().to_vec(),
            dumps: dumps.iter().map(|p| p.display().to_string()).collect(),
            elapsed,
        }
    }
}
