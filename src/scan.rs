use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::adaptor::AdaptorLocator;
use crate::file::FileSummary;
use crate::matcher::aligned_mismatches;
use crate::reader::{open_records, ReadRecord, RecordFraming};
use crate::summary::RunSummary;
use crate::tally::MatchTally;
use crate::targets::TargetSet;
use crate::{report, summary};

/// Matches reads against a [`TargetSet`].
pub struct Scanner<'a> {
    targets: &'a TargetSet,
    locator: AdaptorLocator<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(targets: &'a TargetSet) -> Self {
        Self {
            targets,
            locator: AdaptorLocator::new(&targets.adaptor),
        }
    }

    /// Creates an empty tally sized for this scanner's targets.
    pub fn tally(&self) -> MatchTally {
        MatchTally::new(self.targets.targets.len(), self.targets.max_mismatches)
    }

    /// Adds one read to `tally`.
    ///
    /// The part of the read before the adaptor is compared against the end of every target. A
    /// target is recorded in the bucket of its exact mismatch count when that count is within
    /// the budget. Reads without the adaptor only increase the record count.
    pub fn analyze(&self, record: &ReadRecord, tally: &mut MatchTally) {
        tally.records += 1;

        let Some(candidate) = self.locator.prefix(&record.seq) else {
            return;
        };
        tally.adaptor_hits += 1;

        // the distance is computed once per target; it can only equal one budget
        for (idx, target) in self.targets.targets.iter().enumerate() {
            let Some((subsequence, mismatches)) = aligned_mismatches(candidate, target) else {
                continue;
            };
            if mismatches > self.targets.max_mismatches {
                continue;
            }

            debug!(
                "{} matched target {} with {} differences:\n  {}\n  {}",
                record.header,
                idx + 1,
                mismatches,
                subsequence,
                target
            );
            tally.add_match(idx, mismatches, subsequence);
        }
    }
}

/// Scans a single file: counts matches, prints the counts table to `writer` and writes the
/// mismatched subsequences into `output_dir`.
///
/// # Errors
///
/// Fails if the input cannot be opened or parsed, or if any output cannot be written. Nothing is
/// printed for a file whose records could not all be read.
pub fn scan_file(
    path: &str,
    targets: &TargetSet,
    framing: RecordFraming,
    output_dir: &Path,
    writer: &mut impl Write,
) -> Result<FileSummary> {
    info!("Scanning {path} with {framing:?} framing");
    let now = std::time::Instant::now();

    let scanner = Scanner::new(targets);
    let mut tally = scanner.tally();

    for record in open_records(path, framing)? {
        let record = record.with_context(|| format!("Unable to read records from {path}"))?;
        scanner.analyze(&record, &mut tally);

        if tally.records % 50000 == 0 {
            info!("Processed: {}", tally.records)
        }
    }

    report::write_counts(writer, &tally)?;
    let dumps = report::write_subsequences(output_dir, &tally, targets)?;

    let elapsed = now.elapsed().as_secs_f64();
    info!(
        "Stats: {} reads, {} with adaptor, {} matched, {:.1}s runtime",
        tally.records,
        tally.adaptor_hits,
        tally.total_matches(),
        elapsed
    );

    Ok(FileSummary::new(path, &tally, dumps, elapsed))
}

/// Scans every file independently. With more than one input, each file's counts are headed by
/// its path and its subsequence dumps go in a subdirectory named after the file (see
/// [`dump_dirs`]).
pub fn scan_files(
    files: &[String],
    targets: &TargetSet,
    framing: RecordFraming,
    output_dir: &str,
    json: &Option<String>,
    writer: &mut impl Write,
) -> Result<()> {
    let now = std::time::Instant::now();
    let mut run = RunSummary::new();

    for (file, dir) in files.iter().zip(dump_dirs(files, Path::new(output_dir))) {
        if files.len() > 1 {
            writeln!(writer, "File: {file}")?;
        }

        let file_summary = scan_file(file, targets, framing, &dir, writer)?;
        run.files.push(file_summary);
    }

    writer.flush()?;
    run.elapsed = now.elapsed().as_secs_f64();

    if let Some(path) = json {
        summary::write_summary(path, &run)?;
        info!("Wrote summary to {path}");
    }

    Ok(())
}

/// The dump directory of every input. A single input writes straight into `output_dir`; several
/// inputs each get a subdirectory named after the file stem, suffixed with the input's 1-based
/// position when another input has the same stem.
fn dump_dirs(files: &[String], output_dir: &Path) -> Vec<PathBuf> {
    if files.len() == 1 {
        return vec![output_dir.to_path_buf()];
    }

    let stems: Vec<String> = files.iter().map(|f| file_stem(f)).collect();
    let counts = stems.iter().counts();

    stems
        .iter()
        .enumerate()
        .map(|(i, stem)| match counts[stem] {
            1 => output_dir.join(stem),
            _ => output_dir.join(format!("{stem}_{}", i + 1)),
        })
        .collect()
}

/// The file name of `path` without its last extension.
fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::{ADAPTOR, TARGET_1, TARGET_3};

    fn record(seq: String) -> ReadRecord {
        ReadRecord {
            header: "@test".into(),
            seq,
        }
    }

    #[test]
    fn read_without_adaptor_is_only_counted_as_a_record() {
        let targets = TargetSet::default();
        let scanner = Scanner::new(&targets);
        let mut tally = scanner.tally();

        scanner.analyze(&record(format!("{TARGET_1}GGGGGGGG")), &mut tally);

        assert_eq!(tally.records, 1);
        assert_eq!(tally.adaptor_hits, 0);
        assert_eq!(tally.total_matches(), 0);
        for t in 0..4 {
            for d in 0..=4 {
                assert!(tally.subsequences(t, d).is_empty());
            }
        }
    }

    #[test]
    fn exact_and_inexact_matches_land_in_their_buckets() {
        let targets = TargetSet::default();
        let scanner = Scanner::new(&targets);
        let mut tally = scanner.tally();

        let one_off = format!("T{}", &TARGET_1[1..]);
        scanner.analyze(&record(format!("CCCC{TARGET_1}{ADAPTOR}TTTT")), &mut tally);
        scanner.analyze(&record(format!("{one_off}{ADAPTOR}")), &mut tally);

        assert_eq!(tally.records, 2);
        assert_eq!(tally.adaptor_hits, 2);
        assert_eq!(tally.count(0, 0), 1);
        assert_eq!(tally.count(0, 1), 1);
        assert_eq!(tally.subsequences(0, 1), [one_off.as_str()]);
        assert_eq!(tally.total_matches(), 2);
    }

    #[test]
    fn distances_beyond_the_budget_are_ignored() {
        let targets = TargetSet::default();
        let scanner = Scanner::new(&targets);
        let mut tally = scanner.tally();

        let five_off = format!("TTTTT{}", &TARGET_3[5..]);
        scanner.analyze(&record(format!("{five_off}{ADAPTOR}")), &mut tally);

        assert_eq!(tally.adaptor_hits, 1);
        assert_eq!(tally.total_matches(), 0);
    }

    #[test]
    fn adaptor_too_close_to_start_matches_nothing() {
        let targets = TargetSet::default();
        let scanner = Scanner::new(&targets);
        let mut tally = scanner.tally();

        scanner.analyze(&record(format!("ACGT{ADAPTOR}{TARGET_1}")), &mut tally);

        assert_eq!(tally.adaptor_hits, 1);
        assert_eq!(tally.total_matches(), 0);
    }

    #[test]
    fn smaller_budget_shrinks_the_table() {
        let targets = TargetSet::from_options(None, &[TARGET_1.to_string()], 1).unwrap();
        let scanner = Scanner::new(&targets);
        let mut tally = scanner.tally();

        let two_off = format!("TT{}", &TARGET_1[2..]);
        scanner.analyze(&record(format!("{two_off}{ADAPTOR}")), &mut tally);

        assert_eq!(tally.n_targets(), 1);
        assert_eq!(tally.max_mismatches(), 1);
        assert_eq!(tally.total_matches(), 0);
    }

    #[test]
    fn bucket_agrees_with_the_per_budget_matcher() {
        let targets = TargetSet::default();
        let scanner = Scanner::new(&targets);

        let candidates = [
            format!("GATTACA{TARGET_1}"),
            format!("T{}", &TARGET_1[1..]),
            format!("AAA{}", &TARGET_3[3..]),
            format!("CCCC{}", &TARGET_3[4..]),
        ];

        for candidate in &candidates {
            let mut tally = scanner.tally();
            scanner.analyze(&record(format!("{candidate}{ADAPTOR}")), &mut tally);

            for (idx, target) in targets.targets.iter().enumerate() {
                for budget in 0..=targets.max_mismatches {
                    let expected = crate::matcher::match_target(candidate, target, budget);
                    assert_eq!(tally.count(idx, budget), usize::from(expected.is_some()));
                    if budget > 0 {
                        let logged: Vec<&str> =
                            tally.subsequences(idx, budget).iter().map(String::as_str).collect();
                        assert_eq!(logged, expected.into_iter().collect::<Vec<_>>());
                    }
                }
            }
        }
    }

    #[test]
    fn single_input_dumps_into_the_output_dir() {
        let dirs = dump_dirs(&["a/R1.fastq".to_string()], Path::new("out"));
        assert_eq!(dirs, vec![PathBuf::from("out")]);
    }

    #[test]
    fn repeated_stems_get_distinct_dump_dirs() {
        let files = [
            "a/R1.fastq".to_string(),
            "b/R1.fastq".to_string(),
            "b/R2.fastq".to_string(),
        ];
        let dirs = dump_dirs(&files, Path::new("out"));
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("out/R1_1"),
                PathBuf::from("out/R1_2"),
                PathBuf::from("out/R2"),
            ]
        );
    }

    #[test]
    fn stem_drops_directories_and_last_extension() {
        assert_eq!(file_stem("data/T03-1_S10_L001_R2_001.fastq"), "T03-1_S10_L001_R2_001");
        assert_eq!(file_stem("reads"), "reads");
    }
}
