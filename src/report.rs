use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::tally::MatchTally;
use crate::targets::TargetSet;

/// Separates the reference from the matched subsequences in a dump file.
pub const DUMP_SEPARATOR: &str = "=====";

/// Writes one line per (target, mismatch count) pair, targets numbered from 1, followed by the
/// total number of records read.
pub fn write_counts(writer: &mut impl Write, tally: &MatchTally) -> std::io::Result<()> {
    for (target, mismatches) in (0..tally.n_targets()).cartesian_product(0..=tally.max_mismatches())
    {
        writeln!(
            writer,
            "Target: {}, Differences: {}, Count: {}",
            target + 1,
            mismatches,
            tally.count(target, mismatches)
        )?;
    }
    writeln!(writer, "Total: {}", tally.records)
}

/// The dump file name for a 1-based target number and a mismatch count.
pub fn dump_file_name(target: usize, mismatches: usize) -> String {
    format!("Target_{target}_Mismatch_{mismatches}.txt")
}

/// Writes a dump: the reference, the separator, then one subsequence per line.
pub fn write_dump(
    writer: &mut impl Write,
    reference: &str,
    subsequences: &[String],
) -> std::io::Result<()> {
    writeln!(writer, "{reference}")?;
    writeln!(writer, "{DUMP_SEPARATOR}")?;
    for s in subsequences {
        writeln!(writer, "{s}")?;
    }
    Ok(())
}

/// Writes a dump file into `dir` for every non-empty inexact bucket of `tally`, creating `dir`
/// if needed. Returns the paths written, ordered by target then mismatch count.
///
/// # Errors
///
/// Fails if the directory cannot be created or any file cannot be written.
pub fn write_subsequences(
    dir: &Path,
    tally: &MatchTally,
    targets: &TargetSet,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (target, mismatches) in (0..tally.n_targets()).cartesian_product(1..=tally.max_mismatches())
    {
        let subsequences = tally.subsequences(target, mismatches);
        if subsequences.is_empty() {
            continue;
        }
        let Some(reference) = targets.target(target + 1) else {
            continue;
        };

        if written.is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Unable to create output directory {}", dir.display()))?;
        }

        let path = dir.join(dump_file_name(target + 1, mismatches));
        let file = File::create(&path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        let mut wtr = BufWriter::new(file);

        write_dump(&mut wtr, reference, subsequences)
            .and_then(|_| wtr.flush())
            .with_context(|| format!("Unable to write {}", path.display()))?;

        debug!("Wrote {} subsequences to {}", subsequences.len(), path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn counts_table_layout() {
        let mut tally = MatchTally::new(4, 4);
        tally.records = 7;
        tally.add_match(0, 0, "");
        tally.add_match(3, 4, "ACGT");

        let mut out = Cursor::new(Vec::new());
        write_counts(&mut out, &tally).unwrap();
        let out = String::from_utf8(out.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 21);
        assert_eq!(lines[0], "Target: 1, Differences: 0, Count: 1");
        assert_eq!(lines[1], "Target: 1, Differences: 1, Count: 0");
        assert_eq!(lines[5], "Target: 2, Differences: 0, Count: 0");
        assert_eq!(lines[19], "Target: 4, Differences: 4, Count: 1");
        assert_eq!(lines[20], "Total: 7");
    }

    #[test]
    fn dump_layout() {
        let mut out = Cursor::new(Vec::new());
        write_dump(&mut out, "ACGT", &["ACGA".to_string(), "TCGT".to_string()]).unwrap();
        assert_eq!(
            String::from_utf8(out.into_inner()).unwrap(),
            "ACGT\n=====\nACGA\nTCGT\n"
        );
    }

    #[test]
    fn dump_files_round_trip_in_order() {
        let dir = assert_fs::TempDir::new().unwrap();
        let out_dir = dir.path().join("nested");
        let targets = TargetSet::default();

        let mut tally = MatchTally::new(4, 4);
        tally.add_match(1, 0, "exact matches are never dumped");
        tally.add_match(1, 2, "CCCC");
        tally.add_match(1, 2, "AAAA");
        tally.add_match(1, 2, "GGGG");

        let written = write_subsequences(&out_dir, &tally, &targets).unwrap();
        assert_eq!(written, vec![out_dir.join("Target_2_Mismatch_2.txt")]);

        let contents = std::fs::read_to_string(&written[0]).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some(targets.targets[1].as_str()));
        assert_eq!(lines.next(), Some(DUMP_SEPARATOR));
        assert_eq!(lines.collect::<Vec<_>>(), tally.subsequences(1, 2));
    }

    #[test]
    fn nothing_written_without_inexact_matches() {
        let dir = assert_fs::TempDir::new().unwrap();
        let out_dir = dir.path().join("never_created");

        let mut tally = MatchTally::new(4, 4);
        tally.add_match(0, 0, "");

        let written = write_subsequences(&out_dir, &tally, &TargetSet::default()).unwrap();
        assert!(written.is_empty());
        assert!(!out_dir.exists());
    }
}
