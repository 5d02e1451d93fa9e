use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::file::FileSummary;

/// Everything a `scan` invocation produced, written with `--json`.
#[derive(Serialize, Deserialize, Debug)]
pub struct RunSummary {
    pub version: String,
    pub date: String,
    pub elapsed: f64,
    pub files: Vec<FileSummary>,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            version: crate::cli::VERSION.to_string(),
            date: format!("{:?}", chrono::offset::Local::now()),
            elapsed: 0.0,
            files: Vec::new(),
        }
    }
}

/// Serialises `summary` as pretty-printed JSON to `output`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_summary(output: &str, summary: &RunSummary) -> Result<()> {
    let file = File::create(output).with_context(|| format!("Unable to create {output}"))?;
    let mut wtr = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut wtr, summary).context("Could not serialize summary")?;
    wtr.flush()?;
    Ok(())
}
